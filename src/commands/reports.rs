// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    CategoryLookup, CategoryShare, MonthEntry, Totals, category_breakdown, month_totals,
    monthly_series, total_balance,
};
use crate::commands::piggy::load_piggy_bank;
use crate::commands::transactions::{TransactionRow, print_rows, to_rows};
use crate::db::{load_categories, load_transactions};
use crate::icons;
use crate::models::Transaction;
use crate::settings::get_currency;
use crate::utils::{date_or_today, fmt_percent, maybe_print_json, parse_kind, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

const RECENT_LIMIT: usize = 10;

pub fn handle(conn: &Connection, user_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, user_id, sub)?,
        Some(("monthly", sub)) => monthly(conn, user_id, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, user_id, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub date: NaiveDate,
    pub total_balance: Decimal,
    pub month: Totals,
    pub piggy_bank: Decimal,
    pub recent: Vec<TransactionRow>,
}

pub fn build_summary(conn: &Connection, user_id: i64, date: NaiveDate) -> Result<Summary> {
    let transactions = load_transactions(conn, user_id)?;
    let categories = load_categories(conn, user_id)?;
    let lookup = CategoryLookup::new(&categories);
    // The snapshot is already newest first.
    let recent: Vec<&Transaction> = transactions.iter().take(RECENT_LIMIT).collect();
    Ok(Summary {
        date,
        total_balance: total_balance(&transactions),
        month: month_totals(&transactions, date),
        piggy_bank: load_piggy_bank(conn, user_id)?.balance,
        recent: to_rows(&recent, &lookup),
    })
}

fn summary(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let date = date_or_today(sub.get_one::<String>("date"))?;
    let s = build_summary(conn, user_id, date)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let fmt = get_currency(conn, user_id)?;
    let month = date.format("%B %Y").to_string();
    println!(
        "{}",
        pretty_table(
            &["", "Amount"],
            vec![
                vec!["Balance".into(), fmt.format(s.total_balance)],
                vec![format!("Income ({})", month), fmt.format(s.month.income)],
                vec![format!("Expense ({})", month), fmt.format(s.month.expense)],
                vec![format!("Net ({})", month), fmt.format(s.month.balance)],
                vec!["Piggy bank".into(), fmt.format(s.piggy_bank)],
            ],
        )
    );
    if !s.recent.is_empty() {
        println!("Recent transactions");
        print_rows(&s.recent, &fmt);
    }
    Ok(())
}

pub fn monthly_entries(
    conn: &Connection,
    user_id: i64,
    date: NaiveDate,
    months: u32,
) -> Result<Vec<MonthEntry>> {
    let transactions = load_transactions(conn, user_id)?;
    let series = monthly_series(&transactions, date, months)?;
    Ok(series.iter().collect())
}

fn monthly(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let date = date_or_today(sub.get_one::<String>("date"))?;
    let months = *sub.get_one::<u32>("months").unwrap_or(&6);
    let entries = monthly_entries(conn, user_id, date, months)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &entries)? {
        return Ok(());
    }
    let fmt = get_currency(conn, user_id)?;
    let data = entries
        .iter()
        .map(|e| {
            vec![
                e.month.format("%Y-%m").to_string(),
                e.label.clone(),
                fmt.format(e.income),
                fmt.format(e.expense),
                fmt.format(e.balance),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "", "Income", "Expense", "Balance"], data)
    );
    Ok(())
}

fn breakdown(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let date = date_or_today(sub.get_one::<String>("date"))?;
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let transactions = load_transactions(conn, user_id)?;
    let categories = load_categories(conn, user_id)?;
    let rows: Vec<CategoryShare> = category_breakdown(&transactions, &categories, date, kind);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    if rows.is_empty() {
        println!("No {} recorded in {}", kind, date.format("%B %Y"));
        return Ok(());
    }
    let fmt = get_currency(conn, user_id)?;
    let data = rows
        .iter()
        .map(|r| {
            vec![
                icons::label(&r.icon, &r.name),
                r.count.to_string(),
                fmt.format(r.total),
                fmt_percent(r.percentage),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Category", "Count", "Total", "Share"], data)
    );
    Ok(())
}
