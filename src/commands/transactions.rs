// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{CategoryLookup, month_bounds, transactions_in_range};
use crate::db::{load_categories, load_transactions};
use crate::error::Error;
use crate::icons;
use crate::models::{Kind, Transaction, check_amount};
use crate::settings::{CurrencyFormat, get_currency};
use crate::utils::{
    date_or_today, maybe_print_json, parse_amount, parse_id, parse_kind, parse_month,
    pretty_table, resolve_category,
};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, user_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add_from_args(conn, user_id, sub)?,
        Some(("list", sub)) => list(conn, user_id, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            remove(conn, user_id, id)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

/// What the user supplies for a new transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: Kind,
    pub amount: Decimal,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub date: NaiveDate,
}

fn add_from_args(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = date_or_today(sub.get_one::<String>("date"))?;
    let category = sub
        .get_one::<String>("category")
        .map(|c| resolve_category(conn, user_id, c, kind))
        .transpose()?;
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let id = add(
        conn,
        user_id,
        &NewTransaction {
            kind,
            amount,
            category_id: category.as_ref().map(|c| c.id),
            description,
            date,
        },
    )?;
    let fmt = get_currency(conn, user_id)?;
    println!(
        "Recorded {} {} on {}{} (id {})",
        kind,
        fmt.format(amount),
        date,
        category
            .map(|c| format!(" in '{}'", c.name))
            .unwrap_or_default(),
        id
    );
    Ok(())
}

/// Inserts a transaction after checking the amount range and that the
/// category, if any, belongs to the profile and has the same kind.
pub fn add(conn: &Connection, user_id: i64, new: &NewTransaction) -> Result<i64> {
    check_amount(new.amount)?;
    if let Some(cid) = new.category_id {
        let cat = crate::utils::category_by_id(conn, user_id, cid)?;
        if cat.kind != new.kind {
            return Err(Error::KindMismatch {
                category: cat.name,
                category_kind: cat.kind,
                kind: new.kind,
            }
            .into());
        }
    }
    conn.execute(
        "INSERT INTO transactions(user_id, kind, amount, category_id, description, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user_id,
            new.kind,
            new.amount.to_string(),
            new.category_id,
            new.description,
            new.date
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(user_id, id, kind = %new.kind, date = %new.date, "recorded transaction");
    Ok(id)
}

pub fn remove(conn: &Connection, user_id: i64, id: i64) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    if n == 0 {
        return Err(Error::NotFound(format!("Transaction {}", id)).into());
    }
    tracing::info!(user_id, id, "removed transaction");
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: NaiveDate,
    pub kind: Kind,
    pub amount: Decimal,
    pub category: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

/// Turns snapshot transactions into display rows, resolving category names.
pub fn to_rows(transactions: &[&Transaction], lookup: &CategoryLookup<'_>) -> Vec<TransactionRow> {
    transactions
        .iter()
        .map(|t| {
            let display = t.category_id.map(|cid| lookup.display(cid));
            TransactionRow {
                id: t.id,
                date: t.date,
                kind: t.kind,
                amount: t.amount,
                category: display.as_ref().map(|d| d.name.clone()),
                icon: display.map(|d| d.icon),
                description: t.description.clone(),
            }
        })
        .collect()
}

pub fn query_rows(
    conn: &Connection,
    user_id: i64,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let transactions = load_transactions(conn, user_id)?;
    let categories = load_categories(conn, user_id)?;
    let lookup = CategoryLookup::new(&categories);

    let mut selected: Vec<&Transaction> = match sub.get_one::<String>("month") {
        Some(month) => {
            let (start, end) = month_bounds(parse_month(month)?);
            transactions_in_range(&transactions, start, end)
        }
        None => transactions.iter().collect(),
    };
    if let Some(kind) = sub.get_one::<String>("kind") {
        let kind = parse_kind(kind)?;
        selected.retain(|t| t.kind == kind);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        selected.truncate(*limit);
    }
    Ok(to_rows(&selected, &lookup))
}

pub fn print_rows(rows: &[TransactionRow], fmt: &CurrencyFormat) {
    let data = rows
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.to_string(),
                r.kind.to_string(),
                fmt.format(r.kind.signed(r.amount)),
                match (&r.icon, &r.category) {
                    (Some(icon), Some(name)) => icons::label(icon, name),
                    _ => String::new(),
                },
                r.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Kind", "Amount", "Category", "Description"],
            data
        )
    );
}

fn list(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let rows = query_rows(conn, user_id, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        print_rows(&rows, &get_currency(conn, user_id)?);
    }
    Ok(())
}
