// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{PiggyBank, PiggyBankEntry, PiggyMove};
use crate::settings::get_currency;
use crate::utils::{maybe_print_json, parse_amount, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &mut Connection, user_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("deposit", sub)) => apply_from_args(conn, user_id, PiggyMove::Deposit, sub)?,
        Some(("withdraw", sub)) => apply_from_args(conn, user_id, PiggyMove::Withdraw, sub)?,
        Some(("status", sub)) => status(conn, user_id, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn load_piggy_bank(conn: &Connection, user_id: i64) -> Result<PiggyBank> {
    let (id, balance): (i64, String) = conn
        .query_row(
            "SELECT id, balance FROM piggy_bank WHERE user_id=?1",
            params![user_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .with_context(|| format!("No piggy bank for profile {}", user_id))?;
    Ok(PiggyBank {
        id,
        user_id,
        balance: parse_decimal(&balance)?,
    })
}

/// Newest first.
pub fn load_entries(conn: &Connection, user_id: i64) -> Result<Vec<PiggyBankEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, kind, amount, description, created_at
         FROM piggy_bank_transactions WHERE user_id=?1 ORDER BY created_at DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let amount: String = r.get(3)?;
        out.push(PiggyBankEntry {
            id: r.get(0)?,
            user_id: r.get(1)?,
            kind: r.get(2)?,
            amount: parse_decimal(&amount)?,
            description: r.get(4)?,
            created_at: r.get(5)?,
        });
    }
    Ok(out)
}

/// Moves money in or out of the piggy bank. The balance update and the ledger
/// entry commit together. Returns the new balance.
pub fn apply(
    conn: &mut Connection,
    user_id: i64,
    mv: PiggyMove,
    amount: Decimal,
    description: Option<&str>,
) -> Result<Decimal> {
    let tx = conn.transaction()?;
    let bank = load_piggy_bank(&tx, user_id)?;
    let balance = bank.after(mv, amount)?;
    tx.execute(
        "UPDATE piggy_bank SET balance=?1, updated_at=datetime('now') WHERE id=?2",
        params![balance.to_string(), bank.id],
    )?;
    tx.execute(
        "INSERT INTO piggy_bank_transactions(user_id, kind, amount, description)
         VALUES (?1, ?2, ?3, ?4)",
        params![user_id, mv, amount.to_string(), description],
    )?;
    tx.commit()?;
    tracing::info!(user_id, %mv, %amount, %balance, "piggy bank updated");
    Ok(balance)
}

fn apply_from_args(
    conn: &mut Connection,
    user_id: i64,
    mv: PiggyMove,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());
    let balance = apply(conn, user_id, mv, amount, description)?;
    let fmt = get_currency(conn, user_id)?;
    let verb = match mv {
        PiggyMove::Deposit => "Deposited",
        PiggyMove::Withdraw => "Withdrew",
    };
    println!(
        "{} {}; piggy bank now holds {}",
        verb,
        fmt.format(amount),
        fmt.format(balance)
    );
    Ok(())
}

#[derive(Serialize)]
struct Status {
    balance: Decimal,
    entries: Vec<PiggyBankEntry>,
}

fn status(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let status = Status {
        balance: load_piggy_bank(conn, user_id)?.balance,
        entries: load_entries(conn, user_id)?,
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &status)? {
        return Ok(());
    }
    let fmt = get_currency(conn, user_id)?;
    println!("Piggy bank balance: {}", fmt.format(status.balance));
    let data = status
        .entries
        .iter()
        .map(|e| {
            let signed = match e.kind {
                PiggyMove::Deposit => e.amount,
                PiggyMove::Withdraw => -e.amount,
            };
            vec![
                e.created_at.format("%Y-%m-%d %H:%M").to_string(),
                e.kind.to_string(),
                fmt.format(signed),
                e.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["When", "Move", "Amount", "Description"], data)
    );
    Ok(())
}
