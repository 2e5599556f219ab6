// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::CategoryLookup;
use crate::commands::transactions::to_rows;
use crate::db::{load_categories, load_transactions};
use crate::models::Transaction;
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, user_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, user_id, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    // Oldest first, the order a ledger is read in.
    let mut transactions = load_transactions(conn, user_id)?;
    transactions.reverse();
    let categories = load_categories(conn, user_id)?;
    let lookup = CategoryLookup::new(&categories);
    let refs: Vec<&Transaction> = transactions.iter().collect();
    let rows = to_rows(&refs, &lookup);

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "kind", "amount", "category", "description"])?;
            for r in &rows {
                wtr.write_record([
                    r.id.to_string(),
                    r.date.to_string(),
                    r.kind.to_string(),
                    r.amount.to_string(),
                    r.category.clone().unwrap_or_default(),
                    r.description.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|r| {
                    json!({
                        "id": r.id,
                        "date": r.date.to_string(),
                        "kind": r.kind,
                        "amount": r.amount.to_string(),
                        "category": r.category,
                        "description": r.description,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            anyhow::bail!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    tracing::info!(user_id, count = rows.len(), out = %out, "exported transactions");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
