// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &mut Connection, user_id: i64, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("clear", _)) = m.subcommand() {
        let removed = clear(conn, user_id)?;
        println!(
            "Cleared {} transactions, {} goals and {} piggy bank entries",
            removed.transactions, removed.goals, removed.piggy_entries
        );
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Cleared {
    pub transactions: usize,
    pub goals: usize,
    pub piggy_entries: usize,
}

/// Wipes a profile's activity. Categories and settings survive; the piggy
/// bank stays but is emptied.
pub fn clear(conn: &mut Connection, user_id: i64) -> Result<Cleared> {
    let tx = conn.transaction()?;
    let transactions = tx.execute("DELETE FROM transactions WHERE user_id=?1", params![user_id])?;
    let goals = tx.execute("DELETE FROM savings_goals WHERE user_id=?1", params![user_id])?;
    let piggy_entries = tx.execute(
        "DELETE FROM piggy_bank_transactions WHERE user_id=?1",
        params![user_id],
    )?;
    tx.execute(
        "UPDATE piggy_bank SET balance='0', updated_at=datetime('now') WHERE user_id=?1",
        params![user_id],
    )?;
    tx.commit()?;
    tracing::warn!(user_id, transactions, goals, piggy_entries, "cleared profile data");
    Ok(Cleared {
        transactions,
        goals,
        piggy_entries,
    })
}
