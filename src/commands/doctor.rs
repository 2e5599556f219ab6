// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::CategoryLookup;
use crate::db::{load_categories, load_transactions};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// Consistency problems the store does not prevent on its own.
pub fn find_issues(conn: &Connection, user_id: i64) -> Result<Vec<Vec<String>>> {
    let transactions = load_transactions(conn, user_id)?;
    let categories = load_categories(conn, user_id)?;
    let lookup = CategoryLookup::new(&categories);

    let mut rows = Vec::new();
    for t in &transactions {
        let Some(cid) = t.category_id else {
            continue;
        };
        match lookup.get(cid) {
            // 1) Category no longer in the profile
            None => rows.push(vec![
                "missing_category".into(),
                format!("tx {} on {} -> category {}", t.id, t.date, cid),
            ]),
            // 2) Kind disagrees with the category's kind
            Some(c) if c.kind != t.kind => rows.push(vec![
                "kind_mismatch".into(),
                format!(
                    "tx {} is {} but '{}' (id {}) is {}",
                    t.id, t.kind, c.name, c.id, c.kind
                ),
            ]),
            Some(_) => {}
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection, user_id: i64) -> Result<()> {
    let rows = find_issues(conn, user_id)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
