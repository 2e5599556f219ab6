// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::settings::{get_currency, set_currency};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, user_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let name: String = conn.query_row(
                "SELECT name FROM profiles WHERE id=?1",
                params![user_id],
                |r| r.get(0),
            )?;
            let fmt = get_currency(conn, user_id)?;
            println!(
                "{}",
                pretty_table(
                    &["Setting", "Value"],
                    vec![
                        vec!["profile".into(), name],
                        vec!["currency".into(), fmt.code.clone()],
                        vec!["symbol".into(), fmt.symbol.clone()],
                        vec!["example".into(), fmt.format(rust_decimal::Decimal::new(123456, 2))],
                    ],
                )
            );
        }
        Some(("currency", sub)) => {
            let fmt = set_currency(conn, user_id, sub.get_one::<String>("code").unwrap())?;
            println!("Currency set to {} ({})", fmt.code, fmt.symbol);
        }
        _ => {}
    }
    Ok(())
}
