// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

pub const DEFAULT_CURRENCY: &str = "BRL";

/// How amounts are rendered for a profile. Passed explicitly to anything
/// that prints money; nothing reads it from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyFormat {
    pub code: String,
    pub symbol: String,
    pub thousands: char,
    pub decimal: char,
}

impl CurrencyFormat {
    pub fn for_code(code: &str) -> Self {
        let code = code.trim().to_uppercase();
        let (symbol, thousands, decimal) = match code.as_str() {
            "BRL" => ("R$".to_string(), '.', ','),
            "USD" => ("$".to_string(), ',', '.'),
            "EUR" => ("€".to_string(), '.', ','),
            "GBP" => ("£".to_string(), ',', '.'),
            _ => (code.clone(), ',', '.'),
        };
        CurrencyFormat {
            code,
            symbol,
            thousands,
            decimal,
        }
    }

    /// `R$ 1.234,56`, `-$ 12.00`, ...
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = format!("{:.2}", rounded.abs());
        let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(self.thousands);
            }
            grouped.push(ch);
        }
        format!("{}{} {}{}{}", sign, self.symbol, grouped, self.decimal, frac)
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::for_code(DEFAULT_CURRENCY)
    }
}

pub fn get_currency(conn: &Connection, user_id: i64) -> Result<CurrencyFormat> {
    let code: String = conn
        .query_row(
            "SELECT currency FROM profiles WHERE id=?1",
            params![user_id],
            |r| r.get(0),
        )
        .with_context(|| format!("Profile {} not found", user_id))?;
    Ok(CurrencyFormat::for_code(&code))
}

pub fn set_currency(conn: &Connection, user_id: i64, code: &str) -> Result<CurrencyFormat> {
    let fmt = CurrencyFormat::for_code(code);
    if fmt.code.len() != 3 || !fmt.code.chars().all(|c| c.is_ascii_alphabetic()) {
        anyhow::bail!("Invalid currency code '{}', expected three letters", code.trim());
    }
    conn.execute(
        "UPDATE profiles SET currency=?1 WHERE id=?2",
        params![fmt.code, user_id],
    )?;
    tracing::info!(user_id, currency = %fmt.code, "currency updated");
    Ok(fmt)
}
