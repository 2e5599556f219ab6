// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::error::Error;
use crate::models::{Category, Kind, check_amount};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Optional `--date` argument, defaulting to today.
pub fn date_or_today(s: Option<&String>) -> Result<NaiveDate> {
    match s {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// `YYYY-MM` to the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// A money amount as entered by the user: a decimal between zero and
/// [`MAX_AMOUNT`](crate::models::MAX_AMOUNT). `-0` comes back as plain zero.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    check_amount(d)?;
    Ok(if d.is_zero() { Decimal::ZERO } else { d })
}

pub fn parse_kind(s: &str) -> Result<Kind> {
    Ok(s.parse::<Kind>()?)
}

pub fn parse_id(s: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid id '{}'", s))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn fmt_percent(d: Decimal) -> String {
    format!("{:.1}%", d.round_dp(1))
}

/// Looks a category up by id within a profile.
pub fn category_by_id(conn: &Connection, user_id: i64, id: i64) -> Result<Category> {
    conn.query_row(
        "SELECT id, user_id, name, icon, color, kind, is_default
         FROM categories WHERE id=?1 AND user_id=?2",
        params![id, user_id],
        |r| {
            Ok(Category {
                id: r.get(0)?,
                user_id: r.get(1)?,
                name: r.get(2)?,
                icon: r.get(3)?,
                color: r.get(4)?,
                kind: r.get(5)?,
                is_default: r.get(6)?,
            })
        },
    )
    .optional()?
    .ok_or_else(|| Error::NotFound(format!("Category {}", id)).into())
}

/// Resolves `--category`, accepting either an id or a name. Names are matched
/// case-insensitively within the given kind.
pub fn resolve_category(conn: &Connection, user_id: i64, raw: &str, kind: Kind) -> Result<Category> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return category_by_id(conn, user_id, id);
    }
    let id: i64 = conn
        .query_row(
            "SELECT id FROM categories WHERE user_id=?1 AND kind=?2 AND lower(name)=lower(?3)
             ORDER BY id LIMIT 1",
            params![user_id, kind, raw],
            |r| r.get(0),
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("{} category '{}'", kind, raw)))?;
    category_by_id(conn, user_id, id)
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
