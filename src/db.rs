// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Category, Kind, Rgb, Transaction};
use crate::settings::DEFAULT_CURRENCY;
use crate::utils::parse_decimal;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Tallybook", "tallybook"));

pub const DB_ENV: &str = "TALLYBOOK_DB";

/// Categories every new profile starts with: (name, icon, color, kind).
pub const DEFAULT_CATEGORIES: &[(&str, &str, Rgb, Kind)] = &[
    ("Salary", "briefcase", Rgb::new(0x10, 0xB9, 0x81), Kind::Income),
    ("Freelance", "laptop", Rgb::new(0x34, 0xD3, 0x99), Kind::Income),
    ("Investments", "trending-up", Rgb::new(0x6E, 0xE7, 0xB7), Kind::Income),
    ("Gifts", "gift", Rgb::new(0xA7, 0xF3, 0xD0), Kind::Income),
    ("Other", "plus", Rgb::new(0x05, 0x96, 0x69), Kind::Income),
    ("Food", "utensils", Rgb::new(0xF4, 0x3F, 0x5E), Kind::Expense),
    ("Transport", "car", Rgb::new(0xFB, 0x71, 0x85), Kind::Expense),
    ("Housing", "home", Rgb::new(0xFD, 0xA4, 0xAF), Kind::Expense),
    ("Leisure", "gamepad", Rgb::new(0xE1, 0x1D, 0x48), Kind::Expense),
    ("Health", "heart", Rgb::new(0xBE, 0x12, 0x3C), Kind::Expense),
    ("Education", "graduation-cap", Rgb::new(0x9F, 0x12, 0x39), Kind::Expense),
    ("Shopping", "shopping-bag", Rgb::new(0x88, 0x13, 0x37), Kind::Expense),
    ("Bills", "receipt", Rgb::new(0xF4, 0x72, 0xB6), Kind::Expense),
    ("Other", "more", Rgb::new(0xDB, 0x27, 0x77), Kind::Expense),
];

pub fn db_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(DB_ENV) {
        if !p.trim().is_empty() {
            return Ok(PathBuf::from(p));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("tallybook.sqlite"))
}

pub fn open_or_init(path: Option<&Path>) -> Result<Connection> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => db_path()?,
    };
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS profiles(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        currency TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        icon TEXT NOT NULL,
        color TEXT NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('income','expense')),
        is_default INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(user_id) REFERENCES profiles(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('income','expense')),
        amount TEXT NOT NULL,
        category_id INTEGER,
        description TEXT,
        date TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(user_id) REFERENCES profiles(id) ON DELETE CASCADE,
        FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(user_id, date);

    CREATE TABLE IF NOT EXISTS savings_goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        target_amount TEXT NOT NULL,
        current_amount TEXT NOT NULL DEFAULT '0',
        icon TEXT NOT NULL,
        color TEXT NOT NULL,
        deadline TEXT,
        is_completed INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(user_id) REFERENCES profiles(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS piggy_bank(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL UNIQUE,
        balance TEXT NOT NULL DEFAULT '0',
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(user_id) REFERENCES profiles(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS piggy_bank_transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        kind TEXT NOT NULL CHECK(kind IN ('deposit','withdraw')),
        amount TEXT NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(user_id) REFERENCES profiles(id) ON DELETE CASCADE
    );
    "#,
    )?;
    Ok(())
}

/// Id of the named profile, creating and seeding it on first use.
pub fn profile_id(conn: &Connection, name: &str) -> Result<i64> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Profile name cannot be empty");
    }
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM profiles WHERE name=?1",
            params![name],
            |r| r.get(0),
        )
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }

    // Profile, categories and piggy bank land together or not at all.
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO profiles(name, currency) VALUES (?1, ?2)",
        params![name, DEFAULT_CURRENCY],
    )?;
    let id = tx.last_insert_rowid();
    {
        let mut stmt = tx.prepare(
            "INSERT INTO categories(user_id, name, icon, color, kind, is_default)
             VALUES (?1, ?2, ?3, ?4, ?5, 1)",
        )?;
        for (cat, icon, color, kind) in DEFAULT_CATEGORIES {
            stmt.execute(params![id, cat, icon, color, kind])?;
        }
    }
    tx.execute("INSERT INTO piggy_bank(user_id) VALUES (?1)", params![id])?;
    tx.commit()?;
    tracing::info!(profile = name, id, "created profile");
    Ok(id)
}

pub fn load_categories(conn: &Connection, user_id: i64) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, icon, color, kind, is_default
         FROM categories WHERE user_id=?1 ORDER BY kind, name, id",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok(Category {
            id: r.get(0)?,
            user_id: r.get(1)?,
            name: r.get(2)?,
            icon: r.get(3)?,
            color: r.get(4)?,
            kind: r.get(5)?,
            is_default: r.get(6)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    tracing::debug!(user_id, count = out.len(), "loaded categories");
    Ok(out)
}

/// Every transaction of the profile, newest first.
pub fn load_transactions(conn: &Connection, user_id: i64) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, kind, amount, category_id, description, date, created_at
         FROM transactions WHERE user_id=?1 ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let amount: String = r.get(3)?;
        out.push(Transaction {
            id: r.get(0)?,
            user_id: r.get(1)?,
            kind: r.get(2)?,
            amount: parse_decimal(&amount)?,
            category_id: r.get(4)?,
            description: r.get(5)?,
            date: r.get(6)?,
            created_at: r.get(7)?,
        });
    }
    tracing::debug!(user_id, count = out.len(), "loaded transactions");
    Ok(out)
}
