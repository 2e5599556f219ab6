// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::load_categories;
use crate::error::Error;
use crate::icons;
use crate::models::{Category, Kind, Rgb};
use crate::utils::{category_by_id, maybe_print_json, parse_id, parse_kind, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, user_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let kind = parse_kind(sub.get_one::<String>("kind").unwrap())?;
            let icon = sub.get_one::<String>("icon").unwrap().trim();
            let color: Rgb = sub.get_one::<String>("color").unwrap().parse()?;
            let id = add(conn, user_id, name, kind, icon, color)?;
            println!("Added {} category '{}' (id {})", kind, name, id);
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("kind")
                .map(|k| parse_kind(k))
                .transpose()?;
            let cats: Vec<Category> = load_categories(conn, user_id)?
                .into_iter()
                .filter(|c| kind.is_none_or(|k| c.kind == k))
                .collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            icons::label(&c.icon, &c.name),
                            c.kind.to_string(),
                            c.color.to_string(),
                            if c.is_default { "yes".into() } else { String::new() },
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Category", "Kind", "Color", "Default"], data)
                );
            }
        }
        Some(("edit", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let mut cat = category_by_id(conn, user_id, id)?;
            if let Some(name) = sub.get_one::<String>("name") {
                cat.name = name.trim().to_string();
            }
            if let Some(icon) = sub.get_one::<String>("icon") {
                cat.icon = icon.trim().to_string();
            }
            if let Some(color) = sub.get_one::<String>("color") {
                cat.color = color.parse()?;
            }
            update(conn, &cat)?;
            println!("Updated category {}", id);
        }
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let n = conn.execute(
                "DELETE FROM categories WHERE id=?1 AND user_id=?2",
                params![id, user_id],
            )?;
            if n == 0 {
                return Err(Error::NotFound(format!("Category {}", id)).into());
            }
            tracing::info!(user_id, id, "removed category");
            println!("Removed category {}", id);
        }
        _ => {}
    }
    Ok(())
}

pub fn add(
    conn: &Connection,
    user_id: i64,
    name: &str,
    kind: Kind,
    icon: &str,
    color: Rgb,
) -> Result<i64> {
    if name.is_empty() {
        anyhow::bail!("Category name cannot be empty");
    }
    conn.execute(
        "INSERT INTO categories(user_id, name, icon, color, kind, is_default)
         VALUES (?1, ?2, ?3, ?4, ?5, 0)",
        params![user_id, name, icon, color, kind],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(user_id, id, %kind, "added category");
    Ok(id)
}

/// Kind is fixed at creation; only display fields change.
pub fn update(conn: &Connection, cat: &Category) -> Result<()> {
    if cat.name.is_empty() {
        anyhow::bail!("Category name cannot be empty");
    }
    conn.execute(
        "UPDATE categories SET name=?1, icon=?2, color=?3 WHERE id=?4 AND user_id=?5",
        params![cat.name, cat.icon, cat.color, cat.id, cat.user_id],
    )?;
    Ok(())
}
