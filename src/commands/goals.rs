// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Error;
use crate::icons;
use crate::models::{Rgb, SavingsGoal};
use crate::settings::get_currency;
use crate::utils::{
    fmt_percent, maybe_print_json, parse_amount, parse_date, parse_decimal, parse_id,
    pretty_table,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, user_id: i64, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let target = parse_amount(sub.get_one::<String>("target").unwrap())?;
            let deadline = sub
                .get_one::<String>("deadline")
                .map(|d| parse_date(d))
                .transpose()?;
            let icon = sub.get_one::<String>("icon").unwrap().trim();
            let color: Rgb = sub.get_one::<String>("color").unwrap().parse()?;
            let id = add(conn, user_id, name, target, deadline, icon, color)?;
            println!("Created goal '{}' (id {})", name, id);
        }
        Some(("list", sub)) => list(conn, user_id, sub)?,
        Some(("contribute", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
            let goal = contribute(conn, user_id, id, amount)?;
            let fmt = get_currency(conn, user_id)?;
            if goal.is_completed {
                println!("Goal '{}' reached: {}", goal.name, fmt.format(goal.current_amount));
            } else {
                println!(
                    "Added {} to '{}' ({} of {})",
                    fmt.format(amount),
                    goal.name,
                    fmt.format(goal.current_amount),
                    fmt.format(goal.target_amount)
                );
            }
        }
        Some(("edit", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let mut goal = get(conn, user_id, id)?;
            if let Some(name) = sub.get_one::<String>("name") {
                goal.name = name.trim().to_string();
            }
            if let Some(target) = sub.get_one::<String>("target") {
                goal.target_amount = parse_amount(target)?;
            }
            if let Some(deadline) = sub.get_one::<String>("deadline") {
                goal.deadline = Some(parse_date(deadline)?);
            }
            goal.is_completed = goal.current_amount >= goal.target_amount;
            save(conn, &goal)?;
            println!("Updated goal {}", id);
        }
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let n = conn.execute(
                "DELETE FROM savings_goals WHERE id=?1 AND user_id=?2",
                params![id, user_id],
            )?;
            if n == 0 {
                return Err(Error::NotFound(format!("Goal {}", id)).into());
            }
            tracing::info!(user_id, id, "removed goal");
            println!("Removed goal {}", id);
        }
        _ => {}
    }
    Ok(())
}

pub fn add(
    conn: &Connection,
    user_id: i64,
    name: &str,
    target: Decimal,
    deadline: Option<NaiveDate>,
    icon: &str,
    color: Rgb,
) -> Result<i64> {
    if name.is_empty() {
        anyhow::bail!("Goal name cannot be empty");
    }
    conn.execute(
        "INSERT INTO savings_goals(user_id, name, target_amount, icon, color, deadline)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![user_id, name, target.to_string(), icon, color, deadline],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(user_id, id, %target, "created goal");
    Ok(id)
}

fn row_to_goal(r: &rusqlite::Row<'_>) -> Result<SavingsGoal> {
    let target: String = r.get(3)?;
    let current: String = r.get(4)?;
    Ok(SavingsGoal {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        target_amount: parse_decimal(&target)?,
        current_amount: parse_decimal(&current)?,
        icon: r.get(5)?,
        color: r.get(6)?,
        deadline: r.get(7)?,
        is_completed: r.get(8)?,
    })
}

const GOAL_COLUMNS: &str = "id, user_id, name, target_amount, current_amount, icon, color, deadline, is_completed";

pub fn get(conn: &Connection, user_id: i64, id: i64) -> Result<SavingsGoal> {
    let sql = format!(
        "SELECT {} FROM savings_goals WHERE id=?1 AND user_id=?2",
        GOAL_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![id, user_id])?;
    match rows.next()? {
        Some(r) => row_to_goal(r),
        None => Err(Error::NotFound(format!("Goal {}", id)).into()),
    }
}

/// Newest first.
pub fn load_goals(conn: &Connection, user_id: i64) -> Result<Vec<SavingsGoal>> {
    let sql = format!(
        "SELECT {} FROM savings_goals WHERE user_id=?1 ORDER BY created_at DESC, id DESC",
        GOAL_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![user_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(row_to_goal(r)?);
    }
    Ok(out)
}

fn save(conn: &Connection, goal: &SavingsGoal) -> Result<()> {
    if goal.name.is_empty() {
        anyhow::bail!("Goal name cannot be empty");
    }
    conn.execute(
        "UPDATE savings_goals
         SET name=?1, target_amount=?2, current_amount=?3, deadline=?4, is_completed=?5,
             updated_at=datetime('now')
         WHERE id=?6 AND user_id=?7",
        params![
            goal.name,
            goal.target_amount.to_string(),
            goal.current_amount.to_string(),
            goal.deadline,
            goal.is_completed,
            goal.id,
            goal.user_id
        ],
    )
    .with_context(|| format!("Update goal {}", goal.id))?;
    Ok(())
}

pub fn contribute(conn: &Connection, user_id: i64, id: i64, amount: Decimal) -> Result<SavingsGoal> {
    let mut goal = get(conn, user_id, id)?;
    goal.contribute(amount)?;
    save(conn, &goal)?;
    tracing::info!(user_id, id, %amount, completed = goal.is_completed, "goal contribution");
    Ok(goal)
}

fn list(conn: &Connection, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let goals = load_goals(conn, user_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        return Ok(());
    }
    let fmt = get_currency(conn, user_id)?;
    let data = goals
        .iter()
        .map(|g| {
            vec![
                g.id.to_string(),
                icons::label(&g.icon, &g.name),
                fmt.format(g.current_amount),
                fmt.format(g.target_amount),
                fmt_percent(g.progress().min(Decimal::ONE_HUNDRED)),
                g.deadline.map(|d| d.to_string()).unwrap_or_default(),
                if g.is_completed { "done".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Goal", "Saved", "Target", "Progress", "Deadline", ""],
            data
        )
    );
    Ok(())
}
