// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use tallybook::{cli, commands, db};

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    setup_logging();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_path = matches.get_one::<String>("db").map(PathBuf::from);
    let mut conn = db::open_or_init(db_path.as_deref())?;
    let profile = matches.get_one::<String>("profile").unwrap();
    let user_id = db::profile_id(&conn, profile)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            let path = match db_path {
                Some(p) => p,
                None => db::db_path()?,
            };
            println!(
                "Database initialized at {} (profile '{}')",
                path.display(),
                profile
            );
        }
        Some(("category", sub)) => commands::categories::handle(&conn, user_id, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, user_id, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&conn, user_id, sub)?,
        Some(("piggy", sub)) => commands::piggy::handle(&mut conn, user_id, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, user_id, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, user_id, sub)?,
        Some(("data", sub)) => commands::data::handle(&mut conn, user_id, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, user_id, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, user_id)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
