// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn date_arg() -> Arg {
    opt("date", "Reference date YYYY-MM-DD (default: today)")
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .about("Personal income/expense tracking with savings goals and a piggy bank")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("TALLYBOOK_DB")
                .help("Path to the SQLite database"),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .global(true)
                .default_value("default")
                .help("Profile whose data to use (created on first use)"),
        )
        .subcommand(Command::new("init").about("Create the database and profile"))
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(req("name", "Category name"))
                        .arg(req("kind", "income|expense"))
                        .arg(opt("icon", "Icon name").default_value("circle"))
                        .arg(opt("color", "Color #RRGGBB").default_value("#888888")),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(opt("kind", "Only income|expense")),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(req("id", "Category id"))
                        .arg(opt("name", "New name"))
                        .arg(opt("icon", "New icon name"))
                        .arg(opt("color", "New color #RRGGBB")),
                )
                .subcommand(Command::new("rm").arg(req("id", "Category id"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(req("kind", "income|expense"))
                        .arg(req("amount", "Amount, not negative"))
                        .arg(date_arg())
                        .arg(opt("category", "Category id or name"))
                        .arg(opt("description", "Free text")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(opt("month", "Only YYYY-MM"))
                        .arg(opt("kind", "Only income|expense"))
                        .arg(opt("limit", "At most N rows").value_parser(value_parser!(usize))),
                ))
                .subcommand(Command::new("rm").arg(req("id", "Transaction id"))),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(req("name", "Goal name"))
                        .arg(req("target", "Target amount"))
                        .arg(opt("deadline", "YYYY-MM-DD"))
                        .arg(opt("icon", "Icon name").default_value("target"))
                        .arg(opt("color", "Color #RRGGBB").default_value("#10B981")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("contribute")
                        .arg(req("id", "Goal id"))
                        .arg(req("amount", "Amount to add")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(req("id", "Goal id"))
                        .arg(opt("name", "New name"))
                        .arg(opt("target", "New target amount"))
                        .arg(opt("deadline", "New deadline YYYY-MM-DD")),
                )
                .subcommand(Command::new("rm").arg(req("id", "Goal id"))),
        )
        .subcommand(
            Command::new("piggy")
                .about("Piggy bank")
                .subcommand(
                    Command::new("deposit")
                        .arg(req("amount", "Amount"))
                        .arg(opt("description", "Free text")),
                )
                .subcommand(
                    Command::new("withdraw")
                        .arg(req("amount", "Amount"))
                        .arg(opt("description", "Free text")),
                )
                .subcommand(json_flags(Command::new("status"))),
        )
        .subcommand(
            Command::new("report")
                .about("Totals, monthly series and category breakdowns")
                .subcommand(json_flags(Command::new("summary").arg(date_arg())))
                .subcommand(json_flags(
                    Command::new("monthly").arg(date_arg()).arg(
                        opt("months", "Number of months")
                            .value_parser(value_parser!(u32))
                            .default_value("6"),
                    ),
                ))
                .subcommand(json_flags(
                    Command::new("breakdown")
                        .arg(date_arg())
                        .arg(opt("kind", "income|expense").default_value("expense")),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("Profile settings")
                .subcommand(Command::new("show"))
                .subcommand(Command::new("currency").arg(req("code", "Currency code, e.g. BRL"))),
        )
        .subcommand(
            Command::new("data")
                .about("Bulk data operations")
                .subcommand(
                    Command::new("clear")
                        .about("Delete transactions, goals and piggy bank history"),
                ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .arg(opt("format", "csv|json").default_value("csv"))
                    .arg(req("out", "Output path")),
            ),
        )
        .subcommand(Command::new("doctor").about("Check data consistency"))
}
