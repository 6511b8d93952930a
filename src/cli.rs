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
            .help("Print one JSON object per line"),
    )
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("from").long("from").help("Earliest date, inclusive (YYYY-MM-DD)"))
        .arg(Arg::new("to").long("to").help("Latest date, inclusive (YYYY-MM-DD)"))
        .arg(
            Arg::new("service")
                .long("service")
                .default_value("All")
                .help("All, Bridal or Mehandi"),
        )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn event_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
        .arg(Arg::new("client").long("client").required(true))
        .arg(Arg::new("event").long("event").required(true))
        .arg(Arg::new("service").long("service").required(true).help("Bridal or Mehandi"))
        .arg(Arg::new("amount").long("amount").required(true))
        .arg(Arg::new("notes").long("notes"))
}

fn expense_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
        .arg(Arg::new("name").long("name").required(true))
        .arg(Arg::new("description").long("description").help("Defaults to the expense name"))
        .arg(Arg::new("service").long("service").required(true).help("Bridal or Mehandi"))
        .arg(Arg::new("amount").long("amount").required(true))
        .arg(Arg::new("notes").long("notes"))
}

fn export_args(cmd: Command) -> Command {
    filter_args(cmd)
        .arg(Arg::new("out").long("out").help("Output path (defaults to the standard file name)"))
        .arg(
            Arg::new("raw")
                .long("raw")
                .action(ArgAction::SetTrue)
                .help("Write text fields unquoted (legacy layout)"),
        )
}

pub fn build_cli() -> Command {
    Command::new("bridalbooks")
        .version(clap::crate_version!())
        .about("Income, expense and profit ledger for bridal and mehandi services")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("BRIDALBOOKS_DB")
                .help("Path to the local SQLite database"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .env("BRIDALBOOKS_API_URL")
                .help("Base URL of a remote ledger service; overrides the local database"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .global(true)
                .env("BRIDALBOOKS_TOKEN")
                .hide_env_values(true)
                .help("Bearer token for the remote ledger service"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("event")
                .about("Income events")
                .subcommand(event_fields(Command::new("add").about("Record an event")))
                .subcommand(json_flags(filter_args(Command::new("list").about("List events"))))
                .subcommand(event_fields(
                    Command::new("update")
                        .about("Replace an event")
                        .arg(id_arg()),
                ))
                .subcommand(Command::new("rm").about("Delete an event").arg(id_arg())),
        )
        .subcommand(
            Command::new("expense")
                .about("Expenses")
                .subcommand(expense_fields(Command::new("add").about("Record an expense")))
                .subcommand(json_flags(filter_args(Command::new("list").about("List expenses"))))
                .subcommand(expense_fields(
                    Command::new("update")
                        .about("Replace an expense")
                        .arg(id_arg()),
                ))
                .subcommand(Command::new("rm").about("Delete an expense").arg(id_arg())),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Totals, per-service summaries and recent records")
                .arg(
                    Arg::new("recent")
                        .long("recent")
                        .value_parser(value_parser!(usize))
                        .default_value("5"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("monthly").about("Profit per calendar month"),
        ))
        .subcommand(
            Command::new("export")
                .about("Write CSV files")
                .subcommand(export_args(Command::new("events").about("Export income events")))
                .subcommand(export_args(Command::new("expenses").about("Export expenses")))
                .subcommand(
                    Command::new("monthly")
                        .about("Export the monthly profit report")
                        .arg(Arg::new("out").long("out")),
                ),
        )
        .subcommand(Command::new("doctor").about("Report records that may skew totals or exports"))
}
