// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use bridalbooks::config::{Backend, Config};
use bridalbooks::session::Session;
use bridalbooks::{cli, commands};

fn init_logging() {
    // stdout carries CSV/JSON output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    if matches.subcommand_name().is_none() {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    }

    let config = Config::from_matches(&matches)?;
    let store = config.open_store()?;

    if let Some(("init", _)) = matches.subcommand() {
        match &config.backend {
            Backend::Local(path) => println!("Database initialized at {}", path.display()),
            Backend::Remote { api_url } => println!("Using remote ledger at {}", api_url),
        }
        return Ok(());
    }

    let mut session = Session::open(store, config.request_context())?;

    match matches.subcommand() {
        Some(("event", sub)) => commands::events::handle(&mut session, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&mut session, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&session, sub)?,
        Some(("monthly", sub)) => commands::monthly::handle(&session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&session)?,
        _ => {}
    }
    Ok(())
}
