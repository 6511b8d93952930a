// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::filter_from;
use crate::error::LedgerError;
use crate::export::{build_monthly_csv, export_records, CsvRecord, Quoting, MONTHLY_FILE_NAME};
use crate::session::Session;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::warn;

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("events", sub)) => export_kind(session.events(), "events", sub),
        Some(("expenses", sub)) => export_kind(session.expenses(), "expenses", sub),
        Some(("monthly", sub)) => export_monthly(session, sub),
        _ => Ok(()),
    }
}

fn out_path(sub: &clap::ArgMatches, default_name: &str) -> PathBuf {
    sub.get_one::<String>("out")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default_name))
}

/// Writes the file, or reports "no data" and writes nothing.
fn deliver(result: Result<String, LedgerError>, out: PathBuf, what: &str) -> Result<()> {
    match result {
        Ok(text) => {
            std::fs::write(&out, text).with_context(|| format!("Write {}", out.display()))?;
            println!("Exported {} to {}", what, out.display());
            Ok(())
        }
        Err(LedgerError::NothingToExport) => {
            warn!(what, "export skipped, nothing matched");
            println!("No data to export");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn export_kind<T: CsvRecord>(records: &[T], what: &str, sub: &clap::ArgMatches) -> Result<()> {
    let filter = filter_from(sub)?;
    let quoting = if sub.get_flag("raw") {
        Quoting::Verbatim
    } else {
        Quoting::Rfc4180
    };
    let out = out_path(sub, T::columns().file_name);
    deliver(export_records(records, &filter, quoting), out, what)
}

fn export_monthly(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let out = out_path(sub, MONTHLY_FILE_NAME);
    deliver(build_monthly_csv(session.monthly_series()), out, "monthly profit")
}
