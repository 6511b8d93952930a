// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! CSV rendering of filtered record collections.
//!
//! Events and expenses share one exporter: a [`ColumnSpec`] says which
//! columns a record kind produces and a [`TotalsSpec`] says where the amount
//! lands in the per-service summary rows. Totals are accumulated while the
//! data rows are written, so the summary always agrees with the rows above it.

use crate::aggregate::sort_by_month;
use crate::error::LedgerError;
use crate::filter::{filter_records, ExportFilter};
use crate::models::{Expense, IncomeEvent, MonthlyProfitRow, Record, ServiceCategory};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

pub const MONTHLY_FILE_NAME: &str = "monthly-profit-report.csv";
const MONTHLY_HEADERS: [&str; 4] = ["Month", "Income", "Expenses", "Profit"];

/// Field escaping for free-text columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    /// Quote fields containing `,`, `"`, CR or LF.
    #[default]
    Rfc4180,
    /// Legacy output: fields are written as-is. A comma or newline in notes
    /// shifts the columns of that row.
    Verbatim,
}

impl Quoting {
    fn style(self) -> QuoteStyle {
        match self {
            Quoting::Rfc4180 => QuoteStyle::Necessary,
            Quoting::Verbatim => QuoteStyle::Never,
        }
    }
}

pub struct ColumnSpec<T> {
    pub headers: &'static [&'static str],
    pub map_row: fn(&T) -> Vec<String>,
    pub file_name: &'static str,
}

/// Shape of the summary rows: label in the first column, amount at
/// `amount_column` (zero-based), blanks in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalsSpec {
    pub amount_column: usize,
}

impl TotalsSpec {
    fn row(&self, label: &str, amount: Decimal) -> Vec<String> {
        let mut row = vec![String::new(); self.amount_column + 1];
        row[0] = label.to_string();
        row[self.amount_column] = amount.to_string();
        row
    }
}

/// Record kinds with a fixed export layout.
pub trait CsvRecord: Record + Clone + Sized {
    fn columns() -> ColumnSpec<Self>;
    fn totals() -> TotalsSpec;
}

impl CsvRecord for IncomeEvent {
    fn columns() -> ColumnSpec<Self> {
        ColumnSpec {
            headers: &["Date", "Client", "Event", "Service Type", "Amount", "Notes"],
            map_row: |e: &IncomeEvent| {
                vec![
                    e.date.clone(),
                    e.client_name.clone(),
                    e.event_name.clone(),
                    e.service_type.to_string(),
                    e.amount.to_string(),
                    e.notes.clone().unwrap_or_default(),
                ]
            },
            file_name: "events_export.csv",
        }
    }

    fn totals() -> TotalsSpec {
        TotalsSpec { amount_column: 4 }
    }
}

impl CsvRecord for Expense {
    fn columns() -> ColumnSpec<Self> {
        ColumnSpec {
            headers: &["Date", "Expense", "Service Type", "Amount", "Description", "Notes"],
            map_row: |e: &Expense| {
                vec![
                    e.date.clone(),
                    e.expense_name.clone(),
                    e.service_type.to_string(),
                    e.amount.to_string(),
                    e.description.clone(),
                    e.notes.clone().unwrap_or_default(),
                ]
            },
            file_name: "expenses_export.csv",
        }
    }

    fn totals() -> TotalsSpec {
        TotalsSpec { amount_column: 3 }
    }
}

fn write_block(
    out: &mut Vec<u8>,
    rows: &[Vec<String>],
    quoting: Quoting,
) -> Result<(), LedgerError> {
    let mut wtr = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(quoting.style())
        .from_writer(out);
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn into_text(bytes: Vec<u8>) -> Result<String, LedgerError> {
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// Header, one row per record, a blank line, one total row per service and a
/// grand total. An empty collection is [`LedgerError::NothingToExport`].
pub fn build_csv<T: Record>(
    records: &[T],
    columns: &ColumnSpec<T>,
    totals: &TotalsSpec,
    quoting: Quoting,
) -> Result<String, LedgerError> {
    if records.is_empty() {
        return Err(LedgerError::NothingToExport);
    }

    let mut per_service: BTreeMap<ServiceCategory, Decimal> =
        ServiceCategory::ALL.iter().map(|c| (*c, Decimal::ZERO)).collect();

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(columns.headers.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    for r in records {
        *per_service.entry(r.service()).or_insert(Decimal::ZERO) += r.amount();
        rows.push((columns.map_row)(r));
    }

    let mut summary = Vec::with_capacity(per_service.len() + 1);
    let mut grand = Decimal::ZERO;
    for (service, amount) in &per_service {
        grand += *amount;
        summary.push(totals.row(&format!("{} Total", service), *amount));
    }
    summary.push(totals.row("Grand Total", grand));

    let mut out = Vec::new();
    write_block(&mut out, &rows, quoting)?;
    out.push(b'\n');
    write_block(&mut out, &summary, quoting)?;

    debug!(rows = records.len(), %grand, "built csv export");
    into_text(out)
}

/// Filter then format with the record kind's own layout.
pub fn export_records<T: CsvRecord>(
    records: &[T],
    filter: &ExportFilter,
    quoting: Quoting,
) -> Result<String, LedgerError> {
    let filtered = filter_records(records, filter);
    build_csv(&filtered, &T::columns(), &T::totals(), quoting)
}

/// Month-sorted profit report. No totals block.
pub fn build_monthly_csv(rows: Vec<MonthlyProfitRow>) -> Result<String, LedgerError> {
    if rows.is_empty() {
        return Err(LedgerError::NothingToExport);
    }
    let mut table = vec![MONTHLY_HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>()];
    for r in sort_by_month(rows) {
        table.push(vec![
            r.month,
            r.income.to_string(),
            r.expenses.to_string(),
            r.profit.to_string(),
        ]);
    }
    let mut out = Vec::new();
    write_block(&mut out, &table, Quoting::Rfc4180)?;
    into_text(out)
}
