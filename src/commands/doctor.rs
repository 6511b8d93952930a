// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Expense, IncomeEvent};
use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

// Zero padding matters: range filters and month buckets compare raw strings.
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

fn is_iso_date(s: &str) -> bool {
    ISO_DATE.is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn breaks_raw_csv(s: &str) -> bool {
    s.contains([',', '\n', '\r', '"'])
}

fn check(
    issues: &mut Vec<Issue>,
    label: &str,
    id: i64,
    date: &str,
    amount: Decimal,
    texts: &[&str],
) {
    if !is_iso_date(date) {
        issues.push(Issue {
            kind: "malformed_date",
            detail: format!("{} #{}: '{}'", label, id, date),
        });
    }
    if amount < Decimal::ZERO {
        issues.push(Issue {
            kind: "negative_amount",
            detail: format!("{} #{}: {}", label, id, amount),
        });
    }
    if texts.iter().any(|t| breaks_raw_csv(t)) {
        issues.push(Issue {
            kind: "text_needs_quoting",
            detail: format!("{} #{} (affects --raw exports)", label, id),
        });
    }
}

pub fn find_issues(events: &[IncomeEvent], expenses: &[Expense]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for e in events {
        let notes = e.notes.as_deref().unwrap_or("");
        check(
            &mut issues,
            "event",
            e.id,
            &e.date,
            e.amount,
            &[e.client_name.as_str(), e.event_name.as_str(), notes],
        );
    }
    for e in expenses {
        let notes = e.notes.as_deref().unwrap_or("");
        check(
            &mut issues,
            "expense",
            e.id,
            &e.date,
            e.amount,
            &[e.expense_name.as_str(), e.description.as_str(), notes],
        );
    }
    issues
}

pub fn handle(session: &Session) -> Result<()> {
    let issues = find_issues(session.events(), session.expenses());
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.kind.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
