// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::Dashboard;
use crate::models::{Expense, IncomeEvent, Record, ServiceCategory};
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
pub struct DashboardView {
    #[serde(flatten)]
    pub totals: Dashboard,
    pub recent_events: Vec<IncomeEvent>,
    pub recent_expenses: Vec<Expense>,
}

fn most_recent<T: Record + Clone>(items: &[T], n: usize) -> Vec<T> {
    let mut v = items.to_vec();
    v.sort_by(|a, b| b.date().cmp(a.date()));
    v.truncate(n);
    v
}

pub fn view(session: &Session, recent: usize) -> DashboardView {
    DashboardView {
        totals: session.dashboard(),
        recent_events: most_recent(session.events(), recent),
        recent_expenses: most_recent(session.expenses(), recent),
    }
}

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let recent: usize = *m.get_one::<usize>("recent").unwrap_or(&5);
    let v = view(session, recent);
    if maybe_print_json(json_flag, jsonl_flag, &v)? {
        return Ok(());
    }

    let t = &v.totals;
    println!(
        "{}",
        pretty_table(
            &["Total Income", "Total Expenses", "Net Profit"],
            vec![vec![
                fmt_money(&t.total_income),
                fmt_money(&t.total_expenses),
                fmt_money(&t.profit),
            ]],
        )
    );

    let services: Vec<Vec<String>> = ServiceCategory::ALL
        .iter()
        .map(|c| {
            let s = t.summary(*c);
            vec![
                c.to_string(),
                fmt_money(&s.income),
                fmt_money(&s.expenses),
                fmt_money(&s.profit),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Service", "Income", "Expenses", "Profit"], services)
    );

    let events: Vec<Vec<String>> = v
        .recent_events
        .iter()
        .map(|e| {
            vec![
                e.date.clone(),
                e.client_name.clone(),
                e.event_name.clone(),
                e.service_type.to_string(),
                fmt_money(&e.amount),
            ]
        })
        .collect();
    println!("Recent events");
    println!(
        "{}",
        pretty_table(&["Date", "Client", "Event", "Service", "Amount"], events)
    );

    let expenses: Vec<Vec<String>> = v
        .recent_expenses
        .iter()
        .map(|e| {
            vec![
                e.date.clone(),
                e.expense_name.clone(),
                e.service_type.to_string(),
                fmt_money(&e.amount),
            ]
        })
        .collect();
    println!("Recent expenses");
    println!(
        "{}",
        pretty_table(&["Date", "Expense", "Service", "Amount"], expenses)
    );
    Ok(())
}
