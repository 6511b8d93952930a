// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::sort_by_month;
use crate::models::MonthlyProfitRow;
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

/// Month-ascending series for display.
pub fn rows(session: &Session) -> Vec<MonthlyProfitRow> {
    sort_by_month(session.monthly_series())
}

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let data = rows(session);
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No data available");
        return Ok(());
    }
    let table: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.month.clone(),
                fmt_money(&r.income),
                fmt_money(&r.expenses),
                fmt_money(&r.profit),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Profit"], table)
    );
    Ok(())
}
