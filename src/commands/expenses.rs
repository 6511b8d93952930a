// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{filter_from, required, required_id};
use crate::aggregate::total_amount;
use crate::filter::filter_records;
use crate::models::{Expense, ExpenseInput, ServiceCategory};
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("update", sub)) => update(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn input_from(sub: &clap::ArgMatches) -> Result<ExpenseInput> {
    let expense_name = required(sub, "name")?.trim().to_string();
    // a blank description repeats the expense name
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| expense_name.clone());
    Ok(ExpenseInput {
        date: parse_date(required(sub, "date")?)?,
        expense_name,
        description,
        service_type: required(sub, "service")?.parse::<ServiceCategory>()?,
        amount: parse_decimal(required(sub, "amount")?)?,
        notes: sub
            .get_one::<String>("notes")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    })
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let input = input_from(sub)?;
    let saved = session.add_expense(&input)?;
    println!(
        "Recorded expense #{} '{}' on {} ({} {})",
        saved.id, saved.expense_name, saved.date, saved.service_type, saved.amount
    );
    Ok(())
}

fn update(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub)?;
    let input = input_from(sub)?;
    session.update_expense(id, &input)?;
    println!("Updated expense #{}", id);
    Ok(())
}

fn remove(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub)?;
    session.delete_expense(id)?;
    println!("Deleted expense #{}", id);
    Ok(())
}

pub fn query_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<Expense>> {
    let filter = filter_from(sub)?;
    Ok(filter_records(session.expenses(), &filter))
}

fn list(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let total = total_amount(&data);
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date,
                    e.expense_name,
                    e.service_type.to_string(),
                    fmt_money(&e.amount),
                    e.description,
                    e.notes.unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Expense", "Service", "Amount", "Description", "Notes"],
                rows,
            )
        );
        println!("Total expenses: {}", fmt_money(&total));
    }
    Ok(())
}
