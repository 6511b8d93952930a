// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{filter_from, required, required_id};
use crate::aggregate::total_amount;
use crate::filter::filter_records;
use crate::models::{EventInput, IncomeEvent, ServiceCategory};
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

fn input_from(sub: &clap::ArgMatches) -> Result<EventInput> {
    Ok(EventInput {
        date: parse_date(required(sub, "date")?)?,
        event_name: required(sub, "event")?.trim().to_string(),
        client_name: required(sub, "client")?.trim().to_string(),
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
    let saved = session.add_event(&input)?;
    println!(
        "Recorded event #{} '{}' for {} on {} ({} {})",
        saved.id, saved.event_name, saved.client_name, saved.date, saved.service_type, saved.amount
    );
    Ok(())
}

fn update(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub)?;
    let input = input_from(sub)?;
    session.update_event(id, &input)?;
    println!("Updated event #{}", id);
    Ok(())
}

fn remove(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = required_id(sub)?;
    session.delete_event(id)?;
    println!("Deleted event #{}", id);
    Ok(())
}

pub fn query_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<IncomeEvent>> {
    let filter = filter_from(sub)?;
    Ok(filter_records(session.events(), &filter))
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
                    e.client_name,
                    e.event_name,
                    e.service_type.to_string(),
                    fmt_money(&e.amount),
                    e.notes.unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Client", "Event", "Service", "Amount", "Notes"],
                rows,
            )
        );
        println!("Total income: {}", fmt_money(&total));
    }
    Ok(())
}
