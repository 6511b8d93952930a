// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod dashboard;
pub mod doctor;
pub mod events;
pub mod expenses;
pub mod exporter;
pub mod monthly;

use crate::filter::{CategoryFilter, ExportFilter};
use anyhow::{Context, Result};

pub(crate) fn required<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("--{} is required", name))
}

pub(crate) fn filter_from(m: &clap::ArgMatches) -> Result<ExportFilter> {
    let category = match m.get_one::<String>("service") {
        Some(s) => s.parse::<CategoryFilter>()?,
        None => CategoryFilter::All,
    };
    Ok(ExportFilter::new(
        m.get_one::<String>("from").map(String::as_str),
        m.get_one::<String>("to").map(String::as_str),
        category,
    ))
}

pub(crate) fn required_id(m: &clap::ArgMatches) -> Result<i64> {
    m.get_one::<i64>("id").copied().context("--id is required")
}
