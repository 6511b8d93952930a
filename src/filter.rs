// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::models::{Record, ServiceCategory};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ServiceCategory),
}

impl FromStr for CategoryFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<ServiceCategory>()
            .map(CategoryFilter::Only)
            .map_err(|_| LedgerError::UnknownCategoryFilter(s.to_string()))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(c) => write!(f, "{}", c),
        }
    }
}

/// Inclusive date range plus service line, applied before export.
///
/// Bounds compare as plain strings, which orders zero-padded ISO dates
/// correctly. Omitted (or empty) bounds impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportFilter {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub category: CategoryFilter,
}

impl ExportFilter {
    pub fn new(from_date: Option<&str>, to_date: Option<&str>, category: CategoryFilter) -> Self {
        let bound = |s: Option<&str>| {
            s.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        ExportFilter {
            from_date: bound(from_date),
            to_date: bound(to_date),
            category,
        }
    }

    pub fn matches<T: Record>(&self, record: &T) -> bool {
        let date = record.date();
        if let Some(from) = &self.from_date {
            if date < from.as_str() {
                return false;
            }
        }
        if let Some(to) = &self.to_date {
            if date > to.as_str() {
                return false;
            }
        }
        match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => record.service() == c,
        }
    }
}

pub fn filter_records<T: Record + Clone>(records: &[T], filter: &ExportFilter) -> Vec<T> {
    records.iter().filter(|r| filter.matches(*r)).cloned().collect()
}
