// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceCategory {
    Bridal,
    Mehandi,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 2] = [ServiceCategory::Bridal, ServiceCategory::Mehandi];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Bridal => "Bridal",
            ServiceCategory::Mehandi => "Mehandi",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bridal" => Ok(ServiceCategory::Bridal),
            "mehandi" => Ok(ServiceCategory::Mehandi),
            _ => Err(LedgerError::UnknownService(s.to_string())),
        }
    }
}

/// Anything that carries a date, a service line and an amount.
pub trait Record {
    fn date(&self) -> &str;
    fn service(&self) -> ServiceCategory;
    fn amount(&self) -> Decimal;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEvent {
    pub id: i64,
    pub date: String, // YYYY-MM-DD
    pub event_name: String,
    pub client_name: String,
    pub service_type: ServiceCategory,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub notes: Option<String>,
}

/// Non-id fields of an income event, used for insertion and full replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub date: String,
    pub event_name: String,
    pub client_name: String,
    pub service_type: ServiceCategory,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub notes: Option<String>,
}

// The REST service sends `"description": null` for expenses saved without one.
fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub date: String, // YYYY-MM-DD
    pub expense_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub service_type: ServiceCategory,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    pub date: String,
    pub expense_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub service_type: ServiceCategory,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub notes: Option<String>,
}

impl IncomeEvent {
    pub fn from_input(id: i64, input: EventInput) -> Self {
        IncomeEvent {
            id,
            date: input.date,
            event_name: input.event_name,
            client_name: input.client_name,
            service_type: input.service_type,
            amount: input.amount,
            notes: input.notes,
        }
    }
}

impl Expense {
    pub fn from_input(id: i64, input: ExpenseInput) -> Self {
        Expense {
            id,
            date: input.date,
            expense_name: input.expense_name,
            description: input.description,
            service_type: input.service_type,
            amount: input.amount,
            notes: input.notes,
        }
    }
}

impl Record for IncomeEvent {
    fn date(&self) -> &str {
        &self.date
    }
    fn service(&self) -> ServiceCategory {
        self.service_type
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Record for Expense {
    fn date(&self) -> &str {
        &self.date
    }
    fn service(&self) -> ServiceCategory {
        self.service_type
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ServiceSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyProfitRow {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_category_parses_loosely_and_prints_canonically() {
        assert_eq!(" mehandi ".parse::<ServiceCategory>().unwrap(), ServiceCategory::Mehandi);
        assert_eq!("BRIDAL".parse::<ServiceCategory>().unwrap().to_string(), "Bridal");
        assert!("Henna".parse::<ServiceCategory>().is_err());
    }

    #[test]
    fn event_json_uses_service_field_names_and_numeric_amounts() {
        let raw = r#"{"id":7,"date":"2025-01-10","eventName":"Wedding","clientName":"Asha",
            "serviceType":"Bridal","amount":5000.5,"notes":null}"#;
        let ev: IncomeEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(ev.id, 7);
        assert_eq!(ev.service_type, ServiceCategory::Bridal);
        assert_eq!(ev.amount, Decimal::new(50005, 1));

        let back = serde_json::to_value(&ev).unwrap();
        assert_eq!(back["clientName"], "Asha");
        assert!(back["amount"].is_number());
    }

    #[test]
    fn expense_without_description_defaults_to_empty() {
        let raw = r#"{"id":1,"date":"2025-02-01","expenseName":"Cones",
            "serviceType":"Mehandi","amount":120}"#;
        let ex: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(ex.description, "");
        assert_eq!(ex.notes, None);
        assert_eq!(ex.amount, Decimal::from(120));
    }

    #[test]
    fn expense_with_null_description_reads_as_empty() {
        let raw = r#"{"id":1,"date":"2025-02-01","expenseName":"Cones","description":null,
            "serviceType":"Mehandi","amount":120.0,"notes":null}"#;
        let ex: Expense = serde_json::from_str(raw).unwrap();
        assert_eq!(ex.description, "");
        assert_eq!(ex.expense_name, "Cones");

        let input: ExpenseInput = serde_json::from_str(
            r#"{"date":"2025-02-01","expenseName":"Cones","description":null,
            "serviceType":"Mehandi","amount":120,"notes":null}"#,
        )
        .unwrap();
        assert_eq!(input.description, "");
    }
}
