// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Totals, per-service summaries and the month-bucketed profit series.
//!
//! Everything here is a pure function of the collections it is handed; nothing
//! is cached between calls.

use crate::models::{
    Expense, IncomeEvent, MonthlyProfitRow, Record, ServiceCategory, ServiceSummary,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

pub fn total_amount<T: Record>(records: &[T]) -> Decimal {
    records.iter().map(Record::amount).sum()
}

fn total_for<T: Record>(category: ServiceCategory, records: &[T]) -> Decimal {
    records
        .iter()
        .filter(|r| r.service() == category)
        .map(Record::amount)
        .sum()
}

pub fn summary_for(
    category: ServiceCategory,
    events: &[IncomeEvent],
    expenses: &[Expense],
) -> ServiceSummary {
    let income = total_for(category, events);
    let spent = total_for(category, expenses);
    ServiceSummary {
        income,
        expenses: spent,
        profit: income - spent,
    }
}

/// Calendar year-month of a date: its first seven characters, or the whole
/// string when it is shorter. Malformed dates are not rejected.
pub fn month_key(date: &str) -> &str {
    match date.char_indices().nth(7) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}

/// One row per distinct month across both collections, in order of first
/// appearance (events first, then expenses). Callers that display or export
/// the series go through [`sort_by_month`].
pub fn monthly_profit_series(
    events: &[IncomeEvent],
    expenses: &[Expense],
) -> Vec<MonthlyProfitRow> {
    let mut rows: Vec<MonthlyProfitRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut slot = |date: &str, rows: &mut Vec<MonthlyProfitRow>| -> usize {
        let key = month_key(date);
        if let Some(&i) = index.get(key) {
            return i;
        }
        rows.push(MonthlyProfitRow {
            month: key.to_string(),
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            profit: Decimal::ZERO,
        });
        index.insert(key.to_string(), rows.len() - 1);
        rows.len() - 1
    };

    for e in events {
        let i = slot(&e.date, &mut rows);
        rows[i].income += e.amount;
    }
    for e in expenses {
        let i = slot(&e.date, &mut rows);
        rows[i].expenses += e.amount;
    }
    for r in rows.iter_mut() {
        r.profit = r.income - r.expenses;
    }
    rows
}

/// Ascending by month key; lexicographic order is chronological for `YYYY-MM`.
pub fn sort_by_month(mut rows: Vec<MonthlyProfitRow>) -> Vec<MonthlyProfitRow> {
    rows.sort_by(|a, b| a.month.cmp(&b.month));
    rows
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub profit: Decimal,
    pub bridal: ServiceSummary,
    pub mehandi: ServiceSummary,
}

impl Dashboard {
    pub fn compute(events: &[IncomeEvent], expenses: &[Expense]) -> Self {
        let total_income = total_amount(events);
        let total_expenses = total_amount(expenses);
        Dashboard {
            total_income,
            total_expenses,
            profit: total_income - total_expenses,
            bridal: summary_for(ServiceCategory::Bridal, events, expenses),
            mehandi: summary_for(ServiceCategory::Mehandi, events, expenses),
        }
    }

    pub fn summary(&self, category: ServiceCategory) -> &ServiceSummary {
        match category {
            ServiceCategory::Bridal => &self.bridal,
            ServiceCategory::Mehandi => &self.mehandi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(date: &str, amount: i64, service: ServiceCategory) -> IncomeEvent {
        IncomeEvent {
            id: 0,
            date: date.into(),
            event_name: "Wedding".into(),
            client_name: "Client".into(),
            service_type: service,
            amount: Decimal::from(amount),
            notes: None,
        }
    }

    fn ex(date: &str, amount: i64, service: ServiceCategory) -> Expense {
        Expense {
            id: 0,
            date: date.into(),
            expense_name: "Supplies".into(),
            description: String::new(),
            service_type: service,
            amount: Decimal::from(amount),
            notes: None,
        }
    }

    #[test]
    fn january_scenario() {
        let events = vec![
            ev("2025-01-10", 5000, ServiceCategory::Bridal),
            ev("2025-01-20", 3000, ServiceCategory::Mehandi),
        ];
        let expenses = vec![ex("2025-01-15", 1000, ServiceCategory::Bridal)];

        let d = Dashboard::compute(&events, &expenses);
        assert_eq!(d.total_income, Decimal::from(8000));
        assert_eq!(d.total_expenses, Decimal::from(1000));
        assert_eq!(d.profit, Decimal::from(7000));
        assert_eq!(
            d.bridal,
            ServiceSummary {
                income: Decimal::from(5000),
                expenses: Decimal::from(1000),
                profit: Decimal::from(4000),
            }
        );
        assert_eq!(
            d.mehandi,
            ServiceSummary {
                income: Decimal::from(3000),
                expenses: Decimal::ZERO,
                profit: Decimal::from(3000),
            }
        );

        let series = monthly_profit_series(&events, &expenses);
        assert_eq!(
            series,
            vec![MonthlyProfitRow {
                month: "2025-01".into(),
                income: Decimal::from(8000),
                expenses: Decimal::from(1000),
                profit: Decimal::from(7000),
            }]
        );
    }

    #[test]
    fn empty_collections_total_zero() {
        assert_eq!(total_amount::<IncomeEvent>(&[]), Decimal::ZERO);
        assert_eq!(summary_for(ServiceCategory::Mehandi, &[], &[]), ServiceSummary::default());
        assert!(monthly_profit_series(&[], &[]).is_empty());
    }

    #[test]
    fn category_totals_partition_the_grand_total() {
        let events = vec![
            ev("2025-03-01", 100, ServiceCategory::Bridal),
            ev("2025-03-02", 250, ServiceCategory::Mehandi),
            ev("2025-04-11", 75, ServiceCategory::Bridal),
        ];
        let per_category: Decimal = ServiceCategory::ALL
            .iter()
            .map(|c| summary_for(*c, &events, &[]).income)
            .sum();
        assert_eq!(per_category, total_amount(&events));
    }

    #[test]
    fn expense_only_month_still_gets_a_row() {
        let events = vec![ev("2025-02-03", 900, ServiceCategory::Bridal)];
        let expenses = vec![
            ex("2024-12-30", 40, ServiceCategory::Mehandi),
            ex("2025-02-14", 100, ServiceCategory::Bridal),
        ];
        let series = monthly_profit_series(&events, &expenses);
        assert_eq!(series.len(), 2);
        // first-encounter order: event month, then the expense-only month
        assert_eq!(series[0].month, "2025-02");
        assert_eq!(series[1].month, "2024-12");
        assert_eq!(series[1].income, Decimal::ZERO);
        assert_eq!(series[1].profit, Decimal::from(-40));

        let sorted = sort_by_month(series);
        let months: Vec<_> = sorted.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months, ["2024-12", "2025-02"]);
    }

    #[test]
    fn month_key_tolerates_short_and_odd_dates() {
        assert_eq!(month_key("2025-07-04"), "2025-07");
        assert_eq!(month_key("2025"), "2025");
        assert_eq!(month_key(""), "");
        assert_eq!(month_key("07/04/2025"), "07/04/2");
    }

    #[test]
    fn negative_amounts_flow_through_totals() {
        let events = vec![
            ev("2025-05-01", 500, ServiceCategory::Bridal),
            ev("2025-05-09", -200, ServiceCategory::Bridal),
        ];
        assert_eq!(total_amount(&events), Decimal::from(300));
    }
}
