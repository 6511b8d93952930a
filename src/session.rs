// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory snapshot of both collections plus the store they came from.
//!
//! Mutations go to the store first and then the affected collection is
//! reloaded in full; derived figures are always computed from the snapshot.

use crate::aggregate::{monthly_profit_series, Dashboard};
use crate::models::{EventInput, Expense, ExpenseInput, IncomeEvent, MonthlyProfitRow};
use crate::store::{RecordStore, RequestContext};
use anyhow::Result;
use tracing::debug;

pub struct Session {
    store: Box<dyn RecordStore>,
    ctx: RequestContext,
    events: Vec<IncomeEvent>,
    expenses: Vec<Expense>,
}

impl Session {
    pub fn new(store: Box<dyn RecordStore>, ctx: RequestContext) -> Self {
        Session {
            store,
            ctx,
            events: Vec::new(),
            expenses: Vec::new(),
        }
    }

    /// Construct and immediately load both collections.
    pub fn open(store: Box<dyn RecordStore>, ctx: RequestContext) -> Result<Self> {
        let mut s = Session::new(store, ctx);
        s.load()?;
        Ok(s)
    }

    pub fn load(&mut self) -> Result<()> {
        self.refresh_events()?;
        self.refresh_expenses()
    }

    /// Drop the snapshot, e.g. on logout.
    pub fn clear(&mut self) {
        self.events.clear();
        self.expenses.clear();
    }

    fn refresh_events(&mut self) -> Result<()> {
        self.events = self.store.list_events(&self.ctx)?;
        debug!(count = self.events.len(), "events refreshed");
        Ok(())
    }

    fn refresh_expenses(&mut self) -> Result<()> {
        self.expenses = self.store.list_expenses(&self.ctx)?;
        debug!(count = self.expenses.len(), "expenses refreshed");
        Ok(())
    }

    pub fn events(&self) -> &[IncomeEvent] {
        &self.events
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn add_event(&mut self, input: &EventInput) -> Result<IncomeEvent> {
        let saved = self.store.add_event(&self.ctx, input)?;
        self.refresh_events()?;
        Ok(saved)
    }

    pub fn update_event(&mut self, id: i64, input: &EventInput) -> Result<IncomeEvent> {
        let saved = self.store.update_event(&self.ctx, id, input)?;
        self.refresh_events()?;
        Ok(saved)
    }

    pub fn delete_event(&mut self, id: i64) -> Result<()> {
        self.store.delete_event(&self.ctx, id)?;
        self.refresh_events()
    }

    pub fn add_expense(&mut self, input: &ExpenseInput) -> Result<Expense> {
        let saved = self.store.add_expense(&self.ctx, input)?;
        self.refresh_expenses()?;
        Ok(saved)
    }

    pub fn update_expense(&mut self, id: i64, input: &ExpenseInput) -> Result<Expense> {
        let saved = self.store.update_expense(&self.ctx, id, input)?;
        self.refresh_expenses()?;
        Ok(saved)
    }

    pub fn delete_expense(&mut self, id: i64) -> Result<()> {
        self.store.delete_expense(&self.ctx, id)?;
        self.refresh_expenses()
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::compute(&self.events, &self.expenses)
    }

    /// Unsorted, first-encounter order.
    pub fn monthly_series(&self) -> Vec<MonthlyProfitRow> {
        monthly_profit_series(&self.events, &self.expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceCategory;
    use crate::store::SqliteStore;
    use rust_decimal::Decimal;

    fn session() -> Session {
        let store = SqliteStore::new(crate::db::open_in_memory().unwrap());
        Session::open(Box::new(store), RequestContext::anonymous()).unwrap()
    }

    fn event(amount: i64) -> EventInput {
        EventInput {
            date: "2025-01-10".into(),
            event_name: "Wedding".into(),
            client_name: "Asha".into(),
            service_type: ServiceCategory::Bridal,
            amount: Decimal::from(amount),
            notes: None,
        }
    }

    #[test]
    fn mutations_refresh_the_snapshot() {
        let mut s = session();
        assert!(s.events().is_empty());

        let saved = s.add_event(&event(5000)).unwrap();
        assert_eq!(s.events().len(), 1);
        assert_eq!(s.dashboard().total_income, Decimal::from(5000));

        s.update_event(saved.id, &event(6000)).unwrap();
        assert_eq!(s.dashboard().bridal.income, Decimal::from(6000));

        s.delete_event(saved.id).unwrap();
        assert!(s.events().is_empty());
        assert_eq!(s.dashboard().profit, Decimal::ZERO);
    }

    #[test]
    fn clear_empties_both_collections() {
        let mut s = session();
        s.add_event(&event(100)).unwrap();
        s.add_expense(&ExpenseInput {
            date: "2025-01-11".into(),
            expense_name: "Cones".into(),
            description: String::new(),
            service_type: ServiceCategory::Mehandi,
            amount: Decimal::from(20),
            notes: None,
        })
        .unwrap();
        assert_eq!(s.monthly_series().len(), 1);

        s.clear();
        assert!(s.events().is_empty());
        assert!(s.expenses().is_empty());
        s.load().unwrap();
        assert_eq!(s.expenses().len(), 1);
    }
}
