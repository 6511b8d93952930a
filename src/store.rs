// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::models::{EventInput, Expense, ExpenseInput, IncomeEvent, ServiceCategory};
use crate::utils::parse_decimal;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use tracing::{debug, info};

/// Credential travelling with every store call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    token: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        RequestContext { token: None }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        RequestContext {
            token: Some(token.into()),
        }
    }

    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Plain CRUD over the two record collections.
///
/// Inserts never carry an id; updates replace every non-id field.
pub trait RecordStore {
    fn list_events(&self, ctx: &RequestContext) -> Result<Vec<IncomeEvent>>;
    fn add_event(&self, ctx: &RequestContext, input: &EventInput) -> Result<IncomeEvent>;
    fn update_event(
        &self,
        ctx: &RequestContext,
        id: i64,
        input: &EventInput,
    ) -> Result<IncomeEvent>;
    fn delete_event(&self, ctx: &RequestContext, id: i64) -> Result<()>;

    fn list_expenses(&self, ctx: &RequestContext) -> Result<Vec<Expense>>;
    fn add_expense(&self, ctx: &RequestContext, input: &ExpenseInput) -> Result<Expense>;
    fn update_expense(
        &self,
        ctx: &RequestContext,
        id: i64,
        input: &ExpenseInput,
    ) -> Result<Expense>;
    fn delete_expense(&self, ctx: &RequestContext, id: i64) -> Result<()>;
}

/// Local SQLite-backed store. The request context is accepted but unused.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        SqliteStore { conn }
    }
}

fn parse_service(s: &str) -> Result<ServiceCategory> {
    Ok(s.parse::<ServiceCategory>()?)
}

impl RecordStore for SqliteStore {
    fn list_events(&self, _ctx: &RequestContext) -> Result<Vec<IncomeEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, event_name, client_name, service_type, amount, notes
             FROM events ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, String>(5)?,
                r.get::<_, Option<String>>(6)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, date, event_name, client_name, service, amount, notes) = row?;
            out.push(IncomeEvent {
                id,
                date,
                event_name,
                client_name,
                service_type: parse_service(&service)
                    .with_context(|| format!("Event {} has a bad service type", id))?,
                amount: parse_decimal(&amount)
                    .with_context(|| format!("Event {} has a bad amount", id))?,
                notes,
            });
        }
        debug!(count = out.len(), "loaded events");
        Ok(out)
    }

    fn add_event(&self, _ctx: &RequestContext, input: &EventInput) -> Result<IncomeEvent> {
        self.conn.execute(
            "INSERT INTO events(date, event_name, client_name, service_type, amount, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                input.date,
                input.event_name,
                input.client_name,
                input.service_type.as_str(),
                input.amount.to_string(),
                input.notes
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, "event added");
        Ok(IncomeEvent::from_input(id, input.clone()))
    }

    fn update_event(
        &self,
        _ctx: &RequestContext,
        id: i64,
        input: &EventInput,
    ) -> Result<IncomeEvent> {
        let changed = self.conn.execute(
            "UPDATE events SET date=?1, event_name=?2, client_name=?3, service_type=?4,
             amount=?5, notes=?6 WHERE id=?7",
            params![
                input.date,
                input.event_name,
                input.client_name,
                input.service_type.as_str(),
                input.amount.to_string(),
                input.notes,
                id
            ],
        )?;
        if changed == 0 {
            return Err(LedgerError::NotFound { kind: "Event", id }.into());
        }
        info!(id, "event updated");
        Ok(IncomeEvent::from_input(id, input.clone()))
    }

    fn delete_event(&self, _ctx: &RequestContext, id: i64) -> Result<()> {
        let changed = self.conn.execute("DELETE FROM events WHERE id=?1", params![id])?;
        if changed == 0 {
            return Err(LedgerError::NotFound { kind: "Event", id }.into());
        }
        info!(id, "event deleted");
        Ok(())
    }

    fn list_expenses(&self, _ctx: &RequestContext) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, expense_name, description, service_type, amount, notes
             FROM expenses ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, String>(5)?,
                r.get::<_, Option<String>>(6)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, date, expense_name, description, service, amount, notes) = row?;
            out.push(Expense {
                id,
                date,
                expense_name,
                description,
                service_type: parse_service(&service)
                    .with_context(|| format!("Expense {} has a bad service type", id))?,
                amount: parse_decimal(&amount)
                    .with_context(|| format!("Expense {} has a bad amount", id))?,
                notes,
            });
        }
        debug!(count = out.len(), "loaded expenses");
        Ok(out)
    }

    fn add_expense(&self, _ctx: &RequestContext, input: &ExpenseInput) -> Result<Expense> {
        self.conn.execute(
            "INSERT INTO expenses(date, expense_name, description, service_type, amount, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                input.date,
                input.expense_name,
                input.description,
                input.service_type.as_str(),
                input.amount.to_string(),
                input.notes
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(id, "expense added");
        Ok(Expense::from_input(id, input.clone()))
    }

    fn update_expense(
        &self,
        _ctx: &RequestContext,
        id: i64,
        input: &ExpenseInput,
    ) -> Result<Expense> {
        let changed = self.conn.execute(
            "UPDATE expenses SET date=?1, expense_name=?2, description=?3, service_type=?4,
             amount=?5, notes=?6 WHERE id=?7",
            params![
                input.date,
                input.expense_name,
                input.description,
                input.service_type.as_str(),
                input.amount.to_string(),
                input.notes,
                id
            ],
        )?;
        if changed == 0 {
            return Err(LedgerError::NotFound { kind: "Expense", id }.into());
        }
        info!(id, "expense updated");
        Ok(Expense::from_input(id, input.clone()))
    }

    fn delete_expense(&self, _ctx: &RequestContext, id: i64) -> Result<()> {
        let changed = self.conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
        if changed == 0 {
            return Err(LedgerError::NotFound { kind: "Expense", id }.into());
        }
        info!(id, "expense deleted");
        Ok(())
    }
}
