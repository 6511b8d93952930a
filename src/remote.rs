// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! HTTP-backed [`RecordStore`] for the hosted ledger service.

use crate::models::{EventInput, Expense, ExpenseInput, IncomeEvent};
use crate::store::{RecordStore, RequestContext};
use crate::utils::http_client;
use anyhow::{Context, Result};
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const EVENTS: &str = "events";
const EXPENSES: &str = "expenses";

pub struct RemoteStore {
    client: Client,
    base_url: String,
}

impl RemoteStore {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::with_client(base_url, http_client()?))
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        RemoteStore {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    fn request(&self, ctx: &RequestContext, method: Method, path: &str) -> RequestBuilder {
        let rb = self.client.request(method, self.url(path));
        match ctx.bearer() {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    fn send(&self, rb: RequestBuilder, what: &str) -> Result<Response> {
        debug!(what, "remote store request");
        let resp = rb.send().with_context(|| format!("{} failed", what))?;
        let status = resp.status();
        if !status.is_success() {
            warn!(what, %status, "remote store rejected request");
        }
        resp.error_for_status()
            .with_context(|| format!("{} rejected", what))
    }

    fn list<T: DeserializeOwned>(&self, ctx: &RequestContext, path: &str) -> Result<Vec<T>> {
        let what = format!("GET /api/{}", path);
        let resp = self.send(self.request(ctx, Method::GET, path), &what)?;
        // a null body is treated as an empty collection
        let items: Option<Vec<T>> = resp
            .json()
            .with_context(|| format!("Decode {} response", what))?;
        Ok(items.unwrap_or_default())
    }

    fn save<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let what = format!("{} /api/{}", method, path);
        let resp = self.send(self.request(ctx, method, path).json(body), &what)?;
        resp.json()
            .with_context(|| format!("Decode {} response", what))
    }

    fn delete(&self, ctx: &RequestContext, path: &str) -> Result<()> {
        let what = format!("DELETE /api/{}", path);
        self.send(self.request(ctx, Method::DELETE, path), &what)?;
        Ok(())
    }
}

impl RecordStore for RemoteStore {
    fn list_events(&self, ctx: &RequestContext) -> Result<Vec<IncomeEvent>> {
        self.list(ctx, EVENTS)
    }

    fn add_event(&self, ctx: &RequestContext, input: &EventInput) -> Result<IncomeEvent> {
        self.save(ctx, Method::POST, EVENTS, input)
    }

    fn update_event(
        &self,
        ctx: &RequestContext,
        id: i64,
        input: &EventInput,
    ) -> Result<IncomeEvent> {
        self.save(ctx, Method::PUT, &format!("{}/{}", EVENTS, id), input)
    }

    fn delete_event(&self, ctx: &RequestContext, id: i64) -> Result<()> {
        self.delete(ctx, &format!("{}/{}", EVENTS, id))
    }

    fn list_expenses(&self, ctx: &RequestContext) -> Result<Vec<Expense>> {
        self.list(ctx, EXPENSES)
    }

    fn add_expense(&self, ctx: &RequestContext, input: &ExpenseInput) -> Result<Expense> {
        self.save(ctx, Method::POST, EXPENSES, input)
    }

    fn update_expense(
        &self,
        ctx: &RequestContext,
        id: i64,
        input: &ExpenseInput,
    ) -> Result<Expense> {
        self.save(ctx, Method::PUT, &format!("{}/{}", EXPENSES, id), input)
    }

    fn delete_expense(&self, ctx: &RequestContext, id: i64) -> Result<()> {
        self.delete(ctx, &format!("{}/{}", EXPENSES, id))
    }
}
