//! Store boundary
//!
//! The hosted backend exposes generic per-table CRUD plus password
//! authentication. Everything above this module talks to the
//! [`TableStore`] and [`AuthClient`] traits; the concrete backends are
//! the REST client ([`RestStore`]) and an in-memory store used by tests
//! and local development.

mod memory;
mod rest;

pub use memory::{InMemoryStore, MemoryAuth};
pub use rest::RestStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::auth::Session;
use crate::error::Result;

/// A raw store row: column name to JSON value.
///
/// Rows are loosely typed at this boundary; the repository layer maps
/// them into typed records and rejects malformed shapes.
pub type Row = serde_json::Map<String, Value>;

/// Conjunction of column equality clauses.
///
/// The only filter shape the core ever issues (`col = value`, AND-ed).
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `column = value` clause.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((column.into(), value.into()));
        self
    }

    pub fn clauses(&self) -> &[(String, Value)] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether a row satisfies every clause.
    pub fn matches(&self, row: &Row) -> bool {
        self.clauses.iter().all(|(column, expected)| {
            row.get(column).unwrap_or(&Value::Null) == expected
        })
    }
}

/// Result ordering for `select`.
#[derive(Debug, Clone)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

impl Order {
    /// Newest first, the ordering every admin list view uses.
    pub fn created_at_desc() -> Self {
        Self {
            column: "created_at".to_string(),
            ascending: false,
        }
    }
}

/// Generic table access against the hosted store.
///
/// Mirrors the backend's CRUD surface one-to-one. No method retries and
/// no method caches; callers re-read after every successful mutation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Fetch all rows matching `filter`, optionally ordered.
    ///
    /// An empty result is a normal outcome, not an error.
    async fn select(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<Order>,
    ) -> Result<Vec<Row>>;

    /// Insert one row; returns the stored row including server-assigned
    /// fields (id, timestamps).
    async fn insert(&self, table: &str, row: Row) -> Result<Row>;

    /// Apply a partial patch to every row matching `filter`.
    async fn update(&self, table: &str, patch: Row, filter: &Filter) -> Result<()>;

    /// Hard-delete every row matching `filter`.
    async fn delete(&self, table: &str, filter: &Filter) -> Result<()>;

    /// Count rows matching `filter` without fetching them.
    async fn count(&self, table: &str, filter: &Filter) -> Result<u64>;
}

/// Password authentication against the hosted identity provider.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Exchange credentials for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// Invalidate the current session.
    async fn sign_out(&self) -> Result<()>;

    /// The session currently held by the provider, if any.
    async fn current_session(&self) -> Result<Option<Session>>;
}
