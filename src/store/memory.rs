//! In-memory store backend
//!
//! Implements the same table and auth contracts as the hosted backend,
//! entirely in process. Used by the test suite and for local
//! development without credentials. Assigns ULID ids and RFC 3339
//! `created_at` timestamps the way the hosted store would.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::auth::Session;
use crate::error::{AppError, Result};
use crate::store::{AuthClient, Filter, Order, Row, TableStore};

/// Volatile table storage keyed by table name.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pre-built row without going through `insert` semantics.
    ///
    /// Test fixture helper; the value must be a JSON object.
    pub async fn seed(&self, table: &str, row: Value) {
        let Value::Object(row) = row else {
            panic!("seed row must be a JSON object");
        };
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    fn sort_key(row: &Row, column: &str) -> String {
        match row.get(column) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn select(
        &self,
        table: &str,
        filter: &Filter,
        order: Option<Order>,
    ) -> Result<Vec<Row>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Row> = tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| filter.matches(r)).cloned().collect())
            .unwrap_or_default();

        if let Some(order) = order {
            rows.sort_by_key(|row| Self::sort_key(row, &order.column));
            if !order.ascending {
                rows.reverse();
            }
        }

        Ok(rows)
    }

    async fn insert(&self, table: &str, mut row: Row) -> Result<Row> {
        // Server-assigned fields, like the hosted store's column defaults
        if !matches!(row.get("id"), Some(Value::String(_))) {
            row.insert(
                "id".to_string(),
                Value::String(ulid::Ulid::new().to_string()),
            );
        }
        if !matches!(row.get("created_at"), Some(Value::String(_))) {
            row.insert(
                "created_at".to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
        }

        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(row.clone());

        Ok(row)
    }

    async fn update(&self, table: &str, patch: Row, filter: &Filter) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| filter.matches(r)) {
                for (column, value) in &patch {
                    row.insert(column.clone(), value.clone());
                }
            }
        }
        // Zero matched rows is not an error, matching the hosted store
        Ok(())
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|r| !filter.matches(r));
        }
        Ok(())
    }

    async fn count(&self, table: &str, filter: &Filter) -> Result<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .map(|rows| rows.iter().filter(|r| filter.matches(r)).count() as u64)
            .unwrap_or(0))
    }
}

/// In-process identity provider for tests and local development.
pub struct MemoryAuth {
    /// email -> (password, identity id)
    users: RwLock<HashMap<String, (String, String)>>,
    current: RwLock<Option<Session>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
        }
    }

    /// Register an identity; returns its assigned id.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let identity_id = ulid::Ulid::new().to_string();
        self.users.write().await.insert(
            email.to_string(),
            (password.to_string(), identity_id.clone()),
        );
        identity_id
    }
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthClient for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let users = self.users.read().await;
        match users.get(email) {
            Some((stored, identity_id)) if stored == password => {
                let session = Session {
                    identity_id: identity_id.clone(),
                    access_token: ulid::Ulid::new().to_string(),
                    email: Some(email.to_string()),
                };
                *self.current.write().await = Some(session.clone());
                Ok(session)
            }
            _ => Err(AppError::Auth("Invalid login credentials".to_string())),
        }
    }

    async fn sign_out(&self) -> Result<()> {
        *self.current.write().await = None;
        Ok(())
    }

    async fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.current.read().await.clone())
    }
}
