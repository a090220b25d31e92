//! Generic entity repository
//!
//! One repository per entity type, all sharing the same store handle.
//! The repository keeps no cache: correctness of the admin screens
//! relies on re-reading after every successful mutation, not on local
//! state. No call retries; failures propagate to the caller, who turns
//! them into a single user notice.

use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::anyhow;
use serde_json::Value;

use crate::data::models::{Draft, Entity};
use crate::error::{AppError, Result};
use crate::store::{Filter, Order, Row, TableStore};

/// Typed list/insert/update/delete against one table.
pub struct Repository<E: Entity> {
    store: Arc<dyn TableStore>,
    _entity: PhantomData<E>,
}

impl<E: Entity> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> Repository<E> {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    fn typed(row: Row) -> Result<E> {
        serde_json::from_value(Value::Object(row)).map_err(Into::into)
    }

    fn draft_row(draft: &E::Draft) -> Result<Row> {
        match serde_json::to_value(draft.normalized())? {
            Value::Object(map) => Ok(map),
            other => Err(AppError::Internal(anyhow!(
                "draft for {} did not serialize to an object: {other:?}",
                E::TABLE
            ))),
        }
    }

    /// All rows, optionally ordered. An empty table yields an empty
    /// vector, not an error.
    pub async fn list(&self, order: Option<Order>) -> Result<Vec<E>> {
        let rows = self.store.select(E::TABLE, &Filter::new(), order).await?;
        rows.into_iter().map(Self::typed).collect()
    }

    /// Rows matching `filter`.
    pub async fn find(&self, filter: Filter) -> Result<Vec<E>> {
        let rows = self.store.select(E::TABLE, &filter, None).await?;
        rows.into_iter().map(Self::typed).collect()
    }

    /// The single row matching `filter`, or `None`.
    ///
    /// Absence is a valid outcome, never a failure.
    pub async fn find_one(&self, filter: Filter) -> Result<Option<E>> {
        let mut rows = self.store.select(E::TABLE, &filter, None).await?;
        match rows.len() {
            0 => Ok(None),
            _ => Self::typed(rows.remove(0)).map(Some),
        }
    }

    /// The row with the given id, or `None`.
    pub async fn get(&self, id: &str) -> Result<Option<E>> {
        self.find_one(Filter::new().eq("id", id)).await
    }

    /// Insert a draft; returns the stored record with its assigned id.
    ///
    /// The draft is normalized first so absent optional fields reach the
    /// store as explicit nulls.
    pub async fn insert(&self, draft: &E::Draft) -> Result<E> {
        let row = self.store.insert(E::TABLE, Self::draft_row(draft)?).await?;
        tracing::debug!(table = E::TABLE, "inserted row");
        Self::typed(row)
    }

    /// Overwrite the record's form-editable fields with the draft.
    pub async fn update(&self, id: &str, draft: &E::Draft) -> Result<()> {
        self.store
            .update(E::TABLE, Self::draft_row(draft)?, &Filter::new().eq("id", id))
            .await?;
        tracing::debug!(table = E::TABLE, id, "updated row");
        Ok(())
    }

    /// Apply a partial patch; only the fields present are changed.
    pub async fn patch(&self, id: &str, patch: Row) -> Result<()> {
        self.store
            .update(E::TABLE, patch, &Filter::new().eq("id", id))
            .await?;
        tracing::debug!(table = E::TABLE, id, "patched row");
        Ok(())
    }

    /// Hard-delete by id. User confirmation is the caller's job.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store
            .delete(E::TABLE, &Filter::new().eq("id", id))
            .await?;
        tracing::debug!(table = E::TABLE, id, "deleted row");
        Ok(())
    }

    /// Row count for the whole table.
    pub async fn count(&self) -> Result<u64> {
        self.store.count(E::TABLE, &Filter::new()).await
    }
}
