//! Admin dashboard aggregation
//!
//! Four count-only queries issued concurrently and joined. A failed
//! count degrades that one field to zero instead of failing the whole
//! summary; partial completion is never surfaced.

use std::sync::Arc;

use crate::data::{Category, Channel, Entity, Movie, Profile};
use crate::store::{Filter, TableStore};

/// Row counts shown on the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardCounts {
    pub movies: u64,
    pub channels: u64,
    pub users: u64,
    pub categories: u64,
}

/// Read-only fan-out over the four counted tables.
pub struct Dashboard {
    store: Arc<dyn TableStore>,
}

impl Dashboard {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Fetch all four counts, waiting for every query to settle.
    ///
    /// Best-effort: a field whose query failed reads zero. The user
    /// sees no distinction between "zero rows" and "count failed";
    /// the failure is only logged.
    pub async fn counts(&self) -> DashboardCounts {
        let all = Filter::new();
        let (movies, channels, users, categories) = futures::join!(
            self.store.count(Movie::TABLE, &all),
            self.store.count(Channel::TABLE, &all),
            self.store.count(Profile::TABLE, &all),
            self.store.count(Category::TABLE, &all),
        );

        DashboardCounts {
            movies: or_zero("movies", movies),
            channels: or_zero("channels", channels),
            users: or_zero("users", users),
            categories: or_zero("categories", categories),
        }
    }
}

fn or_zero(field: &str, result: crate::error::Result<u64>) -> u64 {
    match result {
        Ok(count) => count,
        Err(error) => {
            tracing::warn!(field, %error, "count query failed; showing zero");
            0
        }
    }
}
