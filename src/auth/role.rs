//! Role resolution
//!
//! Capability flags are derived from the `user_roles` table, never
//! stored on the session itself. The lookup fails open to non-admin:
//! a store error must not lock the whole UI behind an error screen.

use std::sync::Arc;

use crate::auth::Session;
use crate::store::{Filter, TableStore};

/// Capabilities held by an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleFlags {
    pub is_admin: bool,
}

/// Looks up the administrative capability for a session.
#[derive(Clone)]
pub struct RoleResolver {
    store: Arc<dyn TableStore>,
}

impl RoleResolver {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Resolve the capability flags for `session`.
    ///
    /// Never fails: no session or any lookup error yields the default
    /// (non-admin) flags.
    pub async fn resolve(&self, session: Option<&Session>) -> RoleFlags {
        let Some(session) = session else {
            return RoleFlags::default();
        };

        let filter = Filter::new()
            .eq("user_id", session.identity_id.clone())
            .eq("role", "admin");

        match self.store.count("user_roles", &filter).await {
            Ok(matches) => RoleFlags {
                is_admin: matches > 0,
            },
            Err(error) => {
                tracing::warn!(
                    identity = %session.identity_id,
                    %error,
                    "role lookup failed; treating identity as non-admin"
                );
                RoleFlags::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::store::MockTableStore;

    fn session(identity_id: &str) -> Session {
        Session {
            identity_id: identity_id.to_string(),
            access_token: "token".to_string(),
            email: None,
        }
    }

    #[tokio::test]
    async fn no_session_is_not_admin() {
        let resolver = RoleResolver::new(Arc::new(MockTableStore::new()));
        assert!(!resolver.resolve(None).await.is_admin);
    }

    #[tokio::test]
    async fn matching_role_row_grants_admin() {
        let mut store = MockTableStore::new();
        store.expect_count().returning(|table, _| {
            assert_eq!(table, "user_roles");
            Ok(1)
        });

        let resolver = RoleResolver::new(Arc::new(store));
        let flags = resolver.resolve(Some(&session("user-1"))).await;
        assert!(flags.is_admin);
    }

    #[tokio::test]
    async fn lookup_error_fails_open_to_non_admin() {
        let mut store = MockTableStore::new();
        store
            .expect_count()
            .returning(|_, _| Err(AppError::Store("network down".to_string())));

        let resolver = RoleResolver::new(Arc::new(store));
        let flags = resolver.resolve(Some(&session("user-1"))).await;
        assert!(!flags.is_admin);
    }
}
