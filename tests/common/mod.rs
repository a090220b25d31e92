//! Common test utilities for E2E tests

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

use streampanel::AppCore;
use streampanel::auth::Session;
use streampanel::config::LoggingConfig;
use streampanel::service::Notice;
use streampanel::store::{AuthClient, InMemoryStore, MemoryAuth, TableStore};

/// Application core wired to in-memory backends
pub struct TestCore {
    pub core: AppCore,
    pub store: Arc<InMemoryStore>,
    pub auth: Arc<MemoryAuth>,
    pub notices: UnboundedReceiver<Notice>,
}

impl TestCore {
    pub fn new() -> Self {
        streampanel::logging::init(&LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        });

        let store = Arc::new(InMemoryStore::new());
        let auth = Arc::new(MemoryAuth::new());
        let (core, notices) = AppCore::new(
            Arc::clone(&store) as Arc<dyn TableStore>,
            Arc::clone(&auth) as Arc<dyn AuthClient>,
        );

        Self {
            core,
            store,
            auth,
            notices,
        }
    }

    /// Register an identity with the admin role and sign it in.
    pub async fn sign_in_admin(&self) -> Session {
        let identity_id = self.auth.register("admin@example.com", "hunter2").await;
        self.store
            .seed(
                "user_roles",
                json!({"id": "role-admin-1", "user_id": identity_id, "role": "admin"}),
            )
            .await;
        self.core
            .sessions()
            .sign_in("admin@example.com", "hunter2")
            .await
            .expect("admin sign-in")
    }

    /// Register a plain member identity and sign it in.
    pub async fn sign_in_member(&self) -> Session {
        let identity_id = self.auth.register("member@example.com", "hunter2").await;
        self.store
            .seed(
                "user_roles",
                json!({"id": "role-member-1", "user_id": identity_id, "role": "user"}),
            )
            .await;
        self.core
            .sessions()
            .sign_in("member@example.com", "hunter2")
            .await
            .expect("member sign-in")
    }

    /// Seed a profile row (optionally with a subscription).
    pub async fn seed_profile(&self, id: &str, full_name: &str) {
        self.store
            .seed(
                "profiles",
                json!({"id": id, "full_name": full_name, "phone_number": null}),
            )
            .await;
    }

    pub async fn seed_subscription(&self, id: &str, user_id: &str, minutes: i64, blocked: bool) {
        self.store
            .seed(
                "user_subscriptions",
                json!({
                    "id": id,
                    "user_id": user_id,
                    "duration_minutes": minutes,
                    "blocked": blocked,
                }),
            )
            .await;
    }
}
