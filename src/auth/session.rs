//! Session state
//!
//! One ambient `Option<Session>` per application, owned by
//! [`SessionStore`] and distributed over a watch channel so any page can
//! react to a login or logout the moment it happens.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::Result;
use crate::store::AuthClient;

/// The authenticated identity, or rather the client-side view of it.
///
/// Transient; never persisted by this core. The access token is opaque
/// and only ever forwarded back to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Identity id assigned by the provider; shared with the profile row
    pub identity_id: String,
    /// Opaque bearer credential
    pub access_token: String,
    /// Email the identity signed in with
    pub email: Option<String>,
}

/// Holder of the current session with change notification.
///
/// All transitions go through `sign_in` / `sign_out` / `restore`, so a
/// single watch channel is enough to deliver every change. Subscribers
/// observe the current state immediately (watch semantics) and every
/// transition afterwards.
pub struct SessionStore {
    auth: Arc<dyn AuthClient>,
    tx: watch::Sender<Option<Session>>,
}

impl SessionStore {
    pub fn new(auth: Arc<dyn AuthClient>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { auth, tx }
    }

    /// Adopt whatever session the provider already holds.
    ///
    /// Called once at startup so a persisted provider session survives a
    /// reload.
    pub async fn restore(&self) -> Result<()> {
        let session = self.auth.current_session().await?;
        self.tx.send_replace(session);
        Ok(())
    }

    /// Exchange credentials for a session and broadcast the transition.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let session = self.auth.sign_in(email, password).await?;
        tracing::info!(identity = %session.identity_id, "signed in");
        self.tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Clear the session and broadcast the transition.
    ///
    /// The local state is cleared even if the provider call fails; a
    /// logout must always take effect from the UI's point of view.
    pub async fn sign_out(&self) -> Result<()> {
        let result = self.auth.sign_out().await;
        self.tx.send_replace(None);
        tracing::info!("signed out");
        result
    }

    /// Current session, if any.
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// Subscribe to session transitions.
    ///
    /// The receiver's `borrow()` yields the state as of subscription;
    /// `changed()` resolves on every later transition.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}
