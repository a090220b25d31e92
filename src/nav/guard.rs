//! Route guard
//!
//! Gates every admin page behind the session's administrative
//! capability. Evaluation is `Pending` until the role lookup settles;
//! no page content renders while pending. A subscription re-evaluates
//! on every session change so a logout redirects an already-open page
//! immediately, not on the next navigation.

use std::sync::Arc;

use tokio::sync::watch;

use crate::auth::{RoleResolver, SessionStore};
use crate::nav::Route;

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Role lookup in flight; withhold render
    Pending,
    /// Render the page
    Allowed,
    /// Redirect instead of rendering
    Denied { redirect: Route },
}

/// Composes the session store and role resolver into a per-navigation
/// access decision.
#[derive(Clone)]
pub struct RouteGuard {
    sessions: Arc<SessionStore>,
    roles: RoleResolver,
}

impl RouteGuard {
    pub fn new(sessions: Arc<SessionStore>, roles: RoleResolver) -> Self {
        Self { sessions, roles }
    }

    /// Decide whether `route` may render under the current session.
    ///
    /// Public pages are always allowed. Admin pages are allowed iff the
    /// current session resolves to `is_admin`; everything else redirects
    /// to the admin sign-in screen. Guard denials are normal redirects,
    /// never errors.
    pub async fn evaluate(&self, route: &Route) -> GuardDecision {
        if !route.requires_admin() {
            return GuardDecision::Allowed;
        }

        let session = self.sessions.current();
        let flags = self.roles.resolve(session.as_ref()).await;

        if flags.is_admin {
            GuardDecision::Allowed
        } else {
            tracing::debug!(route = %route.path(), "admin access denied");
            GuardDecision::Denied {
                redirect: Route::AdminAuth,
            }
        }
    }

    /// Guard `route` for as long as the page stays open.
    ///
    /// The returned receiver starts at `Pending`, settles to the first
    /// decision, and is re-evaluated after every session transition.
    /// Dropping the receiver ends the background task.
    pub fn subscribe(&self, route: Route) -> watch::Receiver<GuardDecision> {
        let (tx, rx) = watch::channel(GuardDecision::Pending);
        let guard = self.clone();
        let mut sessions = self.sessions.subscribe();

        tokio::spawn(async move {
            loop {
                let decision = guard.evaluate(&route).await;
                if tx.send(decision).is_err() {
                    break;
                }
                if sessions.changed().await.is_err() {
                    break;
                }
            }
        });

        rx
    }
}
