//! Notification composer
//!
//! Append-only sends: notifications are never updated or deleted from
//! here. `created_by` is stamped from the current session; sending
//! with no session is refused. A `None` target addresses all users.

use std::sync::Arc;

use crate::auth::SessionStore;
use crate::data::{Notification, NotificationDraft, Repository};
use crate::error::{AppError, Result};
use crate::service::NoticeSink;

/// Model for the admin notifications screen.
pub struct NotificationComposer {
    repo: Repository<Notification>,
    sessions: Arc<SessionStore>,
    notices: NoticeSink,
}

impl NotificationComposer {
    pub fn new(
        repo: Repository<Notification>,
        sessions: Arc<SessionStore>,
        notices: NoticeSink,
    ) -> Self {
        Self {
            repo,
            sessions,
            notices,
        }
    }

    /// Send to all users (no target).
    pub async fn send_broadcast(&self, title: &str, message: &str) -> Result<Notification> {
        self.send(title, message, None).await
    }

    /// Send to one user.
    pub async fn send_direct(
        &self,
        title: &str,
        message: &str,
        target_user_id: &str,
    ) -> Result<Notification> {
        self.send(title, message, Some(target_user_id.to_string()))
            .await
    }

    async fn send(
        &self,
        title: &str,
        message: &str,
        target_user_id: Option<String>,
    ) -> Result<Notification> {
        let Some(session) = self.sessions.current() else {
            self.notices.error("You must be logged in");
            return Err(AppError::Unauthorized);
        };

        let broadcast = target_user_id.is_none();
        let draft = NotificationDraft {
            title: title.to_string(),
            message: message.to_string(),
            created_by: session.identity_id,
            target_user_id,
            read: false,
        };

        match self.repo.insert(&draft).await {
            Ok(notification) => {
                if broadcast {
                    self.notices.success("Notification sent to all users");
                } else {
                    self.notices.success("Notification sent");
                }
                Ok(notification)
            }
            Err(error) => {
                self.notices.error(error.user_message());
                Err(error)
            }
        }
    }
}
