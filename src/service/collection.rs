//! Admin collection page model
//!
//! The pattern every admin CRUD screen follows: a fetched list, one
//! dialog, and mutations that re-run the list on success. On failure
//! the pre-mutation rows stay displayed and a single notice carries
//! the store's message; nothing retries and nothing crashes.

use crate::data::{Entity, Repository};
use crate::error::Result;
use crate::service::{FormDialog, NoticeSink};
use crate::store::Order;

/// Outcome of the user-facing confirmation prompt a delete requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// List screen over one entity type.
pub struct CollectionPage<E: Entity> {
    /// Display name used in notices ("Category", "Movie", ...)
    label: &'static str,
    repo: Repository<E>,
    dialog: FormDialog<E::Draft>,
    rows: Vec<E>,
    notices: NoticeSink,
}

impl<E: Entity> CollectionPage<E> {
    pub fn new(label: &'static str, repo: Repository<E>, notices: NoticeSink) -> Self {
        Self {
            label,
            repo,
            dialog: FormDialog::new(),
            rows: Vec::new(),
            notices,
        }
    }

    /// Re-fetch the collection, newest first.
    pub async fn refresh(&mut self) -> Result<()> {
        self.rows = self.repo.list(Some(Order::created_at_desc())).await?;
        Ok(())
    }

    /// Rows as of the last successful fetch.
    pub fn rows(&self) -> &[E] {
        &self.rows
    }

    pub fn dialog(&self) -> &FormDialog<E::Draft> {
        &self.dialog
    }

    /// Form binding access to the open draft.
    pub fn draft_mut(&mut self) -> &mut E::Draft {
        self.dialog.draft_mut()
    }

    pub fn open_create(&mut self) {
        self.dialog.open_create();
    }

    /// Open the edit dialog for a listed row, snapshotting its fields.
    ///
    /// Returns false when the id is not in the current list.
    pub fn open_edit(&mut self, id: &str) -> bool {
        match self.rows.iter().find(|row| row.id() == id) {
            Some(row) => {
                let snapshot = row.to_draft();
                self.dialog.open_edit(id, snapshot);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.dialog.cancel();
    }

    /// Submit the open dialog: insert when creating, update when
    /// editing. The dialog closes regardless of outcome; success
    /// re-runs the list, failure leaves it untouched and emits one
    /// notice with the store's message.
    pub async fn submit(&mut self) {
        let Some(submission) = self.dialog.begin_submit() else {
            return;
        };

        let (result, verb) = match &submission.editing {
            Some(id) => (self.repo.update(id, &submission.draft).await, "updated"),
            None => (
                self.repo.insert(&submission.draft).await.map(|_| ()),
                "added",
            ),
        };

        self.dialog.finish_submit();

        match result {
            Ok(()) => {
                self.notices
                    .success(format!("{} {verb} successfully", self.label));
                if let Err(error) = self.refresh().await {
                    tracing::warn!(%error, "refetch after mutation failed");
                }
            }
            Err(error) => {
                self.notices.error(error.user_message());
            }
        }
    }

    /// Delete a row after the user confirmed. Declining is a no-op,
    /// not an error path.
    pub async fn delete(&mut self, id: &str, confirmation: Confirmation) {
        if confirmation == Confirmation::Declined {
            return;
        }

        match self.repo.delete(id).await {
            Ok(()) => {
                self.notices
                    .success(format!("{} deleted successfully", self.label));
                if let Err(error) = self.refresh().await {
                    tracing::warn!(%error, "refetch after delete failed");
                }
            }
            Err(error) => {
                self.notices.error(error.user_message());
            }
        }
    }
}
