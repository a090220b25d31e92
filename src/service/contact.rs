//! Contact settings (singleton upsert)
//!
//! The one screen whose write path depends on prior read state: the
//! `contact_info` table holds at most one row, so saving either
//! updates the remembered id or inserts and re-reads to capture the
//! newly assigned one. An absent row is a valid outcome, not an error.

use crate::data::{ContactDraft, ContactInfo, Entity, Repository};
use crate::error::Result;
use crate::service::NoticeSink;
use crate::store::Filter;

/// Model for the admin contact-settings screen.
pub struct ContactSettings {
    repo: Repository<ContactInfo>,
    notices: NoticeSink,
    /// Id of the singleton row, once a read has seen one
    contact_id: Option<String>,
    whatsapp_number: String,
}

impl ContactSettings {
    pub fn new(repo: Repository<ContactInfo>, notices: NoticeSink) -> Self {
        Self {
            repo,
            notices,
            contact_id: None,
            whatsapp_number: String::new(),
        }
    }

    /// Read the singleton row if it exists and remember its id.
    pub async fn load(&mut self) -> Result<()> {
        if let Some(contact) = self.repo.find_one(Filter::new()).await? {
            self.whatsapp_number = contact.whatsapp_number.clone();
            self.contact_id = Some(contact.id().to_string());
        }
        Ok(())
    }

    /// The number currently in the form.
    pub fn whatsapp_number(&self) -> &str {
        &self.whatsapp_number
    }

    /// Id of the stored row, if a read has produced one.
    pub fn contact_id(&self) -> Option<&str> {
        self.contact_id.as_deref()
    }

    /// Save the number: update when an id is known, insert otherwise.
    ///
    /// Repeated saves stay on one row: the first insert re-reads to
    /// capture the assigned id, so the next save updates it.
    pub async fn save(&mut self, whatsapp_number: &str) {
        self.whatsapp_number = whatsapp_number.to_string();
        let draft = ContactDraft {
            whatsapp_number: whatsapp_number.to_string(),
        };

        match self.contact_id.clone() {
            Some(id) => match self.repo.update(&id, &draft).await {
                Ok(()) => self.notices.success("Contact info updated"),
                Err(error) => self.notices.error(error.user_message()),
            },
            None => match self.repo.insert(&draft).await {
                Ok(_) => {
                    self.notices.success("Contact info added");
                    // Re-read to pick up the assigned id
                    if let Err(error) = self.load().await {
                        tracing::warn!(%error, "re-read after contact insert failed");
                    }
                }
                Err(error) => self.notices.error(error.user_message()),
            },
        }
    }
}
