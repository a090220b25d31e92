//! Admin user directory
//!
//! Joins every profile with its optional subscription row (at most one
//! per profile, located by fetch-single-or-none on `user_id`) and
//! edits the subscription's allowance fields through the page's
//! dialog.

use crate::data::{Entity, Profile, Repository, SubscriptionDraft, UserSubscription};
use crate::error::Result;
use crate::service::{FormDialog, NoticeSink};
use crate::store::{Filter, Row};

/// One row of the users table: profile plus subscription, if any.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub profile: Profile,
    pub subscription: Option<UserSubscription>,
}

/// Model for the admin users screen.
pub struct UserDirectory {
    profiles: Repository<Profile>,
    subscriptions: Repository<UserSubscription>,
    users: Vec<UserAccount>,
    dialog: FormDialog<SubscriptionDraft>,
    notices: NoticeSink,
}

impl UserDirectory {
    pub fn new(
        profiles: Repository<Profile>,
        subscriptions: Repository<UserSubscription>,
        notices: NoticeSink,
    ) -> Self {
        Self {
            profiles,
            subscriptions,
            users: Vec::new(),
            dialog: FormDialog::new(),
            notices,
        }
    }

    /// Fetch all profiles and look up each one's subscription.
    pub async fn refresh(&mut self) -> Result<()> {
        let profiles = self.profiles.list(None).await?;

        let lookups = profiles.iter().map(|profile| {
            self.subscriptions
                .find_one(Filter::new().eq("user_id", profile.id.clone()))
        });
        let subscriptions = futures::future::try_join_all(lookups).await?;

        self.users = profiles
            .into_iter()
            .zip(subscriptions)
            .map(|(profile, subscription)| UserAccount {
                profile,
                subscription,
            })
            .collect();
        Ok(())
    }

    pub fn users(&self) -> &[UserAccount] {
        &self.users
    }

    pub fn dialog(&self) -> &FormDialog<SubscriptionDraft> {
        &self.dialog
    }

    pub fn draft_mut(&mut self) -> &mut SubscriptionDraft {
        self.dialog.draft_mut()
    }

    /// Open the edit dialog for a user, snapshotting their
    /// subscription; with no subscription row the draft falls back to
    /// the 30-minute default.
    pub fn open_edit(&mut self, profile_id: &str) -> bool {
        let Some(user) = self
            .users
            .iter()
            .find(|user| user.profile.id == profile_id)
        else {
            return false;
        };

        let snapshot = match &user.subscription {
            Some(subscription) => subscription.to_draft(),
            None => SubscriptionDraft {
                user_id: profile_id.to_string(),
                ..SubscriptionDraft::default()
            },
        };
        self.dialog.open_edit(profile_id, snapshot);
        true
    }

    pub fn cancel(&mut self) {
        self.dialog.cancel();
    }

    /// Submit the allowance edit as a partial patch of
    /// `duration_minutes` and `blocked` only.
    ///
    /// Editing a user without a subscription row is a no-op: the
    /// dialog stays open and nothing is sent.
    pub async fn submit(&mut self) {
        let Some(profile_id) = self.dialog.editing().map(ToOwned::to_owned) else {
            return;
        };
        let Some(subscription_id) = self
            .users
            .iter()
            .find(|user| user.profile.id == profile_id)
            .and_then(|user| user.subscription.as_ref())
            .map(|subscription| subscription.id.clone())
        else {
            return;
        };

        let Some(submission) = self.dialog.begin_submit() else {
            return;
        };

        let mut patch = Row::new();
        patch.insert(
            "duration_minutes".to_string(),
            submission.draft.duration_minutes.into(),
        );
        patch.insert("blocked".to_string(), submission.draft.blocked.into());

        let result = self.subscriptions.patch(&subscription_id, patch).await;
        self.dialog.finish_submit();

        match result {
            Ok(()) => {
                self.notices.success("User subscription updated");
                if let Err(error) = self.refresh().await {
                    tracing::warn!(%error, "refetch after subscription update failed");
                }
            }
            Err(error) => {
                self.notices.error(error.user_message());
            }
        }
    }
}
