//! Data models
//!
//! Typed records for every table in the hosted store, plus the draft
//! types backing create/edit forms. Rows cross the store boundary as
//! loose JSON and are validated into these shapes at the repository
//! boundary; serialization uses the store's snake_case column names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

// =============================================================================
// Entity & Draft traits
// =============================================================================

/// A persisted record in one of the store's tables.
///
/// Binds the table name, the typed row shape, and the draft type its
/// create/edit dialog works on.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Table name in the store
    const TABLE: &'static str;

    /// Form draft for this entity
    type Draft: Draft;

    /// The record's opaque id
    fn id(&self) -> &str;

    /// Snapshot the current field values into a draft (edit dialogs).
    fn to_draft(&self) -> Self::Draft;
}

/// In-memory, not-yet-submitted field values behind an open dialog.
///
/// Drafts omit server-assigned fields (id, timestamps). `Default` is
/// the empty form a create dialog opens with.
pub trait Draft: Serialize + Default + Clone + Send + Sync + 'static {
    /// Copy with optional text fields normalized: empty or
    /// whitespace-only input becomes an explicit `None`, never empty
    /// text, so the store's nullable semantics are respected.
    fn normalized(&self) -> Self;
}

/// Empty or whitespace-only optional input becomes `None`.
fn none_if_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

/// Build a URL-safe slug: lowercase, whitespace runs collapsed to
/// single hyphens.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

// =============================================================================
// Category
// =============================================================================

/// A content category; `slug` is the stable external reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
}

impl CategoryDraft {
    /// Draft with the slug derived from the display name.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self { name, slug }
    }
}

impl Draft for CategoryDraft {
    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            slug: slugify(&self.slug),
        }
    }
}

impl Entity for Category {
    const TABLE: &'static str = "categories";
    type Draft = CategoryDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> CategoryDraft {
        CategoryDraft {
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}

// =============================================================================
// Channel
// =============================================================================

/// A live TV channel.
///
/// `category_id` is a weak reference to a Category; deleting the
/// category does not cascade here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stream_url: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelDraft {
    pub name: String,
    pub description: Option<String>,
    pub stream_url: String,
    pub poster_url: Option<String>,
    pub category_id: Option<String>,
}

impl Draft for ChannelDraft {
    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: none_if_blank(&self.description),
            stream_url: self.stream_url.trim().to_string(),
            poster_url: none_if_blank(&self.poster_url),
            category_id: none_if_blank(&self.category_id),
        }
    }
}

impl Entity for Channel {
    const TABLE: &'static str = "live_channels";
    type Draft = ChannelDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> ChannelDraft {
        ChannelDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            stream_url: self.stream_url.clone(),
            poster_url: self.poster_url.clone(),
            category_id: self.category_id.clone(),
        }
    }
}

// =============================================================================
// Movie
// =============================================================================

/// A movie in the catalog.
///
/// `imdb_rating` is semantically in [0, 10]; the range is an input
/// hint, not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub imdb_rating: Option<f64>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MovieDraft {
    pub title: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub imdb_rating: Option<f64>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
    pub video_url: Option<String>,
    pub category_id: Option<String>,
}

impl Draft for MovieDraft {
    fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: none_if_blank(&self.description),
            genre: none_if_blank(&self.genre),
            release_year: self.release_year,
            imdb_rating: self.imdb_rating,
            poster_url: none_if_blank(&self.poster_url),
            trailer_url: none_if_blank(&self.trailer_url),
            video_url: none_if_blank(&self.video_url),
            category_id: none_if_blank(&self.category_id),
        }
    }
}

impl Entity for Movie {
    const TABLE: &'static str = "movies";
    type Draft = MovieDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            genre: self.genre.clone(),
            release_year: self.release_year,
            imdb_rating: self.imdb_rating,
            poster_url: self.poster_url.clone(),
            trailer_url: self.trailer_url.clone(),
            video_url: self.video_url.clone(),
            category_id: self.category_id.clone(),
        }
    }
}

// =============================================================================
// Profile
// =============================================================================

/// One per end-user identity; id shared with the session identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Profiles are created alongside the identity; the draft carries the
/// shared id instead of receiving a server-assigned one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub id: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

impl Draft for ProfileDraft {
    fn normalized(&self) -> Self {
        Self {
            id: self.id.clone(),
            full_name: none_if_blank(&self.full_name),
            phone_number: none_if_blank(&self.phone_number),
        }
    }
}

impl Entity for Profile {
    const TABLE: &'static str = "profiles";
    type Draft = ProfileDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> ProfileDraft {
        ProfileDraft {
            id: self.id.clone(),
            full_name: self.full_name.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

// =============================================================================
// UserSubscription
// =============================================================================

/// Viewing allowance for one profile; at most one row per profile,
/// located by fetch-single-or-none on `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSubscription {
    pub id: String,
    pub user_id: String,
    pub duration_minutes: i64,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionDraft {
    pub user_id: String,
    pub duration_minutes: i64,
    pub blocked: bool,
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl Default for SubscriptionDraft {
    /// Matches the edit form's fallback: 30 minutes, not blocked.
    fn default() -> Self {
        Self {
            user_id: String::new(),
            duration_minutes: 30,
            blocked: false,
            last_activity_at: None,
        }
    }
}

impl Draft for SubscriptionDraft {
    fn normalized(&self) -> Self {
        self.clone()
    }
}

impl Entity for UserSubscription {
    const TABLE: &'static str = "user_subscriptions";
    type Draft = SubscriptionDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> SubscriptionDraft {
        SubscriptionDraft {
            user_id: self.user_id.clone(),
            duration_minutes: self.duration_minutes,
            blocked: self.blocked,
            last_activity_at: self.last_activity_at,
        }
    }
}

// =============================================================================
// Notification
// =============================================================================

/// A message pushed to users. Append-only: no update or delete path
/// exists. `target_user_id = None` denotes a broadcast to all users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub created_by: String,
    #[serde(default)]
    pub target_user_id: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Whether this notification addresses all users.
    pub fn is_broadcast(&self) -> bool {
        self.target_user_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    pub created_by: String,
    pub target_user_id: Option<String>,
    pub read: bool,
}

impl Draft for NotificationDraft {
    fn normalized(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            message: self.message.clone(),
            created_by: self.created_by.clone(),
            target_user_id: none_if_blank(&self.target_user_id),
            read: self.read,
        }
    }
}

impl Entity for Notification {
    const TABLE: &'static str = "notifications";
    type Draft = NotificationDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> NotificationDraft {
        NotificationDraft {
            title: self.title.clone(),
            message: self.message.clone(),
            created_by: self.created_by.clone(),
            target_user_id: self.target_user_id.clone(),
            read: self.read,
        }
    }
}

// =============================================================================
// ContactInfo
// =============================================================================

/// The singleton contact settings row; at most one exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub id: String,
    pub whatsapp_number: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactDraft {
    pub whatsapp_number: String,
}

impl Draft for ContactDraft {
    fn normalized(&self) -> Self {
        Self {
            whatsapp_number: self.whatsapp_number.trim().to_string(),
        }
    }
}

impl Entity for ContactInfo {
    const TABLE: &'static str = "contact_info";
    type Draft = ContactDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            whatsapp_number: self.whatsapp_number.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_lowercased_and_hyphenated() {
        assert_eq!(slugify("Action Movies"), "action-movies");
        assert_eq!(slugify("  Sci   Fi  "), "sci-fi");
        assert_eq!(slugify("drama"), "drama");
    }

    #[test]
    fn category_draft_derives_slug_from_name() {
        let draft = CategoryDraft::from_name("Action Movies");
        assert_eq!(draft.name, "Action Movies");
        assert_eq!(draft.slug, "action-movies");
    }

    #[test]
    fn blank_optional_fields_normalize_to_none() {
        let draft = ChannelDraft {
            name: "News 24".to_string(),
            description: Some("   ".to_string()),
            stream_url: "https://cdn.example.com/news.m3u8".to_string(),
            poster_url: Some(String::new()),
            category_id: None,
        };

        let normalized = draft.normalized();
        assert_eq!(normalized.description, None);
        assert_eq!(normalized.poster_url, None);
        assert_eq!(normalized.category_id, None);
    }

    #[test]
    fn normalized_draft_serializes_explicit_nulls() {
        let normalized = ChannelDraft {
            name: "News 24".to_string(),
            description: Some(String::new()),
            stream_url: "https://cdn.example.com/news.m3u8".to_string(),
            poster_url: None,
            category_id: None,
        }
        .normalized();

        let value = serde_json::to_value(&normalized).unwrap();
        assert!(value.get("description").unwrap().is_null());
        assert!(value.get("poster_url").unwrap().is_null());
        // Server-assigned fields never appear in a draft
        assert!(value.get("id").is_none());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn broadcast_has_no_target() {
        let note = Notification {
            id: "note-1".to_string(),
            title: "Maintenance".to_string(),
            message: "Down at midnight".to_string(),
            created_by: "admin-1".to_string(),
            target_user_id: None,
            read: false,
            created_at: None,
        };
        assert!(note.is_broadcast());
    }
}
