//! StreamPanel - session, role-gating and CRUD core for a streaming
//! storefront with an admin back-office
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Page Models (service)                     │
//! │  - Collection pages, dialogs, dashboard, contact, users     │
//! │  - User notices (toasts)                                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────────────────┐ ┌──────────────────────────────┐
//! │   Navigation (nav)       │ │   Data Layer (data)          │
//! │  - Route surface         │ │  - Typed records             │
//! │  - Route guard           │ │  - Generic repository        │
//! └──────────────────────────┘ └──────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Store Boundary (store, auth)                    │
//! │  - TableStore / AuthClient traits                           │
//! │  - REST client, in-memory backend                           │
//! │  - Session store, role resolver                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The hosted backend (identity provider and relational store) and the
//! rendering layer are external collaborators. This crate owns
//! everything in between: who may see which screen, and how the UI and
//! the store stay consistent across create/update/delete.
//!
//! # Modules
//!
//! - `auth`: session state and role resolution
//! - `nav`: route surface and route guard
//! - `data`: typed records and the generic entity repository
//! - `service`: per-screen page models
//! - `store`: the store boundary traits and backends
//! - `config`: configuration management
//! - `logging`: tracing subscriber setup
//! - `error`: error types

pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nav;
pub mod service;
pub mod store;

use std::sync::Arc;

use auth::{RoleResolver, SessionStore};
use data::{
    Category, Channel, ContactInfo, Entity, Movie, Notification, Profile, Repository,
    UserSubscription,
};
use nav::RouteGuard;
use service::{
    Catalog, CollectionPage, ContactSettings, Dashboard, Notice, NoticeSink,
    NotificationComposer, UserDirectory,
};
use store::{AuthClient, RestStore, TableStore};

/// Application core shared by every page
///
/// Owns the store handle, the ambient session state, and the notice
/// channel; hands out repositories and page models wired to them.
#[derive(Clone)]
pub struct AppCore {
    store: Arc<dyn TableStore>,
    sessions: Arc<SessionStore>,
    roles: RoleResolver,
    notices: NoticeSink,
}

impl AppCore {
    /// Assemble the core from explicit backends.
    ///
    /// Returns the core and the receiver the UI drains for transient
    /// notices.
    pub fn new(
        store: Arc<dyn TableStore>,
        auth: Arc<dyn AuthClient>,
    ) -> (Self, tokio::sync::mpsc::UnboundedReceiver<Notice>) {
        let (notices, notice_rx) = NoticeSink::channel();
        let sessions = Arc::new(SessionStore::new(auth));
        let roles = RoleResolver::new(Arc::clone(&store));

        (
            Self {
                store,
                sessions,
                roles,
                notices,
            },
            notice_rx,
        )
    }

    /// Assemble the core against the hosted backend described by the
    /// configuration. The REST client serves both the table and the
    /// auth contract.
    pub fn connect(
        config: &config::AppConfig,
    ) -> error::Result<(Self, tokio::sync::mpsc::UnboundedReceiver<Notice>)> {
        let rest = Arc::new(RestStore::new(&config.store)?);
        tracing::info!(url = %config.store.url, "store client ready");
        Ok(Self::new(
            Arc::clone(&rest) as Arc<dyn TableStore>,
            rest as Arc<dyn AuthClient>,
        ))
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn notices(&self) -> &NoticeSink {
        &self.notices
    }

    /// Guard instance for the navigation layer.
    pub fn guard(&self) -> RouteGuard {
        RouteGuard::new(Arc::clone(&self.sessions), self.roles.clone())
    }

    /// Repository for any entity type.
    pub fn repository<E: Entity>(&self) -> Repository<E> {
        Repository::new(Arc::clone(&self.store))
    }

    // =========================================================================
    // Page models
    // =========================================================================

    pub fn categories_page(&self) -> CollectionPage<Category> {
        CollectionPage::new("Category", self.repository(), self.notices.clone())
    }

    pub fn channels_page(&self) -> CollectionPage<Channel> {
        CollectionPage::new("Channel", self.repository(), self.notices.clone())
    }

    pub fn movies_page(&self) -> CollectionPage<Movie> {
        CollectionPage::new("Movie", self.repository(), self.notices.clone())
    }

    pub fn user_directory(&self) -> UserDirectory {
        UserDirectory::new(
            self.repository::<Profile>(),
            self.repository::<UserSubscription>(),
            self.notices.clone(),
        )
    }

    pub fn notification_composer(&self) -> NotificationComposer {
        NotificationComposer::new(
            self.repository::<Notification>(),
            Arc::clone(&self.sessions),
            self.notices.clone(),
        )
    }

    pub fn contact_settings(&self) -> ContactSettings {
        ContactSettings::new(self.repository::<ContactInfo>(), self.notices.clone())
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(Arc::clone(&self.store))
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(
            self.repository::<Category>(),
            self.repository::<Channel>(),
            self.repository::<Movie>(),
        )
    }
}
