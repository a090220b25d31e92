//! Route surface
//!
//! Client-side paths, not server endpoints. Unmatched paths fall
//! through to `NotFound` rather than erroring.

/// Every page the application can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` - public landing page
    Landing,
    /// `/auth` - member sign-in
    Auth,
    /// `/browse` - public catalog
    Browse,
    /// `/movie/{id}` - movie detail
    MovieDetail { id: String },
    /// `/admin/auth` - admin sign-in
    AdminAuth,
    /// `/admin/dashboard`
    AdminDashboard,
    /// `/admin/movies`
    AdminMovies,
    /// `/admin/channels`
    AdminChannels,
    /// `/admin/users`
    AdminUsers,
    /// `/admin/categories`
    AdminCategories,
    /// `/admin/notifications`
    AdminNotifications,
    /// `/admin/contact`
    AdminContact,
    /// Catch-all for unmatched paths
    NotFound,
}

impl Route {
    /// Parse a path into a route. Never fails; unknown paths map to
    /// `NotFound`.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };

        match trimmed {
            "/" => Route::Landing,
            "/auth" => Route::Auth,
            "/browse" => Route::Browse,
            "/admin/auth" => Route::AdminAuth,
            "/admin/dashboard" => Route::AdminDashboard,
            "/admin/movies" => Route::AdminMovies,
            "/admin/channels" => Route::AdminChannels,
            "/admin/users" => Route::AdminUsers,
            "/admin/categories" => Route::AdminCategories,
            "/admin/notifications" => Route::AdminNotifications,
            "/admin/contact" => Route::AdminContact,
            _ => match trimmed.strip_prefix("/movie/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::MovieDetail {
                    id: id.to_string(),
                },
                _ => Route::NotFound,
            },
        }
    }

    /// The canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Auth => "/auth".to_string(),
            Route::Browse => "/browse".to_string(),
            Route::MovieDetail { id } => format!("/movie/{id}"),
            Route::AdminAuth => "/admin/auth".to_string(),
            Route::AdminDashboard => "/admin/dashboard".to_string(),
            Route::AdminMovies => "/admin/movies".to_string(),
            Route::AdminChannels => "/admin/channels".to_string(),
            Route::AdminUsers => "/admin/users".to_string(),
            Route::AdminCategories => "/admin/categories".to_string(),
            Route::AdminNotifications => "/admin/notifications".to_string(),
            Route::AdminContact => "/admin/contact".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Whether this page requires the administrative capability.
    ///
    /// Every admin page except the admin sign-in screen itself.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Route::AdminDashboard
                | Route::AdminMovies
                | Route::AdminChannels
                | Route::AdminUsers
                | Route::AdminCategories
                | Route::AdminNotifications
                | Route::AdminContact
        )
    }

    /// All guarded admin routes, in navigation-menu order.
    pub fn admin_routes() -> [Route; 7] {
        [
            Route::AdminDashboard,
            Route::AdminMovies,
            Route::AdminChannels,
            Route::AdminUsers,
            Route::AdminCategories,
            Route::AdminNotifications,
            Route::AdminContact,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Landing);
        assert_eq!(Route::parse("/browse"), Route::Browse);
        assert_eq!(Route::parse("/admin/dashboard"), Route::AdminDashboard);
        assert_eq!(Route::parse("/admin/contact/"), Route::AdminContact);
    }

    #[test]
    fn parse_movie_detail() {
        assert_eq!(
            Route::parse("/movie/01ARZ3NDEKTSV4RRFFQ69G5FAV"),
            Route::MovieDetail {
                id: "01ARZ3NDEKTSV4RRFFQ69G5FAV".to_string()
            }
        );
        assert_eq!(Route::parse("/movie/"), Route::NotFound);
        assert_eq!(Route::parse("/movie/a/b"), Route::NotFound);
    }

    #[test]
    fn unmatched_paths_fall_through() {
        assert_eq!(Route::parse("/admin"), Route::NotFound);
        assert_eq!(Route::parse("/nope"), Route::NotFound);
    }

    #[test]
    fn admin_auth_is_not_guarded() {
        assert!(!Route::AdminAuth.requires_admin());
        for route in Route::admin_routes() {
            assert!(route.requires_admin(), "{route:?} should be guarded");
        }
    }

    #[test]
    fn path_round_trips() {
        for route in Route::admin_routes() {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
