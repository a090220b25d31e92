//! Public catalog reads
//!
//! The storefront's read-only surface: everything the browse page
//! shows, grouped by category client-side, plus per-movie lookup for
//! the detail page. No write path exists here.

use crate::data::{Category, Channel, Movie, Repository};
use crate::error::Result;
use crate::store::Order;

/// Everything the browse page renders in one fetch.
#[derive(Debug, Clone, Default)]
pub struct BrowseContent {
    pub categories: Vec<Category>,
    pub channels: Vec<Channel>,
    pub movies: Vec<Movie>,
}

impl BrowseContent {
    /// Channels referencing the given category.
    pub fn channels_in<'a>(&'a self, category_id: &'a str) -> impl Iterator<Item = &'a Channel> + 'a {
        self.channels
            .iter()
            .filter(move |channel| channel.category_id.as_deref() == Some(category_id))
    }

    /// Movies referencing the given category.
    pub fn movies_in<'a>(&'a self, category_id: &'a str) -> impl Iterator<Item = &'a Movie> + 'a {
        self.movies
            .iter()
            .filter(move |movie| movie.category_id.as_deref() == Some(category_id))
    }
}

/// Read-only repositories behind the public pages.
pub struct Catalog {
    categories: Repository<Category>,
    channels: Repository<Channel>,
    movies: Repository<Movie>,
}

impl Catalog {
    pub fn new(
        categories: Repository<Category>,
        channels: Repository<Channel>,
        movies: Repository<Movie>,
    ) -> Self {
        Self {
            categories,
            channels,
            movies,
        }
    }

    /// Fetch the three collections concurrently, newest first.
    pub async fn browse(&self) -> Result<BrowseContent> {
        let (categories, channels, movies) = futures::try_join!(
            self.categories.list(Some(Order::created_at_desc())),
            self.channels.list(Some(Order::created_at_desc())),
            self.movies.list(Some(Order::created_at_desc())),
        )?;

        Ok(BrowseContent {
            categories,
            channels,
            movies,
        })
    }

    /// Lookup for the `/movie/{id}` detail page.
    pub async fn movie(&self, id: &str) -> Result<Option<Movie>> {
        self.movies.get(id).await
    }
}
