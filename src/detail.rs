use std::sync::Arc;
use tracing::{debug, warn};

use crate::catalog::{image_url, CatalogApi};
use crate::error::AppResult;
use crate::favorites::FavoritesRepository;
use crate::models::{CoverType, Movie};

/// Ephemeral view model for one detail-screen activation. Built fresh on
/// every activation, never cached across screens.
#[derive(Debug)]
pub struct MovieDetailView {
    pub movie: Movie,
    pub recommendations: Vec<Movie>,
    pub is_favorite: bool,
    pub cover_type: CoverType,
}

impl MovieDetailView {
    /// Absolute URL of the lead artwork, honoring the requested cover type
    /// and falling back to the other when the preferred path is missing.
    pub fn cover_url(&self) -> Option<String> {
        let (preferred, fallback) = match self.cover_type {
            CoverType::Poster => (&self.movie.poster_path, &self.movie.backdrop_path),
            CoverType::Backdrop => (&self.movie.backdrop_path, &self.movie.poster_path),
        };
        preferred
            .as_deref()
            .or(fallback.as_deref())
            .map(image_url)
    }
}

/// Composes one movie's detail, its recommendation set, and its favorite
/// membership into a [`MovieDetailView`].
pub struct DetailAggregator {
    catalog: Arc<dyn CatalogApi>,
    favorites: Arc<FavoritesRepository>,
}

impl DetailAggregator {
    pub fn new(catalog: Arc<dyn CatalogApi>, favorites: Arc<FavoritesRepository>) -> Self {
        Self { catalog, favorites }
    }

    /// Fetches detail and recommendations concurrently. A detail failure
    /// fails the whole call; a recommendations failure alone degrades to an
    /// empty sequence. The favorite flag is read from the repository after
    /// the detail resolves, so a corrupt store surfaces here too.
    pub async fn load_view(&self, id: i32, cover_type: CoverType) -> AppResult<MovieDetailView> {
        let (detail, recommendations) = tokio::join!(
            self.catalog.fetch_detail(id),
            self.catalog.fetch_recommendations(id),
        );

        let movie = detail?;
        let recommendations = match recommendations {
            Ok(list) => list,
            Err(e) => {
                warn!("recommendations for movie {} unavailable: {}", id, e);
                Vec::new()
            }
        };

        let is_favorite = self.favorites.contains(id).await?;
        debug!(
            movie_id = id,
            title = %movie.title,
            recommendations = recommendations.len(),
            is_favorite,
            "Built detail view"
        );

        Ok(MovieDetailView {
            movie,
            recommendations,
            is_favorite,
            cover_type,
        })
    }
}
