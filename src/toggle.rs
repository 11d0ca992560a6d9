use std::sync::Arc;
use tracing::info;

use crate::detail::MovieDetailView;
use crate::error::StorageError;
use crate::favorites::FavoritesRepository;

/// Governs a user-initiated favorite toggle. The persisted list and the
/// view's flag must never disagree once a transition completes, so the flag
/// only flips after the repository write succeeds. On failure the flag keeps
/// its previous value and the error is returned for the UI to report; the
/// user can simply retry.
///
/// All favorite mutation must go through here. Calling the repository's
/// `add` directly bypasses the duplicate guard this state machine provides.
pub struct ToggleCoordinator {
    favorites: Arc<FavoritesRepository>,
}

impl ToggleCoordinator {
    pub fn new(favorites: Arc<FavoritesRepository>) -> Self {
        Self { favorites }
    }

    /// Flips `view`'s favorite membership. Returns the new flag value on
    /// success.
    pub async fn toggle(&self, view: &mut MovieDetailView) -> Result<bool, StorageError> {
        if view.is_favorite {
            self.favorites.remove(view.movie.id).await?;
            view.is_favorite = false;
            info!("Removed '{}' from favorites", view.movie.title);
        } else {
            self.favorites.add(&view.movie).await?;
            view.is_favorite = true;
            info!("Added '{}' to favorites", view.movie.title);
        }
        Ok(view.is_favorite)
    }
}
