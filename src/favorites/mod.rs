//! Favorite tracks: local mirror plus remote sync.
//!
//! The server owns the favorites set. [`FavoritesCache`] keeps a copy in the
//! store so toggles render without a round trip; [`FavoritesSync`] talks to
//! the backend and updates the copy only after the server confirmed.

pub mod cache;
pub mod sync;

use crate::backend::ApiError;
use crate::model::Track;

pub use cache::{FavoritesCache, LocalFavorites};
pub use sync::FavoritesSync;

/// Display state of one track's toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    NotFavorited,
    Favorited,
}

impl FavoriteState {
    pub fn from_favorite(is_favorite: bool) -> Self {
        if is_favorite {
            FavoriteState::Favorited
        } else {
            FavoriteState::NotFavorited
        }
    }

    pub fn is_favorited(self) -> bool {
        self == FavoriteState::Favorited
    }
}

/// Result of [`FavoritesSync::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The server accepted the change; this is the new state.
    Changed(FavoriteState),
    /// The change failed; state and cache are as before.
    Unchanged(FavoriteState),
}

impl ToggleOutcome {
    pub fn state(self) -> FavoriteState {
        match self {
            ToggleOutcome::Changed(s) | ToggleOutcome::Unchanged(s) => s,
        }
    }
}

/// Why a full favorites load did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotLoggedIn,
    MissingUserId,
}

/// Outcome of [`FavoritesSync::load_favorite_tracks`].
#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesLoad {
    /// Fetched; the cache now mirrors these tracks.
    Loaded(Vec<Track>),
    /// Guard failed, no request was issued.
    Skipped(SkipReason),
    /// Request failed; the cache was left as it was.
    Failed(ApiError),
}

impl FavoritesLoad {
    /// Tracks to show. Skipped and failed loads show nothing.
    pub fn into_tracks(self) -> Vec<Track> {
        match self {
            FavoritesLoad::Loaded(tracks) => tracks,
            FavoritesLoad::Skipped(_) | FavoritesLoad::Failed(_) => Vec::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, FavoritesLoad::Loaded(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::track;

    #[test]
    fn test_into_tracks_collapses_non_loaded() {
        assert!(FavoritesLoad::Skipped(SkipReason::NotLoggedIn).into_tracks().is_empty());
        assert!(FavoritesLoad::Failed(ApiError::Unauthorized).into_tracks().is_empty());
        assert_eq!(FavoritesLoad::Loaded(vec![track("a")]).into_tracks().len(), 1);
    }

    #[test]
    fn test_toggle_outcome_state() {
        assert_eq!(
            ToggleOutcome::Changed(FavoriteState::Favorited).state(),
            FavoriteState::Favorited
        );
        assert!(!ToggleOutcome::Unchanged(FavoriteState::NotFavorited).state().is_favorited());
    }
}
