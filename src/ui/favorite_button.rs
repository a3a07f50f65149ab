use std::fmt;

use crate::favorites::{FavoriteState, FavoritesCache, FavoritesSync};
use crate::model::TrackId;

/// What clicking the button does in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    AddToFavorites,
    RemoveFromFavorites,
}

/// Favorite toggle for one track.
///
/// Its state is always read back from the cache, never set directly, so a
/// failed click leaves the button exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteButton {
    track_id: TrackId,
    state: FavoriteState,
}

impl FavoriteButton {
    pub fn render(cache: &FavoritesCache, track_id: TrackId) -> Self {
        let state = FavoriteState::from_favorite(cache.is_favorite(&track_id));
        Self { track_id, state }
    }

    pub fn track_id(&self) -> &TrackId {
        &self.track_id
    }

    pub fn state(&self) -> FavoriteState {
        self.state
    }

    /// Whether the "favorited" style applies.
    pub fn is_favorited(&self) -> bool {
        self.state.is_favorited()
    }

    pub fn icon(&self) -> &'static str {
        match self.state {
            FavoriteState::Favorited => "❤️",
            FavoriteState::NotFavorited => "🤍",
        }
    }

    pub fn title(&self) -> &'static str {
        match self.state {
            FavoriteState::Favorited => "Remove from favorites",
            FavoriteState::NotFavorited => "Add to favorites",
        }
    }

    pub fn action(&self) -> ButtonAction {
        match self.state {
            FavoriteState::Favorited => ButtonAction::RemoveFromFavorites,
            FavoriteState::NotFavorited => ButtonAction::AddToFavorites,
        }
    }

    /// Perform the button's action; re-render from the cache on success.
    pub async fn click(&mut self, sync: &FavoritesSync) -> bool {
        let ok = match self.action() {
            ButtonAction::AddToFavorites => sync.add_to_favorites(&self.track_id).await,
            ButtonAction::RemoveFromFavorites => sync.remove_from_favorites(&self.track_id).await,
        };
        if ok {
            self.refresh(sync.cache());
        }
        ok
    }

    pub fn refresh(&mut self, cache: &FavoritesCache) {
        self.state = FavoriteState::from_favorite(cache.is_favorite(&self.track_id));
    }
}

impl fmt::Display for FavoriteButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.icon(), self.track_id, self.title())
    }
}
