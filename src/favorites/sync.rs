use std::sync::Arc;

use super::{FavoriteState, FavoritesCache, FavoritesLoad, SkipReason, ToggleOutcome};
use crate::backend::{ApiError, FavoritesBackend};
use crate::model::TrackId;
use crate::notify::{FavoriteAction, Notice, Notifier};
use crate::session::SessionReader;

/// Pushes favorite toggles to the backend and mirrors confirmed changes
/// into the local cache.
///
/// A failed call never touches the cache. There are no retries; the user
/// gets exactly one notice per failed call.
pub struct FavoritesSync {
    session: Arc<SessionReader>,
    cache: Arc<FavoritesCache>,
    backend: Arc<dyn FavoritesBackend>,
    notifier: Arc<dyn Notifier>,
}

impl FavoritesSync {
    pub fn new(
        session: Arc<SessionReader>,
        cache: Arc<FavoritesCache>,
        backend: Arc<dyn FavoritesBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            cache,
            backend,
            notifier,
        }
    }

    pub fn cache(&self) -> &FavoritesCache {
        &self.cache
    }

    pub fn session(&self) -> &SessionReader {
        &self.session
    }

    /// Add a track to favorites. Returns true once the server confirmed and
    /// the cache was updated.
    pub async fn add_to_favorites(&self, track_id: &TrackId) -> bool {
        self.apply(FavoriteAction::Add, track_id).await
    }

    /// Remove a track from favorites. Returns true once the server confirmed
    /// and the cache was updated.
    pub async fn remove_from_favorites(&self, track_id: &TrackId) -> bool {
        self.apply(FavoriteAction::Remove, track_id).await
    }

    /// Flip the track's state according to the cache.
    ///
    /// `Changed` is reported only when the cache ends up in the other state.
    pub async fn toggle(&self, track_id: &TrackId) -> ToggleOutcome {
        let current = FavoriteState::from_favorite(self.cache.is_favorite(track_id));
        let ok = match current {
            FavoriteState::Favorited => self.remove_from_favorites(track_id).await,
            FavoriteState::NotFavorited => self.add_to_favorites(track_id).await,
        };

        if !ok {
            return ToggleOutcome::Unchanged(current);
        }

        let new = FavoriteState::from_favorite(self.cache.is_favorite(track_id));
        if new == current {
            tracing::warn!(
                "Server confirmed favorite change for {} but local cache is out of sync",
                track_id
            );
            return ToggleOutcome::Unchanged(current);
        }
        ToggleOutcome::Changed(new)
    }

    async fn apply(&self, action: FavoriteAction, track_id: &TrackId) -> bool {
        if !self.session.is_logged_in() {
            self.notifier.notify(Notice::NotLoggedIn { action });
            return false;
        }

        let Some(token) = self.session.access_token() else {
            tracing::error!("No access token found");
            self.notifier.notify(Notice::CredentialRequired { action });
            return false;
        };

        let result = match action {
            FavoriteAction::Add => self.backend.add_favorite(&token, track_id).await,
            FavoriteAction::Remove => self.backend.remove_favorite(&token, track_id).await,
        };

        match result {
            Ok(body) => {
                match action {
                    FavoriteAction::Add => {
                        tracing::debug!("Track {} added to favorites: {}", track_id, body);
                        self.cache.add_local(track_id);
                    }
                    FavoriteAction::Remove => {
                        tracing::debug!("Track {} removed from favorites: {}", track_id, body);
                        self.cache.remove_local(track_id);
                    }
                }
                true
            }
            Err(ApiError::Unauthorized) => {
                tracing::warn!("Server rejected access token trying to {} favorite {}", action, track_id);
                self.notifier.notify(Notice::CredentialRequired { action });
                false
            }
            Err(e) => {
                tracing::error!("Error trying to {} favorite {}: {}", action, track_id, e);
                self.notifier.notify(Notice::ActionFailed { action });
                false
            }
        }
    }

    /// Fetch the user's full favorites list and mirror it into the cache.
    ///
    /// On failure the cache is left as it was.
    pub async fn load_favorite_tracks(&self) -> FavoritesLoad {
        if !self.session.is_logged_in() {
            tracing::debug!("Not logged in, skipping favorites load");
            return FavoritesLoad::Skipped(SkipReason::NotLoggedIn);
        }

        let Some(user_id) = self.session.user_data().and_then(|r| r.user_id()) else {
            tracing::debug!("Session record has no user id, skipping favorites load");
            return FavoritesLoad::Skipped(SkipReason::MissingUserId);
        };

        match self.backend.user_tracks(&user_id).await {
            Ok(tracks) => {
                let ids: Vec<TrackId> = tracks.iter().map(|t| t.id.clone()).collect();
                self.cache.replace_all(&ids);
                tracing::info!("Loaded {} favorite tracks", tracks.len());
                FavoritesLoad::Loaded(tracks)
            }
            Err(e) => {
                tracing::error!("Error loading favorite tracks: {}", e);
                FavoritesLoad::Failed(e)
            }
        }
    }
}
