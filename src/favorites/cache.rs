//! Local mirror of the favorites set, stored as a JSON array under
//! `favoriteTracks`.
//!
//! Every read-modify-write holds `write_lock`, so concurrent toggles in this
//! process cannot lose each other's update. Other processes sharing the
//! store are not coordinated with; last write wins.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::model::TrackId;
use crate::storage::{KeyValueStore, FAVORITE_TRACKS_KEY};

/// What the store currently holds for the favorites entry.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalFavorites {
    Missing,
    /// Present but not a JSON array of track ids.
    Corrupt { reason: String },
    /// The store itself could not be read.
    Unavailable { reason: String },
    Ids(Vec<TrackId>),
}

impl LocalFavorites {
    /// Ids in the entry; anything unusable reads as empty.
    pub fn ids(self) -> Vec<TrackId> {
        match self {
            LocalFavorites::Ids(ids) => ids,
            _ => Vec::new(),
        }
    }

    pub fn contains(&self, track_id: &TrackId) -> bool {
        match self {
            LocalFavorites::Ids(ids) => ids.contains(track_id),
            _ => false,
        }
    }
}

pub struct FavoritesCache {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl FavoritesCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> LocalFavorites {
        let raw = match self.store.get(FAVORITE_TRACKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LocalFavorites::Missing,
            Err(e) => {
                return LocalFavorites::Unavailable {
                    reason: e.to_string(),
                }
            }
        };

        match serde_json::from_str::<Vec<TrackId>>(&raw) {
            Ok(ids) => LocalFavorites::Ids(ids),
            Err(e) => LocalFavorites::Corrupt {
                reason: e.to_string(),
            },
        }
    }

    pub fn ids(&self) -> Vec<TrackId> {
        self.snapshot().ids()
    }

    pub fn is_favorite(&self, track_id: &TrackId) -> bool {
        self.snapshot().contains(track_id)
    }

    /// Append `track_id` unless present. A corrupt entry is replaced.
    /// Returns true if the id was added.
    pub fn add_local(&self, track_id: &TrackId) -> bool {
        let _guard = self.lock();

        let mut ids = match self.snapshot() {
            LocalFavorites::Ids(ids) => ids,
            LocalFavorites::Missing => Vec::new(),
            LocalFavorites::Corrupt { reason } => {
                tracing::warn!("Overwriting corrupt favorites cache: {}", reason);
                Vec::new()
            }
            LocalFavorites::Unavailable { reason } => {
                tracing::warn!("Favorites cache unavailable, not adding {}: {}", track_id, reason);
                return false;
            }
        };

        if ids.contains(track_id) {
            return false;
        }
        ids.push(track_id.clone());
        self.write(&ids)
    }

    /// Drop `track_id` if present. A corrupt entry is left untouched.
    /// Returns true if the id was removed.
    pub fn remove_local(&self, track_id: &TrackId) -> bool {
        let _guard = self.lock();

        let mut ids = match self.snapshot() {
            LocalFavorites::Ids(ids) => ids,
            LocalFavorites::Missing => return false,
            LocalFavorites::Corrupt { reason } | LocalFavorites::Unavailable { reason } => {
                tracing::error!("Error removing {} from local favorites: {}", track_id, reason);
                return false;
            }
        };

        let before = ids.len();
        ids.retain(|id| id != track_id);
        if ids.len() == before {
            return false;
        }
        self.write(&ids)
    }

    /// Overwrite the entry with `track_ids`, keeping first occurrences only.
    pub fn replace_all(&self, track_ids: &[TrackId]) {
        let _guard = self.lock();

        let mut ids: Vec<TrackId> = Vec::with_capacity(track_ids.len());
        for id in track_ids {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        self.write(&ids);
    }

    pub fn clear(&self) {
        let _guard = self.lock();
        if let Err(e) = self.store.remove(FAVORITE_TRACKS_KEY) {
            tracing::warn!("Could not clear favorites cache: {}", e);
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded data is (), a poisoned lock has nothing to repair
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self, ids: &[TrackId]) -> bool {
        let json = match serde_json::to_string(ids) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Could not serialize favorites: {}", e);
                return false;
            }
        };
        match self.store.set(FAVORITE_TRACKS_KEY, &json) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Could not write favorites cache: {}", e);
                false
            }
        }
    }
}
