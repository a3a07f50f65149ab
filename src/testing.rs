//! Test doubles for the backend, notifier and navigator seams.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::{ApiError, FavoritesBackend};
use crate::model::{Track, TrackId, UserId};
use crate::notify::{Notice, Notifier};
use crate::ui::Navigator;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Add { token: String, track_id: TrackId },
    Remove { token: String, track_id: TrackId },
    UserTracks { user_id: String },
    Logout,
}

/// Backend that records every call and answers with canned results.
/// Unconfigured calls succeed (empty body / empty track list).
#[derive(Default)]
pub struct FakeBackend {
    add_result: Mutex<Option<Result<String, ApiError>>>,
    remove_result: Mutex<Option<Result<String, ApiError>>>,
    tracks_result: Mutex<Option<Result<Vec<Track>, ApiError>>>,
    logout_fails: AtomicBool,
    requests: Mutex<Vec<Request>>,
}

impl FakeBackend {
    pub fn respond_to_add(&self, result: Result<String, ApiError>) {
        *self.add_result.lock().unwrap() = Some(result);
    }

    pub fn respond_to_remove(&self, result: Result<String, ApiError>) {
        *self.remove_result.lock().unwrap() = Some(result);
    }

    pub fn respond_to_tracks(&self, result: Result<Vec<Track>, ApiError>) {
        *self.tracks_result.lock().unwrap() = Some(result);
    }

    pub fn fail_logout(&self) {
        self.logout_fails.store(true, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn logout_calls(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| **r == Request::Logout)
            .count()
    }

    fn record(&self, request: Request) {
        self.requests.lock().unwrap().push(request);
    }
}

#[async_trait]
impl FavoritesBackend for FakeBackend {
    async fn add_favorite(&self, access_token: &str, track_id: &TrackId) -> Result<String, ApiError> {
        self.record(Request::Add {
            token: access_token.to_string(),
            track_id: track_id.clone(),
        });
        self.add_result.lock().unwrap().clone().unwrap_or_else(|| Ok(String::new()))
    }

    async fn remove_favorite(&self, access_token: &str, track_id: &TrackId) -> Result<String, ApiError> {
        self.record(Request::Remove {
            token: access_token.to_string(),
            track_id: track_id.clone(),
        });
        self.remove_result.lock().unwrap().clone().unwrap_or_else(|| Ok(String::new()))
    }

    async fn user_tracks(&self, user_id: &UserId) -> Result<Vec<Track>, ApiError> {
        self.record(Request::UserTracks {
            user_id: user_id.to_string(),
        });
        self.tracks_result.lock().unwrap().clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record(Request::Logout);
        if self.logout_fails.load(Ordering::SeqCst) {
            Err(ApiError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str) {
        self.visited.lock().unwrap().push(target.to_string());
    }
}

/// Track with only an id.
pub fn track(id: &str) -> Track {
    Track {
        id: TrackId::from(id),
        rest: serde_json::Map::new(),
    }
}
