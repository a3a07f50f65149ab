pub mod http;

use async_trait::async_trait;

use crate::model::{Track, TrackId, UserId};

pub use http::HttpBackend;

/// Failure of a single backend call.
///
/// 401 is split out because the sync client reacts to it differently from
/// every other failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized (HTTP 401)")]
    Unauthorized,
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Remote favorites API.
///
/// One request per call, no retries. Implementations report the raw outcome;
/// deciding what the user sees is the caller's job.
#[async_trait]
pub trait FavoritesBackend: Send + Sync {
    /// Mark a track as favorite. Returns the response body on 2xx.
    async fn add_favorite(&self, access_token: &str, track_id: &TrackId) -> Result<String, ApiError>;

    /// Unmark a track. Returns the response body on 2xx.
    async fn remove_favorite(&self, access_token: &str, track_id: &TrackId) -> Result<String, ApiError>;

    /// Full list of a user's favorite tracks. Unauthenticated.
    async fn user_tracks(&self, user_id: &UserId) -> Result<Vec<Track>, ApiError>;

    /// Tell the server the session ended. Body is ignored.
    async fn logout(&self) -> Result<(), ApiError>;
}
