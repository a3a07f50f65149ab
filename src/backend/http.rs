use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient, Response};

use super::{ApiError, FavoritesBackend};
use crate::config::BackendConfig;
use crate::model::{Track, TrackId, UserId};

/// `FavoritesBackend` over plain HTTP.
pub struct HttpBackend {
    base_url: String,
    http_client: HttpClient,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn favorite_url(&self) -> String {
        format!("{}/user/track/favorite", self.base_url)
    }

    fn user_tracks_url(&self, user_id: &UserId) -> String {
        format!("{}/tracks/{}", self.base_url, urlencoding::encode(user_id.as_str()))
    }

    fn logout_url(&self) -> String {
        format!("{}/user/logout", self.base_url)
    }

    /// Map a response to its body on 2xx, or to the matching error.
    async fn check(resp: Response) -> Result<String, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.text().await?);
        }
        if status.as_u16() == 401 {
            return Err(ApiError::Unauthorized);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl FavoritesBackend for HttpBackend {
    async fn add_favorite(&self, access_token: &str, track_id: &TrackId) -> Result<String, ApiError> {
        let resp = self
            .http_client
            .post(self.favorite_url())
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .query(&[("track_id", track_id.to_string())])
            .send()
            .await?;
        Self::check(resp).await
    }

    async fn remove_favorite(&self, access_token: &str, track_id: &TrackId) -> Result<String, ApiError> {
        let resp = self
            .http_client
            .delete(self.favorite_url())
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .query(&[("track_id", track_id.to_string())])
            .send()
            .await?;
        Self::check(resp).await
    }

    async fn user_tracks(&self, user_id: &UserId) -> Result<Vec<Track>, ApiError> {
        let resp = self
            .http_client
            .get(self.user_tracks_url(user_id))
            .send()
            .await?;
        let body = Self::check(resp).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let resp = self.http_client.post(self.logout_url()).send().await?;
        Self::check(resp).await.map(|_| ())
    }
}
