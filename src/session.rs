//! Session state as seen through the store.
//!
//! The session record and the access token are written by the login flow,
//! which lives outside this crate. Reads here are fail-closed: anything
//! missing or malformed means "not logged in".

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::backend::FavoritesBackend;
use crate::model::SessionRecord;
use crate::storage::{KeyValueStore, ACCESS_TOKEN_KEY, USER_KEY};
use crate::ui::Navigator;

pub struct SessionReader {
    store: Arc<dyn KeyValueStore>,
    backend: Arc<dyn FavoritesBackend>,
    navigator: Arc<dyn Navigator>,
    login_page: String,
}

impl SessionReader {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        backend: Arc<dyn FavoritesBackend>,
        navigator: Arc<dyn Navigator>,
        login_page: impl Into<String>,
    ) -> Self {
        Self {
            store,
            backend,
            navigator,
            login_page: login_page.into(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user_data().is_some_and(|record| record.is_logged_in())
    }

    /// Parsed session record, or `None` when absent or not a JSON object.
    pub fn user_data(&self) -> Option<SessionRecord> {
        let raw = match self.store.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Could not read session record: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Ignoring unparsable session record: {}", e);
                None
            }
        }
    }

    /// Bearer token, if one is stored and non-empty.
    pub fn access_token(&self) -> Option<String> {
        match self.store.get(ACCESS_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Could not read access token: {}", e);
                None
            }
        }
    }

    /// Persist a session the way the login flow does.
    pub fn login(&self, record: &SessionRecord, access_token: &str) -> Result<()> {
        let json = serde_json::to_string(record).context("Failed to serialize session record")?;
        self.store.set(USER_KEY, &json)?;
        self.store.set(ACCESS_TOKEN_KEY, access_token)?;
        Ok(())
    }

    /// Drop the session record, notify the server in the background and
    /// navigate to the login page.
    ///
    /// The server notification is detached: its outcome is only logged.
    /// The access token is left in the store.
    pub fn logout(&self) {
        if let Err(e) = self.store.remove(USER_KEY) {
            tracing::warn!("Could not remove session record: {}", e);
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let backend = Arc::clone(&self.backend);
                handle.spawn(async move {
                    if let Err(e) = backend.logout().await {
                        tracing::warn!("Logout notification failed: {}", e);
                    }
                });
            }
            Err(_) => {
                tracing::warn!("No async runtime, skipping logout notification");
            }
        }

        self.navigator.navigate(&self.login_page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::testing::{FakeBackend, RecordingNavigator};

    fn reader(store: MemoryStore) -> (SessionReader, Arc<FakeBackend>, Arc<RecordingNavigator>) {
        let backend = Arc::new(FakeBackend::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let reader = SessionReader::new(
            Arc::new(store),
            backend.clone(),
            navigator.clone(),
            "login.html",
        );
        (reader, backend, navigator)
    }

    #[test]
    fn test_absent_record_is_logged_out() {
        let (reader, _, _) = reader(MemoryStore::new());
        assert!(!reader.is_logged_in());
        assert!(reader.user_data().is_none());
    }

    #[test]
    fn test_non_json_record_is_logged_out() {
        let (reader, _, _) = reader(MemoryStore::with_entries([(USER_KEY, "{not json")]));
        assert!(!reader.is_logged_in());
        assert!(reader.user_data().is_none());
    }

    #[test]
    fn test_non_object_record_is_logged_out() {
        for raw in ["null", "true", "[1,2]", "\"user\""] {
            let (reader, _, _) = reader(MemoryStore::with_entries([(USER_KEY, raw)]));
            assert!(!reader.is_logged_in(), "{raw}");
            assert!(reader.user_data().is_none(), "{raw}");
        }
    }

    #[test]
    fn test_logged_in_flag_must_be_strictly_true() {
        let (reader, _, _) = reader(MemoryStore::with_entries([(
            USER_KEY,
            r#"{"isLoggedIn": "true", "id": 7}"#,
        )]));
        assert!(!reader.is_logged_in());
        // Record still parses and is returned
        assert!(reader.user_data().is_some());
    }

    #[test]
    fn test_valid_record() {
        let (reader, _, _) = reader(MemoryStore::with_entries([(
            USER_KEY,
            r#"{"isLoggedIn": true, "id": 7, "username": "ann"}"#,
        )]));
        assert!(reader.is_logged_in());
        let record = reader.user_data().unwrap();
        assert_eq!(record.username(), Some("ann"));
        assert_eq!(record.user_id().unwrap().as_str(), "7");
    }

    #[test]
    fn test_access_token() {
        let (empty, _, _) = reader(MemoryStore::new());
        assert_eq!(empty.access_token(), None);

        let (blank, _, _) = reader(MemoryStore::with_entries([(ACCESS_TOKEN_KEY, "")]));
        assert_eq!(blank.access_token(), None);

        let (present, _, _) = reader(MemoryStore::with_entries([(ACCESS_TOKEN_KEY, "tok")]));
        assert_eq!(present.access_token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_login_writes_record_and_token() {
        let (reader, _, _) = reader(MemoryStore::new());
        reader.login(&SessionRecord::new(7, "ann"), "tok").unwrap();

        assert!(reader.is_logged_in());
        assert_eq!(reader.access_token().as_deref(), Some("tok"));
        assert_eq!(reader.user_data().unwrap().username(), Some("ann"));
    }

    #[tokio::test]
    async fn test_logout_clears_record_notifies_and_navigates() {
        let (reader, backend, navigator) = reader(MemoryStore::new());
        reader.login(&SessionRecord::new(7, "ann"), "tok").unwrap();

        reader.logout();

        assert!(!reader.is_logged_in());
        assert_eq!(navigator.visited(), vec!["login.html".to_string()]);
        // Token has its own lifecycle
        assert_eq!(reader.access_token().as_deref(), Some("tok"));

        for _ in 0..10 {
            if backend.logout_calls() > 0 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(backend.logout_calls(), 1);
    }

    #[tokio::test]
    async fn test_logout_navigates_even_when_server_fails() {
        let (reader, backend, navigator) = reader(MemoryStore::new());
        backend.fail_logout();
        reader.login(&SessionRecord::new(7, "ann"), "tok").unwrap();

        reader.logout();

        assert!(!reader.is_logged_in());
        assert_eq!(navigator.visited(), vec!["login.html".to_string()]);
    }

    #[test]
    fn test_logout_without_runtime_still_navigates() {
        let (reader, backend, navigator) = reader(MemoryStore::new());
        reader.login(&SessionRecord::new(7, "ann"), "tok").unwrap();

        reader.logout();

        assert!(!reader.is_logged_in());
        assert_eq!(navigator.visited().len(), 1);
        assert_eq!(backend.logout_calls(), 0);
    }
}
