//! Wiring: one [`Client`] per page (or per binary run) bundles the store,
//! session reader, favorites cache/sync and the view builders.

use std::sync::Arc;

use anyhow::Result;

use crate::backend::{FavoritesBackend, HttpBackend};
use crate::config::Config;
use crate::favorites::{FavoritesCache, FavoritesLoad, FavoritesSync};
use crate::model::TrackId;
use crate::notify::Notifier;
use crate::session::SessionReader;
use crate::storage::{KeyValueStore, RedbStore};
use crate::ui::{self, AuthSection, FavoriteButton, MenuEntry, Navigator};

/// What the page shows right after load.
#[derive(Debug)]
pub struct PageLoad {
    pub auth: AuthSection,
    pub favorites: FavoritesLoad,
}

pub struct Client {
    config: Config,
    store: Arc<dyn KeyValueStore>,
    session: Arc<SessionReader>,
    sync: FavoritesSync,
    navigator: Arc<dyn Navigator>,
}

impl Client {
    pub fn new(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        backend: Arc<dyn FavoritesBackend>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let session = Arc::new(SessionReader::new(
            Arc::clone(&store),
            Arc::clone(&backend),
            Arc::clone(&navigator),
            config.pages.login.clone(),
        ));
        let cache = Arc::new(FavoritesCache::new(Arc::clone(&store)));
        let sync = FavoritesSync::new(Arc::clone(&session), cache, backend, notifier);

        Self {
            config,
            store,
            session,
            sync,
            navigator,
        }
    }

    /// Client over the on-disk store and the HTTP backend named in `config`.
    pub fn open(
        config: Config,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let store = RedbStore::open(&config.store_path()?)?;
        let backend = HttpBackend::new(&config.backend)?;
        tracing::debug!("Using {} store, backend at {}", store.backend_name(), backend.base_url());
        Ok(Self::new(
            config,
            Arc::new(store),
            Arc::new(backend),
            notifier,
            navigator,
        ))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn session(&self) -> &SessionReader {
        &self.session
    }

    pub fn favorites(&self) -> &FavoritesSync {
        &self.sync
    }

    pub fn auth_section(&self) -> AuthSection {
        AuthSection::for_session(&self.session, &self.config.pages)
    }

    /// Render the auth section, then pull the favorites list from the server.
    pub async fn on_page_load(&self) -> PageLoad {
        let auth = self.auth_section();
        let favorites = self.sync.load_favorite_tracks().await;
        PageLoad { auth, favorites }
    }

    pub fn favorite_button(&self, track_id: TrackId) -> FavoriteButton {
        FavoriteButton::render(self.sync.cache(), track_id)
    }

    pub fn activate(&self, entry: &MenuEntry) {
        ui::activate(entry, &self.session, self.navigator.as_ref());
    }
}
