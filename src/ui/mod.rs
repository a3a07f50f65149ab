//! View models for the page: the auth section and per-track favorite
//! toggles. Hosts render these however they like; [`Navigator`] is how the
//! binder asks the host to leave the current page.

pub mod auth;
pub mod favorite_button;

pub use auth::{activate, AuthSection, Link, MenuEntry};
pub use favorite_button::{ButtonAction, FavoriteButton};

/// Full-page navigation, provided by the host.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str);
}

/// Navigator for headless hosts: the target is only logged.
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, target: &str) {
        tracing::info!("Navigating to {}", target);
    }
}
