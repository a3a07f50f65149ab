use std::fmt;

use crate::config::PagesConfig;
use crate::session::SessionReader;

use super::Navigator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Link(Link),
    Divider,
    Logout,
}

/// Header auth controls, derived from the session on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSection {
    SignedIn { username: String, menu: Vec<MenuEntry> },
    SignedOut { login: Link, register: Link },
}

impl AuthSection {
    pub fn for_session(session: &SessionReader, pages: &PagesConfig) -> Self {
        if !session.is_logged_in() {
            return AuthSection::SignedOut {
                login: Link::new("Log in", &pages.login),
                register: Link::new("Register", &pages.register),
            };
        }

        let username = session
            .user_data()
            .and_then(|r| r.username().map(str::to_string))
            .unwrap_or_default();

        AuthSection::SignedIn {
            username,
            menu: vec![
                MenuEntry::Link(Link::new("My profile", &pages.profile)),
                MenuEntry::Link(Link::new("Settings", &pages.settings)),
                MenuEntry::Divider,
                MenuEntry::Logout,
            ],
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthSection::SignedIn { .. })
    }
}

/// Run what a menu entry does when the user picks it.
pub fn activate(entry: &MenuEntry, session: &SessionReader, navigator: &dyn Navigator) {
    match entry {
        MenuEntry::Link(link) => navigator.navigate(&link.href),
        MenuEntry::Divider => {}
        MenuEntry::Logout => session.logout(),
    }
}

impl fmt::Display for AuthSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthSection::SignedIn { username, menu } => {
                write!(f, "Signed in as {}", username)?;
                for entry in menu {
                    match entry {
                        MenuEntry::Link(link) => write!(f, " | {}", link.label)?,
                        MenuEntry::Divider => {}
                        MenuEntry::Logout => write!(f, " | Log out")?,
                    }
                }
                Ok(())
            }
            AuthSection::SignedOut { login, register } => {
                write!(f, "{} | {}", login.label, register.label)
            }
        }
    }
}
