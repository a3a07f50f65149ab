//! User-visible notices.
//!
//! Every user-facing failure goes through a [`Notifier`] as a blocking,
//! modal-style message. Inline UI state never reflects a failure.

use std::fmt;

/// Which favorites mutation a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteAction {
    Add,
    Remove,
}

impl fmt::Display for FavoriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoriteAction::Add => write!(f, "add"),
            FavoriteAction::Remove => write!(f, "remove"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No logged-in session at all.
    NotLoggedIn { action: FavoriteAction },
    /// Logged in but the access token is missing or was rejected (401).
    CredentialRequired { action: FavoriteAction },
    /// Any other failure; detail is in the log.
    ActionFailed { action: FavoriteAction },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NotLoggedIn { action: FavoriteAction::Add } => {
                write!(f, "Please log in to add this track to your favorites")
            }
            Notice::NotLoggedIn { action: FavoriteAction::Remove } => write!(f, "Please log in"),
            Notice::CredentialRequired { action: FavoriteAction::Add } => {
                write!(f, "You need to log in to add tracks to your favorites")
            }
            Notice::CredentialRequired { action: FavoriteAction::Remove } => {
                write!(f, "You need to log in")
            }
            Notice::ActionFailed { action: FavoriteAction::Add } => write!(
                f,
                "Could not add the track to your favorites. Check the log for details."
            ),
            Notice::ActionFailed { action: FavoriteAction::Remove } => write!(
                f,
                "Could not remove the track from your favorites. Check the log for details."
            ),
        }
    }
}

/// Displays a notice to the user and returns once it is dismissed.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier for headless hosts: notices become warn-level log lines.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!("{}", notice);
    }
}

/// Notifier for terminal hosts: notices are printed to stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", notice);
    }
}
