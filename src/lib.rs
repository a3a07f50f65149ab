//! Client-side favorites sync for the cadence music-streaming backend.
//!
//! - [`session`]: login state read from the store, logout
//! - [`favorites`]: local favorites mirror and its sync with the server
//! - [`backend`]: the remote HTTP API
//! - [`ui`]: view models for auth controls and favorite toggles
//! - [`client`]: everything wired together

pub mod backend;
pub mod client;
pub mod config;
pub mod favorites;
pub mod logger;
pub mod model;
pub mod notify;
pub mod session;
pub mod storage;
pub mod ui;

#[cfg(test)]
mod testing;

pub use client::{Client, PageLoad};
pub use config::Config;
pub use model::{SessionRecord, Track, TrackId};
