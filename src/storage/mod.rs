//! Storage abstraction for the client.
//!
//! - [`MemoryStore`]: process-local map (tests, throwaway sessions)
//! - [`RedbStore`]: redb file on disk, survives restarts
//!
//! Everything that persists (session record, access token, cached favorites)
//! goes through a `dyn KeyValueStore`. Values are plain strings; callers
//! decide the encoding.

pub mod memory;
pub mod redb_store;

use anyhow::Result;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

/// Session record (JSON object).
pub const USER_KEY: &str = "user";
/// Bearer token for authenticated calls (raw string).
pub const ACCESS_TOKEN_KEY: &str = "jwt-access-token";
/// Cached favorite track ids (JSON array).
pub const FAVORITE_TRACKS_KEY: &str = "favoriteTracks";

/// String-keyed persistent store shared by every component.
///
/// Operations are synchronous and individually atomic. There is no
/// cross-key transaction; components that read-modify-write hold their own
/// lock around the sequence.
pub trait KeyValueStore: Send + Sync {
    /// Human-readable backend name (e.g., "memory", "redb").
    fn backend_name(&self) -> &str;

    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
