use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque track identifier.
///
/// The backend and the cached favorites list usually carry JSON strings or
/// integers, but any JSON value is accepted and kept as `Other`. The wire
/// representation is preserved and equality is strict: `"7"` and `7` are
/// different tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackId {
    Number(i64),
    Text(String),
    Other(Value),
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackId::Number(n) => write!(f, "{}", n),
            TrackId::Text(s) => write!(f, "{}", s),
            TrackId::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<Value> for TrackId {
    /// Picks the same variant deserialization would, so `json!(7)` equals
    /// `TrackId::Number(7)`.
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => TrackId::Text(s),
            Value::Number(n) => match n.as_i64() {
                Some(i) => TrackId::Number(i),
                None => TrackId::Other(Value::Number(n)),
            },
            other => TrackId::Other(other),
        }
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        TrackId::Text(s.to_string())
    }
}

impl From<String> for TrackId {
    fn from(s: String) -> Self {
        TrackId::Text(s)
    }
}

impl From<i64> for TrackId {
    fn from(n: i64) -> Self {
        TrackId::Number(n)
    }
}

/// A track as returned by `GET /tracks/{userId}`.
///
/// Only `id` is interpreted; everything else the server sends is kept
/// untouched in `rest` so callers get the full payload back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// User identifier taken from the session record, used as a path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session record stored as JSON under the `user` key.
///
/// Written by the login flow. The known fields are kept as raw JSON values
/// because their types are not guaranteed by the writer; the accessors
/// apply the strict interpretation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "isLoggedIn", default, skip_serializing_if = "Value::is_null")]
    pub logged_in: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub username: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionRecord {
    pub fn new(id: impl Into<Value>, username: &str) -> Self {
        Self {
            logged_in: Value::Bool(true),
            id: id.into(),
            username: Value::String(username.to_string()),
            extra: Map::new(),
        }
    }

    /// True only when `isLoggedIn` is exactly boolean `true`.
    pub fn is_logged_in(&self) -> bool {
        matches!(self.logged_in, Value::Bool(true))
    }

    /// The user id, if it is a non-zero number or a non-empty string.
    pub fn user_id(&self) -> Option<UserId> {
        match &self.id {
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(UserId(n.to_string())),
            Value::String(s) if !s.is_empty() => Some(UserId(s.clone())),
            _ => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_str()
    }
}
