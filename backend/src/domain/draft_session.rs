//! Typed access to the session scope: the reservation draft, one-shot flash
//! messages and the authentication marker.
//!
//! Reads never fail from the caller's point of view. A value that cannot be
//! read or decoded is reported as [`Lookup::Absent`] after logging, which
//! sends the booking workflow down its abort path instead of a 500.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::ReservationDraft;
use super::ports::{SessionScope, SessionScopeError};

/// Session key holding the reservation draft.
pub const DRAFT_KEY: &str = "reservation";
/// Session key whose presence marks a signed-in visitor.
pub const USER_ID_KEY: &str = "user_id";

/// Result of a typed session read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Absent,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Absent => None,
        }
    }
}

/// One-shot status message slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Error,
    Warning,
    Success,
}

impl FlashKind {
    /// Session key of the slot.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

/// Flash messages consumed for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
}

impl Flashes {
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.warning.is_none() && self.success.is_none()
    }
}

/// Typed wrapper over a [`SessionScope`].
pub struct DraftSession<'a, S: SessionScope + ?Sized> {
    scope: &'a S,
}

impl<'a, S: SessionScope + ?Sized> DraftSession<'a, S> {
    pub fn new(scope: &'a S) -> Self {
        Self { scope }
    }

    /// Serialise and store a value under `key`.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SessionScopeError> {
        let encoded = serde_json::to_value(value)
            .map_err(|err| SessionScopeError::write(format!("{key}: {err}")))?;
        self.scope.put_value(key, encoded)
    }

    /// Read and decode the value under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Lookup<T> {
        let raw = match self.scope.get_value(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Lookup::Absent,
            Err(err) => {
                warn!(error = %err, key, "session value unreadable");
                return Lookup::Absent;
            }
        };
        match serde_json::from_value(raw) {
            Ok(value) => Lookup::Found(value),
            Err(err) => {
                warn!(error = %err, key, "session value has an unexpected shape");
                Lookup::Absent
            }
        }
    }

    pub fn remove(&self, key: &str) {
        self.scope.remove_value(key);
    }

    /// Read a string and remove it in the same step.
    pub fn pop_string(&self, key: &str) -> Option<String> {
        let value = match self.get::<Value>(key) {
            Lookup::Found(Value::String(text)) => Some(text),
            Lookup::Found(other) => {
                warn!(key, kind = json_kind(&other), "discarding non-string flash value");
                None
            }
            Lookup::Absent => None,
        };
        self.remove(key);
        value
    }

    pub fn draft(&self) -> Lookup<ReservationDraft> {
        self.get(DRAFT_KEY)
    }

    pub fn store_draft(&self, draft: &ReservationDraft) -> Result<(), SessionScopeError> {
        self.put(DRAFT_KEY, draft)
    }

    pub fn clear_draft(&self) {
        self.remove(DRAFT_KEY);
    }

    /// Record a message for the next render.
    pub fn flash(&self, kind: FlashKind, message: &str) -> Result<(), SessionScopeError> {
        self.put(kind.key(), &message)
    }

    /// Consume every pending flash message.
    pub fn take_flashes(&self) -> Flashes {
        Flashes {
            error: self.pop_string(FlashKind::Error.key()),
            warning: self.pop_string(FlashKind::Warning.key()),
            success: self.pop_string(FlashKind::Success.key()),
        }
    }

    /// True when a user id is present in the session.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.scope.get_value(USER_ID_KEY), Ok(Some(value)) if !value.is_null())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
