//! Rentable bungalows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a bungalow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(i32);

impl UnitId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw identifier as stored in the database.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UnitId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Validation errors raised by [`Unit::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitValidationError {
    /// The display name was blank.
    #[error("bungalow {id} has an empty name")]
    EmptyName { id: UnitId },
}

/// A rentable bungalow.
///
/// Units are read-only in this service: they are seeded by migrations and
/// never change once a restriction refers to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    id: UnitId,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Unit {
    /// Build a unit, rejecting blank names.
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, UnitValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(UnitValidationError::EmptyName { id });
        }
        Ok(Self {
            id,
            name,
            created_at,
            updated_at,
        })
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
