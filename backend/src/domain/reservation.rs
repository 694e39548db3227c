//! Reservations, their session-held drafts, and the restrictions that block
//! bungalows for a stay.
//!
//! A [`ReservationDraft`] is filled step by step across requests and lives in
//! the visitor's session. Each workflow step states which draft fields it
//! needs through the `require_*` accessors; a missing field means the visitor
//! skipped or lost a step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FieldSource, StayPeriod, UnitId};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw identifier.
            pub const fn new(raw: i32) -> Self {
                Self(raw)
            }

            /// Raw identifier as stored in the database.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id! {
    /// Identifier of a committed reservation.
    ReservationId
}

numeric_id! {
    /// Identifier of a restriction row.
    RestrictionId
}

/// A draft lacks a field that the current workflow step depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftStepError {
    #[error("reservation draft has no stay dates")]
    MissingStay,
    #[error("reservation draft has no bungalow selected")]
    MissingUnit,
    #[error("reservation draft has not been committed")]
    NotCommitted,
}

/// In-progress reservation carried in the session between workflow steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReservationDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub stay: Option<StayPeriod>,
    pub unit_id: Option<UnitId>,
    /// Cached for display so later steps need not look the unit up again.
    pub unit_name: Option<String>,
    /// Set once the reservation has been persisted.
    pub reservation_id: Option<ReservationId>,
}

impl ReservationDraft {
    /// Start a fresh draft for a searched stay.
    pub fn for_stay(stay: StayPeriod) -> Self {
        Self {
            stay: Some(stay),
            ..Self::default()
        }
    }

    pub fn require_stay(&self) -> Result<StayPeriod, DraftStepError> {
        self.stay.ok_or(DraftStepError::MissingStay)
    }

    pub fn require_unit(&self) -> Result<UnitId, DraftStepError> {
        self.unit_id.ok_or(DraftStepError::MissingUnit)
    }

    pub fn require_committed(&self) -> Result<ReservationId, DraftStepError> {
        self.reservation_id.ok_or(DraftStepError::NotCommitted)
    }

    /// Select a bungalow. The cached name is dropped when the unit changes.
    pub fn choose_unit(&mut self, unit_id: UnitId) {
        if self.unit_id != Some(unit_id) {
            self.unit_name = None;
        }
        self.unit_id = Some(unit_id);
    }

    /// Copy submitted guest details into the draft.
    pub fn apply_details(&mut self, details: GuestDetails) {
        let GuestDetails {
            full_name,
            email,
            phone,
        } = details;
        self.full_name = full_name;
        self.email = email;
        self.phone = phone;
    }

    /// Build the insert payload. Requires dates and a bungalow.
    pub fn to_new_reservation(&self) -> Result<NewReservation, DraftStepError> {
        Ok(NewReservation {
            full_name: self.full_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            stay: self.require_stay()?,
            unit_id: self.require_unit()?,
        })
    }

    /// Record the identity assigned at commit time.
    pub fn mark_committed(&mut self, reservation_id: ReservationId) {
        self.reservation_id = Some(reservation_id);
    }
}

/// Guest-provided personal details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl GuestDetails {
    pub const FULL_NAME: &'static str = "full_name";
    pub const EMAIL: &'static str = "email";
    pub const PHONE: &'static str = "phone";
}

impl FieldSource for GuestDetails {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            Self::FULL_NAME => Some(&self.full_name),
            Self::EMAIL => Some(&self.email),
            Self::PHONE => Some(&self.phone),
            _ => None,
        }
    }
}

/// Validated reservation ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub stay: StayPeriod,
    pub unit_id: UnitId,
}

/// Review state of a persisted reservation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Awaiting review by staff (stored as 0).
    #[default]
    Pending,
    /// Handled by staff (stored as 1).
    Processed,
}

impl ReviewStatus {
    /// Numeric flag stored in the `processed` column.
    pub const fn as_flag(self) -> i16 {
        match self {
            Self::Pending => 0,
            Self::Processed => 1,
        }
    }
}

/// A persisted reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub stay: StayPeriod,
    pub unit_id: UnitId,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

/// Why a bungalow is blocked for a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionKind {
    /// Blocked by a guest reservation.
    Reservation,
    /// Blocked manually by the owner.
    OwnerBlock,
}

impl RestrictionKind {
    /// Row id of the kind in the `restrictions` lookup table.
    pub const fn id(self) -> i32 {
        match self {
            Self::Reservation => 1,
            Self::OwnerBlock => 2,
        }
    }
}

/// Restriction ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestriction {
    pub stay: StayPeriod,
    pub unit_id: UnitId,
    pub reservation_id: Option<ReservationId>,
    pub kind: RestrictionKind,
}

impl NewRestriction {
    /// Restriction caused by a freshly committed reservation.
    pub fn for_reservation(reservation_id: ReservationId, reservation: &NewReservation) -> Self {
        Self {
            stay: reservation.stay,
            unit_id: reservation.unit_id,
            reservation_id: Some(reservation_id),
            kind: RestrictionKind::Reservation,
        }
    }

    /// Manual owner block.
    pub fn owner_block(unit_id: UnitId, stay: StayPeriod) -> Self {
        Self {
            stay,
            unit_id,
            reservation_id: None,
            kind: RestrictionKind::OwnerBlock,
        }
    }
}

/// A persisted restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restriction {
    pub id: RestrictionId,
    pub stay: StayPeriod,
    pub unit_id: UnitId,
    pub reservation_id: Option<ReservationId>,
    pub kind: RestrictionKind,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn stay() -> StayPeriod {
        StayPeriod::parse("2037-01-01", "2037-01-02").expect("valid stay")
    }

    #[rstest]
    fn fresh_draft_only_carries_dates(stay: StayPeriod) {
        let draft = ReservationDraft::for_stay(stay);
        assert_eq!(draft.require_stay(), Ok(stay));
        assert_eq!(draft.require_unit(), Err(DraftStepError::MissingUnit));
        assert_eq!(draft.require_committed(), Err(DraftStepError::NotCommitted));
    }

    #[rstest]
    fn choosing_another_unit_drops_cached_name(stay: StayPeriod) {
        let mut draft = ReservationDraft::for_stay(stay);
        draft.choose_unit(UnitId::new(1));
        draft.unit_name = Some("Eremite's Hideaway".to_owned());

        draft.choose_unit(UnitId::new(1));
        assert_eq!(draft.unit_name.as_deref(), Some("Eremite's Hideaway"));

        draft.choose_unit(UnitId::new(2));
        assert_eq!(draft.unit_name, None);
        assert_eq!(draft.unit_id, Some(UnitId::new(2)));
    }

    #[rstest]
    fn new_reservation_needs_stay_and_unit(stay: StayPeriod) {
        let mut draft = ReservationDraft::default();
        assert_eq!(
            draft.to_new_reservation(),
            Err(DraftStepError::MissingStay)
        );

        draft.stay = Some(stay);
        assert_eq!(
            draft.to_new_reservation(),
            Err(DraftStepError::MissingUnit)
        );

        draft.choose_unit(UnitId::new(1));
        draft.apply_details(GuestDetails {
            full_name: " Peter Griffin ".to_owned(),
            email: "peter@griffin.family".to_owned(),
            phone: String::new(),
        });
        let reservation = draft.to_new_reservation().expect("complete draft");
        assert_eq!(reservation.full_name, "Peter Griffin");
        assert_eq!(reservation.unit_id, UnitId::new(1));
    }

    #[rstest]
    fn restriction_links_reservation(stay: StayPeriod) {
        let reservation = NewReservation {
            full_name: "Peter Griffin".to_owned(),
            email: "peter@griffin.family".to_owned(),
            phone: String::new(),
            stay,
            unit_id: UnitId::new(3),
        };
        let restriction = NewRestriction::for_reservation(ReservationId::new(12), &reservation);
        assert_eq!(restriction.reservation_id, Some(ReservationId::new(12)));
        assert_eq!(restriction.unit_id, UnitId::new(3));
        assert_eq!(restriction.kind, RestrictionKind::Reservation);
    }

    #[rstest]
    #[case(RestrictionKind::Reservation, 1)]
    #[case(RestrictionKind::OwnerBlock, 2)]
    fn restriction_kinds_match_seeded_lookup_rows(
        #[case] kind: RestrictionKind,
        #[case] id: i32,
    ) {
        assert_eq!(kind.id(), id);
    }

    #[rstest]
    #[case(ReviewStatus::Pending, 0)]
    #[case(ReviewStatus::Processed, 1)]
    fn review_status_flags(#[case] status: ReviewStatus, #[case] flag: i16) {
        assert_eq!(status.as_flag(), flag);
    }

    #[rstest]
    fn draft_deserialises_with_missing_fields() {
        let draft: ReservationDraft =
            serde_json::from_value(json!({ "unitId": 2 })).expect("partial draft");
        assert_eq!(draft.unit_id, Some(UnitId::new(2)));
        assert!(draft.full_name.is_empty());
        assert_eq!(draft.stay, None);
    }
}
