//! Booking domain: value types, availability rules, the session-held draft
//! and the workflow that ties them together.
//!
//! Nothing here knows about HTTP or SQL. Adapters reach the domain through
//! the traits in [`ports`] and receive transport-agnostic [`Error`] values
//! and [`StepOutcome`]s back.

pub mod availability;
pub mod booking_outcome;
pub mod booking_workflow;
pub mod draft_session;
pub mod error;
pub mod ports;
pub mod reservation;
pub mod stay;
pub mod trace_id;
pub mod unit;
pub mod validation;

pub use self::availability::{AvailabilityError, AvailabilityService};
pub use self::booking_outcome::{Page, PageData, Route, StepOutcome, Template};
pub use self::booking_workflow::{BookingWorkflow, DetailsRules};
pub use self::draft_session::{
    DRAFT_KEY, DraftSession, FlashKind, Flashes, Lookup, USER_ID_KEY,
};
pub use self::error::{DomainError as Error, ErrorCode};
pub use self::reservation::{
    DraftStepError, GuestDetails, NewReservation, NewRestriction, Reservation, ReservationDraft,
    ReservationId, Restriction, RestrictionId, RestrictionKind, ReviewStatus,
};
pub use self::stay::{DATE_FORMAT, StayPeriod, StayPeriodError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::unit::{Unit, UnitId, UnitValidationError};
pub use self::validation::{FieldSource, FormValidator, ValidationErrors};
