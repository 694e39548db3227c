//! Ports at the edge of the booking domain.
//!
//! Each driven adapter (the Diesel store, the cookie session) implements one
//! of these traits. Port errors are strongly typed so the domain can tell a
//! missing record from an unreachable database.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_repository;
mod fixture_booking_repository;
mod session_scope;

#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
pub use fixture_booking_repository::{
    FAILING_RESERVATION_UNIT, FAILING_RESTRICTION_UNIT, FixtureBookingRepository,
    failing_search_start, owner_block_start,
};
pub use session_scope::{MemorySessionScope, SessionScope, SessionScopeError};
