//! Port for persisting reservations and restrictions and for availability
//! reads.

use async_trait::async_trait;

use crate::domain::{
    NewReservation, NewRestriction, ReservationId, RestrictionId, StayPeriod, Unit, UnitId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "booking repository query failed: {message}",
        /// A referenced record does not exist.
        NotFound { message: String } =>
            "booking repository record not found: {message}",
    }
}

/// Port for the booking store.
///
/// Both availability queries apply the same half-open overlap rule: a
/// restriction `[rs, re)` blocks a stay `[s, e)` when `rs < e && s < re`.
///
/// Committing a booking takes two calls, [`insert_reservation`] then
/// [`insert_restriction`]. They are not wrapped in a transaction; a failed
/// restriction insert leaves the reservation row in place.
///
/// [`insert_reservation`]: BookingRepository::insert_reservation
/// [`insert_restriction`]: BookingRepository::insert_restriction
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a reservation and return its generated id.
    async fn insert_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<ReservationId, BookingRepositoryError>;

    /// Persist a restriction and return its generated id.
    async fn insert_restriction(
        &self,
        restriction: &NewRestriction,
    ) -> Result<RestrictionId, BookingRepositoryError>;

    /// Fetch a bungalow. Unknown ids yield [`BookingRepositoryError::NotFound`].
    async fn find_unit_by_id(&self, unit_id: UnitId) -> Result<Unit, BookingRepositoryError>;

    /// True when no restriction on `unit_id` overlaps the stay.
    async fn search_availability_for_unit(
        &self,
        stay: &StayPeriod,
        unit_id: UnitId,
    ) -> Result<bool, BookingRepositoryError>;

    /// Bungalows with no overlapping restriction, ordered by id ascending.
    async fn search_availability_all_units(
        &self,
        stay: &StayPeriod,
    ) -> Result<Vec<Unit>, BookingRepositoryError>;
}
