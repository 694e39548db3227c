//! Availability decisions over restrictions.
//!
//! The pure helpers [`is_free`] and [`free_units`] define what "available"
//! means. In-memory adapters answer availability queries with them, and the
//! Diesel adapter encodes the same predicate in SQL. [`AvailabilityService`]
//! is what the booking workflow calls; it wraps the storage port and turns
//! storage failures into [`AvailabilityError`] so they can never be mistaken
//! for an answer.

use tracing::error;

use super::ports::{BookingRepository, BookingRepositoryError};
use super::{Restriction, StayPeriod, Unit, UnitId};

/// True when no restriction on `unit_id` overlaps `stay`.
pub fn is_free(unit_id: UnitId, stay: &StayPeriod, restrictions: &[Restriction]) -> bool {
    !restrictions
        .iter()
        .any(|restriction| restriction.unit_id == unit_id && restriction.stay.overlaps(stay))
}

/// Units free for `stay`, ordered by id ascending.
pub fn free_units(units: &[Unit], restrictions: &[Restriction], stay: &StayPeriod) -> Vec<Unit> {
    let mut free: Vec<Unit> = units
        .iter()
        .filter(|unit| is_free(unit.id(), stay, restrictions))
        .cloned()
        .collect();
    free.sort_by_key(Unit::id);
    free
}

/// Availability lookups failed before an answer was reached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvailabilityError {
    #[error("availability lookup failed: {0}")]
    Storage(#[from] BookingRepositoryError),
}

/// Availability queries against the storage port.
pub struct AvailabilityService<'a> {
    repository: &'a dyn BookingRepository,
}

impl<'a> AvailabilityService<'a> {
    pub fn new(repository: &'a dyn BookingRepository) -> Self {
        Self { repository }
    }

    /// True when the bungalow has no restriction overlapping `stay`.
    pub async fn is_unit_available(
        &self,
        unit_id: UnitId,
        stay: &StayPeriod,
    ) -> Result<bool, AvailabilityError> {
        self.repository
            .search_availability_for_unit(stay, unit_id)
            .await
            .map_err(|err| {
                error!(error = %err, unit_id = unit_id.get(), %stay, "unit availability query failed");
                AvailabilityError::from(err)
            })
    }

    /// Every bungalow free for `stay`, ordered by id ascending.
    pub async fn available_units(&self, stay: &StayPeriod) -> Result<Vec<Unit>, AvailabilityError> {
        let mut units = self
            .repository
            .search_availability_all_units(stay)
            .await
            .map_err(|err| {
                error!(error = %err, %stay, "availability search failed");
                AvailabilityError::from(err)
            })?;
        units.sort_by_key(Unit::id);
        Ok(units)
    }
}
