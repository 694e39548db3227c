//! Deterministic in-memory booking store.
//!
//! Failures are driven purely by input values so tests can reach every error
//! path without configuring anything:
//!
//! | Input                              | Outcome                       |
//! |------------------------------------|-------------------------------|
//! | reservation for unit 99            | `insert_reservation` fails    |
//! | restriction for unit 999           | `insert_restriction` fails    |
//! | unit id outside 1..=3              | `find_unit_by_id` not found   |
//! | search starting on 2038-01-01      | both searches fail            |
//!
//! Every unit also carries an owner block from 2037-01-01 onwards, so any
//! search reaching into 2037 or later finds nothing free.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::domain::availability::{free_units, is_free};
use crate::domain::{
    NewReservation, NewRestriction, Reservation, ReservationId, Restriction, RestrictionId,
    ReviewStatus, StayPeriod, Unit, UnitId,
};

use super::{BookingRepository, BookingRepositoryError};

/// Reservations for this unit cannot be inserted.
pub const FAILING_RESERVATION_UNIT: UnitId = UnitId::new(99);
/// Restrictions for this unit cannot be inserted.
pub const FAILING_RESTRICTION_UNIT: UnitId = UnitId::new(999);

const FIXTURE_UNITS: [(i32, &str); 3] = [
    (1, "Eremite's Hideaway"),
    (2, "Couple's Retreat"),
    (3, "Family Haven"),
];

/// Searches starting on this date fail.
pub fn failing_search_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2038, 1, 1).unwrap_or(NaiveDate::MAX)
}

/// First day covered by the seeded owner blocks.
pub fn owner_block_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2037, 1, 1).unwrap_or(NaiveDate::MAX)
}

#[derive(Debug, Default)]
struct FixtureState {
    units: Vec<Unit>,
    reservations: Vec<Reservation>,
    restrictions: Vec<Restriction>,
}

impl FixtureState {
    fn seeded() -> Self {
        let now = Utc::now();
        let units: Vec<Unit> = FIXTURE_UNITS
            .iter()
            .filter_map(|(id, name)| Unit::new(UnitId::new(*id), *name, now, now).ok())
            .collect();
        let mut state = Self {
            units,
            ..Self::default()
        };
        if let Ok(block) = StayPeriod::new(owner_block_start(), NaiveDate::MAX) {
            let unit_ids: Vec<UnitId> = state.units.iter().map(Unit::id).collect();
            for unit_id in unit_ids {
                state.push_restriction(&NewRestriction::owner_block(unit_id, block));
            }
        }
        state
    }

    fn push_restriction(&mut self, restriction: &NewRestriction) -> RestrictionId {
        let id = RestrictionId::new(next_id(self.restrictions.len()));
        self.restrictions.push(Restriction {
            id,
            stay: restriction.stay,
            unit_id: restriction.unit_id,
            reservation_id: restriction.reservation_id,
            kind: restriction.kind,
        });
        id
    }
}

fn next_id(len: usize) -> i32 {
    i32::try_from(len).map_or(i32::MAX, |count| count.saturating_add(1))
}

/// Shared in-memory store. Clones observe the same state.
#[derive(Debug, Clone)]
pub struct FixtureBookingRepository {
    state: Arc<Mutex<FixtureState>>,
}

impl Default for FixtureBookingRepository {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(FixtureState::seeded())),
        }
    }
}

impl FixtureBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed extra restrictions on top of the owner blocks.
    pub fn with_restrictions(self, restrictions: impl IntoIterator<Item = NewRestriction>) -> Self {
        {
            let mut state = self.lock();
            for restriction in restrictions {
                state.push_restriction(&restriction);
            }
        }
        self
    }

    /// Reservations inserted so far.
    pub fn reservations(&self) -> Vec<Reservation> {
        self.lock().reservations.clone()
    }

    /// All restrictions, seeded ones included.
    pub fn restrictions(&self) -> Vec<Restriction> {
        self.lock().restrictions.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FixtureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_search(stay: &StayPeriod) -> Result<(), BookingRepositoryError> {
        if stay.start() == failing_search_start() {
            return Err(BookingRepositoryError::query(format!(
                "availability search for {stay} rejected"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for FixtureBookingRepository {
    async fn insert_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<ReservationId, BookingRepositoryError> {
        if reservation.unit_id == FAILING_RESERVATION_UNIT {
            return Err(BookingRepositoryError::query(format!(
                "cannot insert reservation for bungalow {}",
                reservation.unit_id
            )));
        }
        let mut state = self.lock();
        let id = ReservationId::new(next_id(state.reservations.len()));
        state.reservations.push(Reservation {
            id,
            full_name: reservation.full_name.clone(),
            email: reservation.email.clone(),
            phone: reservation.phone.clone(),
            stay: reservation.stay,
            unit_id: reservation.unit_id,
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn insert_restriction(
        &self,
        restriction: &NewRestriction,
    ) -> Result<RestrictionId, BookingRepositoryError> {
        if restriction.unit_id == FAILING_RESTRICTION_UNIT {
            return Err(BookingRepositoryError::query(format!(
                "cannot insert restriction for bungalow {}",
                restriction.unit_id
            )));
        }
        Ok(self.lock().push_restriction(restriction))
    }

    async fn find_unit_by_id(&self, unit_id: UnitId) -> Result<Unit, BookingRepositoryError> {
        self.lock()
            .units
            .iter()
            .find(|unit| unit.id() == unit_id)
            .cloned()
            .ok_or_else(|| BookingRepositoryError::not_found(format!("bungalow {unit_id}")))
    }

    async fn search_availability_for_unit(
        &self,
        stay: &StayPeriod,
        unit_id: UnitId,
    ) -> Result<bool, BookingRepositoryError> {
        Self::check_search(stay)?;
        Ok(is_free(unit_id, stay, &self.lock().restrictions))
    }

    async fn search_availability_all_units(
        &self,
        stay: &StayPeriod,
    ) -> Result<Vec<Unit>, BookingRepositoryError> {
        Self::check_search(stay)?;
        let state = self.lock();
        Ok(free_units(&state.units, &state.restrictions, stay))
    }
}
