//! PostgreSQL-backed `BookingRepository` using Diesel.
//!
//! Availability is answered in SQL with the same half-open overlap rule the
//! in-memory adapters use: a restriction blocks a stay when it starts before
//! the departure day and ends after the arrival day.

use async_trait::async_trait;
use diesel::dsl::{count_star, not};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{
    NewReservation, NewRestriction, ReservationId, RestrictionId, ReviewStatus, StayPeriod, Unit,
    UnitId,
};

use super::models::{BungalowRow, NewReservationRow, NewRestrictionRow};
use super::pool::DbPool;
use super::schema::{bungalow_restrictions, bungalows, reservations};

/// Diesel implementation of the booking port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => BookingRepositoryError::not_found("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            BookingRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            BookingRepositoryError::query("referenced bungalow or reservation does not exist")
        }
        _ => BookingRepositoryError::query("database error"),
    }
}

fn row_to_unit(row: BungalowRow) -> Result<Unit, BookingRepositoryError> {
    Unit::new(
        UnitId::new(row.id),
        row.bungalow_name,
        row.created_at,
        row.updated_at,
    )
    .map_err(|err| BookingRepositoryError::query(format!("bungalow {}: {err}", row.id)))
}

fn reservation_row(reservation: &NewReservation) -> NewReservationRow<'_> {
    NewReservationRow {
        full_name: &reservation.full_name,
        email: &reservation.email,
        phone: &reservation.phone,
        start_date: reservation.stay.start(),
        end_date: reservation.stay.end(),
        bungalow_id: reservation.unit_id.get(),
        processed: ReviewStatus::Pending.as_flag(),
    }
}

fn restriction_row(restriction: &NewRestriction) -> NewRestrictionRow {
    NewRestrictionRow {
        start_date: restriction.stay.start(),
        end_date: restriction.stay.end(),
        bungalow_id: restriction.unit_id.get(),
        reservation_id: restriction.reservation_id.map(ReservationId::get),
        restriction_id: restriction.kind.id(),
    }
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert_reservation(
        &self,
        reservation: &NewReservation,
    ) -> Result<ReservationId, BookingRepositoryError> {
        let mut conn = self.pool.get().await?;
        diesel::insert_into(reservations::table)
            .values(&reservation_row(reservation))
            .returning(reservations::id)
            .get_result::<i32>(&mut conn)
            .await
            .map(ReservationId::new)
            .map_err(map_diesel_error)
    }

    async fn insert_restriction(
        &self,
        restriction: &NewRestriction,
    ) -> Result<RestrictionId, BookingRepositoryError> {
        let mut conn = self.pool.get().await?;
        diesel::insert_into(bungalow_restrictions::table)
            .values(&restriction_row(restriction))
            .returning(bungalow_restrictions::id)
            .get_result::<i32>(&mut conn)
            .await
            .map(RestrictionId::new)
            .map_err(map_diesel_error)
    }

    async fn find_unit_by_id(&self, unit_id: UnitId) -> Result<Unit, BookingRepositoryError> {
        let mut conn = self.pool.get().await?;
        let row = bungalows::table
            .find(unit_id.get())
            .select(BungalowRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .ok_or_else(|| BookingRepositoryError::not_found(format!("bungalow {unit_id}")))?;
        row_to_unit(row)
    }

    async fn search_availability_for_unit(
        &self,
        stay: &StayPeriod,
        unit_id: UnitId,
    ) -> Result<bool, BookingRepositoryError> {
        let mut conn = self.pool.get().await?;
        let overlapping: i64 = bungalow_restrictions::table
            .filter(bungalow_restrictions::bungalow_id.eq(unit_id.get()))
            .filter(bungalow_restrictions::start_date.lt(stay.end()))
            .filter(bungalow_restrictions::end_date.gt(stay.start()))
            .select(count_star())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(overlapping == 0)
    }

    async fn search_availability_all_units(
        &self,
        stay: &StayPeriod,
    ) -> Result<Vec<Unit>, BookingRepositoryError> {
        let mut conn = self.pool.get().await?;
        let blocked = bungalow_restrictions::table
            .filter(bungalow_restrictions::start_date.lt(stay.end()))
            .filter(bungalow_restrictions::end_date.gt(stay.start()))
            .select(bungalow_restrictions::bungalow_id);
        let rows: Vec<BungalowRow> = bungalows::table
            .filter(not(bungalows::id.eq_any(blocked)))
            .order(bungalows::id.asc())
            .select(BungalowRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_unit).collect()
    }
}
