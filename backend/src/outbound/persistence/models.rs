//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them to
//! domain types.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{bungalow_restrictions, bungalows, reservations};

/// Row read from `bungalows`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bungalows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BungalowRow {
    pub id: i32,
    pub bungalow_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable reservation. Timestamps use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reservations)]
pub(crate) struct NewReservationRow<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub bungalow_id: i32,
    pub processed: i16,
}

/// Insertable restriction.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bungalow_restrictions)]
pub(crate) struct NewRestrictionRow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub bungalow_id: i32,
    pub reservation_id: Option<i32>,
    pub restriction_id: i32,
}
