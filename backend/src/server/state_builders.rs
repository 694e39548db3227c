//! Builds the HTTP adapter state from server configuration.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use bungalow::domain::ports::{BookingRepository, FixtureBookingRepository};
use bungalow::inbound::http::state::HttpState;
use bungalow::outbound::persistence::DieselBookingRepository;

use super::ServerConfig;

/// Diesel-backed bookings when a pool is configured, otherwise the in-memory
/// fixture store.
pub(crate) fn build_booking_repository(config: &ServerConfig) -> Arc<dyn BookingRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselBookingRepository::new(pool.clone())),
        None => {
            warn!("no database configured; bookings are kept in memory");
            Arc::new(FixtureBookingRepository::new())
        }
    }
}

pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        build_booking_repository(config),
        config.rules,
    ))
}
