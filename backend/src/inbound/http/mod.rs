//! HTTP inbound adapter for the booking flow.
//!
//! Handlers translate requests into [`crate::domain::BookingWorkflow`] steps
//! and map the outcome to JSON pages or `303` redirects.

pub mod availability;
pub mod booking;
pub mod error;
pub mod pages;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register every booking route on `cfg`.
///
/// The caller wraps the routes in session middleware and provides
/// [`state::HttpState`] as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(booking::home)
        .service(booking::about)
        .service(booking::contact)
        .service(booking::bungalow_page)
        .service(booking::search_page)
        .service(booking::search)
        .service(booking::choose_unit)
        .service(booking::book_unit)
        .service(booking::show_details)
        .service(booking::submit_details)
        .service(booking::summary)
        .service(availability::check_availability);
}
