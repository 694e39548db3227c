//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and build a
//! [`BookingWorkflow`] per request from it and the visitor's session. They
//! depend only on the booking port, so tests can swap in the fixture store.

use std::sync::Arc;

use crate::domain::ports::{BookingRepository, SessionScope};
use crate::domain::{BookingWorkflow, DetailsRules};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub bookings: Arc<dyn BookingRepository>,
    pub rules: DetailsRules,
}

impl HttpState {
    pub fn new(bookings: Arc<dyn BookingRepository>, rules: DetailsRules) -> Self {
        Self { bookings, rules }
    }

    /// Workflow for one request.
    pub fn workflow<'a, S: SessionScope + ?Sized>(&'a self, scope: &'a S) -> BookingWorkflow<'a, S> {
        BookingWorkflow::new(self.bookings.as_ref(), scope, self.rules)
    }
}
