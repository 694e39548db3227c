//! Bungalow booking backend.
//!
//! The [`domain`] holds the booking workflow and its ports; [`inbound`] and
//! [`outbound`] adapt it to HTTP and PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use doc::ApiDoc;
pub use middleware::trace::Trace;
