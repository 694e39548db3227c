//! PostgreSQL persistence via Diesel.
//!
//! Row structs and table definitions stay private to this module; the
//! repository converts them to domain types at the boundary.
//!
//! ```ignore
//! use bungalow::outbound::persistence::{DbPool, DieselBookingRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bungalow")).await?;
//! let repo = DieselBookingRepository::new(pool);
//! ```

mod diesel_booking_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use migrations::run_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
