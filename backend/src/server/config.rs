//! HTTP server configuration.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use bungalow::domain::DetailsRules;
use bungalow::outbound::persistence::DbPool;

/// Everything needed to build the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) rules: DetailsRules,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Configuration backed by the in-memory booking store.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            rules: DetailsRules::default(),
            db_pool: None,
        }
    }

    /// Persist bookings in PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_details_rules(mut self, rules: DetailsRules) -> Self {
        self.rules = rules;
        self
    }
}
