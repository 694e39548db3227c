//! Booking server entry-point.

mod server;

use std::path::Path;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bungalow::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use bungalow::settings::AppSettings;
use server::{ServerConfig, create_server};

/// `Key::derive_from` needs at least this much key material.
const MIN_KEY_BYTES: usize = 32;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let key = load_session_key(&settings.session_key_file(), settings.allow_ephemeral_key())?;

    let mut config = ServerConfig::new(
        key,
        settings.cookie_secure(),
        SameSite::Lax,
        settings.bind_addr(),
    )
    .with_details_rules(settings.details_rules());

    if let Some(database_url) = settings.database_url.clone() {
        run_migrations(database_url.clone())
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    info!(addr = %settings.bind_addr(), "starting booking server");
    create_server(config)?.await
}

/// Session key derived from the key file. A random key is only acceptable in
/// debug builds or when explicitly allowed, since it invalidates every session
/// on restart.
fn load_session_key(path: &Path, allow_ephemeral: bool) -> std::io::Result<Key> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.len() >= MIN_KEY_BYTES => Ok(Key::derive_from(&bytes)),
        Ok(_) => Err(std::io::Error::other(format!(
            "session key at {} must hold at least {MIN_KEY_BYTES} bytes",
            path.display()
        ))),
        Err(e) if cfg!(debug_assertions) || allow_ephemeral => {
            warn!(path = %path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(std::io::Error::other(format!(
            "failed to read session key at {}: {e}",
            path.display()
        ))),
    }
}
