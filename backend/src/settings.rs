//! Application settings loaded via OrthoConfig.
//!
//! Values come from `BUNGALOW_*` environment variables, an optional
//! configuration file and command-line flags. Unset values fall back to the
//! defaults exposed by the accessors below.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DetailsRules;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BUNGALOW")]
pub struct AppSettings {
    /// Address to bind. Defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one the server uses the in-memory store.
    pub database_url: Option<String>,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`. Defaults to on.
    pub cookie_secure: Option<bool>,
    /// Allow a random session key when the key file is unreadable.
    pub allow_ephemeral_key: Option<bool>,
    /// Minimum guest name length in characters.
    pub min_name_length: Option<usize>,
}

impl AppSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Whether the session cookie carries the `Secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Whether an unreadable key file may be replaced by a random key.
    pub fn allow_ephemeral_key(&self) -> bool {
        self.allow_ephemeral_key.unwrap_or(false)
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Guest detail rules with any configured overrides applied.
    pub fn details_rules(&self) -> DetailsRules {
        self.min_name_length
            .map_or_else(DetailsRules::default, |min_full_name_len| DetailsRules {
                min_full_name_len,
            })
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 7] = [
        "BUNGALOW_HOST",
        "BUNGALOW_PORT",
        "BUNGALOW_DATABASE_URL",
        "BUNGALOW_SESSION_KEY_FILE",
        "BUNGALOW_COOKIE_SECURE",
        "BUNGALOW_ALLOW_EPHEMERAL_KEY",
        "BUNGALOW_MIN_NAME_LENGTH",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("bungalow")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert!(settings.database_url.is_none());
        assert_eq!(settings.cookie_secure, None);
        assert!(settings.cookie_secure());
        assert!(!settings.allow_ephemeral_key());
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
        assert_eq!(settings.details_rules(), DetailsRules::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BUNGALOW_HOST", Some("127.0.0.1".to_owned())),
            ("BUNGALOW_PORT", Some("9090".to_owned())),
            (
                "BUNGALOW_DATABASE_URL",
                Some("postgres://localhost/bungalow".to_owned()),
            ),
            ("BUNGALOW_SESSION_KEY_FILE", Some("/tmp/key".to_owned())),
            ("BUNGALOW_COOKIE_SECURE", Some("false".to_owned())),
            ("BUNGALOW_ALLOW_EPHEMERAL_KEY", Some("true".to_owned())),
            ("BUNGALOW_MIN_NAME_LENGTH", Some("5".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/bungalow")
        );
        assert_eq!(settings.session_key_file(), PathBuf::from("/tmp/key"));
        assert!(!settings.cookie_secure());
        assert!(settings.allow_ephemeral_key());
        assert_eq!(settings.details_rules().min_full_name_len, 5);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("false"), false)]
    #[case(Some("true"), true)]
    fn cookie_secure_is_only_disabled_explicitly(
        #[case] value: Option<&str>,
        #[case] expected: bool,
    ) {
        let mut vars = VARS.map(|name| (name, None::<String>));
        if let Some(slot) = vars
            .iter_mut()
            .find(|(name, _)| *name == "BUNGALOW_COOKIE_SECURE")
        {
            slot.1 = value.map(str::to_owned);
        }
        let _guard = lock_env(vars);

        assert_eq!(load_from_empty_args().cookie_secure(), expected);
    }
}
