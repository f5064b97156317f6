//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SALAD_*` environment variables and config
//! files, in OrthoConfig's usual precedence. Session cookie settings are read
//! separately by [`crate::inbound::http::session_config`].

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Listen address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address `{value}`")]
    InvalidBindAddr { value: String },
    /// No database URL was supplied.
    #[error("SALAD_DATABASE_URL must be set")]
    MissingDatabaseUrl,
}

/// Configuration values for the HTTP server process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SALAD")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL for the record store.
    pub database_url: Option<String>,
    /// Apply pending schema migrations before serving.
    #[ortho_config(default = false)]
    pub migrate_on_start: bool,
}

impl ServerSettings {
    /// Parsed listen address, falling back to [`DEFAULT_BIND_ADDR`].
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Configured database URL.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("salad-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("SALAD_BIND_ADDR", None::<String>),
            ("SALAD_DATABASE_URL", None::<String>),
            ("SALAD_MIGRATE_ON_START", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(DEFAULT_BIND_ADDR.parse().expect("default parses"))
        );
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
        assert!(!settings.migrate_on_start);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SALAD_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "SALAD_DATABASE_URL",
                Some("postgres://localhost/salads".to_owned()),
            ),
            ("SALAD_MIGRATE_ON_START", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().map(|addr| addr.port()),
            Ok(9000)
        );
        assert_eq!(settings.database_url(), Ok("postgres://localhost/salads"));
        assert!(settings.migrate_on_start);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env([("SALAD_BIND_ADDR", Some("localhost".to_owned()))]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr {
                value: "localhost".to_owned()
            })
        );
    }
}
