//! Application settings loaded via OrthoConfig.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Listen address used when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
/// Connection pool size used when none is configured.
pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Invalid settings detected after loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: expected host:port")]
    BindAddr {
        /// Configured value.
        value: String,
    },
    /// Only one of the admin login and password was supplied.
    #[error("admin_login and admin_password must be set together")]
    PartialAdmin,
}

/// Runtime settings for the HTTP server.
///
/// Every field may come from the command line, a config file or a
/// `BUILDERS_`-prefixed environment variable.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BUILDERS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the service runs on the in-memory store.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Login of the administrator created at startup.
    pub admin_login: Option<String>,
    /// Password of the administrator created at startup.
    pub admin_password: Option<String>,
}

impl AppSettings {
    /// Configured listen address, falling back to [`DEFAULT_BIND_ADDR`].
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::BindAddr {
            value: raw.to_owned(),
        })
    }

    /// Configured pool size, falling back to [`DEFAULT_POOL_MAX_SIZE`].
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Administrator credentials, when both halves are configured.
    ///
    /// # Errors
    /// Returns [`SettingsError::PartialAdmin`] when only one is set.
    pub fn admin_credentials(&self) -> Result<Option<(&str, &str)>, SettingsError> {
        match (self.admin_login.as_deref(), self.admin_password.as_deref()) {
            (Some(login), Some(password)) => Ok(Some((login, password))),
            (None, None) => Ok(None),
            _ => Err(SettingsError::PartialAdmin),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "BUILDERS_BIND_ADDR",
        "BUILDERS_DATABASE_URL",
        "BUILDERS_POOL_MAX_SIZE",
        "BUILDERS_ADMIN_LOGIN",
        "BUILDERS_ADMIN_PASSWORD",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("builders")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok(DEFAULT_BIND_ADDR.parse().expect("default parses"))
        );
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
        assert!(settings.database_url.is_none());
        assert_eq!(settings.admin_credentials(), Ok(None));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BUILDERS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "BUILDERS_DATABASE_URL",
                Some("postgres://localhost/builders".to_owned()),
            ),
            ("BUILDERS_POOL_MAX_SIZE", Some("4".to_owned())),
            ("BUILDERS_ADMIN_LOGIN", Some("root".to_owned())),
            ("BUILDERS_ADMIN_PASSWORD", Some("s3cret".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr(),
            Ok("127.0.0.1:9000".parse().expect("addr parses"))
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/builders")
        );
        assert_eq!(settings.pool_max_size(), 4);
        assert_eq!(settings.admin_credentials(), Ok(Some(("root", "s3cret"))));
    }

    #[rstest]
    #[case(Some("root"), None)]
    #[case(None, Some("s3cret"))]
    fn half_configured_admin_is_rejected(
        #[case] login: Option<&str>,
        #[case] password: Option<&str>,
    ) {
        let settings = AppSettings {
            bind_addr: None,
            database_url: None,
            pool_max_size: None,
            admin_login: login.map(str::to_owned),
            admin_password: password.map(str::to_owned),
        };
        assert_eq!(settings.admin_credentials(), Err(SettingsError::PartialAdmin));
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let settings = AppSettings {
            bind_addr: Some("localhost".to_owned()),
            database_url: None,
            pool_max_size: None,
            admin_login: None,
            admin_password: None,
        };
        assert_eq!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr {
                value: "localhost".to_owned()
            })
        );
    }
}
