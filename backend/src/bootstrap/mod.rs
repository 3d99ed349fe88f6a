//! Startup configuration and one-off provisioning.
//!
//! [`AppSettings`] is loaded once by the binary through OrthoConfig;
//! [`ensure_admin_account`] seeds the first `ADMIN` so a fresh deployment can
//! be managed without direct database access.

mod admin;
mod config;

pub use admin::{AdminBootstrap, BootstrapError, ensure_admin_account};
pub use config::{AppSettings, DEFAULT_BIND_ADDR, DEFAULT_POOL_MAX_SIZE, SettingsError};
