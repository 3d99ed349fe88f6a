//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use builders::outbound::persistence::DbPool;
use builders::outbound::security::TokenSettings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: TokenSettings,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) admin: Option<(String, String)>,
}

impl ServerConfig {
    /// Construct a server configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, tokens: TokenSettings) -> Self {
        Self {
            bind_addr,
            tokens,
            db_pool: None,
            admin: None,
        }
    }

    /// Attach a database connection pool; every repository then uses
    /// PostgreSQL instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed an administrator account with these credentials at startup.
    #[must_use]
    pub fn with_admin(mut self, login: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin = Some((login.into(), password.into()));
        self
    }
}
