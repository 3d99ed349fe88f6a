//! Seed the first administrator account.

use thiserror::Error;
use tracing::info;

use crate::domain::ports::AccessControl;
use crate::domain::{AuthValidationError, ErrorCode, LoginCredentials, Registration, Role};

/// What [`ensure_admin_account`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminBootstrap {
    /// No administrator credentials were configured.
    Skipped,
    /// The account was registered.
    Created,
    /// The login already existed and was left untouched.
    AlreadyPresent,
}

/// Errors raised while seeding the administrator.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configured login or password failed validation.
    #[error("invalid administrator credentials: {0}")]
    InvalidCredentials(#[from] AuthValidationError),
    /// Registration failed for a reason other than a duplicate login.
    #[error("administrator registration failed: {0}")]
    Registration(#[from] crate::domain::Error),
}

/// Register the `configured` login as an `ADMIN` unless it already exists.
///
/// An existing account keeps its role and password; startup never
/// overwrites it.
///
/// # Errors
/// Returns [`BootstrapError`] when the credentials are invalid or the store
/// rejects the registration.
pub async fn ensure_admin_account(
    access: &dyn AccessControl,
    configured: Option<(&str, &str)>,
) -> Result<AdminBootstrap, BootstrapError> {
    let Some((raw_login, raw_password)) = configured else {
        return Ok(AdminBootstrap::Skipped);
    };
    let credentials = LoginCredentials::try_from_parts(raw_login, raw_password)?;
    let login = credentials.login().clone();
    let registration = Registration {
        credentials,
        role: Role::Admin,
    };
    match access.register(registration).await {
        Ok(()) => {
            info!(%login, "administrator account created");
            Ok(AdminBootstrap::Created)
        }
        Err(err) if err.code() == ErrorCode::Conflict => {
            info!(%login, "administrator account already present");
            Ok(AdminBootstrap::AlreadyPresent)
        }
        Err(err) => Err(err.into()),
    }
}
