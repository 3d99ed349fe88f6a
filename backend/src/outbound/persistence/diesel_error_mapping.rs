//! Shared Diesel error classification for the repositories.
//!
//! Each repository turns a [`DieselFailure`] into its own port error, so the
//! constraint-name matching lives in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use super::pool::PoolError;

/// Coarse category of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(String),
    /// A foreign key constraint refused the write.
    ForeignKey { constraint: Option<String> },
    /// A unique constraint refused the write.
    UniqueViolation { constraint: Option<String> },
    /// Anything else.
    Query(String),
}

impl DieselFailure {
    /// Whether this is a foreign key violation on `constraint`.
    pub(crate) fn is_foreign_key(&self, constraint: &str) -> bool {
        matches!(self, Self::ForeignKey { constraint: Some(name) } if name == constraint)
    }

    /// Message suitable for a query/connection error.
    pub(crate) fn into_message(self) -> String {
        match self {
            Self::Connection(message) | Self::Query(message) => message,
            Self::ForeignKey { constraint } => {
                format!("foreign key violation ({})", constraint.unwrap_or_default())
            }
            Self::UniqueViolation { constraint } => {
                format!("unique violation ({})", constraint.unwrap_or_default())
            }
        }
    }
}

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error, logging its context at debug level.
pub(crate) fn classify_diesel_error(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => {
            DieselFailure::Query("database query error".to_owned())
        }
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::ClosedConnection => {
                DieselFailure::Connection("database connection error".to_owned())
            }
            DatabaseErrorKind::ForeignKeyViolation => DieselFailure::ForeignKey {
                constraint: info.constraint_name().map(str::to_owned),
            },
            DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            },
            DatabaseErrorKind::CheckViolation => {
                warn!(
                    constraint = ?info.constraint_name(),
                    "check constraint rejected a validated value"
                );
                DieselFailure::Query("database constraint violation".to_owned())
            }
            _ => DieselFailure::Query("database error".to_owned()),
        },
        _ => DieselFailure::Query("database error".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_is_a_query_failure() {
        assert_eq!(
            classify_diesel_error(DieselError::NotFound),
            DieselFailure::Query("record not found".to_owned())
        );
    }

    #[rstest]
    fn foreign_key_match_requires_the_named_constraint() {
        let failure = DieselFailure::ForeignKey {
            constraint: Some("houses_engineer_id_fkey".to_owned()),
        };
        assert!(failure.is_foreign_key("houses_engineer_id_fkey"));
        assert!(!failure.is_foreign_key("houses_architect_id_fkey"));
        assert!(!DieselFailure::ForeignKey { constraint: None }.is_foreign_key("x"));
    }

    #[rstest]
    #[case(PoolError::checkout("timed out"), "timed out")]
    #[case(PoolError::build("bad url"), "bad url")]
    fn pool_messages_are_preserved(#[case] error: PoolError, #[case] expected: &str) {
        assert_eq!(pool_error_message(error), expected);
    }

    #[rstest]
    fn unique_violations_render_their_constraint() {
        let failure = DieselFailure::UniqueViolation {
            constraint: Some("users_pkey".to_owned()),
        };
        assert_eq!(failure.into_message(), "unique violation (users_pkey)");
    }
}
