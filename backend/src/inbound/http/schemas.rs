//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! so that the error envelope is described once for every endpoint.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, fails validation, or names a missing
    /// engineer or architect.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The bearer token is missing, invalid or expired, or the credentials
    /// do not match.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The caller's role does not permit this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The addressed resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The login is already registered.
    #[schema(rename = "conflict")]
    Conflict,
    /// A house still links to the record being deleted.
    #[schema(rename = "still_referenced")]
    StillReferenced,
    /// The database is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "engineer 3 not found")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context, such as `{"field":"projectName","code":"empty"}`.
    details: Option<serde_json::Value>,
}
