//! Shared validation helpers for inbound HTTP adapters.
//!
//! Payload values are turned into domain types here so handlers only see
//! validated input. Every failure becomes a 400 `invalid_request` carrying
//! `details: {field, code}`.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use serde_json::json;

use crate::domain::{
    AuthValidationError, Error, HouseId, IdValidationError, NameValidationError, ProfessionalId,
    ProfessionalKind, ProfessionalName, ProjectName,
};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const PROJECT_NAME: FieldName = FieldName::new("projectName");
pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const ID: FieldName = FieldName::new("id");
pub(crate) const ENGINEER_ID: FieldName = FieldName::new("engineerId");
pub(crate) const ARCHITECT_ID: FieldName = FieldName::new("architectId");

fn field_error(field: FieldName, code: &str, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        "missing_field",
        format!("missing required field: {name}"),
    )
}

fn name_error(field: FieldName, err: NameValidationError) -> Error {
    field_error(field, err.code(), format!("{} {err}", field.as_str()))
}

fn id_error(field: FieldName, err: &IdValidationError) -> Error {
    field_error(
        field,
        "invalid_id",
        format!("{} must be a positive integer, got {}", field.as_str(), err.0),
    )
}

pub(crate) fn auth_error(err: &AuthValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field(),
        "code": err.code(),
    }))
}

pub(crate) fn parse_project_name(raw: &str) -> Result<ProjectName, Error> {
    ProjectName::new(raw).map_err(|err| name_error(PROJECT_NAME, err))
}

pub(crate) fn parse_professional_name(raw: &str) -> Result<ProfessionalName, Error> {
    ProfessionalName::new(raw).map_err(|err| name_error(NAME, err))
}

pub(crate) fn parse_house_id(raw: i64, field: FieldName) -> Result<HouseId, Error> {
    HouseId::new(raw).map_err(|err| id_error(field, &err))
}

pub(crate) fn parse_professional_id<K: ProfessionalKind>(
    raw: i64,
    field: FieldName,
) -> Result<ProfessionalId<K>, Error> {
    ProfessionalId::new(raw).map_err(|err| id_error(field, &err))
}

pub(crate) fn parse_optional_professional_id<K: ProfessionalKind>(
    raw: Option<i64>,
    field: FieldName,
) -> Result<Option<ProfessionalId<K>>, Error> {
    raw.map(|value| parse_professional_id(value, field))
        .transpose()
}

/// Map malformed JSON bodies onto the shared error envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        other => format!("malformed JSON body: {other}"),
    };
    Error::invalid_request(message)
        .with_details(json!({ "code": "malformed_body" }))
        .into()
}

/// Map malformed query strings onto the shared error envelope.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("malformed query string: {err}"))
        .with_details(json!({ "code": "malformed_query" }))
        .into()
}

/// Map unparsable path segments (such as non-numeric ids) onto the shared
/// error envelope.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("malformed path parameter: {err}"))
        .with_details(json!({ "field": "id", "code": "invalid_id" }))
        .into()
}
