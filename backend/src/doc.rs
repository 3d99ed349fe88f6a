//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, the
//! request/response DTOs and the error envelope schemas. A bearer JWT
//! security scheme applies to every operation except the `/auth` pair, which
//! opt out individually.
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::inbound::http::dto::{
    HouseCreateRequest, HouseDto, HouseReplaceRequest, ProfessionalCreateRequest,
    ProfessionalDto, ProfessionalReplaceRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Name of the security scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/v1/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "House builders API",
        description = "Houses, their engineers and architects, behind bearer-token access control."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::houses::list_houses,
        crate::inbound::http::houses::find_houses,
        crate::inbound::http::houses::get_house,
        crate::inbound::http::houses::create_house,
        crate::inbound::http::houses::replace_house,
        crate::inbound::http::houses::delete_house,
        crate::inbound::http::engineers::list_engineers,
        crate::inbound::http::engineers::find_engineers,
        crate::inbound::http::engineers::get_engineer,
        crate::inbound::http::engineers::create_engineer,
        crate::inbound::http::engineers::replace_engineer,
        crate::inbound::http::engineers::delete_engineer,
        crate::inbound::http::architects::list_architects,
        crate::inbound::http::architects::find_architects,
        crate::inbound::http::architects::get_architect,
        crate::inbound::http::architects::create_architect,
        crate::inbound::http::architects::replace_architect,
        crate::inbound::http::architects::delete_architect,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        LoginResponse,
        RegisterRequest,
        HouseDto,
        HouseCreateRequest,
        HouseReplaceRequest,
        ProfessionalDto,
        ProfessionalCreateRequest,
        ProfessionalReplaceRequest,
    )),
    tags(
        (name = "auth", description = "Registration and token issue"),
        (name = "houses", description = "House projects and their links"),
        (name = "engineers", description = "Engineers and the houses they work on"),
        (name = "architects", description = "Architects and the houses they design"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_is_registered_with_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn house_schema_exposes_links_as_ids() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let house = schemas.get("HouseDto").expect("HouseDto schema");

        assert_object_schema_has_field(house, "projectName");
        assert_object_schema_has_field(house, "engineer");
        assert_object_schema_has_field(house, "architect");
    }

    #[rstest]
    #[case("/api/v1/auth/login")]
    #[case("/api/v1/auth/register")]
    #[case("/api/v1/houses/all")]
    #[case("/api/v1/houses/{id}")]
    #[case("/api/v1/engineers/find")]
    #[case("/api/v1/architects")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }

    #[test]
    fn auth_operations_opt_out_of_bearer_security() {
        let doc = ApiDoc::openapi();
        let login = doc
            .paths
            .paths
            .get("/api/v1/auth/login")
            .and_then(|item| item.post.as_ref())
            .expect("login operation");
        let security = login.security.as_ref().expect("explicit security");
        let json = serde_json::to_value(security).expect("security serialises");
        assert_eq!(json, serde_json::json!([{}]));
    }
}
