//! Architect API handlers.
//!
//! ```text
//! GET    /api/v1/architects/all
//! GET    /api/v1/architects/find?name=Ana+Costa
//! GET    /api/v1/architects/{id}
//! POST   /api/v1/architects {"name":"Ana Costa"}
//! PUT    /api/v1/architects {"id":1,"name":"Ana Costa"}
//! DELETE /api/v1/architects/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::ArchitectKind;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::dto::{
    NameQuery, ProfessionalCreateRequest, ProfessionalDto, ProfessionalReplaceRequest,
};
use crate::inbound::http::professionals;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// List every architect with their houses.
#[utoipa::path(
    get,
    path = "/api/v1/architects/all",
    responses(
        (status = 200, description = "Architects", body = [ProfessionalDto]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["architects"],
    operation_id = "listArchitects"
)]
#[get("/all")]
pub async fn list_architects(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ProfessionalDto>>> {
    professionals::list::<ArchitectKind>(&state).await.map(web::Json)
}

/// Find architects by exact name.
#[utoipa::path(
    get,
    path = "/api/v1/architects/find",
    params(("name" = Option<String>, Query, description = "Exact name")),
    responses(
        (status = 200, description = "Matching architects", body = [ProfessionalDto]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["architects"],
    operation_id = "findArchitects"
)]
#[get("/find")]
pub async fn find_architects(
    state: web::Data<HttpState>,
    query: web::Query<NameQuery>,
) -> ApiResult<web::Json<Vec<ProfessionalDto>>> {
    professionals::find::<ArchitectKind>(&state, query.into_inner())
        .await
        .map(web::Json)
}

/// Fetch one architect with their houses.
#[utoipa::path(
    get,
    path = "/api/v1/architects/{id}",
    params(("id" = i64, Path, description = "Architect id")),
    responses(
        (status = 200, description = "Architect", body = ProfessionalDto),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["architects"],
    operation_id = "getArchitect"
)]
#[get("/{id}")]
pub async fn get_architect(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ProfessionalDto>> {
    professionals::get::<ArchitectKind>(&state, path.into_inner())
        .await
        .map(web::Json)
}

/// Create an architect.
#[utoipa::path(
    post,
    path = "/api/v1/architects",
    request_body = ProfessionalCreateRequest,
    responses(
        (status = 201, description = "Created", body = ProfessionalDto),
        (status = 400, description = "Invalid name", body = ErrorSchema),
        (status = 403, description = "ADMIN role required", body = ErrorSchema)
    ),
    tags = ["architects"],
    operation_id = "createArchitect"
)]
#[post("")]
pub async fn create_architect(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<ProfessionalCreateRequest>,
) -> ApiResult<HttpResponse> {
    professionals::create::<ArchitectKind>(&state, &user, payload.into_inner()).await
}

/// Replace an architect's name.
#[utoipa::path(
    put,
    path = "/api/v1/architects",
    request_body = ProfessionalReplaceRequest,
    responses(
        (status = 204, description = "Replaced"),
        (status = 400, description = "Invalid body", body = ErrorSchema),
        (status = 403, description = "ADMIN role required", body = ErrorSchema),
        (status = 404, description = "Architect not found", body = ErrorSchema)
    ),
    tags = ["architects"],
    operation_id = "replaceArchitect"
)]
#[put("")]
pub async fn replace_architect(
    state: web::Data<HttpState>,
    payload: web::Json<ProfessionalReplaceRequest>,
) -> ApiResult<HttpResponse> {
    professionals::replace::<ArchitectKind>(&state, payload.into_inner()).await
}

/// Delete an architect no house links to.
#[utoipa::path(
    delete,
    path = "/api/v1/architects/{id}",
    params(("id" = i64, Path, description = "Architect id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "ADMIN role required, or a house still links to the architect", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["architects"],
    operation_id = "deleteArchitect"
)]
#[delete("/{id}")]
pub async fn delete_architect(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    professionals::delete::<ArchitectKind>(&state, path.into_inner()).await
}

/// Register the architect routes on an `/architects` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_architects)
        .service(find_architects)
        .service(get_architect)
        .service(create_architect)
        .service(replace_architect)
        .service(delete_architect);
}
