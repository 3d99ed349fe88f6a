//! Engineer API handlers.
//!
//! ```text
//! GET    /api/v1/engineers/all
//! GET    /api/v1/engineers/find?name=John+Marston
//! GET    /api/v1/engineers/{id}
//! POST   /api/v1/engineers {"name":"John Marston"}
//! PUT    /api/v1/engineers {"id":1,"name":"John Marston"}
//! DELETE /api/v1/engineers/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::EngineerKind;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::dto::{
    NameQuery, ProfessionalCreateRequest, ProfessionalDto, ProfessionalReplaceRequest,
};
use crate::inbound::http::professionals;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// List every engineer with their houses.
#[utoipa::path(
    get,
    path = "/api/v1/engineers/all",
    responses(
        (status = 200, description = "Engineers", body = [ProfessionalDto]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["engineers"],
    operation_id = "listEngineers"
)]
#[get("/all")]
pub async fn list_engineers(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ProfessionalDto>>> {
    professionals::list::<EngineerKind>(&state).await.map(web::Json)
}

/// Find engineers by exact name.
#[utoipa::path(
    get,
    path = "/api/v1/engineers/find",
    params(("name" = Option<String>, Query, description = "Exact name")),
    responses(
        (status = 200, description = "Matching engineers", body = [ProfessionalDto]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["engineers"],
    operation_id = "findEngineers"
)]
#[get("/find")]
pub async fn find_engineers(
    state: web::Data<HttpState>,
    query: web::Query<NameQuery>,
) -> ApiResult<web::Json<Vec<ProfessionalDto>>> {
    professionals::find::<EngineerKind>(&state, query.into_inner())
        .await
        .map(web::Json)
}

/// Fetch one engineer with their houses.
#[utoipa::path(
    get,
    path = "/api/v1/engineers/{id}",
    params(("id" = i64, Path, description = "Engineer id")),
    responses(
        (status = 200, description = "Engineer", body = ProfessionalDto),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["engineers"],
    operation_id = "getEngineer"
)]
#[get("/{id}")]
pub async fn get_engineer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ProfessionalDto>> {
    professionals::get::<EngineerKind>(&state, path.into_inner())
        .await
        .map(web::Json)
}

/// Create an engineer.
#[utoipa::path(
    post,
    path = "/api/v1/engineers",
    request_body = ProfessionalCreateRequest,
    responses(
        (status = 201, description = "Created", body = ProfessionalDto),
        (status = 400, description = "Invalid name", body = ErrorSchema),
        (status = 403, description = "ADMIN role required", body = ErrorSchema)
    ),
    tags = ["engineers"],
    operation_id = "createEngineer"
)]
#[post("")]
pub async fn create_engineer(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<ProfessionalCreateRequest>,
) -> ApiResult<HttpResponse> {
    professionals::create::<EngineerKind>(&state, &user, payload.into_inner()).await
}

/// Replace an engineer's name.
#[utoipa::path(
    put,
    path = "/api/v1/engineers",
    request_body = ProfessionalReplaceRequest,
    responses(
        (status = 204, description = "Replaced"),
        (status = 400, description = "Invalid body", body = ErrorSchema),
        (status = 403, description = "ADMIN role required", body = ErrorSchema),
        (status = 404, description = "Engineer not found", body = ErrorSchema)
    ),
    tags = ["engineers"],
    operation_id = "replaceEngineer"
)]
#[put("")]
pub async fn replace_engineer(
    state: web::Data<HttpState>,
    payload: web::Json<ProfessionalReplaceRequest>,
) -> ApiResult<HttpResponse> {
    professionals::replace::<EngineerKind>(&state, payload.into_inner()).await
}

/// Delete an engineer no house links to.
#[utoipa::path(
    delete,
    path = "/api/v1/engineers/{id}",
    params(("id" = i64, Path, description = "Engineer id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 403, description = "ADMIN role required, or a house still links to the engineer", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["engineers"],
    operation_id = "deleteEngineer"
)]
#[delete("/{id}")]
pub async fn delete_engineer(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    professionals::delete::<EngineerKind>(&state, path.into_inner()).await
}

/// Register the engineer routes on an `/engineers` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_engineers)
        .service(find_engineers)
        .service(get_engineer)
        .service(create_engineer)
        .service(replace_engineer)
        .service(delete_engineer);
}
