//! House API handlers.
//!
//! ```text
//! GET    /api/v1/houses/all
//! GET    /api/v1/houses/find?name=Mill
//! GET    /api/v1/houses/{id}
//! POST   /api/v1/houses {"projectName":"Mill","engineerId":3}
//! PUT    /api/v1/houses {"id":1,"projectName":"Mill"}
//! DELETE /api/v1/houses/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

use crate::domain::HouseDraft;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::dto::{HouseCreateRequest, HouseDto, HouseReplaceRequest, NameQuery};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ID, parse_house_id};

/// List every house.
#[utoipa::path(
    get,
    path = "/api/v1/houses/all",
    responses(
        (status = 200, description = "Houses", body = [HouseDto]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["houses"],
    operation_id = "listHouses"
)]
#[get("/all")]
pub async fn list_houses(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<HouseDto>>> {
    let houses = state.houses_query.list_houses().await?;
    Ok(web::Json(houses.iter().map(HouseDto::from).collect()))
}

/// Find houses whose project name matches exactly.
#[utoipa::path(
    get,
    path = "/api/v1/houses/find",
    params(("name" = Option<String>, Query, description = "Exact project name")),
    responses(
        (status = 200, description = "Matching houses", body = [HouseDto]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["houses"],
    operation_id = "findHouses"
)]
#[get("/find")]
pub async fn find_houses(
    state: web::Data<HttpState>,
    query: web::Query<NameQuery>,
) -> ApiResult<web::Json<Vec<HouseDto>>> {
    let Some(name) = query.into_inner().name else {
        return Ok(web::Json(Vec::new()));
    };
    let houses = state.houses_query.find_houses_by_project_name(&name).await?;
    Ok(web::Json(houses.iter().map(HouseDto::from).collect()))
}

/// Fetch one house.
#[utoipa::path(
    get,
    path = "/api/v1/houses/{id}",
    params(("id" = i64, Path, description = "House id")),
    responses(
        (status = 200, description = "House", body = HouseDto),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["houses"],
    operation_id = "getHouse"
)]
#[get("/{id}")]
pub async fn get_house(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<HouseDto>> {
    let id = parse_house_id(path.into_inner(), ID)?;
    let house = state.houses_query.get_house(id).await?;
    Ok(web::Json(HouseDto::from(&house)))
}

/// Create a house, optionally linked to an engineer and an architect.
///
/// A link naming a missing record fails with 400 and nothing is stored.
#[utoipa::path(
    post,
    path = "/api/v1/houses",
    request_body = HouseCreateRequest,
    responses(
        (status = 201, description = "Created", body = HouseDto),
        (status = 400, description = "Invalid name, or engineer/architect not found", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "ADMIN role required", body = ErrorSchema)
    ),
    tags = ["houses"],
    operation_id = "createHouse"
)]
#[post("")]
pub async fn create_house(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<HouseCreateRequest>,
) -> ApiResult<HttpResponse> {
    let draft = HouseDraft::try_from(payload.into_inner())?;
    let house = state.houses.create_house(draft).await?;
    info!(house_id = %house.id(), by = %user.0.login, "house created via API");
    Ok(HttpResponse::Created().json(HouseDto::from(&house)))
}

/// Replace a house. Omitted links are cleared.
#[utoipa::path(
    put,
    path = "/api/v1/houses",
    request_body = HouseReplaceRequest,
    responses(
        (status = 204, description = "Replaced"),
        (status = 400, description = "Invalid body, or engineer/architect not found", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "ADMIN role required", body = ErrorSchema),
        (status = 404, description = "House not found", body = ErrorSchema)
    ),
    tags = ["houses"],
    operation_id = "replaceHouse"
)]
#[put("")]
pub async fn replace_house(
    state: web::Data<HttpState>,
    payload: web::Json<HouseReplaceRequest>,
) -> ApiResult<HttpResponse> {
    let (id, draft) = payload.into_inner().into_parts()?;
    state.houses.replace_house(id, draft).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a house.
#[utoipa::path(
    delete,
    path = "/api/v1/houses/{id}",
    params(("id" = i64, Path, description = "House id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "ADMIN role required", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["houses"],
    operation_id = "deleteHouse"
)]
#[delete("/{id}")]
pub async fn delete_house(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = parse_house_id(path.into_inner(), ID)?;
    state.houses.delete_house(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the house routes on a `/houses` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_houses)
        .service(find_houses)
        .service(get_house)
        .service(create_house)
        .service(replace_house)
        .service(delete_house);
}

#[cfg(test)]
#[path = "houses_tests.rs"]
mod tests;
