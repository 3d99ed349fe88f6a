//! Request handling shared by the engineer and architect endpoints.
//!
//! The two resources differ only in their kind marker, so each handler in
//! [`super::engineers`] and [`super::architects`] is a thin typed wrapper
//! around one of these functions.

use actix_web::HttpResponse;
use tracing::info;

use crate::domain::{Professional, ProfessionalKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::dto::{
    NameQuery, ProfessionalCreateRequest, ProfessionalDto, ProfessionalReplaceRequest,
};
use crate::inbound::http::state::{HttpState, ProfessionalPortsOf};
use crate::inbound::http::validation::{ID, parse_professional_id, parse_professional_name};

pub(crate) async fn list<K>(state: &HttpState) -> ApiResult<Vec<ProfessionalDto>>
where
    K: ProfessionalKind,
    HttpState: ProfessionalPortsOf<K>,
{
    let profiles = ProfessionalPortsOf::<K>::ports(state).query.list().await?;
    Ok(profiles.iter().map(ProfessionalDto::from).collect())
}

pub(crate) async fn find<K>(state: &HttpState, query: NameQuery) -> ApiResult<Vec<ProfessionalDto>>
where
    K: ProfessionalKind,
    HttpState: ProfessionalPortsOf<K>,
{
    let Some(name) = query.name else {
        return Ok(Vec::new());
    };
    let profiles = ProfessionalPortsOf::<K>::ports(state)
        .query
        .find_by_name(&name)
        .await?;
    Ok(profiles.iter().map(ProfessionalDto::from).collect())
}

pub(crate) async fn get<K>(state: &HttpState, raw_id: i64) -> ApiResult<ProfessionalDto>
where
    K: ProfessionalKind,
    HttpState: ProfessionalPortsOf<K>,
{
    let id = parse_professional_id::<K>(raw_id, ID)?;
    let profile = ProfessionalPortsOf::<K>::ports(state).query.get(id).await?;
    Ok(ProfessionalDto::from(&profile))
}

pub(crate) async fn create<K>(
    state: &HttpState,
    user: &CurrentUser,
    payload: ProfessionalCreateRequest,
) -> ApiResult<HttpResponse>
where
    K: ProfessionalKind,
    HttpState: ProfessionalPortsOf<K>,
{
    let name = parse_professional_name(&payload.name)?;
    let created = ProfessionalPortsOf::<K>::ports(state)
        .command
        .create(name)
        .await?;
    info!(kind = K::LABEL, id = %created.id(), by = %user.0.login, "record created via API");
    Ok(HttpResponse::Created().json(ProfessionalDto::from(&created)))
}

pub(crate) async fn replace<K>(
    state: &HttpState,
    payload: ProfessionalReplaceRequest,
) -> ApiResult<HttpResponse>
where
    K: ProfessionalKind,
    HttpState: ProfessionalPortsOf<K>,
{
    let professional = Professional::<K>::try_from(payload)?;
    ProfessionalPortsOf::<K>::ports(state)
        .command
        .replace(professional)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

pub(crate) async fn delete<K>(state: &HttpState, raw_id: i64) -> ApiResult<HttpResponse>
where
    K: ProfessionalKind,
    HttpState: ProfessionalPortsOf<K>,
{
    let id = parse_professional_id::<K>(raw_id, ID)?;
    ProfessionalPortsOf::<K>::ports(state)
        .command
        .delete(id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
