//! In-process harness serving the full API over the in-memory store.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use chrono::TimeDelta;
use mockable::DefaultClock;
use serde_json::{Value, json};
use zeroize::Zeroizing;

use builders::Trace;
use builders::domain::ports::AccessControl;
use builders::domain::{
    AccessControlService, ArchitectKind, EngineerKind, HouseService, ProfessionalService,
};
use builders::inbound::http::configure_api;
use builders::inbound::http::state::{HttpState, ProfessionalPorts};
use builders::outbound::memory::MemoryStore;
use builders::outbound::security::{Argon2CredentialHasher, JwtTokenCodec, TokenSettings};

/// Test signing key; long enough to pass the production length check.
const SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

fn token_settings() -> TokenSettings {
    TokenSettings {
        secret: Zeroizing::new(SECRET.to_vec()),
        issuer: "house-builders-test".to_owned(),
        ttl: TimeDelta::minutes(30),
    }
}

fn state(store: &Arc<MemoryStore>) -> HttpState {
    let tokens = Arc::new(JwtTokenCodec::new(&token_settings(), Arc::new(DefaultClock)));
    let access: Arc<dyn AccessControl> = Arc::new(AccessControlService::new(
        Arc::clone(store),
        Arc::new(Argon2CredentialHasher::new()),
        tokens,
    ));
    let houses = Arc::new(HouseService::new(Arc::clone(store)));
    let engineers = Arc::new(ProfessionalService::<EngineerKind, _, _>::new(
        Arc::clone(store),
        Arc::clone(store),
    ));
    let architects = Arc::new(ProfessionalService::<ArchitectKind, _, _>::new(
        Arc::clone(store),
        Arc::clone(store),
    ));
    HttpState {
        access,
        houses: houses.clone(),
        houses_query: houses,
        engineers: ProfessionalPorts {
            command: engineers.clone(),
            query: engineers,
        },
        architects: ProfessionalPorts {
            command: architects.clone(),
            query: architects,
        },
    }
}

/// App wired exactly like the server, minus health probes and Swagger UI.
pub fn app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let store = Arc::new(MemoryStore::new());
    let state = state(&store);
    let access = Arc::clone(&state.access);
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(|cfg| configure_api(cfg, &access))
}

/// Register `login` with `role` and return a bearer token for it.
pub async fn token_for<S, B>(app: &S, login: &str, role: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let register = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({"login": login, "password": "pass123456", "role": role}))
        .to_request();
    let response = test::call_service(app, register).await;
    assert!(response.status().is_success(), "register {login}");

    let login_request = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"login": login, "password": "pass123456"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, login_request).await;
    body["token"]
        .as_str()
        .expect("token in login response")
        .to_owned()
}

/// Request builder carrying `token` as a bearer credential.
pub fn authed(request: test::TestRequest, token: &str) -> test::TestRequest {
    request.insert_header(("Authorization", format!("Bearer {token}")))
}

/// Create a house as `admin` and return its id.
pub async fn create_house<S, B>(app: &S, admin: &str, body: Value) -> i64
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = authed(test::TestRequest::post().uri("/api/v1/houses"), admin)
        .set_json(body)
        .to_request();
    let house: Value = test::call_and_read_body_json(app, request).await;
    house["id"].as_i64().expect("house id in create response")
}

/// Current stored representation of house `id`.
pub async fn stored_house<S, B>(app: &S, token: &str, id: i64) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request =
        authed(test::TestRequest::get().uri(&format!("/api/v1/houses/{id}")), token).to_request();
    test::call_and_read_body_json(app, request).await
}
