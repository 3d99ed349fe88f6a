//! Authentication API handlers and the authenticated-user extractor.
//!
//! ```text
//! POST /api/v1/auth/register {"login":"user1","password":"pass123456","role":"USER"}
//! POST /api/v1/auth/login {"login":"user1","password":"pass123456"}
//! ```

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AuthenticatedUser, Error, INVALID_CREDENTIALS, LoginCredentials, Registration, Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::auth_error;

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account login.
    #[schema(example = "user1")]
    pub login: String,
    /// Account password.
    #[schema(example = "pass123456")]
    pub password: String,
}

/// Registration body for `POST /api/v1/auth/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login of the new account.
    #[schema(example = "user1")]
    pub login: String,
    /// Password of the new account.
    #[schema(example = "pass123456")]
    pub password: String,
    /// `USER` or `ADMIN`.
    #[schema(example = "USER")]
    pub role: String,
}

/// Body returned by a successful login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
}

/// Malformed credentials fail with the same 401 as a wrong password.
impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.login, &value.password)
            .map_err(|_| Error::unauthorized(INVALID_CREDENTIALS))
    }
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        let credentials = LoginCredentials::try_from_parts(&value.login, &value.password)
            .map_err(|err| auth_error(&err))?;
        let role = value
            .role
            .parse::<Role>()
            .map_err(|err| auth_error(&err))?;
        Ok(Self { credentials, role })
    }
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created"),
        (status = 400, description = "Invalid login, password or role", body = ErrorSchema),
        (status = 409, description = "Login already exists", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security(())
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    state.access.register(registration).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Malformed JSON body", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security(())
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let token = state.access.login(credentials).await?;
    Ok(web::Json(LoginResponse {
        token: token.as_str().to_owned(),
    }))
}

/// Caller identity placed in request extensions by
/// [`crate::middleware::AuthGate`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<AuthenticatedUser>()
            .cloned()
            .map(Self)
            .ok_or_else(|| Error::unauthorized("authentication required"));
        ready(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockAccessControl;
    use crate::domain::{AccessToken, ErrorCode};
    use crate::inbound::http::test_utils::{read_error, state_with_access};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    async fn call(
        access: MockAccessControl,
        uri: &str,
        body: Value,
    ) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_access(access)))
                .service(web::scope("/api/v1/auth").service(register).service(login)),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request();
        actix_test::call_service(&app, request).await
    }

    #[rstest]
    #[actix_web::test]
    async fn login_returns_the_issued_token() {
        let mut access = MockAccessControl::new();
        access
            .expect_login()
            .withf(|creds| creds.login().as_str() == "ada" && creds.password().expose() == "pw")
            .times(1)
            .return_once(|_| Ok(AccessToken::new("signed.jwt.value")));

        let response = call(
            access,
            "/api/v1/auth/login",
            json!({"login": "ada", "password": "pw"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: LoginResponse = actix_test::read_body_json(response).await;
        assert_eq!(body.token, "signed.jwt.value");
    }

    #[rstest]
    #[actix_web::test]
    async fn login_failures_surface_as_unauthorized() {
        let mut access = MockAccessControl::new();
        access
            .expect_login()
            .return_once(|_| Err(Error::unauthorized("invalid credentials")));

        let response = call(
            access,
            "/api/v1/auth/login",
            json!({"login": "ada", "password": "wrong"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error = read_error(response).await;
        assert_eq!(error.message(), "invalid credentials");
    }

    #[rstest]
    #[case(json!({"login": "ada", "password": ""}))]
    #[case(json!({"login": "   ", "password": "pw"}))]
    #[case(json!({"login": "", "password": ""}))]
    #[actix_web::test]
    async fn malformed_credentials_fail_like_wrong_ones(#[case] body: Value) {
        let mut access = MockAccessControl::new();
        access.expect_login().times(0);

        let response = call(access, "/api/v1/auth/login", body).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let error = read_error(response).await;
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), INVALID_CREDENTIALS);
        assert_eq!(error.details(), None);
    }

    #[rstest]
    #[case(json!({"login": "ada", "password": "", "role": "USER"}), "password", "empty_password")]
    #[case(json!({"login": "  ", "password": "pw", "role": "USER"}), "login", "empty_login")]
    #[case(json!({"login": "ada", "password": "pw", "role": "OWNER"}), "role", "unknown_role")]
    #[actix_web::test]
    async fn register_rejects_invalid_payloads(
        #[case] body: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mut access = MockAccessControl::new();
        access.expect_register().times(0);

        let response = call(access, "/api/v1/auth/register", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = read_error(response).await;
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.details(), Some(&json!({"field": field, "code": code})));
    }

    #[rstest]
    #[actix_web::test]
    async fn register_passes_the_parsed_role() {
        let mut access = MockAccessControl::new();
        access
            .expect_register()
            .withf(|registration| {
                registration.role == Role::Admin
                    && registration.credentials.login().as_str() == "root"
            })
            .times(1)
            .return_once(|_| Ok(()));

        let response = call(
            access,
            "/api/v1/auth/register",
            json!({"login": "root", "password": "pw", "role": "admin"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn duplicate_registrations_conflict() {
        let mut access = MockAccessControl::new();
        access
            .expect_register()
            .return_once(|_| Err(Error::conflict("login ada already exists")));

        let response = call(
            access,
            "/api/v1/auth/register",
            json!({"login": "ada", "password": "pw", "role": "USER"}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
