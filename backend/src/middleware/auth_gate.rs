//! Bearer-token gate for the protected resource scopes.
//!
//! Reads (`GET`, `HEAD`, `OPTIONS`) need the `USER` role; every other method
//! needs `ADMIN`. The token is verified and the account's role re-read on
//! every request through [`AccessControl::authorize`]; nothing is cached.
//! On success the caller's [`AuthenticatedUser`] is placed in the request
//! extensions for handlers to extract.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{Method, header};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::ports::AccessControl;
use crate::domain::{self, AuthenticatedUser, Role};

const BEARER_PREFIX: &str = "Bearer ";

/// Role needed to call `method` on a protected scope.
#[must_use]
pub fn required_role(method: &Method) -> Role {
    if matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS) {
        Role::User
    } else {
        Role::Admin
    }
}

fn bearer_token(req: &ServiceRequest) -> Result<String, domain::Error> {
    let raw = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| domain::Error::unauthorized("missing bearer token"))?;
    let value = raw
        .to_str()
        .map_err(|_| domain::Error::unauthorized("malformed authorization header"))?;
    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| domain::Error::unauthorized("missing bearer token"))
}

/// Middleware factory enforcing bearer authentication and role checks.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use actix_web::{App, web};
/// use builders::domain::ports::AccessControl;
/// use builders::middleware::AuthGate;
///
/// fn app(access: Arc<dyn AccessControl>) {
///     let _app = App::new().service(web::scope("/houses").wrap(AuthGate::new(access)));
/// }
/// ```
#[derive(Clone)]
pub struct AuthGate {
    access: Arc<dyn AccessControl>,
}

impl AuthGate {
    /// Gate requests through `access`.
    pub fn new(access: Arc<dyn AccessControl>) -> Self {
        Self { access }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
            access: Arc::clone(&self.access),
        }))
    }
}

/// Service wrapper produced by [`AuthGate`].
pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
    access: Arc<dyn AccessControl>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let access = Arc::clone(&self.access);
        Box::pin(async move {
            let required = required_role(req.method());
            let outcome = match bearer_token(&req) {
                Ok(token) => access.authorize(&token, required).await,
                Err(err) => Err(err),
            };
            match outcome {
                Ok(user) => {
                    req.extensions_mut().insert::<AuthenticatedUser>(user);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    debug!(code = ?err.code(), path = req.path(), "request rejected by auth gate");
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockAccessControl;
    use crate::domain::{ErrorCode, Login};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    fn user(role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            login: Login::new("ada").expect("login"),
            role,
        }
    }

    async fn echo_role(req: actix_web::HttpRequest) -> HttpResponse {
        let role = req
            .extensions()
            .get::<AuthenticatedUser>()
            .map(|user| user.role.to_string())
            .unwrap_or_default();
        HttpResponse::Ok().body(role)
    }

    async fn send(
        access: MockAccessControl,
        request: actix_test::TestRequest,
    ) -> ServiceResponse<impl actix_web::body::MessageBody> {
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/houses")
                    .wrap(AuthGate::new(Arc::new(access)))
                    .route("", web::get().to(echo_role))
                    .route("", web::post().to(echo_role)),
            ),
        )
        .await;
        actix_test::call_service(&app, request.to_request()).await
    }

    #[rstest]
    #[case(Method::GET, Role::User)]
    #[case(Method::HEAD, Role::User)]
    #[case(Method::OPTIONS, Role::User)]
    #[case(Method::POST, Role::Admin)]
    #[case(Method::PUT, Role::Admin)]
    #[case(Method::DELETE, Role::Admin)]
    fn method_maps_to_required_role(#[case] method: Method, #[case] expected: Role) {
        assert_eq!(required_role(&method), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic YWRhOnB3"))]
    #[case(Some("Bearer "))]
    #[actix_web::test]
    async fn missing_or_foreign_credentials_are_unauthorized(
        #[case] authorization: Option<&str>,
    ) {
        let mut access = MockAccessControl::new();
        access.expect_authorize().times(0);
        let mut request = actix_test::TestRequest::get().uri("/houses");
        if let Some(value) = authorization {
            request = request.insert_header((header::AUTHORIZATION, value));
        }

        let response = send(access, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(body["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn reads_pass_the_user_role_and_expose_the_caller() {
        let mut access = MockAccessControl::new();
        access
            .expect_authorize()
            .withf(|token, required| token == "abc" && *required == Role::User)
            .times(1)
            .return_once(|_, _| Ok(user(Role::User)));

        let response = send(
            access,
            actix_test::TestRequest::get()
                .uri("/houses")
                .insert_header((header::AUTHORIZATION, "Bearer abc")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        assert_eq!(body.as_ref(), b"USER");
    }

    #[actix_web::test]
    async fn writes_require_admin() {
        let mut access = MockAccessControl::new();
        access
            .expect_authorize()
            .withf(|_, required| *required == Role::Admin)
            .times(1)
            .return_once(|_, _| Err(domain::Error::forbidden("ADMIN role required")));

        let response = send(
            access,
            actix_test::TestRequest::post()
                .uri("/houses")
                .insert_header((header::AUTHORIZATION, "Bearer abc")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: domain::Error = actix_test::read_body_json(response).await;
        assert_eq!(body.code(), ErrorCode::Forbidden);
    }
}
