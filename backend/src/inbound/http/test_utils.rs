//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{Service as _, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpMessage, test as actix_test, web};

use crate::domain::ports::{
    MockAccessControl, MockHouseCommand, MockHouseQuery, MockProfessionalCommand,
    MockProfessionalQuery,
};
use crate::domain::{ArchitectKind, AuthenticatedUser, EngineerKind, Error, Login, Role};

use super::state::{HttpState, ProfessionalPorts};
use super::validation::{json_error_handler, path_error_handler, query_error_handler};

/// Mock ports for every handler dependency.
///
/// Mocks left at their default panic if called, so a test only configures
/// the ports it expects the handler to use.
#[derive(Default)]
pub struct MockPorts {
    pub access: MockAccessControl,
    pub houses: MockHouseCommand,
    pub houses_query: MockHouseQuery,
    pub engineers: MockProfessionalCommand<EngineerKind>,
    pub engineers_query: MockProfessionalQuery<EngineerKind>,
    pub architects: MockProfessionalCommand<ArchitectKind>,
    pub architects_query: MockProfessionalQuery<ArchitectKind>,
}

impl MockPorts {
    /// Wrap the mocks in handler state.
    pub fn into_state(self) -> HttpState {
        HttpState {
            access: Arc::new(self.access),
            houses: Arc::new(self.houses),
            houses_query: Arc::new(self.houses_query),
            engineers: ProfessionalPorts {
                command: Arc::new(self.engineers),
                query: Arc::new(self.engineers_query),
            },
            architects: ProfessionalPorts {
                command: Arc::new(self.architects),
                query: Arc::new(self.architects_query),
            },
        }
    }
}

/// State whose only configured port is `access`.
pub fn state_with_access(access: MockAccessControl) -> HttpState {
    MockPorts {
        access,
        ..MockPorts::default()
    }
    .into_state()
}

/// Decode the error envelope of a failed response.
pub async fn read_error(response: ServiceResponse) -> Error {
    actix_test::read_body_json(response).await
}

/// Identity injected by [`test_app`] in place of the bearer gate.
pub fn admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        login: Login::new("admin").expect("valid login"),
        role: Role::Admin,
    }
}

/// App serving `configure`'s routes under `scope` as an authenticated admin,
/// with the production extractor error handlers.
pub fn test_app(
    state: HttpState,
    scope: &'static str,
    configure: fn(&mut web::ServiceConfig),
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap_fn(|req, srv| {
            req.extensions_mut().insert(admin_user());
            srv.call(req)
        })
        .service(web::scope(scope).configure(configure))
}
