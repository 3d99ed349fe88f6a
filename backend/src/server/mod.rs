//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use builders::Trace;
use builders::bootstrap::ensure_admin_account;
#[cfg(debug_assertions)]
use builders::doc::ApiDoc;
use builders::inbound::http::configure_api;
use builders::inbound::http::health::{HealthState, live, ready};
use builders::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let access = http_state.access.clone();
    let routes = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(|cfg| configure_api(cfg, &access))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        routes.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = routes;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration, seeding the administrator first when one is configured.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding the administrator, binding the
/// socket or starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let admin = config
        .admin
        .as_ref()
        .map(|(login, password)| (login.as_str(), password.as_str()));
    let outcome = ensure_admin_account(http_state.access.as_ref(), admin)
        .await
        .map_err(std::io::Error::other)?;
    info!(?outcome, "administrator bootstrap finished");

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
