//! HTTP inbound adapter exposing REST endpoints.
//!
//! Everything is served under `/api/v1`. The `/auth` scope is public; the
//! `/houses`, `/engineers` and `/architects` scopes sit behind
//! [`crate::middleware::AuthGate`].

pub mod architects;
pub mod auth;
pub mod dto;
pub mod engineers;
pub mod error;
pub mod health;
pub mod houses;
mod professionals;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::AccessControl;
use crate::middleware::AuthGate;

pub use error::ApiResult;

/// Path prefix shared by every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Register the extractor error handlers and every API scope on `cfg`.
///
/// Handlers read their ports from `web::Data<HttpState>`, which the caller
/// registers separately; `access` backs the bearer gate.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use actix_web::App;
/// use builders::domain::ports::AccessControl;
/// use builders::inbound::http::configure_api;
///
/// fn app(access: Arc<dyn AccessControl>) {
///     let _app = App::new().configure(|cfg| configure_api(cfg, &access));
/// }
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig, access: &Arc<dyn AccessControl>) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(validation::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(validation::path_error_handler))
        .service(
            web::scope(API_PREFIX)
                .service(
                    web::scope("/auth")
                        .service(auth::register)
                        .service(auth::login),
                )
                .service(
                    web::scope("/houses")
                        .wrap(AuthGate::new(Arc::clone(access)))
                        .configure(houses::configure),
                )
                .service(
                    web::scope("/engineers")
                        .wrap(AuthGate::new(Arc::clone(access)))
                        .configure(engineers::configure),
                )
                .service(
                    web::scope("/architects")
                        .wrap(AuthGate::new(Arc::clone(access)))
                        .configure(architects::configure),
                ),
        );
}
