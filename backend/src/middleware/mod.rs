//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as tracing and bearer authentication.

pub mod auth_gate;
pub mod trace;

pub use auth_gate::AuthGate;
pub use trace::Trace;
