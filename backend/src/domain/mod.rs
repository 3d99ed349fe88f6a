//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities for houses, engineers, architects
//! and accounts, plus the services that keep house links consistent and gate
//! access with bearer tokens. Nothing here depends on HTTP or persistence
//! crates; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error envelope.
//! - House / HouseDraft / HouseId: house projects and their links.
//! - Professional<K> (Engineer, Architect): records keyed by kind marker.
//! - Login / Password / Role / UserAccount / AccessToken: authentication.
//! - HouseService / ProfessionalService / AccessControlService: driving
//!   port implementations.

pub mod auth;
pub mod error;
pub mod house;
pub mod names;
pub mod ports;
pub mod professional;
pub mod trace_id;

mod access_control_service;
mod house_service;
mod professional_service;

pub use self::access_control_service::{AccessControlService, INVALID_CREDENTIALS};
pub use self::auth::{
    AccessToken, AuthValidationError, AuthenticatedUser, LOGIN_MAX, Login, LoginCredentials,
    Password, PasswordHash, Registration, Role, UserAccount,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::house::{House, HouseDraft, HouseId};
pub use self::house_service::HouseService;
pub use self::names::{NAME_MAX, NameValidationError, ProfessionalName, ProjectName};
pub use self::professional::{
    Architect, ArchitectId, ArchitectKind, Engineer, EngineerId, EngineerKind, IdValidationError,
    Professional, ProfessionalId, ProfessionalKind, ProfessionalProfile, ProfessionalRef,
};
pub use self::professional_service::ProfessionalService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
