//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccessControl, HouseCommand, HouseQuery, ProfessionalCommand, ProfessionalQuery,
};
use crate::domain::{ArchitectKind, EngineerKind, ProfessionalKind};

/// Command and query ports for one professional kind.
pub struct ProfessionalPorts<K: ProfessionalKind> {
    /// Mutating use-cases.
    pub command: Arc<dyn ProfessionalCommand<K>>,
    /// Read use-cases.
    pub query: Arc<dyn ProfessionalQuery<K>>,
}

impl<K: ProfessionalKind> Clone for ProfessionalPorts<K> {
    fn clone(&self) -> Self {
        Self {
            command: Arc::clone(&self.command),
            query: Arc::clone(&self.query),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration, login and token checks.
    pub access: Arc<dyn AccessControl>,
    /// House writes.
    pub houses: Arc<dyn HouseCommand>,
    /// House reads.
    pub houses_query: Arc<dyn HouseQuery>,
    /// Engineer use-cases.
    pub engineers: ProfessionalPorts<EngineerKind>,
    /// Architect use-cases.
    pub architects: ProfessionalPorts<ArchitectKind>,
}

/// Select the ports for `K` out of the shared state.
pub trait ProfessionalPortsOf<K: ProfessionalKind> {
    /// Ports serving records of kind `K`.
    fn ports(&self) -> &ProfessionalPorts<K>;
}

impl ProfessionalPortsOf<EngineerKind> for HttpState {
    fn ports(&self) -> &ProfessionalPorts<EngineerKind> {
        &self.engineers
    }
}

impl ProfessionalPortsOf<ArchitectKind> for HttpState {
    fn ports(&self) -> &ProfessionalPorts<ArchitectKind> {
        &self.architects
    }
}
