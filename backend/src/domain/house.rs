//! House projects and their links to professionals.

use std::fmt;

use super::{ArchitectId, EngineerId, IdValidationError, ProfessionalRef, ProjectName};

/// Positive house identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HouseId(i64);

impl HouseId {
    /// Validate a raw identifier.
    pub fn new(raw: i64) -> Result<Self, IdValidationError> {
        if raw <= 0 {
            return Err(IdValidationError(raw));
        }
        Ok(Self(raw))
    }

    /// Raw database value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for HouseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every mutable field of a house.
///
/// Used for both create and replace: a replace writes all fields, so a link
/// left as `None` is cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseDraft {
    /// Project name.
    pub project_name: ProjectName,
    /// Linked engineer.
    pub engineer: Option<EngineerId>,
    /// Linked architect.
    pub architect: Option<ArchitectId>,
}

/// Stored house.
///
/// ## Invariants
/// - `engineer`/`architect`, when set, point at existing records. The
///   repository adapter enforces this in the same transaction as the write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct House {
    id: HouseId,
    project_name: ProjectName,
    engineer: Option<EngineerId>,
    architect: Option<ArchitectId>,
}

impl House {
    /// Build the stored value for `id` from a full draft.
    pub fn new(id: HouseId, draft: HouseDraft) -> Self {
        let HouseDraft {
            project_name,
            engineer,
            architect,
        } = draft;
        Self {
            id,
            project_name,
            engineer,
            architect,
        }
    }

    /// Identifier.
    pub fn id(&self) -> HouseId {
        self.id
    }

    /// Project name.
    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    /// Linked engineer.
    pub fn engineer(&self) -> Option<EngineerId> {
        self.engineer
    }

    /// Linked architect.
    pub fn architect(&self) -> Option<ArchitectId> {
        self.architect
    }

    /// Whether this house holds `reference`.
    pub fn references(&self, reference: ProfessionalRef) -> bool {
        match reference {
            ProfessionalRef::Engineer(id) => self.engineer == Some(id),
            ProfessionalRef::Architect(id) => self.architect == Some(id),
        }
    }
}
