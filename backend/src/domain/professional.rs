//! Engineers and architects.
//!
//! Both are stored in independent tables but share one shape, so they are
//! modelled as [`Professional<K>`] keyed by a zero-sized kind marker. The
//! marker keeps an engineer id from ever being passed where an architect id
//! is expected.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use super::{House, ProfessionalName};

/// Validation error for numeric identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be a positive integer, got {0}")]
pub struct IdValidationError(pub i64);

/// Kind marker implemented by [`EngineerKind`] and [`ArchitectKind`].
pub trait ProfessionalKind:
    fmt::Debug + Clone + Copy + PartialEq + Eq + Hash + Default + Send + Sync + 'static
{
    /// Lower-case label used in messages and error details.
    const LABEL: &'static str;

    /// Wrap an id of this kind as a house reference.
    fn reference(id: ProfessionalId<Self>) -> ProfessionalRef;

    /// Reference of this kind held by `house`, if any.
    fn linked_to(house: &House) -> Option<ProfessionalId<Self>>;
}

/// Marker for engineers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EngineerKind;

/// Marker for architects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArchitectKind;

impl ProfessionalKind for EngineerKind {
    const LABEL: &'static str = "engineer";

    fn reference(id: ProfessionalId<Self>) -> ProfessionalRef {
        ProfessionalRef::Engineer(id)
    }

    fn linked_to(house: &House) -> Option<ProfessionalId<Self>> {
        house.engineer()
    }
}

impl ProfessionalKind for ArchitectKind {
    const LABEL: &'static str = "architect";

    fn reference(id: ProfessionalId<Self>) -> ProfessionalRef {
        ProfessionalRef::Architect(id)
    }

    fn linked_to(house: &House) -> Option<ProfessionalId<Self>> {
        house.architect()
    }
}

/// Positive identifier of a professional of kind `K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfessionalId<K>(i64, PhantomData<K>);

impl<K: ProfessionalKind> ProfessionalId<K> {
    /// Validate a raw identifier.
    pub fn new(raw: i64) -> Result<Self, IdValidationError> {
        if raw <= 0 {
            return Err(IdValidationError(raw));
        }
        Ok(Self(raw, PhantomData))
    }

    /// Raw database value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl<K> fmt::Display for ProfessionalId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Engineer identifier.
pub type EngineerId = ProfessionalId<EngineerKind>;
/// Architect identifier.
pub type ArchitectId = ProfessionalId<ArchitectKind>;

/// A house-side link to either kind of professional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfessionalRef {
    /// Link through `houses.engineer_id`.
    Engineer(EngineerId),
    /// Link through `houses.architect_id`.
    Architect(ArchitectId),
}

/// Stored engineer or architect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Professional<K> {
    id: ProfessionalId<K>,
    name: ProfessionalName,
}

impl<K: ProfessionalKind> Professional<K> {
    /// Assemble a professional from validated parts.
    pub fn new(id: ProfessionalId<K>, name: ProfessionalName) -> Self {
        Self { id, name }
    }

    /// Identifier.
    pub fn id(&self) -> ProfessionalId<K> {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &ProfessionalName {
        &self.name
    }
}

/// Engineer record.
pub type Engineer = Professional<EngineerKind>;
/// Architect record.
pub type Architect = Professional<ArchitectKind>;

/// A professional together with the houses that currently reference it.
///
/// The house list is derived by query every time; it is never persisted on
/// the professional side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessionalProfile<K> {
    /// The stored record.
    pub professional: Professional<K>,
    /// Houses linked to the professional.
    pub houses: Vec<House>,
}
