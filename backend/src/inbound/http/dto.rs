//! Request and response bodies for the house and professional endpoints.
//!
//! Linked records are always rendered as bare ids on a house, and a
//! professional always carries its houses in full. The shaping happens here
//! rather than in serde attributes on domain types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, House, HouseDraft, Professional, ProfessionalId, ProfessionalKind, ProfessionalProfile,
};

use super::validation::{
    ARCHITECT_ID, ENGINEER_ID, ID, missing_field_error, parse_house_id,
    parse_optional_professional_id, parse_professional_id, parse_professional_name,
    parse_project_name,
};

/// House as returned to clients.
///
/// Example JSON:
/// `{"id":1,"projectName":"Silva's family house","engineer":3,"architect":null}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HouseDto {
    /// House identifier.
    #[schema(example = 1)]
    pub id: i64,
    /// Project name.
    #[schema(example = "Silva's family house")]
    pub project_name: String,
    /// Linked engineer id, if any.
    #[schema(example = 3)]
    pub engineer: Option<i64>,
    /// Linked architect id, if any.
    #[schema(example = 2)]
    pub architect: Option<i64>,
}

impl From<&House> for HouseDto {
    fn from(house: &House) -> Self {
        Self {
            id: house.id().get(),
            project_name: house.project_name().as_str().to_owned(),
            engineer: house.engineer().map(ProfessionalId::get),
            architect: house.architect().map(ProfessionalId::get),
        }
    }
}

/// Engineer or architect with the houses linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalDto {
    /// Record identifier.
    #[schema(example = 3)]
    pub id: i64,
    /// Display name.
    #[schema(example = "John Marston")]
    pub name: String,
    /// Houses currently linked to this record.
    pub houses: Vec<HouseDto>,
}

impl<K: ProfessionalKind> From<&ProfessionalProfile<K>> for ProfessionalDto {
    fn from(profile: &ProfessionalProfile<K>) -> Self {
        Self {
            id: profile.professional.id().get(),
            name: profile.professional.name().as_str().to_owned(),
            houses: profile.houses.iter().map(HouseDto::from).collect(),
        }
    }
}

impl<K: ProfessionalKind> From<&Professional<K>> for ProfessionalDto {
    fn from(professional: &Professional<K>) -> Self {
        Self {
            id: professional.id().get(),
            name: professional.name().as_str().to_owned(),
            houses: Vec::new(),
        }
    }
}

/// Body of `POST /api/v1/houses`.
///
/// Example JSON:
/// `{"projectName":"Silva's family house","engineerId":3,"architectId":2}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HouseCreateRequest {
    /// Project name.
    #[schema(example = "Silva's family house")]
    pub project_name: String,
    /// Engineer to link (optional).
    #[serde(default)]
    #[schema(example = 3)]
    pub engineer_id: Option<i64>,
    /// Architect to link (optional).
    #[serde(default)]
    #[schema(example = 2)]
    pub architect_id: Option<i64>,
}

impl TryFrom<HouseCreateRequest> for HouseDraft {
    type Error = Error;

    fn try_from(value: HouseCreateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            project_name: parse_project_name(&value.project_name)?,
            engineer: parse_optional_professional_id(value.engineer_id, ENGINEER_ID)?,
            architect: parse_optional_professional_id(value.architect_id, ARCHITECT_ID)?,
        })
    }
}

/// Body of `PUT /api/v1/houses`.
///
/// Omitted `engineerId` or `architectId` clear the existing link.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HouseReplaceRequest {
    /// House to replace.
    #[schema(example = 1)]
    pub id: Option<i64>,
    /// New project name.
    #[schema(example = "Silva's family house")]
    pub project_name: String,
    /// Engineer to link (optional).
    #[serde(default)]
    #[schema(example = 3)]
    pub engineer_id: Option<i64>,
    /// Architect to link (optional).
    #[serde(default)]
    #[schema(example = 2)]
    pub architect_id: Option<i64>,
}

impl HouseReplaceRequest {
    pub(crate) fn into_parts(self) -> Result<(crate::domain::HouseId, HouseDraft), Error> {
        let raw_id = self.id.ok_or_else(|| missing_field_error(ID))?;
        let id = parse_house_id(raw_id, ID)?;
        let draft = HouseDraft::try_from(HouseCreateRequest {
            project_name: self.project_name,
            engineer_id: self.engineer_id,
            architect_id: self.architect_id,
        })?;
        Ok((id, draft))
    }
}

/// Body of `POST /api/v1/engineers` and `POST /api/v1/architects`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalCreateRequest {
    /// Display name.
    #[schema(example = "John Marston")]
    pub name: String,
}

/// Body of `PUT /api/v1/engineers` and `PUT /api/v1/architects`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalReplaceRequest {
    /// Record to replace.
    #[schema(example = 1)]
    pub id: Option<i64>,
    /// New display name.
    #[schema(example = "John Marston")]
    pub name: String,
}

impl<K: ProfessionalKind> TryFrom<ProfessionalReplaceRequest> for Professional<K> {
    type Error = Error;

    fn try_from(value: ProfessionalReplaceRequest) -> Result<Self, Self::Error> {
        let raw_id = value.id.ok_or_else(|| missing_field_error(ID))?;
        let id = parse_professional_id(raw_id, ID)?;
        Ok(Self::new(id, parse_professional_name(&value.name)?))
    }
}

/// Query string of the `find` endpoints: `?name=...`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NameQuery {
    /// Exact name to match; absent matches nothing.
    pub name: Option<String>,
}
