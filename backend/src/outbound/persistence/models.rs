//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions back into domain types
//! re-validate every column; a row that fails is reported as a query error.

use diesel::prelude::*;

use crate::domain::{
    ArchitectId, EngineerId, House, HouseDraft, HouseId, Login, PasswordHash, Professional,
    ProfessionalId, ProfessionalKind, ProfessionalName, ProjectName, Role, UserAccount,
};

use super::schema::{houses, users};

/// Row struct for reading from the houses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = houses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HouseRow {
    pub id: i64,
    pub project_name: String,
    pub engineer_id: Option<i64>,
    pub architect_id: Option<i64>,
}

impl HouseRow {
    pub(crate) fn into_domain(self) -> Result<House, String> {
        let id = HouseId::new(self.id).map_err(|err| err.to_string())?;
        let project_name = ProjectName::new(&self.project_name)
            .map_err(|err| format!("house {} project name {err}", self.id))?;
        let engineer = self
            .engineer_id
            .map(EngineerId::new)
            .transpose()
            .map_err(|err| err.to_string())?;
        let architect = self
            .architect_id
            .map(ArchitectId::new)
            .transpose()
            .map_err(|err| err.to_string())?;
        Ok(House::new(
            id,
            HouseDraft {
                project_name,
                engineer,
                architect,
            },
        ))
    }
}

/// Insertable struct for a new, not yet linked, house.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = houses)]
pub(crate) struct NewHouseRow<'a> {
    pub project_name: &'a str,
}

/// Full-row changeset. `None` links are written as NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = houses, treat_none_as_null = true)]
pub(crate) struct HouseChangeset<'a> {
    pub project_name: &'a str,
    pub engineer_id: Option<i64>,
    pub architect_id: Option<i64>,
}

/// Link-only changeset applied after the references resolve.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = houses, treat_none_as_null = true)]
pub(crate) struct HouseLinks {
    pub engineer_id: Option<i64>,
    pub architect_id: Option<i64>,
}

/// `(id, name)` pair read from the engineers or architects table.
pub(crate) type ProfessionalRow = (i64, String);

pub(crate) fn professional_from_row<K: ProfessionalKind>(
    (raw_id, raw_name): ProfessionalRow,
) -> Result<Professional<K>, String> {
    let id = ProfessionalId::<K>::new(raw_id).map_err(|err| err.to_string())?;
    let name =
        ProfessionalName::new(&raw_name).map_err(|err| format!("{} {id} name {err}", K::LABEL))?;
    Ok(Professional::new(id, name))
}

/// Row struct for the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub login: String,
    pub password_hash: String,
    pub role: String,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<UserAccount, String> {
        let login = Login::new(&self.login).map_err(|err| err.to_string())?;
        let role = self
            .role
            .parse::<Role>()
            .map_err(|err| format!("account {login}: {err}"))?;
        Ok(UserAccount {
            login,
            password_hash: PasswordHash::new(self.password_hash),
            role,
        })
    }
}

/// Insertable struct for new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub login: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}
