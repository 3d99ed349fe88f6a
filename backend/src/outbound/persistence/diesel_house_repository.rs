//! PostgreSQL-backed house repository.
//!
//! Create and replace run in one transaction: the house row is written
//! first, then each requested link is resolved under a `FOR KEY SHARE` lock
//! and applied. A link that does not resolve aborts the transaction, so no
//! half-linked house is ever visible.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::pooled_connection::bb8::PooledConnection;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{HouseRepository, HouseRepositoryError};
use crate::domain::{House, HouseDraft, HouseId, ProfessionalRef};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{HouseChangeset, HouseLinks, HouseRow, NewHouseRow};
use super::pool::{DbPool, PoolError};
use super::schema::{architects, engineers, houses};

const ENGINEER_FKEY: &str = "houses_engineer_id_fkey";
const ARCHITECT_FKEY: &str = "houses_architect_id_fkey";

/// Diesel-backed implementation of [`HouseRepository`].
#[derive(Clone)]
pub struct DieselHouseRepository {
    pool: DbPool,
}

impl DieselHouseRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, HouseRepositoryError> {
        self.pool.get().await.map_err(map_pool_error)
    }
}

fn map_pool_error(error: PoolError) -> HouseRepositoryError {
    HouseRepositoryError::connection(pool_error_message(error))
}

/// Failure inside a linking transaction.
#[derive(Debug)]
enum LinkError {
    Diesel(diesel::result::Error),
    MissingEngineer(i64),
    MissingArchitect(i64),
}

impl From<diesel::result::Error> for LinkError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_diesel_error(error: diesel::result::Error) -> HouseRepositoryError {
    map_failure(classify_diesel_error(error), None, None)
}

/// `engineer`/`architect` are the ids the write tried to link, used to name
/// the missing record when the foreign key itself refused the write.
fn map_failure(
    failure: DieselFailure,
    engineer: Option<i64>,
    architect: Option<i64>,
) -> HouseRepositoryError {
    match (engineer, architect) {
        (Some(id), _) if failure.is_foreign_key(ENGINEER_FKEY) => {
            HouseRepositoryError::missing_engineer(id)
        }
        (_, Some(id)) if failure.is_foreign_key(ARCHITECT_FKEY) => {
            HouseRepositoryError::missing_architect(id)
        }
        _ => match failure {
            DieselFailure::Connection(message) => HouseRepositoryError::connection(message),
            other => HouseRepositoryError::query(other.into_message()),
        },
    }
}

fn map_link_error(
    error: LinkError,
    engineer: Option<i64>,
    architect: Option<i64>,
) -> HouseRepositoryError {
    match error {
        LinkError::MissingEngineer(id) => HouseRepositoryError::missing_engineer(id),
        LinkError::MissingArchitect(id) => HouseRepositoryError::missing_architect(id),
        LinkError::Diesel(error) => map_failure(classify_diesel_error(error), engineer, architect),
    }
}

fn to_domain(row: HouseRow) -> Result<House, HouseRepositoryError> {
    row.into_domain().map_err(HouseRepositoryError::query)
}

fn to_domain_all(rows: Vec<HouseRow>) -> Result<Vec<House>, HouseRepositoryError> {
    rows.into_iter().map(to_domain).collect()
}

/// Lock each requested professional against deletion for the rest of the
/// transaction, failing if one does not exist.
async fn resolve_links(
    conn: &mut AsyncPgConnection,
    engineer: Option<i64>,
    architect: Option<i64>,
) -> Result<(), LinkError> {
    if let Some(id) = engineer {
        let found: Option<i64> = engineers::table
            .find(id)
            .select(engineers::id)
            .for_key_share()
            .first(conn)
            .await
            .optional()?;
        if found.is_none() {
            return Err(LinkError::MissingEngineer(id));
        }
    }
    if let Some(id) = architect {
        let found: Option<i64> = architects::table
            .find(id)
            .select(architects::id)
            .for_key_share()
            .first(conn)
            .await
            .optional()?;
        if found.is_none() {
            return Err(LinkError::MissingArchitect(id));
        }
    }
    Ok(())
}

#[async_trait]
impl HouseRepository for DieselHouseRepository {
    async fn list(&self) -> Result<Vec<House>, HouseRepositoryError> {
        let mut conn = self.conn().await?;
        let rows = houses::table
            .select(HouseRow::as_select())
            .order(houses::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_domain_all(rows)
    }

    async fn find_by_id(&self, id: HouseId) -> Result<Option<House>, HouseRepositoryError> {
        let mut conn = self.conn().await?;
        houses::table
            .find(id.get())
            .select(HouseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_project_name(
        &self,
        project_name: &str,
    ) -> Result<Vec<House>, HouseRepositoryError> {
        let mut conn = self.conn().await?;
        let rows = houses::table
            .filter(houses::project_name.eq(project_name))
            .select(HouseRow::as_select())
            .order(houses::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_domain_all(rows)
    }

    async fn find_by_professional(
        &self,
        reference: ProfessionalRef,
    ) -> Result<Vec<House>, HouseRepositoryError> {
        let mut conn = self.conn().await?;
        let base = houses::table.select(HouseRow::as_select()).into_boxed();
        let query = match reference {
            ProfessionalRef::Engineer(id) => base.filter(houses::engineer_id.eq(id.get())),
            ProfessionalRef::Architect(id) => base.filter(houses::architect_id.eq(id.get())),
        };
        let rows = query
            .order(houses::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_domain_all(rows)
    }

    async fn create(&self, draft: &HouseDraft) -> Result<House, HouseRepositoryError> {
        let engineer = draft.engineer.map(|id| id.get());
        let architect = draft.architect.map(|id| id.get());
        let new_row = NewHouseRow {
            project_name: draft.project_name.as_str(),
        };
        let mut conn = self.conn().await?;

        let row = conn
            .transaction::<HouseRow, LinkError, _>(|conn| {
                async move {
                    let inserted: i64 = diesel::insert_into(houses::table)
                        .values(&new_row)
                        .returning(houses::id)
                        .get_result(conn)
                        .await?;

                    resolve_links(conn, engineer, architect).await?;

                    let linked = diesel::update(houses::table.find(inserted))
                        .set(&HouseLinks {
                            engineer_id: engineer,
                            architect_id: architect,
                        })
                        .returning(HouseRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(linked)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_link_error(err, engineer, architect))?;

        to_domain(row)
    }

    async fn replace(&self, house: &House) -> Result<bool, HouseRepositoryError> {
        let engineer = house.engineer().map(|id| id.get());
        let architect = house.architect().map(|id| id.get());
        let id = house.id().get();
        let changes = HouseChangeset {
            project_name: house.project_name().as_str(),
            engineer_id: engineer,
            architect_id: architect,
        };
        let mut conn = self.conn().await?;

        let affected = conn
            .transaction::<usize, LinkError, _>(|conn| {
                async move {
                    resolve_links(conn, engineer, architect).await?;
                    let affected = diesel::update(houses::table.find(id))
                        .set(&changes)
                        .execute(conn)
                        .await?;
                    Ok(affected)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_link_error(err, engineer, architect))?;

        Ok(affected > 0)
    }

    async fn delete(&self, id: HouseId) -> Result<bool, HouseRepositoryError> {
        let mut conn = self.conn().await?;
        let affected = diesel::delete(houses::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
