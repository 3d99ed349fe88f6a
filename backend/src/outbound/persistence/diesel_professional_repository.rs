//! PostgreSQL-backed engineer and architect repositories.
//!
//! The two tables share a shape, so one adapter implements
//! [`ProfessionalRepository`] for both kinds through
//! `impl_professional_repository!`. Deleting a row that a house still links
//! to is refused by the `ON DELETE RESTRICT` foreign key and reported as
//! [`ProfessionalRepositoryError::StillReferenced`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfessionalRepository, ProfessionalRepositoryError};
use crate::domain::{
    ArchitectKind, EngineerKind, Professional, ProfessionalId, ProfessionalKind, ProfessionalName,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{ProfessionalRow, professional_from_row};
use super::pool::{DbPool, PoolError};
use super::schema::{architects, engineers};

/// Diesel-backed implementation of [`ProfessionalRepository`] for engineers
/// and architects.
#[derive(Clone)]
pub struct DieselProfessionalRepository {
    pool: DbPool,
}

impl DieselProfessionalRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfessionalRepositoryError {
    ProfessionalRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ProfessionalRepositoryError {
    map_failure(classify_diesel_error(error), None)
}

/// `deleting` is the id being removed, if the failed statement was a delete.
fn map_failure(failure: DieselFailure, deleting: Option<i64>) -> ProfessionalRepositoryError {
    match (failure, deleting) {
        (DieselFailure::ForeignKey { .. }, Some(id)) => {
            ProfessionalRepositoryError::still_referenced(id)
        }
        (DieselFailure::Connection(message), _) => ProfessionalRepositoryError::connection(message),
        (other, _) => ProfessionalRepositoryError::query(other.into_message()),
    }
}

fn to_domain<K: ProfessionalKind>(
    rows: Vec<ProfessionalRow>,
) -> Result<Vec<Professional<K>>, ProfessionalRepositoryError> {
    rows.into_iter()
        .map(|row| professional_from_row::<K>(row).map_err(ProfessionalRepositoryError::query))
        .collect()
}

macro_rules! impl_professional_repository {
    ($kind:ty, $table:ident) => {
        #[async_trait]
        impl ProfessionalRepository<$kind> for DieselProfessionalRepository {
            async fn list(&self) -> Result<Vec<Professional<$kind>>, ProfessionalRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let rows: Vec<ProfessionalRow> = $table::table
                    .select(($table::id, $table::name))
                    .order($table::id.asc())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                to_domain(rows)
            }

            async fn find_by_id(
                &self,
                id: ProfessionalId<$kind>,
            ) -> Result<Option<Professional<$kind>>, ProfessionalRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let row: Option<ProfessionalRow> = $table::table
                    .find(id.get())
                    .select(($table::id, $table::name))
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;
                Ok(to_domain(row.into_iter().collect())?.pop())
            }

            async fn find_by_name(
                &self,
                name: &str,
            ) -> Result<Vec<Professional<$kind>>, ProfessionalRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let rows: Vec<ProfessionalRow> = $table::table
                    .filter($table::name.eq(name))
                    .select(($table::id, $table::name))
                    .order($table::id.asc())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                to_domain(rows)
            }

            async fn create(
                &self,
                name: &ProfessionalName,
            ) -> Result<Professional<$kind>, ProfessionalRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let raw_id: i64 = diesel::insert_into($table::table)
                    .values($table::name.eq(name.as_str()))
                    .returning($table::id)
                    .get_result(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                let id = ProfessionalId::new(raw_id)
                    .map_err(|err| ProfessionalRepositoryError::query(err.to_string()))?;
                Ok(Professional::new(id, name.clone()))
            }

            async fn update(
                &self,
                professional: &Professional<$kind>,
            ) -> Result<bool, ProfessionalRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let affected = diesel::update($table::table.find(professional.id().get()))
                    .set($table::name.eq(professional.name().as_str()))
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                Ok(affected > 0)
            }

            async fn delete(
                &self,
                id: ProfessionalId<$kind>,
            ) -> Result<bool, ProfessionalRepositoryError> {
                let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                let affected = diesel::delete($table::table.find(id.get()))
                    .execute(&mut conn)
                    .await
                    .map_err(|err| map_failure(classify_diesel_error(err), Some(id.get())))?;
                Ok(affected > 0)
            }
        }
    };
}

impl_professional_repository!(EngineerKind, engineers);
impl_professional_repository!(ArchitectKind, architects);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fk_violation_on_delete_is_still_referenced() {
        let failure = DieselFailure::ForeignKey {
            constraint: Some("houses_engineer_id_fkey".to_owned()),
        };
        assert_eq!(
            map_failure(failure, Some(3)),
            ProfessionalRepositoryError::still_referenced(3_i64)
        );
    }

    #[rstest]
    fn fk_violation_elsewhere_is_a_query_error() {
        let failure = DieselFailure::ForeignKey { constraint: None };
        assert!(matches!(
            map_failure(failure, None),
            ProfessionalRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn corrupt_rows_are_query_errors() {
        let err = to_domain::<ArchitectKind>(vec![(1, String::new())]).expect_err("blank name");
        assert!(err.to_string().contains("architect 1"));
    }
}
