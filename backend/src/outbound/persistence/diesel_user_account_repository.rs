//! PostgreSQL-backed account repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserAccountRepository, UserAccountRepositoryError};
use crate::domain::{Login, UserAccount};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of [`UserAccountRepository`].
#[derive(Clone)]
pub struct DieselUserAccountRepository {
    pool: DbPool,
}

impl DieselUserAccountRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserAccountRepositoryError {
    UserAccountRepositoryError::connection(pool_error_message(error))
}

fn map_failure(failure: DieselFailure, inserting: Option<&str>) -> UserAccountRepositoryError {
    match (failure, inserting) {
        (DieselFailure::UniqueViolation { .. }, Some(login)) => {
            UserAccountRepositoryError::duplicate_login(login)
        }
        (DieselFailure::Connection(message), _) => UserAccountRepositoryError::connection(message),
        (other, _) => UserAccountRepositoryError::query(other.into_message()),
    }
}

#[async_trait]
impl UserAccountRepository for DieselUserAccountRepository {
    async fn find_by_login(
        &self,
        login: &Login,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .find(login.as_str())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_failure(classify_diesel_error(err), None))?;
        row.map(|row| row.into_domain().map_err(UserAccountRepositoryError::query))
            .transpose()
    }

    async fn insert(&self, account: &UserAccount) -> Result<(), UserAccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            login: account.login.as_str(),
            password_hash: account.password_hash.as_str(),
            role: account.role.as_str(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_failure(classify_diesel_error(err), Some(row.login)))?;
        Ok(())
    }
}
