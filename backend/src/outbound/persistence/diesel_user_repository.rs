//! SQLite-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::{NewUser, RepositoryError, UserId, UserRecord, UserRepository};

use super::error_mapping::map_diesel_error;
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row to a domain user record.
fn row_to_record(row: UserRow) -> UserRecord {
    UserRecord {
        id: row.id,
        username: row.username,
        email: row.email,
        password_hash: row.password_hash,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<UserId, RepositoryError> {
        self.pool
            .run(move |conn| {
                let row = NewUserRow {
                    username: new_user.username.as_ref(),
                    email: new_user.email.as_ref(),
                    password_hash: new_user.password_hash.as_str(),
                };
                diesel::insert_into(users::table)
                    .values(&row)
                    .returning(users::id)
                    .get_result(conn)
                    .map_err(map_diesel_error)
            })
            .await
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let username = username.to_owned();
        self.pool
            .run(move |conn| {
                users::table
                    .filter(users::username.eq(&username))
                    .select(UserRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(map_diesel_error)
            })
            .await
            .map(|row| row.map(row_to_record))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let email = email.to_owned();
        self.pool
            .run(move |conn| {
                users::table
                    .filter(users::email.eq(&email))
                    .select(UserRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(map_diesel_error)
            })
            .await
            .map(|row| row.map(row_to_record))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, RepositoryError> {
        self.pool
            .run(move |conn| {
                users::table
                    .find(id)
                    .select(UserRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(map_diesel_error)
            })
            .await
            .map(|row| row.map(row_to_record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rows_convert_to_records_field_for_field() {
        let row = UserRow {
            id: 3,
            username: "alice".to_owned(),
            email: "a@x.com".to_owned(),
            password_hash: "$argon2id$...".to_owned(),
        };

        let record = row_to_record(row);

        assert_eq!(record.id, 3);
        assert_eq!(record.username, "alice");
        assert_eq!(record.email, "a@x.com");
        assert_eq!(record.password_hash, "$argon2id$...");
    }
}
