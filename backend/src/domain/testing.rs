//! In-memory stub repositories shared by the service unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::ports::{RepositoryError, UserRepository};
use super::user::{NewUser, UserId, UserRecord};

/// Build a stored user record with a throwaway hash.
pub(crate) fn user_record(id: UserId, username: &str) -> UserRecord {
    UserRecord {
        id,
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        password_hash: "unused".to_owned(),
    }
}

/// Mutex-guarded in-memory user store.
#[derive(Default)]
pub(crate) struct StubUsers {
    users: Mutex<Vec<UserRecord>>,
    failure: Mutex<Option<RepositoryError>>,
    create_failure: Mutex<Option<RepositoryError>>,
}

impl StubUsers {
    pub(crate) fn with_users(users: Vec<UserRecord>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Self::default()
        }
    }

    /// Make every subsequent call fail with `error`.
    pub(crate) fn fail_with(&self, error: RepositoryError) {
        *self.failure.lock().expect("failure lock") = Some(error);
    }

    /// Make only `create` fail with `error`, e.g. to mimic a constraint
    /// rejecting a write that raced past the pre-checks.
    pub(crate) fn fail_create_with(&self, error: RepositoryError) {
        *self.create_failure.lock().expect("create failure lock") = Some(error);
    }

    fn check_failure(&self) -> Result<(), RepositoryError> {
        match self.failure.lock().expect("failure lock").clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl UserRepository for StubUsers {
    async fn create(&self, new_user: NewUser) -> Result<UserId, RepositoryError> {
        self.check_failure()?;
        if let Some(error) = self
            .create_failure
            .lock()
            .expect("create failure lock")
            .clone()
        {
            return Err(error);
        }
        let mut users = self.users.lock().expect("users lock");
        let duplicate = users.iter().any(|user| {
            user.username == new_user.username.as_ref() || user.email == new_user.email.as_ref()
        });
        if duplicate {
            return Err(RepositoryError::UniqueViolation);
        }
        let id = users.iter().map(|user| user.id).max().unwrap_or(0) + 1;
        users.push(UserRecord {
            id,
            username: new_user.username.into(),
            email: new_user.email.into(),
            password_hash: new_user.password_hash,
        });
        Ok(id)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        self.check_failure()?;
        let users = self.users.lock().expect("users lock");
        Ok(users.iter().find(|user| user.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        self.check_failure()?;
        let users = self.users.lock().expect("users lock");
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, RepositoryError> {
        self.check_failure()?;
        let users = self.users.lock().expect("users lock");
        Ok(users.iter().find(|user| user.id == id).cloned())
    }
}
