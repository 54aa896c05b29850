//! Registration and login.

use std::sync::Arc;

use tracing::info;

use super::auth::{hash_password, verify_password};
use super::error::DomainError;
use super::ports::{storage_failure, RepositoryError, UserRepository};
use super::user::{Email, NewUser, UserId, UserValidationError, Username};

const BAD_CREDENTIALS: &str = "invalid username or password";

/// Identity returned by a successful login.
///
/// No token or session accompanies it; callers carry the identifier on
/// later requests (see the `api` module docs for the trust model).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Unique handle.
    pub username: String,
}

/// Use cases for account creation and authentication.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    /// Create a new service over a user repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a new account and return its identifier.
    ///
    /// Fails with Conflict when the username or email is already taken. The
    /// pre-checks give precise messages; the store's uniqueness constraint
    /// remains the authoritative guard under concurrent registration.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, DomainError> {
        let username = Username::new(username)
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;
        let email =
            Email::new(email).map_err(|err| DomainError::invalid_request(err.to_string()))?;
        if password.is_empty() {
            return Err(DomainError::invalid_request(
                UserValidationError::EmptyPassword.to_string(),
            ));
        }

        if self
            .users
            .find_by_username(username.as_ref())
            .await
            .map_err(storage_failure)?
            .is_some()
        {
            return Err(DomainError::conflict("username already registered"));
        }
        if self
            .users
            .find_by_email(email.as_ref())
            .await
            .map_err(storage_failure)?
            .is_some()
        {
            return Err(DomainError::conflict("email already registered"));
        }

        let password_hash = hash_password(password)?;
        let new_user = NewUser {
            username,
            email,
            password_hash,
        };
        match self.users.create(new_user).await {
            Ok(id) => {
                info!(user_id = id, "user registered");
                Ok(id)
            }
            // A concurrent registration can slip past the pre-checks; the
            // constraint reports it here.
            Err(RepositoryError::UniqueViolation) => {
                Err(DomainError::conflict("username or email already registered"))
            }
            Err(other) => Err(storage_failure(other)),
        }
    }

    /// Authenticate a username/password pair.
    ///
    /// Unknown users and wrong passwords produce the same Unauthorized
    /// message so login cannot be used to enumerate accounts.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, DomainError> {
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::invalid_request(
                "username and password are required",
            ));
        }

        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| DomainError::unauthorized(BAD_CREDENTIALS))?;

        if !verify_password(&user.password_hash, password) {
            return Err(DomainError::unauthorized(BAD_CREDENTIALS));
        }

        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
        })
    }
}
