//! User identity types and profile projection.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::post::PostView;

/// Store-assigned user identifier.
pub type UserId = i64;

/// Validation errors returned by the user newtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
    EmptyEmail,
    EmailTooLong { max: usize },
    EmailMissingAtSign,
    EmptyPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmailMissingAtSign => write!(f, "email must contain an @ sign"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 80;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 120;

/// Unique handle a user registers and logs in with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Unique email address captured at registration.
///
/// Validation is deliberately shallow (presence, length, an `@` sign); the
/// store's uniqueness constraint is the real guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email.contains('@') {
            return Err(UserValidationError::EmailMissingAtSign);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// A stored user record as the persistence layer returns it.
///
/// Carries the password hash and therefore must never be serialised; the
/// client-facing shapes are [`Profile`] and the auth responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Unique handle.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Salted argon2id hash in PHC string format.
    pub password_hash: String,
}

/// Validated input for creating a user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique handle.
    pub username: Username,
    /// Unique email address.
    pub email: Email,
    /// Salted argon2id hash in PHC string format.
    pub password_hash: String,
}

/// Follower/followed tallies for one user, derived by aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowCounts {
    /// Users following this user.
    pub followers: i64,
    /// Users this user follows.
    pub followed: i64,
}

/// Client-facing user summary with the user's own posts.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Profile {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Unique handle.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Number of users following this user.
    pub followers_count: i64,
    /// Number of users this user follows.
    pub followed_count: i64,
    /// The user's own posts, newest first, with per-post annotations.
    pub posts: Vec<PostView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice")]
    #[case("a")]
    fn accepts_reasonable_usernames(#[case] raw: &str) {
        let username = Username::new(raw).expect("valid username");
        assert_eq!(username.as_ref(), raw);
    }

    #[rstest]
    #[case("", UserValidationError::EmptyUsername)]
    #[case("   ", UserValidationError::EmptyUsername)]
    fn rejects_blank_usernames(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Username::new(raw).expect_err("must fail"), expected);
    }

    #[rstest]
    fn rejects_over_long_usernames() {
        let raw = "x".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(raw).expect_err("must fail"),
            UserValidationError::UsernameTooLong { max: USERNAME_MAX }
        );
    }

    #[rstest]
    #[case("a@x.com")]
    #[case("first.last@example.co.uk")]
    fn accepts_reasonable_emails(#[case] raw: &str) {
        let email = Email::new(raw).expect("valid email");
        assert_eq!(email.as_ref(), raw);
    }

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("no-at-sign", UserValidationError::EmailMissingAtSign)]
    fn rejects_malformed_emails(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Email::new(raw).expect_err("must fail"), expected);
    }

    #[rstest]
    fn rejects_over_long_emails() {
        let raw = format!("{}@x.com", "a".repeat(EMAIL_MAX));
        assert_eq!(
            Email::new(raw).expect_err("must fail"),
            UserValidationError::EmailTooLong { max: EMAIL_MAX }
        );
    }
}
