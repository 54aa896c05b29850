//! Comment body validation and the comment projection.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::post::PostId;
use super::user::UserId;

/// Store-assigned comment identifier.
pub type CommentId = i64;

/// Maximum allowed length for a comment body, in characters.
pub const COMMENT_BODY_MAX: usize = 500;

/// Validation errors returned by [`CommentBody::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    EmptyBody,
    BodyTooLong { max: usize },
}

impl fmt::Display for CommentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBody => write!(f, "comment body must not be empty"),
            Self::BodyTooLong { max } => {
                write!(f, "comment body must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for CommentValidationError {}

/// Body text of a comment, at most [`COMMENT_BODY_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentBody(String);

impl CommentBody {
    /// Validate and construct a [`CommentBody`].
    pub fn new(body: impl Into<String>) -> Result<Self, CommentValidationError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(CommentValidationError::EmptyBody);
        }
        if body.chars().count() > COMMENT_BODY_MAX {
            return Err(CommentValidationError::BodyTooLong {
                max: COMMENT_BODY_MAX,
            });
        }
        Ok(Self(body))
    }
}

impl AsRef<str> for CommentBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CommentBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CommentBody> for String {
    fn from(value: CommentBody) -> Self {
        value.0
    }
}

/// Client-facing projection of a comment with its author's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CommentView {
    /// Store-assigned identifier.
    pub id: CommentId,
    /// Body text.
    pub body: String,
    /// Creation time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Identifier of the authoring user.
    pub user_id: UserId,
    /// Username of the authoring user.
    pub username: String,
    /// Post this comment belongs to.
    pub post_id: PostId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn accepts_bodies_up_to_the_limit() {
        assert!(CommentBody::new("x".repeat(COMMENT_BODY_MAX)).is_ok());
    }

    #[rstest]
    fn rejects_bodies_over_the_limit() {
        let err = CommentBody::new("x".repeat(COMMENT_BODY_MAX + 1)).expect_err("must fail");
        assert_eq!(
            err,
            CommentValidationError::BodyTooLong {
                max: COMMENT_BODY_MAX
            }
        );
    }

    #[rstest]
    fn rejects_blank_bodies() {
        assert_eq!(
            CommentBody::new("  ").expect_err("must fail"),
            CommentValidationError::EmptyBody
        );
    }
}
