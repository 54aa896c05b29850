//! Post body validation and the annotated post projection.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::user::UserId;

/// Store-assigned post identifier.
pub type PostId = i64;

/// Maximum allowed length for a post body, in characters.
pub const POST_BODY_MAX: usize = 280;

/// Validation errors returned by [`PostBody::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    EmptyBody,
    BodyTooLong { max: usize },
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBody => write!(f, "post body must not be empty"),
            Self::BodyTooLong { max } => {
                write!(f, "post body must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for PostValidationError {}

/// Body text of a post, at most [`POST_BODY_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostBody(String);

impl PostBody {
    /// Validate and construct a [`PostBody`].
    ///
    /// Length is measured in characters, not bytes, so multi-byte text gets
    /// the full allowance.
    pub fn new(body: impl Into<String>) -> Result<Self, PostValidationError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(PostValidationError::EmptyBody);
        }
        if body.chars().count() > POST_BODY_MAX {
            return Err(PostValidationError::BodyTooLong { max: POST_BODY_MAX });
        }
        Ok(Self(body))
    }
}

impl AsRef<str> for PostBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PostBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PostBody> for String {
    fn from(value: PostBody) -> Self {
        value.0
    }
}

/// Client-facing projection of a post with its derived annotations.
///
/// Counts are computed by aggregation at read time; nothing here is a
/// stored counter. `is_liked` reflects the viewer passed to the query and
/// is `false` when no viewer was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PostView {
    /// Store-assigned identifier.
    pub id: PostId,
    /// Body text.
    pub body: String,
    /// Creation time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Identifier of the authoring user.
    pub user_id: UserId,
    /// Username of the authoring user.
    pub username: String,
    /// Number of comments on this post.
    pub comments_count: i64,
    /// Number of distinct users with an active like edge to this post.
    pub likes_count: i64,
    /// Whether the viewing user has liked this post.
    pub is_liked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn accepts_bodies_up_to_the_limit() {
        let body = PostBody::new("x".repeat(POST_BODY_MAX)).expect("at the limit is valid");
        assert_eq!(body.as_ref().len(), POST_BODY_MAX);
    }

    #[rstest]
    fn rejects_bodies_over_the_limit() {
        let err = PostBody::new("x".repeat(POST_BODY_MAX + 1)).expect_err("must fail");
        assert_eq!(err, PostValidationError::BodyTooLong { max: POST_BODY_MAX });
    }

    #[rstest]
    #[case("")]
    #[case(" \t\n")]
    fn rejects_blank_bodies(#[case] raw: &str) {
        assert_eq!(
            PostBody::new(raw).expect_err("must fail"),
            PostValidationError::EmptyBody
        );
    }

    #[rstest]
    fn limit_counts_characters_not_bytes() {
        // 280 multi-byte characters are within the allowance.
        let body = "ß".repeat(POST_BODY_MAX);
        assert!(PostBody::new(body).is_ok());
    }
}
