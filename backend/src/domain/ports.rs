//! Repository ports the persistence layer implements.
//!
//! The domain services depend only on these traits; the Diesel adapters in
//! `outbound::persistence` provide the production implementations and the
//! service tests substitute in-memory stubs.

use async_trait::async_trait;
use tracing::error;

use super::comment::{CommentBody, CommentView};
use super::error::DomainError;
use super::post::{PostBody, PostId, PostView};
use super::user::{FollowCounts, NewUser, UserId, UserRecord};

/// Failures surfaced by repository implementations.
///
/// Constraint violations are separate variants because the services
/// translate them into client-visible Conflict/NotFound errors; everything
/// else collapses into a generic internal failure at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// A connection could not be obtained or was lost.
    #[error("database connection error: {0}")]
    Connection(String),
    /// A query failed for a reason other than a constraint.
    #[error("database query error: {0}")]
    Query(String),
    /// A unique or primary-key constraint rejected the write.
    #[error("unique constraint violated")]
    UniqueViolation,
    /// A foreign-key constraint rejected the write.
    #[error("referenced row does not exist")]
    ForeignKeyViolation,
    /// The targeted row does not exist.
    #[error("record not found")]
    NotFound,
}

impl RepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}

/// Map an unexpected storage failure to an opaque internal domain error.
///
/// The storage detail is logged here and never reaches the client.
pub(crate) fn storage_failure(error: RepositoryError) -> DomainError {
    error!(error = %error, "storage operation failed");
    DomainError::internal("storage failure")
}

/// Durable storage for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the store-assigned identifier.
    ///
    /// Returns [`RepositoryError::UniqueViolation`] when the username or
    /// email is already taken.
    async fn create(&self, new_user: NewUser) -> Result<UserId, RepositoryError>;

    /// Look up a user by unique username.
    async fn find_by_username(&self, username: &str)
        -> Result<Option<UserRecord>, RepositoryError>;

    /// Look up a user by unique email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError>;

    /// Look up a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, RepositoryError>;
}

/// Durable storage for posts and their annotated projections.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post and return its projection (zero counts, not liked).
    async fn create(&self, author_id: UserId, body: PostBody) -> Result<PostView, RepositoryError>;

    /// All posts, newest first, annotated for `viewer`.
    async fn list(&self, viewer: Option<UserId>) -> Result<Vec<PostView>, RepositoryError>;

    /// One post by identifier, annotated for `viewer`.
    async fn find(
        &self,
        id: PostId,
        viewer: Option<UserId>,
    ) -> Result<Option<PostView>, RepositoryError>;

    /// The authoring user of a post, if the post exists.
    async fn author_of(&self, id: PostId) -> Result<Option<UserId>, RepositoryError>;

    /// Delete a post; comments and likes go with it via cascade.
    ///
    /// Returns [`RepositoryError::NotFound`] when no row was deleted.
    async fn delete(&self, id: PostId) -> Result<(), RepositoryError>;

    /// Posts authored by one user, newest first, annotated for `viewer`.
    async fn by_author(
        &self,
        author_id: UserId,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, RepositoryError>;

    /// Posts authored by `user_id` or anyone they follow, newest first.
    async fn followed_feed(
        &self,
        user_id: UserId,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, RepositoryError>;
}

/// Durable storage for comments and like edges.
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Insert a comment and return its projection.
    async fn add_comment(
        &self,
        post_id: PostId,
        author_id: UserId,
        body: CommentBody,
    ) -> Result<CommentView, RepositoryError>;

    /// Comments on a post, oldest first.
    async fn comments_for(&self, post_id: PostId) -> Result<Vec<CommentView>, RepositoryError>;

    /// Insert a like edge.
    ///
    /// Returns [`RepositoryError::UniqueViolation`] when the edge already
    /// exists.
    async fn add_like(&self, post_id: PostId, user_id: UserId) -> Result<(), RepositoryError>;

    /// Delete a like edge; `false` when no such edge existed.
    async fn remove_like(&self, post_id: PostId, user_id: UserId)
        -> Result<bool, RepositoryError>;
}

/// Durable storage for the follow graph.
#[async_trait]
pub trait SocialGraphRepository: Send + Sync {
    /// Insert a follow edge.
    ///
    /// Returns [`RepositoryError::UniqueViolation`] when the edge already
    /// exists.
    async fn add_edge(
        &self,
        follower_id: UserId,
        followed_id: UserId,
    ) -> Result<(), RepositoryError>;

    /// Delete a follow edge; `false` when no such edge existed.
    async fn remove_edge(
        &self,
        follower_id: UserId,
        followed_id: UserId,
    ) -> Result<bool, RepositoryError>;

    /// Whether the directed edge exists.
    async fn edge_exists(
        &self,
        follower_id: UserId,
        followed_id: UserId,
    ) -> Result<bool, RepositoryError>;

    /// Follower/followed tallies for one user, derived by aggregation.
    async fn follow_counts(&self, user_id: UserId) -> Result<FollowCounts, RepositoryError>;
}
