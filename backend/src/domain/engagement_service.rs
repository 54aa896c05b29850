//! Comments and likes on posts.

use std::sync::Arc;

use tracing::info;

use super::comment::{CommentBody, CommentView};
use super::error::DomainError;
use super::ports::{
    storage_failure, EngagementRepository, PostRepository, RepositoryError, UserRepository,
};
use super::post::PostId;
use super::user::UserId;

const POST_NOT_FOUND: &str = "post not found";
const USER_NOT_FOUND: &str = "user not found";

/// Use cases for commenting on and liking posts.
#[derive(Clone)]
pub struct EngagementService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    engagement: Arc<dyn EngagementRepository>,
}

impl EngagementService {
    /// Create a new service over the user, post, and engagement
    /// repositories.
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        engagement: Arc<dyn EngagementRepository>,
    ) -> Self {
        Self {
            users,
            posts,
            engagement,
        }
    }

    /// Add a comment to a post and return its projection.
    pub async fn add_comment(
        &self,
        post_id: PostId,
        author_id: UserId,
        body: &str,
    ) -> Result<CommentView, DomainError> {
        let body =
            CommentBody::new(body).map_err(|err| DomainError::invalid_request(err.to_string()))?;
        self.ensure_user_exists(author_id).await?;
        self.ensure_post_exists(post_id).await?;

        match self.engagement.add_comment(post_id, author_id, body).await {
            Ok(view) => {
                info!(comment_id = view.id, post_id, author_id, "comment added");
                Ok(view)
            }
            Err(RepositoryError::ForeignKeyViolation) => {
                Err(DomainError::not_found(POST_NOT_FOUND))
            }
            Err(other) => Err(storage_failure(other)),
        }
    }

    /// Comments on a post, oldest first.
    pub async fn list_comments(&self, post_id: PostId) -> Result<Vec<CommentView>, DomainError> {
        self.ensure_post_exists(post_id).await?;
        self.engagement
            .comments_for(post_id)
            .await
            .map_err(storage_failure)
    }

    /// Record a like edge from `user_id` to `post_id`.
    ///
    /// A duplicate like is a Conflict, never a silent upsert.
    pub async fn like(&self, post_id: PostId, user_id: UserId) -> Result<(), DomainError> {
        self.ensure_user_exists(user_id).await?;
        self.ensure_post_exists(post_id).await?;

        match self.engagement.add_like(post_id, user_id).await {
            Ok(()) => {
                info!(post_id, user_id, "post liked");
                Ok(())
            }
            Err(RepositoryError::UniqueViolation) => {
                Err(DomainError::conflict("post already liked"))
            }
            Err(RepositoryError::ForeignKeyViolation) => {
                Err(DomainError::not_found(POST_NOT_FOUND))
            }
            Err(other) => Err(storage_failure(other)),
        }
    }

    /// Remove the like edge from `user_id` to `post_id`.
    ///
    /// Removing an absent edge is a Conflict, mirroring the duplicate-like
    /// rule.
    pub async fn unlike(&self, post_id: PostId, user_id: UserId) -> Result<(), DomainError> {
        self.ensure_user_exists(user_id).await?;
        self.ensure_post_exists(post_id).await?;

        let removed = self
            .engagement
            .remove_like(post_id, user_id)
            .await
            .map_err(storage_failure)?;
        if !removed {
            return Err(DomainError::conflict("post not liked"));
        }
        info!(post_id, user_id, "post unliked");
        Ok(())
    }

    async fn ensure_user_exists(&self, user_id: UserId) -> Result<(), DomainError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(storage_failure)?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(USER_NOT_FOUND))
    }

    async fn ensure_post_exists(&self, post_id: PostId) -> Result<(), DomainError> {
        self.posts
            .author_of(post_id)
            .await
            .map_err(storage_failure)?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(POST_NOT_FOUND))
    }
}
