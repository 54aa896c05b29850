//! Post publication, timelines, and deletion.

use std::sync::Arc;

use tracing::info;

use super::error::DomainError;
use super::ports::{storage_failure, PostRepository, RepositoryError, UserRepository};
use super::post::{PostBody, PostId, PostView};
use super::user::UserId;

const POST_NOT_FOUND: &str = "post not found";
const USER_NOT_FOUND: &str = "user not found";

/// Use cases for creating, listing, and deleting posts.
#[derive(Clone)]
pub struct PostService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    /// Create a new service over the user and post repositories.
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { users, posts }
    }

    /// Publish a post and return its projection.
    pub async fn create_post(
        &self,
        author_id: UserId,
        body: &str,
    ) -> Result<PostView, DomainError> {
        let body =
            PostBody::new(body).map_err(|err| DomainError::invalid_request(err.to_string()))?;
        self.ensure_user_exists(author_id).await?;

        match self.posts.create(author_id, body).await {
            Ok(view) => {
                info!(post_id = view.id, author_id, "post created");
                Ok(view)
            }
            // The author row can disappear between the check and the insert
            // only if a deletion path is added later; the constraint keeps
            // the answer honest either way.
            Err(RepositoryError::ForeignKeyViolation) => {
                Err(DomainError::not_found(USER_NOT_FOUND))
            }
            Err(other) => Err(storage_failure(other)),
        }
    }

    /// All posts, newest first, annotated for `viewer`.
    pub async fn list_posts(&self, viewer: Option<UserId>) -> Result<Vec<PostView>, DomainError> {
        self.posts.list(viewer).await.map_err(storage_failure)
    }

    /// One post by identifier, annotated for `viewer`.
    pub async fn get_post(
        &self,
        post_id: PostId,
        viewer: Option<UserId>,
    ) -> Result<PostView, DomainError> {
        self.posts
            .find(post_id, viewer)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| DomainError::not_found(POST_NOT_FOUND))
    }

    /// Delete a post; only the author may do so. Comments and likes are
    /// removed by cascade.
    pub async fn delete_post(
        &self,
        post_id: PostId,
        requester_id: UserId,
    ) -> Result<(), DomainError> {
        let author_id = self
            .posts
            .author_of(post_id)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| DomainError::not_found(POST_NOT_FOUND))?;

        if author_id != requester_id {
            return Err(DomainError::forbidden("only the author may delete a post"));
        }

        match self.posts.delete(post_id).await {
            Ok(()) => {
                info!(post_id, requester_id, "post deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(DomainError::not_found(POST_NOT_FOUND)),
            Err(other) => Err(storage_failure(other)),
        }
    }

    /// Posts authored by `user_id` or anyone they follow, newest first.
    ///
    /// A user who follows nobody and has no posts gets an empty list, not
    /// an error.
    pub async fn followed_feed(
        &self,
        user_id: UserId,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, DomainError> {
        self.ensure_user_exists(user_id).await?;
        self.posts
            .followed_feed(user_id, viewer)
            .await
            .map_err(storage_failure)
    }

    async fn ensure_user_exists(&self, user_id: UserId) -> Result<(), DomainError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(storage_failure)?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(USER_NOT_FOUND))
    }
}
