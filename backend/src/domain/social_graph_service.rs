//! The follow graph and user profiles.

use std::sync::Arc;

use tracing::info;

use super::error::DomainError;
use super::ports::{
    storage_failure, PostRepository, RepositoryError, SocialGraphRepository, UserRepository,
};
use super::user::{Profile, UserId};

const USER_NOT_FOUND: &str = "user not found";
const SELF_FOLLOW: &str = "users cannot follow themselves";

/// Use cases for following users and reading profiles.
#[derive(Clone)]
pub struct SocialGraphService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    graph: Arc<dyn SocialGraphRepository>,
}

impl SocialGraphService {
    /// Create a new service over the user, post, and graph repositories.
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        graph: Arc<dyn SocialGraphRepository>,
    ) -> Self {
        Self {
            users,
            posts,
            graph,
        }
    }

    /// Create a follow edge from `follower_id` to `followed_id`.
    ///
    /// Self-follow is rejected before any lookup, so it is BadRequest even
    /// for users that do not exist. A duplicate edge is a Conflict.
    pub async fn follow(
        &self,
        follower_id: UserId,
        followed_id: UserId,
    ) -> Result<(), DomainError> {
        if follower_id == followed_id {
            return Err(DomainError::invalid_request(SELF_FOLLOW));
        }
        self.ensure_user_exists(follower_id).await?;
        self.ensure_user_exists(followed_id).await?;

        match self.graph.add_edge(follower_id, followed_id).await {
            Ok(()) => {
                info!(follower_id, followed_id, "follow edge created");
                Ok(())
            }
            Err(RepositoryError::UniqueViolation) => {
                Err(DomainError::conflict("already following this user"))
            }
            Err(RepositoryError::ForeignKeyViolation) => {
                Err(DomainError::not_found(USER_NOT_FOUND))
            }
            Err(other) => Err(storage_failure(other)),
        }
    }

    /// Remove the follow edge from `follower_id` to `followed_id`.
    ///
    /// Removing an absent edge is a Conflict, mirroring the duplicate rule.
    pub async fn unfollow(
        &self,
        follower_id: UserId,
        followed_id: UserId,
    ) -> Result<(), DomainError> {
        if follower_id == followed_id {
            return Err(DomainError::invalid_request(SELF_FOLLOW));
        }
        self.ensure_user_exists(follower_id).await?;
        self.ensure_user_exists(followed_id).await?;

        let removed = self
            .graph
            .remove_edge(follower_id, followed_id)
            .await
            .map_err(storage_failure)?;
        if !removed {
            return Err(DomainError::conflict("not following this user"));
        }
        info!(follower_id, followed_id, "follow edge removed");
        Ok(())
    }

    /// Whether `follower_id` follows `followed_id`.
    ///
    /// Self-reference is always `false`, never an error; so is any pair
    /// involving unknown users, since no edge can exist for them.
    pub async fn is_following(
        &self,
        follower_id: UserId,
        followed_id: UserId,
    ) -> Result<bool, DomainError> {
        if follower_id == followed_id {
            return Ok(false);
        }
        self.graph
            .edge_exists(follower_id, followed_id)
            .await
            .map_err(storage_failure)
    }

    /// Profile for `username`: user summary, follow tallies, and the user's
    /// own posts annotated for `viewer`.
    pub async fn get_profile(
        &self,
        username: &str,
        viewer: Option<UserId>,
    ) -> Result<Profile, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(storage_failure)?
            .ok_or_else(|| DomainError::not_found(USER_NOT_FOUND))?;

        let counts = self
            .graph
            .follow_counts(user.id)
            .await
            .map_err(storage_failure)?;
        let posts = self
            .posts
            .by_author(user.id, viewer)
            .await
            .map_err(storage_failure)?;

        Ok(Profile {
            id: user.id,
            username: user.username,
            email: user.email,
            followers_count: counts.followers,
            followed_count: counts.followed,
            posts,
        })
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
