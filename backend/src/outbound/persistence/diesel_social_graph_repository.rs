//! SQLite-backed `SocialGraphRepository` implementation using Diesel.
//!
//! One edge table queried from both sides: filtering on `follower_id`
//! answers "who does this user follow", filtering on `followed_id` answers
//! "who follows this user".

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;

use crate::domain::{FollowCounts, RepositoryError, SocialGraphRepository, UserId};

use super::error_mapping::map_diesel_error;
use super::models::NewFollowRow;
use super::pool::DbPool;
use super::schema::follows;

/// Diesel-backed implementation of the `SocialGraphRepository` port.
#[derive(Clone)]
pub struct DieselSocialGraphRepository {
    pool: DbPool,
}

impl DieselSocialGraphRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialGraphRepository for DieselSocialGraphRepository {
    async fn add_edge(
        &self,
        follower_id: UserId,
        followed_id: UserId,
    ) -> Result<(), RepositoryError> {
        self.pool
            .run(move |conn| {
                diesel::insert_into(follows::table)
                    .values(&NewFollowRow {
                        follower_id,
                        followed_id,
                        created_at: Utc::now().naive_utc(),
                    })
                    .execute(conn)
                    .map_err(map_diesel_error)?;
                Ok(())
            })
            .await
    }

    async fn remove_edge(
        &self,
        follower_id: UserId,
        followed_id: UserId,
    ) -> Result<bool, RepositoryError> {
        self.pool
            .run(move |conn| {
                let deleted = diesel::delete(follows::table.find((follower_id, followed_id)))
                    .execute(conn)
                    .map_err(map_diesel_error)?;
                Ok(deleted > 0)
            })
            .await
    }

    async fn edge_exists(
        &self,
        follower_id: UserId,
        followed_id: UserId,
    ) -> Result<bool, RepositoryError> {
        self.pool
            .run(move |conn| {
                follows::table
                    .find((follower_id, followed_id))
                    .select(follows::follower_id)
                    .first::<UserId>(conn)
                    .optional()
                    .map_err(map_diesel_error)
                    .map(|row| row.is_some())
            })
            .await
    }

    async fn follow_counts(&self, user_id: UserId) -> Result<FollowCounts, RepositoryError> {
        self.pool
            .run(move |conn| {
                let followers: i64 = follows::table
                    .filter(follows::followed_id.eq(user_id))
                    .count()
                    .get_result(conn)
                    .map_err(map_diesel_error)?;
                let followed: i64 = follows::table
                    .filter(follows::follower_id.eq(user_id))
                    .count()
                    .get_result(conn)
                    .map_err(map_diesel_error)?;
                Ok(FollowCounts {
                    followers,
                    followed,
                })
            })
            .await
    }
}
