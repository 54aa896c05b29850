//! SQLite-backed `EngagementRepository` implementation using Diesel.
//!
//! The likes table's composite primary key is the authoritative guard
//! against duplicate edges; a duplicate insert surfaces as
//! [`RepositoryError::UniqueViolation`] from inside the write transaction.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;

use crate::domain::{
    CommentBody, CommentView, EngagementRepository, PostId, RepositoryError, UserId,
};

use super::error_mapping::map_diesel_error;
use super::models::{CommentRow, NewCommentRow, NewLikeRow};
use super::pool::DbPool;
use super::schema::{comments, likes, users};

/// Diesel-backed implementation of the `EngagementRepository` port.
#[derive(Clone)]
pub struct DieselEngagementRepository {
    pool: DbPool,
}

impl DieselEngagementRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn as_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&naive)
}

fn row_to_view(row: CommentRow, username: String) -> CommentView {
    CommentView {
        id: row.id,
        body: row.body,
        timestamp: as_utc(row.created_at),
        user_id: row.author_id,
        username,
        post_id: row.post_id,
    }
}

#[async_trait]
impl EngagementRepository for DieselEngagementRepository {
    async fn add_comment(
        &self,
        post_id: PostId,
        author_id: UserId,
        body: CommentBody,
    ) -> Result<CommentView, RepositoryError> {
        self.pool
            .run(move |conn| {
                conn.transaction(|conn| {
                    let row: CommentRow = diesel::insert_into(comments::table)
                        .values(&NewCommentRow {
                            body: body.as_ref(),
                            created_at: Utc::now().naive_utc(),
                            author_id,
                            post_id,
                        })
                        .returning(CommentRow::as_returning())
                        .get_result(conn)?;

                    let username: String = users::table
                        .find(author_id)
                        .select(users::username)
                        .first(conn)?;

                    Ok(row_to_view(row, username))
                })
                .map_err(map_diesel_error)
            })
            .await
    }

    async fn comments_for(&self, post_id: PostId) -> Result<Vec<CommentView>, RepositoryError> {
        self.pool
            .run(move |conn| {
                let rows: Vec<(CommentRow, String)> = comments::table
                    .inner_join(users::table)
                    .filter(comments::post_id.eq(post_id))
                    .order((comments::created_at.asc(), comments::id.asc()))
                    .select((CommentRow::as_select(), users::username))
                    .load(conn)
                    .map_err(map_diesel_error)?;

                Ok(rows
                    .into_iter()
                    .map(|(row, username)| row_to_view(row, username))
                    .collect())
            })
            .await
    }

    async fn add_like(&self, post_id: PostId, user_id: UserId) -> Result<(), RepositoryError> {
        self.pool
            .run(move |conn| {
                diesel::insert_into(likes::table)
                    .values(&NewLikeRow {
                        user_id,
                        post_id,
                        created_at: Utc::now().naive_utc(),
                    })
                    .execute(conn)
                    .map_err(map_diesel_error)?;
                Ok(())
            })
            .await
    }

    async fn remove_like(
        &self,
        post_id: PostId,
        user_id: UserId,
    ) -> Result<bool, RepositoryError> {
        self.pool
            .run(move |conn| {
                let deleted = diesel::delete(
                    likes::table.filter(likes::user_id.eq(user_id).and(likes::post_id.eq(post_id))),
                )
                .execute(conn)
                .map_err(map_diesel_error)?;
                Ok(deleted > 0)
            })
            .await
    }
}
