//! SQLite-backed `PostRepository` implementation using Diesel.
//!
//! Posts are loaded joined with their author's username, then annotated
//! with comment/like tallies computed by explicit `GROUP BY` aggregation —
//! the counts are always derived from the edge tables, never stored.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use diesel::dsl::count_star;
use diesel::prelude::*;

use crate::domain::{PostBody, PostId, PostRepository, PostView, RepositoryError, UserId};

use super::error_mapping::map_diesel_error;
use super::models::{NewPostRow, PostRow};
use super::pool::DbPool;
use super::schema::{comments, follows, likes, posts, users};

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Which slice of the post table a query targets.
#[derive(Debug, Clone, Copy)]
enum PostScope {
    All,
    One(PostId),
    Author(UserId),
    /// Posts by the user or anyone they follow.
    Feed(UserId),
}

fn as_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Utc.from_utc_datetime(&naive)
}

/// Load posts with author usernames for a scope, newest first, and annotate
/// them for `viewer`. The id tie-break keeps same-second posts stable.
fn load_post_views(
    conn: &mut SqliteConnection,
    scope: PostScope,
    viewer: Option<UserId>,
) -> Result<Vec<PostView>, RepositoryError> {
    let mut query = posts::table
        .inner_join(users::table)
        .select((PostRow::as_select(), users::username))
        .order((posts::created_at.desc(), posts::id.desc()))
        .into_boxed();

    match scope {
        PostScope::All => {}
        PostScope::One(id) => query = query.filter(posts::id.eq(id)),
        PostScope::Author(author_id) => query = query.filter(posts::author_id.eq(author_id)),
        PostScope::Feed(user_id) => {
            let followed = follows::table
                .filter(follows::follower_id.eq(user_id))
                .select(follows::followed_id);
            query = query.filter(
                posts::author_id
                    .eq(user_id)
                    .or(posts::author_id.eq_any(followed)),
            );
        }
    }

    let rows: Vec<(PostRow, String)> = query.load(conn).map_err(map_diesel_error)?;
    annotate(conn, rows, viewer)
}

/// Attach comment counts, like counts, and the viewer's like flag.
fn annotate(
    conn: &mut SqliteConnection,
    rows: Vec<(PostRow, String)>,
    viewer: Option<UserId>,
) -> Result<Vec<PostView>, RepositoryError> {
    if rows.is_empty() {
        return Ok(vec![]);
    }
    let ids: Vec<PostId> = rows.iter().map(|(row, _)| row.id).collect();

    let comment_counts: HashMap<PostId, i64> = comments::table
        .filter(comments::post_id.eq_any(&ids))
        .group_by(comments::post_id)
        .select((comments::post_id, count_star()))
        .load::<(PostId, i64)>(conn)
        .map_err(map_diesel_error)?
        .into_iter()
        .collect();

    let like_counts: HashMap<PostId, i64> = likes::table
        .filter(likes::post_id.eq_any(&ids))
        .group_by(likes::post_id)
        .select((likes::post_id, count_star()))
        .load::<(PostId, i64)>(conn)
        .map_err(map_diesel_error)?
        .into_iter()
        .collect();

    let liked_by_viewer: HashSet<PostId> = match viewer {
        Some(viewer_id) => likes::table
            .filter(likes::user_id.eq(viewer_id).and(likes::post_id.eq_any(&ids)))
            .select(likes::post_id)
            .load::<PostId>(conn)
            .map_err(map_diesel_error)?
            .into_iter()
            .collect(),
        None => HashSet::new(),
    };

    Ok(rows
        .into_iter()
        .map(|(row, username)| PostView {
            id: row.id,
            body: row.body,
            timestamp: as_utc(row.created_at),
            user_id: row.author_id,
            username,
            comments_count: comment_counts.get(&row.id).copied().unwrap_or(0),
            likes_count: like_counts.get(&row.id).copied().unwrap_or(0),
            is_liked: liked_by_viewer.contains(&row.id),
        })
        .collect())
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, author_id: UserId, body: PostBody) -> Result<PostView, RepositoryError> {
        self.pool
            .run(move |conn| {
                conn.transaction(|conn| {
                    let row: PostRow = diesel::insert_into(posts::table)
                        .values(&NewPostRow {
                            body: body.as_ref(),
                            created_at: Utc::now().naive_utc(),
                            author_id,
                        })
                        .returning(PostRow::as_returning())
                        .get_result(conn)?;

                    let username: String = users::table
                        .find(author_id)
                        .select(users::username)
                        .first(conn)?;

                    Ok(PostView {
                        id: row.id,
                        body: row.body,
                        timestamp: as_utc(row.created_at),
                        user_id: row.author_id,
                        username,
                        comments_count: 0,
                        likes_count: 0,
                        is_liked: false,
                    })
                })
                .map_err(map_diesel_error)
            })
            .await
    }

    async fn list(&self, viewer: Option<UserId>) -> Result<Vec<PostView>, RepositoryError> {
        self.pool
            .run(move |conn| load_post_views(conn, PostScope::All, viewer))
            .await
    }

    async fn find(
        &self,
        id: PostId,
        viewer: Option<UserId>,
    ) -> Result<Option<PostView>, RepositoryError> {
        self.pool
            .run(move |conn| {
                let mut views = load_post_views(conn, PostScope::One(id), viewer)?;
                Ok(views.pop())
            })
            .await
    }

    async fn author_of(&self, id: PostId) -> Result<Option<UserId>, RepositoryError> {
        self.pool
            .run(move |conn| {
                posts::table
                    .find(id)
                    .select(posts::author_id)
                    .first(conn)
                    .optional()
                    .map_err(map_diesel_error)
            })
            .await
    }

    async fn delete(&self, id: PostId) -> Result<(), RepositoryError> {
        self.pool
            .run(move |conn| {
                // Comments and likes go with the post via ON DELETE CASCADE.
                let deleted = diesel::delete(posts::table.find(id))
                    .execute(conn)
                    .map_err(map_diesel_error)?;
                if deleted == 0 {
                    return Err(RepositoryError::NotFound);
                }
                Ok(())
            })
            .await
    }

    async fn by_author(
        &self,
        author_id: UserId,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, RepositoryError> {
        self.pool
            .run(move |conn| load_post_views(conn, PostScope::Author(author_id), viewer))
            .await
    }

    async fn followed_feed(
        &self,
        user_id: UserId,
        viewer: Option<UserId>,
    ) -> Result<Vec<PostView>, RepositoryError> {
        self.pool
            .run(move |conn| load_post_views(conn, PostScope::Feed(user_id), viewer))
            .await
    }
}
