//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and
//! never reach the domain; repositories convert them to domain records and
//! projections.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{comments, follows, likes, posts, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Insertable struct for creating new user rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct PostRow {
    pub id: i64,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub author_id: i64,
}

/// Insertable struct for creating new post rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub body: &'a str,
    pub created_at: NaiveDateTime,
    pub author_id: i64,
}

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub body: String,
    pub created_at: NaiveDateTime,
    pub author_id: i64,
    pub post_id: i64,
}

/// Insertable struct for creating new comment rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub(crate) struct NewCommentRow<'a> {
    pub body: &'a str,
    pub created_at: NaiveDateTime,
    pub author_id: i64,
    pub post_id: i64,
}

/// Insertable struct for creating like edges.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = likes)]
pub(crate) struct NewLikeRow {
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: NaiveDateTime,
}

/// Insertable struct for creating follow edges.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = follows)]
pub(crate) struct NewFollowRow {
    pub follower_id: i64,
    pub followed_id: i64,
    pub created_at: NaiveDateTime,
}
