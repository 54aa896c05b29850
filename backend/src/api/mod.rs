//! REST API handlers.
//!
//! # Trust model
//!
//! Mutating routes identify the acting user through a caller-supplied
//! `user_id` (or `follower_id`) field rather than a session or token,
//! and read routes accept an optional `logged_in_user_id` query
//! parameter. The server verifies that the named user exists but not
//! that the caller is that user, so the API trusts its clients and is
//! only suitable behind an authenticating front end or in development.

pub mod auth;
pub mod comments;
pub mod error;
pub mod follows;
pub mod health;
pub mod likes;
pub mod posts;
pub mod profiles;

pub use error::{ApiError, ApiResult};
