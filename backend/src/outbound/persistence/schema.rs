//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the embedded migrations exactly. SQLite
//! integer primary keys are 64-bit rowids, hence `BigInt` throughout.

diesel::table! {
    /// Registered accounts. Username and email carry unique indexes.
    users (id) {
        id -> BigInt,
        username -> Text,
        email -> Text,
        password_hash -> Text,
    }
}

diesel::table! {
    /// Short posts, at most 280 characters, owned by one user.
    posts (id) {
        id -> BigInt,
        body -> Text,
        created_at -> Timestamp,
        author_id -> BigInt,
    }
}

diesel::table! {
    /// Comments on posts; deleted by cascade with their post.
    comments (id) {
        id -> BigInt,
        body -> Text,
        created_at -> Timestamp,
        author_id -> BigInt,
        post_id -> BigInt,
    }
}

diesel::table! {
    /// Like edges; the composite primary key is the uniqueness guard.
    likes (user_id, post_id) {
        user_id -> BigInt,
        post_id -> BigInt,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// Directed follow edges, one row per ordered (follower, followed)
    /// pair; queried from both sides for follower/followed views.
    follows (follower_id, followed_id) {
        follower_id -> BigInt,
        followed_id -> BigInt,
        created_at -> Timestamp,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::joinable!(comments -> users (author_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(likes -> posts (post_id));

diesel::allow_tables_to_appear_in_same_query!(users, posts, comments, likes, follows);
