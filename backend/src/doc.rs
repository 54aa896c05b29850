//! OpenAPI documentation.
//!
//! [`ApiDoc`] aggregates every REST path and the schemas referenced by
//! their request and response bodies. Debug builds serve the generated
//! document at `/api-docs/openapi.json` for external tooling.

use utoipa::OpenApi;

use crate::api;
use crate::domain;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Microblog backend API",
        description = "HTTP interface for posts, comments, likes, follows, and profiles."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        api::auth::register,
        api::auth::login,
        api::posts::create_post,
        api::posts::list_posts,
        api::posts::get_post,
        api::posts::delete_post,
        api::posts::followed_feed,
        api::comments::add_comment,
        api::comments::list_comments,
        api::likes::like_post,
        api::likes::unlike_post,
        api::follows::follow_user,
        api::follows::unfollow_user,
        api::follows::is_following,
        api::profiles::get_profile,
        api::health::ready,
        api::health::live,
    ),
    components(schemas(
        api::auth::RegisterRequest,
        api::auth::RegisterResponse,
        api::auth::LoginRequest,
        api::auth::LoginResponse,
        api::posts::CreatePostRequest,
        api::posts::ActorRequest,
        api::comments::CommentRequest,
        api::follows::FollowRequest,
        api::follows::IsFollowingResponse,
        api::error::ApiError,
        domain::ErrorCode,
        domain::PostView,
        domain::CommentView,
        domain::Profile,
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "posts", description = "Publishing and timelines"),
        (name = "comments", description = "Comments on posts"),
        (name = "likes", description = "Likes on posts"),
        (name = "follows", description = "Follow graph"),
        (name = "profiles", description = "Public profiles"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for expected in [
            "/register",
            "/login",
            "/posts",
            "/posts/{id}",
            "/posts/followed/{user_id}",
            "/posts/{id}/comments",
            "/posts/{id}/like",
            "/posts/{id}/unlike",
            "/follow/{id}",
            "/unfollow/{id}",
            "/is_following/{follower_id}/{followed_id}",
            "/users/{username}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(expected), "missing path {expected}");
        }
    }

    #[test]
    fn error_schema_exposes_code_and_message() {
        use utoipa::openapi::schema::Schema;
        use utoipa::openapi::RefOr;

        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("ApiError").expect("ApiError schema");

        match error_schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(obj.properties.contains_key("code"));
                assert!(obj.properties.contains_key("message"));
            }
            _ => panic!("expected object schema"),
        }
    }
}
