//! Like and unlike handlers.

use actix_web::{post, web, HttpResponse};

use crate::domain::{EngagementService, PostId};

use super::error::ApiResult;
use super::posts::ActorRequest;

/// Like a post.
#[utoipa::path(
    post,
    path = "/posts/{id}/like",
    params(("id" = i64, Path, description = "Post identifier")),
    request_body = ActorRequest,
    responses(
        (status = 200, description = "Like recorded"),
        (status = 404, description = "User or post does not exist"),
        (status = 409, description = "Post already liked by this user"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["likes"]
)]
#[post("/posts/{id}/like")]
pub async fn like_post(
    service: web::Data<EngagementService>,
    path: web::Path<PostId>,
    body: web::Json<ActorRequest>,
) -> ApiResult<HttpResponse> {
    service.like(path.into_inner(), body.user_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Remove a like from a post.
#[utoipa::path(
    post,
    path = "/posts/{id}/unlike",
    params(("id" = i64, Path, description = "Post identifier")),
    request_body = ActorRequest,
    responses(
        (status = 200, description = "Like removed"),
        (status = 404, description = "User or post does not exist"),
        (status = 409, description = "Post was not liked by this user"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["likes"]
)]
#[post("/posts/{id}/unlike")]
pub async fn unlike_post(
    service: web::Data<EngagementService>,
    path: web::Path<PostId>,
    body: web::Json<ActorRequest>,
) -> ApiResult<HttpResponse> {
    service.unlike(path.into_inner(), body.user_id).await?;
    Ok(HttpResponse::Ok().finish())
}
