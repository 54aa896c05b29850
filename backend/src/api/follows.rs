//! Follow graph handlers.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{SocialGraphService, UserId};

use super::error::ApiResult;

/// Payload naming the follower for follow and unfollow mutations.
#[derive(Debug, Deserialize, ToSchema)]
pub struct FollowRequest {
    /// Identifier of the user initiating the follow or unfollow.
    pub follower_id: UserId,
}

/// Answer to a follow relationship query.
#[derive(Debug, Serialize, ToSchema)]
pub struct IsFollowingResponse {
    /// True when the first user follows the second.
    pub is_following: bool,
}

/// Follow another user.
#[utoipa::path(
    post,
    path = "/follow/{id}",
    params(("id" = i64, Path, description = "User to follow")),
    request_body = FollowRequest,
    responses(
        (status = 200, description = "Follow edge recorded"),
        (status = 400, description = "Attempted self-follow"),
        (status = 404, description = "Either user does not exist"),
        (status = 409, description = "Already following"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["follows"]
)]
#[post("/follow/{id}")]
pub async fn follow_user(
    service: web::Data<SocialGraphService>,
    path: web::Path<UserId>,
    body: web::Json<FollowRequest>,
) -> ApiResult<HttpResponse> {
    service.follow(body.follower_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Stop following another user.
#[utoipa::path(
    post,
    path = "/unfollow/{id}",
    params(("id" = i64, Path, description = "User to unfollow")),
    request_body = FollowRequest,
    responses(
        (status = 200, description = "Follow edge removed"),
        (status = 400, description = "Attempted self-unfollow"),
        (status = 404, description = "Either user does not exist"),
        (status = 409, description = "Was not following"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["follows"]
)]
#[post("/unfollow/{id}")]
pub async fn unfollow_user(
    service: web::Data<SocialGraphService>,
    path: web::Path<UserId>,
    body: web::Json<FollowRequest>,
) -> ApiResult<HttpResponse> {
    service
        .unfollow(body.follower_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Whether one user follows another. Unknown identifiers simply
/// answer `false`; the edge cannot exist for them.
#[utoipa::path(
    get,
    path = "/is_following/{follower_id}/{followed_id}",
    params(
        ("follower_id" = i64, Path, description = "Candidate follower"),
        ("followed_id" = i64, Path, description = "Candidate followed user")
    ),
    responses(
        (status = 200, description = "Relationship state", body = IsFollowingResponse)
    ),
    tags = ["follows"]
)]
#[get("/is_following/{follower_id}/{followed_id}")]
pub async fn is_following(
    service: web::Data<SocialGraphService>,
    path: web::Path<(UserId, UserId)>,
) -> ApiResult<HttpResponse> {
    let (follower_id, followed_id) = path.into_inner();
    let is_following = service.is_following(follower_id, followed_id).await?;
    Ok(HttpResponse::Ok().json(IsFollowingResponse { is_following }))
}
