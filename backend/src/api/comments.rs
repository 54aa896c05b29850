//! Comment handlers.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{EngagementService, PostId, UserId};

use super::error::ApiResult;

/// Payload for commenting on a post.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentRequest {
    /// Identifier of the commenting user.
    pub user_id: UserId,
    /// Body text, at most 500 characters.
    pub body: String,
}

/// Add a comment to a post.
#[utoipa::path(
    post,
    path = "/posts/{id}/comments",
    params(("id" = i64, Path, description = "Post identifier")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment created", body = crate::domain::CommentView),
        (status = 400, description = "Body empty or over 500 characters"),
        (status = 404, description = "User or post does not exist"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["comments"]
)]
#[post("/posts/{id}/comments")]
pub async fn add_comment(
    service: web::Data<EngagementService>,
    path: web::Path<PostId>,
    body: web::Json<CommentRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let view = service
        .add_comment(path.into_inner(), request.user_id, &request.body)
        .await?;
    Ok(HttpResponse::Created().json(view))
}

/// Comments on a post, oldest first.
#[utoipa::path(
    get,
    path = "/posts/{id}/comments",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Comments", body = [crate::domain::CommentView]),
        (status = 404, description = "Post does not exist")
    ),
    tags = ["comments"]
)]
#[get("/posts/{id}/comments")]
pub async fn list_comments(
    service: web::Data<EngagementService>,
    path: web::Path<PostId>,
) -> ApiResult<HttpResponse> {
    let views = service.list_comments(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(views))
}
