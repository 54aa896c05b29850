//! Post handlers: publish, timelines, and deletion.

use actix_web::{delete, get, post, web, HttpResponse};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{PostId, PostService, UserId};

use super::error::ApiResult;

/// Payload for publishing a post.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    /// Identifier of the authoring user.
    pub user_id: UserId,
    /// Body text, at most 280 characters.
    pub body: String,
}

/// Payload naming the acting user for mutations without other fields.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ActorRequest {
    /// Identifier of the acting user.
    pub user_id: UserId,
}

/// Optional viewer identity carried as a query parameter.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ViewerQuery {
    /// Identifier the caller claims; drives the `is_liked` annotation.
    pub logged_in_user_id: Option<UserId>,
}

/// Publish a post.
#[utoipa::path(
    post,
    path = "/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = crate::domain::PostView),
        (status = 400, description = "Body empty or over 280 characters"),
        (status = 404, description = "Author does not exist"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["posts"]
)]
#[post("/posts")]
pub async fn create_post(
    service: web::Data<PostService>,
    body: web::Json<CreatePostRequest>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let view = service.create_post(request.user_id, &request.body).await?;
    Ok(HttpResponse::Created().json(view))
}

/// All posts, newest first.
#[utoipa::path(
    get,
    path = "/posts",
    params(ViewerQuery),
    responses(
        (status = 200, description = "Posts", body = [crate::domain::PostView])
    ),
    tags = ["posts"]
)]
#[get("/posts")]
pub async fn list_posts(
    service: web::Data<PostService>,
    viewer: web::Query<ViewerQuery>,
) -> ApiResult<HttpResponse> {
    let views = service.list_posts(viewer.logged_in_user_id).await?;
    Ok(HttpResponse::Ok().json(views))
}

/// One post by identifier.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier"), ViewerQuery),
    responses(
        (status = 200, description = "Post", body = crate::domain::PostView),
        (status = 404, description = "Post does not exist")
    ),
    tags = ["posts"]
)]
#[get("/posts/{id}")]
pub async fn get_post(
    service: web::Data<PostService>,
    path: web::Path<PostId>,
    viewer: web::Query<ViewerQuery>,
) -> ApiResult<HttpResponse> {
    let view = service
        .get_post(path.into_inner(), viewer.logged_in_user_id)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Delete a post; only its author may do so.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    request_body = ActorRequest,
    responses(
        (status = 200, description = "Post and its comments/likes deleted"),
        (status = 403, description = "Requester is not the author"),
        (status = 404, description = "Post does not exist"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["posts"]
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    service: web::Data<PostService>,
    path: web::Path<PostId>,
    body: web::Json<ActorRequest>,
) -> ApiResult<HttpResponse> {
    service.delete_post(path.into_inner(), body.user_id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Posts by a user and everyone they follow, newest first.
#[utoipa::path(
    get,
    path = "/posts/followed/{user_id}",
    params(("user_id" = i64, Path, description = "User whose feed to build"), ViewerQuery),
    responses(
        (status = 200, description = "Feed, possibly empty", body = [crate::domain::PostView]),
        (status = 404, description = "User does not exist")
    ),
    tags = ["posts"]
)]
#[get("/posts/followed/{user_id}")]
pub async fn followed_feed(
    service: web::Data<PostService>,
    path: web::Path<UserId>,
    viewer: web::Query<ViewerQuery>,
) -> ApiResult<HttpResponse> {
    let views = service
        .followed_feed(path.into_inner(), viewer.logged_in_user_id)
        .await?;
    Ok(HttpResponse::Ok().json(views))
}
