//! Public profile handler.

use actix_web::{get, web, HttpResponse};

use crate::domain::SocialGraphService;

use super::error::ApiResult;
use super::posts::ViewerQuery;

/// Profile of a user by username: identity, follow counts, and their
/// posts newest first.
#[utoipa::path(
    get,
    path = "/users/{username}",
    params(
        ("username" = String, Path, description = "Handle to look up"),
        ViewerQuery
    ),
    responses(
        (status = 200, description = "Profile", body = crate::domain::Profile),
        (status = 404, description = "No such user")
    ),
    tags = ["profiles"]
)]
#[get("/users/{username}")]
pub async fn get_profile(
    service: web::Data<SocialGraphService>,
    path: web::Path<String>,
    viewer: web::Query<ViewerQuery>,
) -> ApiResult<HttpResponse> {
    let profile = service
        .get_profile(&path.into_inner(), viewer.logged_in_user_id)
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}
