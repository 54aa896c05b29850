//! Application state and route wiring shared by the binary and tests.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::web;

use crate::api::{auth, comments, follows, health::HealthState, likes, posts, profiles};
use crate::domain::{AuthService, EngagementService, PostService, SocialGraphService};
use crate::outbound::persistence::{
    DbPool, DieselEngagementRepository, DieselPostRepository, DieselSocialGraphRepository,
    DieselUserRepository,
};

/// Shared handler state: one instance of each domain service.
#[derive(Clone)]
pub struct AppState {
    auth: web::Data<AuthService>,
    posts: web::Data<PostService>,
    engagement: web::Data<EngagementService>,
    social: web::Data<SocialGraphService>,
}

impl AppState {
    /// Wire the Diesel adapters behind the domain services.
    pub fn from_pool(pool: DbPool) -> Self {
        let users = Arc::new(DieselUserRepository::new(pool.clone()));
        let post_repo = Arc::new(DieselPostRepository::new(pool.clone()));
        let engagement_repo = Arc::new(DieselEngagementRepository::new(pool.clone()));
        let graph = Arc::new(DieselSocialGraphRepository::new(pool));

        Self {
            auth: web::Data::new(AuthService::new(users.clone())),
            posts: web::Data::new(PostService::new(users.clone(), post_repo.clone())),
            engagement: web::Data::new(EngagementService::new(
                users.clone(),
                post_repo.clone(),
                engagement_repo,
            )),
            social: web::Data::new(SocialGraphService::new(users, post_repo, graph)),
        }
    }
}

/// Register every route and its state on an Actix app.
///
/// `/posts/followed/{user_id}` is registered before `/posts/{id}` so the
/// literal segment wins over the parameter.
pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState, health: &web::Data<HealthState>) {
    cfg.app_data(state.auth.clone())
        .app_data(state.posts.clone())
        .app_data(state.engagement.clone())
        .app_data(state.social.clone())
        .app_data(health.clone())
        .service(auth::register)
        .service(auth::login)
        .service(posts::create_post)
        .service(posts::list_posts)
        .service(posts::followed_feed)
        .service(posts::get_post)
        .service(posts::delete_post)
        .service(comments::add_comment)
        .service(comments::list_comments)
        .service(likes::like_post)
        .service(likes::unlike_post)
        .service(follows::follow_user)
        .service(follows::unfollow_user)
        .service(follows::is_following)
        .service(profiles::get_profile)
        .service(crate::api::health::ready)
        .service(crate::api::health::live);
}
