//! Domain layer: validated entities, repository ports, and the services
//! implementing each use case.
//!
//! Everything here is transport agnostic. The HTTP adapter in `api` maps
//! requests onto these services and [`DomainError`] onto status codes; the
//! Diesel adapters in `outbound::persistence` implement the ports.

pub mod auth;
pub mod auth_service;
pub mod comment;
pub mod engagement_service;
pub mod error;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod social_graph_service;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use self::auth_service::{AuthService, AuthenticatedUser};
pub use self::comment::{CommentBody, CommentId, CommentView, COMMENT_BODY_MAX};
pub use self::engagement_service::EngagementService;
pub use self::error::{DomainError, ErrorCode};
pub use self::ports::{
    EngagementRepository, PostRepository, RepositoryError, SocialGraphRepository, UserRepository,
};
pub use self::post::{PostBody, PostId, PostView, POST_BODY_MAX};
pub use self::post_service::PostService;
pub use self::social_graph_service::SocialGraphService;
pub use self::user::{
    Email, FollowCounts, NewUser, Profile, UserId, UserRecord, Username, EMAIL_MAX, USERNAME_MAX,
};
