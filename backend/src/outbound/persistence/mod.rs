//! Diesel/SQLite adapters for the domain's repository ports.

use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

mod diesel_engagement_repository;
mod diesel_post_repository;
mod diesel_social_graph_repository;
mod diesel_user_repository;
mod error_mapping;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_engagement_repository::DieselEngagementRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_social_graph_repository::DieselSocialGraphRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

/// Migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Bring the schema up to date, creating tables on first start.
///
/// # Errors
///
/// Returns [`PoolError::Build`] when a connection cannot be checked out or
/// a migration fails; the server must not come up on a partial schema.
pub fn run_migrations(pool: &DbPool) -> Result<(), PoolError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| PoolError::build(format!("migration failed: {err}")))?;
    for version in &applied {
        info!(migration = %version, "applied migration");
    }
    Ok(())
}
