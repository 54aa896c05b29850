//! Shared fixtures for integration tests.

use actix_web::web;
use backend::api::health::HealthState;
use backend::outbound::persistence::{run_migrations, DbPool, PoolConfig};
use backend::server::AppState;
use tempfile::TempDir;

/// Pool over a fresh on-disk SQLite database with the schema migrated.
///
/// The returned directory owns the database file and must outlive the
/// pool.
pub fn test_pool() -> (TempDir, DbPool) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let database_path = dir.path().join("test.db");
    let config = PoolConfig::new(database_path.to_string_lossy().into_owned()).with_max_size(2);
    let pool = DbPool::new(config).expect("build pool");
    run_migrations(&pool).expect("run migrations");
    (dir, pool)
}

/// Application state wired over a fresh database, ready to serve.
#[allow(dead_code)]
pub fn test_state() -> (TempDir, AppState, web::Data<HealthState>) {
    let (dir, pool) = test_pool();
    let state = AppState::from_pool(pool);
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    (dir, state, health)
}
