//! Command line and environment configuration.

use clap::Parser;
use std::net::SocketAddr;

use crate::outbound::persistence::PoolConfig;

/// Runtime settings, read from flags or `MICROBLOG_*` environment
/// variables.
#[derive(Debug, Clone, Parser)]
#[command(name = "microblog", about = "Microblogging REST backend")]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    #[arg(long, env = "MICROBLOG_BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// Path of the SQLite database file. Created on first start.
    #[arg(long, env = "MICROBLOG_DATABASE_URL", default_value = "microblog.db")]
    pub database_url: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "MICROBLOG_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,
}

impl ServerConfig {
    /// Derive the pool settings for [`crate::outbound::persistence::DbPool`].
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.database_url.clone()).with_max_size(self.pool_size)
    }
}
