//! Backend entry point: pool, migrations, and the HTTP server.

use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::api::health::HealthState;
use backend::outbound::persistence::{run_migrations, DbPool};
use backend::server::{configure, AppState, ServerConfig};
use backend::RequestTrace;

#[cfg(debug_assertions)]
use actix_web::HttpResponse;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::parse();

    let pool = DbPool::new(config.pool_config()).map_err(std::io::Error::other)?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    let state = AppState::from_pool(pool);
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    info!(bind_addr = %config.bind_addr, database = %config.database_url, "starting server");

    let server = HttpServer::new(move || {
        let app = App::new()
            .wrap(RequestTrace)
            .configure(|cfg| configure(cfg, &state, &server_health_state));

        #[cfg(debug_assertions)]
        let app = app.route(
            "/api-docs/openapi.json",
            web::get().to(|| async { HttpResponse::Ok().json(ApiDoc::openapi()) }),
        );

        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
