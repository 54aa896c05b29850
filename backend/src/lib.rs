//! Microblogging backend.
//!
//! A REST service for short posts, comments, likes, and a follow
//! graph, layered hexagonally: `domain` holds the services and
//! repository ports, `outbound::persistence` the Diesel/SQLite
//! adapters, and `api` the Actix handlers. `server` wires them
//! together for the binary and the integration tests.

pub mod api;
pub mod doc;
pub mod domain;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::RequestTrace;
