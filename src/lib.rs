//! Users and posts REST API: axum routes over a PostgreSQL-backed store.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{init_tracing, Cli, Command, LoggingConfig, PostgresConfig, ServerConfig};
pub use error::{AppError, ConfigError, StoreError};
pub use model::{Entity, Post, User};
pub use routes::{api_routes, common_routes, common_routes_with_ready, entity_routes, REQUEST_TIMEOUT};
pub use state::AppState;
pub use store::postgres::{connect, ensure_schema, PgPostClient, PgUserClient};
pub use store::{PostStore, SharedStore, Store, UserStore, LIST_LIMIT};
