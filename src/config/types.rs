//! Command line and environment configuration, read once at startup.

use crate::error::ConfigError;
use clap::{Args, Parser, Subcommand};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Parser)]
#[command(name = "users-posts-api", version, about = "User and Posts REST API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Starts the users and posts REST API.
    Start(ServerConfig),
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Address the server listens on.
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    /// Create the users and posts tables when missing.
    #[arg(long, env = "APPLY_SCHEMA")]
    pub apply_schema: bool,

    #[command(flatten)]
    pub postgres: PostgresConfig,

    #[command(flatten)]
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Args)]
pub struct PostgresConfig {
    /// Full connection URL. Overrides the individual connection flags.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long = "postgres-conn-host", env = "POSTGRES_CONN_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long = "postgres-conn-port", env = "POSTGRES_CONN_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "postgres-username", env = "POSTGRES_CONN_USERNAME", default_value = "postgres")]
    pub username: String,

    #[arg(long = "postgres-password", env = "POSTGRES_CONN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long = "postgres-database", env = "POSTGRES_CONN_DATABASE", default_value = "postgres")]
    pub database: String,

    /// One of disable, allow, prefer, require, verify-ca, verify-full.
    #[arg(long = "postgres-conn-ssl-mode", env = "POSTGRES_CONN_SSL_MODE", default_value = "disable")]
    pub ssl_mode: String,

    #[arg(long = "postgres-max-connections", env = "POSTGRES_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

impl PostgresConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.database_url {
            return PgConnectOptions::from_str(url).map_err(|e| ConfigError::DatabaseUrl(e.to_string()));
        }
        let ssl_mode = PgSslMode::from_str(&self.ssl_mode).map_err(|_| ConfigError::SslMode(self.ssl_mode.clone()))?;
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .database(&self.database)
            .ssl_mode(ssl_mode);
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        Ok(options)
    }
}

#[derive(Clone, Debug, Args)]
pub struct LoggingConfig {
    /// JSON log lines for production collectors.
    #[arg(long = "logging-production", env = "LOGGING_PRODUCTION")]
    pub production: bool,

    /// Default filter directive when RUST_LOG is unset (e.g. info, debug).
    #[arg(long = "logging-level", env = "LOGGING_LEVEL", default_value = "info")]
    pub level: String,
}
