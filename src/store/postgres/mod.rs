//! PostgreSQL store: one client per entity, each owning its prepared statements.
//! Both clients share a single pool handle.

mod post_client;
mod schema;
mod timestamp;
mod user_client;

pub use post_client::PgPostClient;
pub use schema::ensure_schema;
pub use timestamp::{parse_updated_at, UPDATED_AT_FORMAT};
pub use user_client::PgUserClient;

use crate::config::PostgresConfig;
use crate::error::{AppError, StoreError};
use sqlx::postgres::{PgPoolOptions, PgStatement};
use sqlx::{Executor, PgPool};

/// Open the shared pool described by `config`.
pub async fn connect(config: &PostgresConfig) -> Result<PgPool, AppError> {
    let options = config.connect_options()?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(StoreError::from)?;
    Ok(pool)
}

/// The five statements every entity client keeps.
pub(crate) struct Statements {
    pub list: PgStatement<'static>,
    pub create: PgStatement<'static>,
    pub get: PgStatement<'static>,
    pub update: PgStatement<'static>,
    pub delete: PgStatement<'static>,
}

pub(crate) struct StatementSql {
    pub list: &'static str,
    pub create: &'static str,
    pub get: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

impl Statements {
    /// Prepare all five up front; any failure aborts client construction.
    pub async fn prepare(pool: &PgPool, entity: &'static str, sql: StatementSql) -> Result<Self, StoreError> {
        let prepare = move |name: &'static str, sql: &'static str| async move {
            pool.prepare(sql).await.map_err(|e| {
                tracing::error!(entity, statement = name, error = %e, "unable to prepare statement");
                StoreError::from(e)
            })
        };
        Ok(Statements {
            list: prepare("list", sql.list).await?,
            create: prepare("create", sql.create).await?,
            get: prepare("get", sql.get).await?,
            update: prepare("update", sql.update).await?,
            delete: prepare("delete", sql.delete).await?,
        })
    }
}

/// Exactly one deleted row is success; none is a missing row; more is corruption.
pub(crate) fn check_deleted(entity: &'static str, id: i64, affected: u64) -> Result<(), StoreError> {
    match affected {
        1 => Ok(()),
        0 => Err(StoreError::NotFound { entity, id }),
        affected => Err(StoreError::Integrity { entity, id, affected }),
    }
}
