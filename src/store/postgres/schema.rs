//! Table DDL for users and posts. Only applied when schema bootstrap is requested;
//! otherwise the tables are expected to exist already.

use crate::error::StoreError;
use sqlx::PgPool;

const USERS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ
    )
"#;

// user_id carries no foreign key: posts may reference users that do not exist.
const POSTS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS posts (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ
    )
"#;

/// Create `users` and `posts` if they do not exist. Idempotent.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    for ddl in [USERS_DDL, POSTS_DDL] {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!("schema ensured");
    Ok(())
}
