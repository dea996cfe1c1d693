use super::{check_deleted, parse_updated_at, StatementSql, Statements};
use crate::error::StoreError;
use crate::model::{Entity, User};
use crate::store::{Store, LIST_LIMIT};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row, Statement};

// Columns and parameters are cast so the statements work against any integer id
// width and either timestamp flavor.
const SQL: StatementSql = StatementSql {
    list: "SELECT id::int8 AS id, first_name::text AS first_name, last_name::text AS last_name, \
           email::text AS email, created_at::timestamptz AS created_at, updated_at::timestamptz::text AS updated_at \
           FROM users ORDER BY id LIMIT $1::int8",
    create: "INSERT INTO users (first_name, last_name, email, created_at) \
             VALUES ($1::text, $2::text, $3::text, $4::timestamptz) RETURNING id::int8 AS id",
    get: "SELECT id::int8 AS id, first_name::text AS first_name, last_name::text AS last_name, \
          email::text AS email, created_at::timestamptz AS created_at, updated_at::timestamptz::text AS updated_at \
          FROM users WHERE id = $1::int8",
    update: "UPDATE users SET first_name = $2::text, last_name = $3::text, email = $4::text, \
             updated_at = $5::timestamptz \
             WHERE id = $1::int8 \
             RETURNING id::int8 AS id, first_name::text AS first_name, last_name::text AS last_name, \
             email::text AS email, created_at::timestamptz AS created_at, updated_at::timestamptz::text AS updated_at",
    delete: "DELETE FROM users WHERE id = $1::int8",
};

pub struct PgUserClient {
    pool: PgPool,
    statements: Statements,
}

impl PgUserClient {
    pub async fn new(pool: PgPool) -> Result<Self, StoreError> {
        let statements = Statements::prepare(&pool, User::NAME, SQL).await?;
        Ok(PgUserClient { pool, statements })
    }
}

fn decode_user(row: &PgRow) -> Result<User, sqlx::Error> {
    let id: i64 = row.try_get("id")?;
    let updated_at: Option<String> = row.try_get("updated_at")?;
    Ok(User {
        id,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        created_at: Some(row.try_get("created_at")?),
        updated_at: parse_updated_at(User::NAME, id, updated_at.as_deref()),
    })
}

#[async_trait]
impl Store<User> for PgUserClient {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let rows = self
            .statements
            .list
            .query()
            .bind(LIST_LIMIT)
            .fetch_all(&self.pool)
            .await?;
        let mut users = Vec::with_capacity(rows.len());
        for row in &rows {
            match decode_user(row) {
                Ok(user) => users.push(user),
                Err(e) => tracing::warn!(error = %e, "unable to decode user row, skipping"),
            }
        }
        Ok(users)
    }

    async fn create(&self, user: &User) -> Result<User, StoreError> {
        let row = self
            .statements
            .create
            .query()
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        let id: i64 = row.try_get("id")?;
        tracing::debug!(user_id = id, "user inserted");
        self.get(id).await
    }

    async fn get(&self, id: i64) -> Result<User, StoreError> {
        let row = self
            .statements
            .get
            .query()
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { entity: User::NAME, id })?;
        Ok(decode_user(&row)?)
    }

    async fn update(&self, user: &User) -> Result<User, StoreError> {
        let id = user.id();
        let row = self
            .statements
            .update
            .query()
            .bind(id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { entity: User::NAME, id })?;
        Ok(decode_user(&row)?)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = self.statements.delete.query().bind(id).execute(&self.pool).await?;
        check_deleted(User::NAME, id, result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database_url() -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/postgres".into())
    }

    async fn client() -> PgUserClient {
        let pool = PgPool::connect(&database_url()).await.unwrap();
        crate::store::postgres::ensure_schema(&pool).await.unwrap();
        PgUserClient::new(pool).await.unwrap()
    }

    #[tokio::test]
    #[ignore = "needs a PostgreSQL instance at DATABASE_URL"]
    async fn create_get_update_delete() {
        let client = client().await;
        let input = User {
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.com".into(),
            ..Default::default()
        };
        let created = client.create(&input).await.unwrap();
        assert!(created.id > 0);
        assert!(created.created_at.is_some());
        assert!(created.updated_at.is_none());
        assert_eq!(client.get(created.id).await.unwrap(), created);

        let mut changed = created.clone();
        changed.first_name = "A2".into();
        let updated = client.update(&changed).await.unwrap();
        assert_eq!(updated.first_name, "A2");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.is_some());

        client.delete(created.id).await.unwrap();
        assert!(matches!(client.delete(created.id).await, Err(StoreError::NotFound { .. })));
        assert!(matches!(client.get(created.id).await, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore = "needs a PostgreSQL instance at DATABASE_URL"]
    async fn update_of_missing_row_is_not_found() {
        let client = client().await;
        let ghost = User { id: i64::MAX, ..Default::default() };
        assert!(matches!(client.update(&ghost).await, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    #[ignore = "needs a PostgreSQL instance at DATABASE_URL"]
    async fn list_is_capped() {
        let client = client().await;
        let mut ids = Vec::new();
        for n in 0..=LIST_LIMIT {
            let user = User {
                first_name: format!("cap{n}"),
                last_name: "L".into(),
                email: format!("cap{n}@example.com"),
                ..Default::default()
            };
            ids.push(client.create(&user).await.unwrap().id);
        }

        let listed = client.list().await.unwrap();
        assert_eq!(listed.len() as i64, LIST_LIMIT);
        assert!(listed.windows(2).all(|w| w[0].id < w[1].id));

        for id in ids {
            client.delete(id).await.unwrap();
        }
    }
}
