use super::{check_deleted, parse_updated_at, StatementSql, Statements};
use crate::error::StoreError;
use crate::model::{Entity, Post};
use crate::store::{Store, LIST_LIMIT};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row, Statement};

const SQL: StatementSql = StatementSql {
    list: "SELECT id::int8 AS id, user_id::int8 AS user_id, title::text AS title, content::text AS content, \
           created_at::timestamptz AS created_at, updated_at::timestamptz::text AS updated_at \
           FROM posts ORDER BY id LIMIT $1::int8",
    create: "INSERT INTO posts (user_id, title, content, created_at) \
             VALUES ($1::int8, $2::text, $3::text, $4::timestamptz) RETURNING id::int8 AS id",
    get: "SELECT id::int8 AS id, user_id::int8 AS user_id, title::text AS title, content::text AS content, \
          created_at::timestamptz AS created_at, updated_at::timestamptz::text AS updated_at \
          FROM posts WHERE id = $1::int8",
    update: "UPDATE posts SET title = $2::text, content = $3::text, updated_at = $4::timestamptz \
             WHERE id = $1::int8 \
             RETURNING id::int8 AS id, user_id::int8 AS user_id, title::text AS title, \
             content::text AS content, created_at::timestamptz AS created_at, updated_at::timestamptz::text AS updated_at",
    delete: "DELETE FROM posts WHERE id = $1::int8",
};

/// Posts keep their author: updates change title and content only.
pub struct PgPostClient {
    pool: PgPool,
    statements: Statements,
}

impl PgPostClient {
    pub async fn new(pool: PgPool) -> Result<Self, StoreError> {
        let statements = Statements::prepare(&pool, Post::NAME, SQL).await?;
        Ok(PgPostClient { pool, statements })
    }
}

fn decode_post(row: &PgRow) -> Result<Post, sqlx::Error> {
    let id: i64 = row.try_get("id")?;
    let updated_at: Option<String> = row.try_get("updated_at")?;
    Ok(Post {
        id,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        user_id: row.try_get("user_id")?,
        created_at: Some(row.try_get("created_at")?),
        updated_at: parse_updated_at(Post::NAME, id, updated_at.as_deref()),
    })
}

#[async_trait]
impl Store<Post> for PgPostClient {
    async fn list(&self) -> Result<Vec<Post>, StoreError> {
        let rows = self
            .statements
            .list
            .query()
            .bind(LIST_LIMIT)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .iter()
            .filter_map(|row| match decode_post(row) {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!(error = %e, "unable to decode post row, skipping");
                    None
                }
            })
            .collect())
    }

    async fn create(&self, post: &Post) -> Result<Post, StoreError> {
        let id: i64 = self
            .statements
            .create
            .query()
            .bind(post.user_id)
            .bind(&post.title)
            .bind(&post.content)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?
            .try_get("id")?;
        tracing::debug!(post_id = id, user_id = post.user_id, "post inserted");
        self.get(id).await
    }

    async fn get(&self, id: i64) -> Result<Post, StoreError> {
        match self.statements.get.query().bind(id).fetch_optional(&self.pool).await? {
            Some(row) => Ok(decode_post(&row)?),
            None => Err(StoreError::NotFound { entity: Post::NAME, id }),
        }
    }

    async fn update(&self, post: &Post) -> Result<Post, StoreError> {
        let id = post.id();
        let row = self
            .statements
            .update
            .query()
            .bind(id)
            .bind(&post.title)
            .bind(&post.content)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { entity: Post::NAME, id })?;
        Ok(decode_post(&row)?)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let affected = self
            .statements
            .delete
            .query()
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        check_deleted(Post::NAME, id, affected)
    }
}
