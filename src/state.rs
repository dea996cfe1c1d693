//! Shared application state for all routes: one store per entity.

use crate::error::StoreError;
use crate::model::{Post, User};
use crate::store::postgres::{PgPostClient, PgUserClient};
use crate::store::SharedStore;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: SharedStore<User>,
    pub posts: SharedStore<Post>,
}

impl AppState {
    pub fn new(users: SharedStore<User>, posts: SharedStore<Post>) -> Self {
        AppState { users, posts }
    }

    /// Both PostgreSQL clients over one shared pool. Fails if any statement does not prepare.
    pub async fn postgres(pool: PgPool) -> Result<Self, StoreError> {
        let users = PgUserClient::new(pool.clone()).await?;
        let posts = PgPostClient::new(pool).await?;
        Ok(AppState::new(Arc::new(users), Arc::new(posts)))
    }
}
