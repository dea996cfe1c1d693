//! Store contract between the HTTP layer and persistence.

pub mod postgres;

use crate::error::StoreError;
use crate::model::{Entity, Post, User};
use async_trait::async_trait;
use std::sync::Arc;

/// Most rows a single list call returns.
pub const LIST_LIMIT: i64 = 100;

/// Persistence capabilities for one entity type.
#[async_trait]
pub trait Store<E: Entity>: Send + Sync {
    /// At most [`LIST_LIMIT`] entities. Rows that fail to decode are skipped.
    async fn list(&self) -> Result<Vec<E>, StoreError>;

    /// Inserts `entity` (its id is ignored) and returns the stored record.
    async fn create(&self, entity: &E) -> Result<E, StoreError>;

    async fn get(&self, id: i64) -> Result<E, StoreError>;

    /// Full-record update of the row named by `entity.id()`. Stamps `updated_at`.
    async fn update(&self, entity: &E) -> Result<E, StoreError>;

    /// Succeeds only when exactly one row is removed.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

pub type UserStore = dyn Store<User>;
pub type PostStore = dyn Store<Post>;

pub type SharedStore<E> = Arc<dyn Store<E>>;
