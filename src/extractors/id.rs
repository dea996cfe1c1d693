//! Extract the numeric identifier from an id-addressed route (`/:id`).

use crate::error::AppError;
use crate::model::Entity;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::marker::PhantomData;

/// Identifier of an `E` taken from the path. Rejects with 400 when the
/// segment is not an integer.
#[derive(Debug)]
pub struct EntityId<E> {
    pub id: i64,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityId<E> {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let id = raw.parse::<i64>().map_err(|_| AppError::InvalidId {
            entity: E::NAME,
            raw: raw.to_string(),
        })?;
        Ok(EntityId {
            id,
            _entity: PhantomData,
        })
    }
}

#[async_trait]
impl<S, E> FromRequestParts<S> for EntityId<E>
where
    S: Send + Sync,
    E: Entity,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let parsed = Self::parse(&raw);
        if parsed.is_err() {
            tracing::debug!(entity = E::NAME, raw = %raw, "rejected non-numeric id");
        }
        parsed
    }
}
