//! Existence gate: an id-addressed request only reaches its handler when the
//! entity is present. The fetched entity rides along in request extensions so
//! the read handler does not query again.

use crate::error::AppError;
use crate::extractors::EntityId;
use crate::model::Entity;
use crate::store::SharedStore;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

/// Entity loaded by [`require_existing`] for the current request.
#[derive(Clone, Debug)]
pub struct Found<E>(pub E);

/// Parses the path id, loads the entity, and halts with 400/404/500 when that fails.
pub async fn require_existing<E: Entity>(
    State(store): State<SharedStore<E>>,
    id: EntityId<E>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let entity = store.get(id.id).await?;
    req.extensions_mut().insert(Found(entity));
    Ok(next.run(req).await)
}
