//! Entity CRUD handlers shared by users and posts.

use crate::error::AppError;
use crate::extractors::EntityId;
use crate::middleware::Found;
use crate::model::Entity;
use crate::store::SharedStore;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

/// Decodes a JSON body, mapping every rejection (syntax, types, content type) to 400.
fn body<E: Entity>(payload: Result<Json<E>, JsonRejection>) -> Result<E, AppError> {
    payload.map(|Json(entity)| entity).map_err(|rejection| {
        tracing::debug!(entity = E::NAME, error = %rejection, "unable to decode request body");
        AppError::from(rejection)
    })
}

pub async fn list<E: Entity>(State(store): State<SharedStore<E>>) -> Result<Json<Vec<E>>, AppError> {
    let entities = store.list().await?;
    Ok(Json(entities))
}

pub async fn create<E: Entity>(
    State(store): State<SharedStore<E>>,
    payload: Result<Json<E>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut entity = body(payload)?;
    entity.clear_server_fields();
    let created = store.create(&entity).await?;
    tracing::info!(entity = E::NAME, id = created.id(), "created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Served from the entity the existence gate already loaded.
pub async fn read<E: Entity>(Extension(Found(entity)): Extension<Found<E>>) -> Json<E> {
    Json(entity)
}

pub async fn update<E: Entity>(
    State(store): State<SharedStore<E>>,
    id: EntityId<E>,
    payload: Result<Json<E>, JsonRejection>,
) -> Result<Json<E>, AppError> {
    let mut entity = body(payload)?;
    entity.clear_server_fields();
    // The path id always wins over one sent in the body.
    entity.set_id(id.id);
    let updated = store.update(&entity).await?;
    Ok(Json(updated))
}

pub async fn delete<E: Entity>(
    State(store): State<SharedStore<E>>,
    id: EntityId<E>,
) -> Result<StatusCode, AppError> {
    store.delete(id.id).await?;
    tracing::info!(entity = E::NAME, id = id.id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}
