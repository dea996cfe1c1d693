//! CRUD routes for one entity type. Id-addressed routes sit behind the existence gate.

use crate::handlers::entity::{create, delete, list, read, update};
use crate::middleware::require_existing;
use crate::model::Entity;
use crate::store::SharedStore;
use axum::{middleware, routing::get, Router};

/// Mounts `{prefix}`, `{prefix}/` and `{prefix}/:id`.
pub fn entity_routes<E: Entity>(prefix: &str, store: SharedStore<E>) -> Router {
    let collection = get(list::<E>).post(create::<E>);
    let by_id = Router::new()
        .route(&format!("{prefix}/:id"), get(read::<E>).put(update::<E>).delete(delete::<E>))
        .route_layer(middleware::from_fn_with_state(store.clone(), require_existing::<E>));

    Router::new()
        .route(prefix, collection.clone())
        .route(&format!("{prefix}/"), collection)
        .merge(by_id)
        .with_state(store)
}
