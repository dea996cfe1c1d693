//! HTTP handlers for user and post CRUD.

pub mod entity;
pub use entity::*;
