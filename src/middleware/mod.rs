//! Request middleware for id-addressed routes.

mod exists;

pub use exists::{require_existing, Found};
