//! Process configuration: command line flags with environment fallbacks, and logging setup.

pub mod logging;
pub mod types;

pub use logging::init_tracing;
pub use types::*;
