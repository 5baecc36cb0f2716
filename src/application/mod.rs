//! Application layer - Provider registry and request dispatch.
//!
//! This layer orchestrates domain operations and coordinates between ports.

mod dispatcher;
mod registry;

pub use dispatcher::Dispatcher;
pub use registry::{ProviderRegistry, IMAGE_CATALOG_ID};
