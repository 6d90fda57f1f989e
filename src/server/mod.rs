//! HTTP server assembly
//!
//! `ServerBuilder` wires a store into [`AppState`], registers the routes of
//! every entity and adds health checks, tracing and optional CORS layers.

pub mod builder;
pub mod entity_registry;
pub mod state;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use state::AppState;
