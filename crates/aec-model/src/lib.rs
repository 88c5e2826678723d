//! Document model for synthetic AEC datasets.
//!
//! These are the shapes the generator emits and the bulk loader consumes:
//! assets with nested component trees, directed relationships between them,
//! the compound-key storage forms of both, and the model summary document.

pub mod errors;
pub mod models;

pub use errors::ModelError;
