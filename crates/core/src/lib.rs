//! Core of `wsgen`: turns an AsyncAPI WebSocket document into a resolved,
//! direction-classified model and renders TypeScript from it.
//!
//! The pipeline is:
//! 1. Load: YAML/JSON file -> [`serde_json::Value`] ([`loader`])
//! 2. Validate: mandatory top-level sections present ([`validate`])
//! 3. Deserialize: tree -> [`document::AsyncApiDocument`]
//! 4. Resolve: `$ref`s replaced by the entities they name ([`resolve`])
//! 5. Classify: operations split into send/receive ([`classify`])
//! 6. Emit: [`ResolvedModel`] -> TypeScript sources ([`emit`])
//!
//! Steps 2-5 are bundled in [`ResolvedModel::build`]; each step either
//! succeeds completely or returns the first [`Error`].

pub mod classify;
pub mod document;
pub mod emit;
pub mod error;
pub mod loader;
pub mod model;
pub mod ordered;
pub mod resolve;
pub mod validate;

use std::path::Path;

pub use emit::{Artifact, Rendered, render_all};
pub use error::{Error, Result};
pub use model::{Direction, ResolvedChannel, ResolvedMessage, ResolvedModel, ResolvedOperation, ServerInfo};
pub use ordered::OrderedMap;

/// Load a document from disk and build its model.
pub fn load_model(path: &Path) -> Result<ResolvedModel> {
    let tree = loader::load(path)?;
    ResolvedModel::build(&tree)
}
