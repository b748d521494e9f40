//! Errors raised while loading a document and building the resolved model.
//!
//! Every variant is terminal for the current run.

use std::path::PathBuf;

/// Result alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of one pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mandatory top-level section is absent from the document.
    #[error("Missing {section} section")]
    SchemaStructure {
        /// Name of the missing section (`asyncapi`, `info`, `channels`, `components`).
        section: &'static str,
    },

    /// A `$ref` does not point at a declared entity.
    #[error("Unresolved reference '{reference}' in {referenced_by}")]
    UnresolvedReference {
        /// The dangling reference path, verbatim.
        reference: String,
        /// The entity that holds the reference, e.g. `message 'ping'`.
        referenced_by: String,
    },

    /// An operation declares an action other than `send` or `receive`.
    #[error("Operation '{operation}' has unknown action '{action}' (expected 'send' or 'receive')")]
    UnknownAction {
        /// Operation name as declared under `operations`.
        operation: String,
        /// The offending action value.
        action: String,
    },

    /// A schema lists a required property it does not declare.
    #[error("Schema '{schema}' requires property '{property}' which is not declared")]
    UndeclaredRequiredProperty {
        /// Schema path, e.g. `Pong` or `Pong.details`.
        schema: String,
        /// The required property name.
        property: String,
    },

    /// Two message or schema names map to the same TypeScript identifier.
    #[error("Names '{first}' and '{second}' both map to TypeScript identifier '{identifier}'")]
    NameCollision {
        /// The shared generated identifier.
        identifier: String,
        /// Name that claimed the identifier first.
        first: String,
        /// Later name that maps to the same identifier.
        second: String,
    },

    /// The tree has every mandatory section but not the expected shape.
    #[error("Malformed AsyncAPI document: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    /// The schema file extension is not one of `.yaml`, `.yml`, `.json`.
    #[error("Unsupported file format: {extension}. Use .yaml, .yml, or .json")]
    UnsupportedFormat {
        /// Extension as found on the path (empty when there is none).
        extension: String,
    },

    /// The schema file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not valid YAML or JSON.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        /// Path that was being parsed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}
