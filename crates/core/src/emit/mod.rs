//! TypeScript emission from a [`ResolvedModel`].
//!
//! Each artifact is a pure function of the model:
//! 1. Build: model -> [`ts::TsModule`] (structured types, raw class bodies)
//! 2. Emit: `TsModule` -> `String` via the [`Emit`] trait
//!
//! Artifacts never consult each other; the names they share (handler
//! interfaces, registry keys, payload types) are all derived from message
//! and schema names by the helpers in [`utils`] and [`types::type_name`].

mod client;
mod examples;
mod handlers;
mod server;
pub mod ts;
pub mod types;
pub mod utils;

use tracing::debug;

use crate::model::ResolvedModel;

pub use client::default_url;

/// Trait for converting AST nodes to TypeScript code strings.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

/// A generated output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// `types.ts`
    Types,
    /// `handlers.ts`
    Handlers,
    /// `server.ts`
    Server,
    /// `index.ts`, the example server.
    ServerExample,
    /// `client.ts`
    Client,
    /// `client-example.ts`
    ClientExample,
}

impl Artifact {
    /// Every artifact, in write order.
    pub const ALL: [Artifact; 6] = [
        Artifact::Types,
        Artifact::Handlers,
        Artifact::Server,
        Artifact::ServerExample,
        Artifact::Client,
        Artifact::ClientExample,
    ];

    /// File name inside the output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Types => "types.ts",
            Artifact::Handlers => "handlers.ts",
            Artifact::Server => "server.ts",
            Artifact::ServerExample => "index.ts",
            Artifact::Client => "client.ts",
            Artifact::ClientExample => "client-example.ts",
        }
    }

    /// Render this artifact.
    pub fn render(self, model: &ResolvedModel) -> String {
        let source = match self {
            Artifact::Types => types::render(model),
            Artifact::Handlers => handlers::render(model),
            Artifact::Server => server::render(model),
            Artifact::ServerExample => examples::render_server_example(model),
            Artifact::Client => client::render(model),
            Artifact::ClientExample => examples::render_client_example(model),
        };
        debug!(artifact = self.file_name(), bytes = source.len(), "Rendered artifact.");
        source
    }
}

/// An artifact rendered in memory, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Which file this is.
    pub artifact: Artifact,
    /// Generated TypeScript source.
    pub source: String,
}

/// Render the selected artifacts in [`Artifact::ALL`] order, skipping repeats.
pub fn render_all(model: &ResolvedModel, selected: &[Artifact]) -> Vec<Rendered> {
    Artifact::ALL
        .into_iter()
        .filter(|a| selected.contains(a))
        .map(|artifact| Rendered {
            artifact,
            source: artifact.render(model),
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use serde_json::json;

    use crate::model::ResolvedModel;

    /// Ping/pong protocol: client sends `ping`, server answers `pong`.
    pub fn ping_pong_model() -> ResolvedModel {
        ResolvedModel::build(&json!({
            "asyncapi": "3.0.0",
            "info": { "title": "Ping Pong API", "version": "1.0.0" },
            "servers": {
                "local": { "host": "localhost", "port": 9000, "protocol": "ws", "pathname": "/ws" }
            },
            "channels": {
                "main": {
                    "address": "/ws",
                    "messages": {
                        "ping": { "$ref": "#/components/messages/ping" },
                        "pong": { "$ref": "#/components/messages/pong" }
                    }
                }
            },
            "operations": {
                "sendPing": {
                    "action": "send",
                    "channel": { "$ref": "#/channels/main" },
                    "messages": [{ "$ref": "#/channels/main/messages/ping" }]
                },
                "receivePong": {
                    "action": "receive",
                    "channel": { "$ref": "#/channels/main" },
                    "messages": [{ "$ref": "#/channels/main/messages/pong" }]
                }
            },
            "components": {
                "messages": {
                    "ping": { "payload": { "$ref": "#/components/schemas/Ping" } },
                    "pong": { "payload": { "$ref": "#/components/schemas/Pong" } }
                },
                "schemas": {
                    "Ping": {
                        "type": "object",
                        "required": ["type"],
                        "properties": {
                            "type": { "type": "string", "const": "ping" },
                            "timestamp": { "type": "number" }
                        }
                    },
                    "Pong": {
                        "type": "object",
                        "required": ["type", "timestamp"],
                        "properties": {
                            "type": { "type": "string", "const": "pong" },
                            "timestamp": { "type": "number" }
                        }
                    }
                }
            }
        }))
        .expect("ping/pong fixture builds")
    }

    /// No servers, no operations.
    pub fn empty_model() -> ResolvedModel {
        ResolvedModel::build(&json!({
            "asyncapi": "3.0.0",
            "info": { "title": "Empty", "version": "0.0.1" },
            "channels": {},
            "components": {}
        }))
        .expect("empty fixture builds")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::test_fixtures::{empty_model, ping_pong_model};
    use super::*;

    #[test]
    fn test_render_all_keeps_canonical_order() {
        let model = ping_pong_model();
        let rendered = render_all(
            &model,
            &[Artifact::Client, Artifact::Types, Artifact::Client],
        );
        let names: Vec<_> = rendered.iter().map(|r| r.artifact.file_name()).collect();
        assert_eq!(names, vec!["types.ts", "client.ts"]);
    }

    #[test]
    fn test_types_artifact_unions() {
        let out = Artifact::Types.render(&ping_pong_model());
        assert!(out.contains("export interface Ping {"));
        assert!(out.contains("  type: \"pong\";\n  timestamp: number;"));
        assert!(out.contains("export type MessageType = \"ping\" | \"pong\";"));
        assert!(out.contains("export type AsyncApiMessage = Ping | Pong;"));

        let empty = Artifact::Types.render(&empty_model());
        assert!(empty.contains("export type MessageType = never;"));
        assert!(empty.contains("export type AsyncApiMessage = never;"));
    }

    #[test]
    fn test_naming_is_consistent_across_artifacts() {
        let model = ping_pong_model();
        let handlers = Artifact::Handlers.render(&model);
        let server = Artifact::Server.render(&model);
        let index = Artifact::ServerExample.render(&model);

        assert!(handlers.contains("export interface PingHandler"));
        assert!(server.contains("getHandler<PingHandler>(\"ping\")"));
        assert!(handlers.contains("export class DefaultPingHandler"));
        assert!(index.contains("new DefaultPingHandler()"));
        assert!(handlers.contains("registerPing("));
        assert!(index.contains("registry.registerPing("));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let model = ping_pong_model();
        for artifact in Artifact::ALL {
            assert_eq!(artifact.render(&model), artifact.render(&model));
        }
    }
}
