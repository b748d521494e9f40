//! The resolved model handed to every emitter.
//!
//! A [`ResolvedModel`] is built once per run by [`ResolvedModel::build`]
//! (validate → deserialize → resolve → classify) and is read-only
//! afterwards. Construction either fully succeeds or returns the first
//! error; no partially built model is ever observable.
//!
//! Message and schema names are the only keys linking generated artifacts:
//! a message named `ping` is `PingHandler`, `registerPing`, `onPing`, and
//! the registry key `'ping'` in every file.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde_json::Value;
use tracing::info;

use crate::classify::classify;
use crate::document::{AsyncApiDocument, Schema};
use crate::emit::types::type_name;
use crate::emit::utils::message_stem;
use crate::error::{Error, Result};
use crate::ordered::OrderedMap;
use crate::resolve::resolve;
use crate::validate::validate;

/// Default port for generated servers and clients.
pub const DEFAULT_PORT: u16 = 8080;
/// Default host for generated clients.
pub const DEFAULT_HOST: &str = "localhost";

/// Which side of the connection originates a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Client → server; the server registers a handler.
    Send,
    /// Server → client; the client registers a listener.
    Receive,
}

impl Direction {
    /// Parse an operation's `action` value.
    pub fn from_action(operation: &str, action: &str) -> Result<Self> {
        match action {
            "send" => Ok(Self::Send),
            "receive" => Ok(Self::Receive),
            other => Err(Error::UnknownAction {
                operation: operation.to_string(),
                action: other.to_string(),
            }),
        }
    }

    /// The action keyword for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Receive => "receive",
        }
    }
}

/// A message with its payload reference replaced by the schema it names.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMessage {
    /// Message name; the cross-artifact linking key.
    pub name: String,
    /// Message title, or its declared `name` when untitled.
    pub title: Option<String>,
    /// One-line summary.
    pub summary: Option<String>,
    /// Content type after `defaultContentType` and fallback.
    pub content_type: String,
    /// Name of the payload schema under `components.schemas`.
    pub schema_name: String,
    /// The payload schema.
    pub schema: Schema,
}

/// A channel with its message references resolved to message names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChannel {
    /// Channel name as declared under `channels`.
    pub name: String,
    /// Channel address, if any.
    pub address: Option<String>,
    /// Message names in declared order.
    pub messages: Vec<String>,
}

/// An operation with its direction decided and references resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOperation {
    /// Operation name as declared under `operations`.
    pub name: String,
    /// Who originates the operation's messages.
    pub direction: Direction,
    /// Name of the channel the operation is bound to.
    pub channel: String,
    /// Description, or the summary when no description is given.
    pub description: Option<String>,
    /// Message names in declared order, without repeats.
    pub messages: Vec<String>,
}

/// Connection settings taken from a declared server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server name as declared under `servers`.
    pub name: String,
    /// Host name.
    pub host: String,
    /// Declared port, if any.
    pub port: Option<u16>,
    /// `wss` when declared as such, `ws` for anything else.
    pub protocol: String,
    /// Path appended to the URL.
    pub pathname: Option<String>,
}

impl ServerInfo {
    /// Declared port or [`DEFAULT_PORT`].
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Connection URL, e.g. `ws://localhost:8080/chat`.
    pub fn url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.protocol,
            self.host,
            self.port_or_default(),
            self.pathname.as_deref().unwrap_or_default()
        )
    }
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            host: DEFAULT_HOST.to_string(),
            port: None,
            protocol: "ws".to_string(),
            pathname: None,
        }
    }
}

/// Fully resolved, direction-classified model of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedModel {
    title: String,
    version: String,
    description: Option<String>,
    servers: Vec<ServerInfo>,
    schemas: OrderedMap<String, Schema>,
    messages: OrderedMap<String, ResolvedMessage>,
    channels: Vec<ResolvedChannel>,
    operations: Vec<ResolvedOperation>,
    send_operations: OrderedMap<String, ResolvedMessage>,
    receive_operations: OrderedMap<String, ResolvedMessage>,
}

impl ResolvedModel {
    /// Run the whole pipeline over a parsed document tree.
    ///
    /// The structural check runs before anything else; a tree missing a
    /// mandatory section never reaches reference resolution.
    pub fn build(tree: &Value) -> Result<Self> {
        let tree = validate(tree)?;
        let doc = AsyncApiDocument::from_value(tree.clone())?;
        Self::from_document(&doc)
    }

    /// Build the model from an already deserialized document.
    pub fn from_document(doc: &AsyncApiDocument) -> Result<Self> {
        let resolved = resolve(doc)?;
        let classified = classify(&resolved)?;
        check_identifiers(resolved.messages.keys(), message_stem)?;
        check_identifiers(doc.components.schemas.keys(), type_name)?;

        let servers = doc
            .servers
            .iter()
            .map(|(name, server)| ServerInfo {
                name: name.clone(),
                host: server.host.clone(),
                port: server.port,
                protocol: if server.protocol == "wss" { "wss" } else { "ws" }.to_string(),
                pathname: server.pathname.clone(),
            })
            .collect();

        let model = Self {
            title: doc.info.title.clone(),
            version: doc.info.version.clone(),
            description: doc.info.description.clone(),
            servers,
            schemas: doc.components.schemas.clone(),
            messages: resolved.messages,
            channels: resolved.channels,
            operations: classified.operations,
            send_operations: classified.send,
            receive_operations: classified.receive,
        };

        info!(
            title = %model.title,
            schemas = model.schemas.len(),
            send = model.send_operations.len(),
            receive = model.receive_operations.len(),
            "Built resolved model."
        );

        Ok(model)
    }

    /// API title from `info`.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// API version from `info`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// API description from `info`.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared servers in document order.
    pub fn servers(&self) -> &[ServerInfo] {
        &self.servers
    }

    /// The first declared server; it configures generated URLs and ports.
    pub fn primary_server(&self) -> Option<&ServerInfo> {
        self.servers.first()
    }

    /// Component schemas in declared order.
    pub fn schemas(&self) -> &OrderedMap<String, Schema> {
        &self.schemas
    }

    /// Every resolved message, in order of first appearance.
    pub fn messages(&self) -> &OrderedMap<String, ResolvedMessage> {
        &self.messages
    }

    /// Channels in document order.
    pub fn channels(&self) -> &[ResolvedChannel] {
        &self.channels
    }

    /// Classified operations in document order.
    pub fn operations(&self) -> &[ResolvedOperation] {
        &self.operations
    }

    /// Client → server messages; each needs a server-side handler.
    pub fn send_operations(&self) -> &OrderedMap<String, ResolvedMessage> {
        &self.send_operations
    }

    /// Server → client messages; each needs a client-side listener.
    pub fn receive_operations(&self) -> &OrderedMap<String, ResolvedMessage> {
        &self.receive_operations
    }

    /// Distinct message names across both directions: send names first,
    /// then receive names not already listed.
    pub fn message_type_union(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.send_operations.keys().map(String::as_str).collect();
        for name in self.receive_operations.keys() {
            if !self.send_operations.contains_key(name) {
                names.push(name);
            }
        }
        names
    }

    /// Messages of [`message_type_union`](Self::message_type_union), in the same order.
    pub fn union_messages(&self) -> impl Iterator<Item = &ResolvedMessage> {
        self.send_operations.values().chain(
            self.receive_operations
                .iter()
                .filter(|(name, _)| !self.send_operations.contains_key(*name))
                .map(|(_, message)| message),
        )
    }
}

/// Reject two names that generate the same TypeScript identifier.
fn check_identifiers<'a>(
    names: impl Iterator<Item = &'a String>,
    identifier: fn(&str) -> String,
) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for name in names {
        match seen.entry(identifier(name)) {
            Entry::Occupied(taken) => {
                return Err(Error::NameCollision {
                    identifier: taken.key().clone(),
                    first: (*taken.get()).to_string(),
                    second: name.clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(name);
            }
        }
    }
    Ok(())
}
