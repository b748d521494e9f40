//! AsyncAPI document structs for serde deserialization.
//!
//! This module defines the subset of an AsyncAPI 3 document needed to
//! describe a WebSocket message protocol: servers, channels, operations,
//! and the reusable messages and schemas under `components`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;
use crate::ordered::OrderedMap;

/// Root AsyncAPI document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsyncApiDocument {
    /// Protocol version string, e.g. `3.0.0`.
    #[serde(deserialize_with = "scalar_string")]
    pub asyncapi: String,
    /// Document metadata.
    pub info: Info,
    /// Named server definitions.
    #[serde(default)]
    pub servers: OrderedMap<String, Server>,
    /// Content type used by messages that do not declare one.
    pub default_content_type: Option<String>,
    /// Named channels.
    pub channels: OrderedMap<String, Channel>,
    /// Named operations.
    #[serde(default)]
    pub operations: OrderedMap<String, Operation>,
    /// Reusable messages and schemas.
    pub components: Components,
}

/// Document metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    /// API title.
    #[serde(default)]
    pub title: String,
    /// API version. YAML scalars such as `1.0` are kept as written.
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: String,
    /// Free-form description.
    pub description: Option<String>,
}

/// A server the protocol is served from.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// Host name without scheme or port.
    pub host: String,
    /// Port; the model falls back to the default port when absent.
    pub port: Option<u16>,
    /// Declared protocol, `ws` when absent.
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// Path appended to the server URL.
    pub pathname: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

fn default_protocol() -> String {
    "ws".to_string()
}

/// Accept a string, number, or boolean scalar and keep its text.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

/// An addressable communication path.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    /// Channel address; AsyncAPI allows it to be null for dynamic addresses.
    pub address: Option<String>,
    /// Messages that may flow over the channel, keyed by message name.
    #[serde(default)]
    pub messages: OrderedMap<String, Reference>,
    /// Free-form description.
    pub description: Option<String>,
}

/// A named action bound to one channel.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    /// Raw action value; classification into send/receive happens later.
    pub action: String,
    /// Free-form description.
    pub description: Option<String>,
    /// One-line summary.
    pub summary: Option<String>,
    /// Reference to the channel, e.g. `#/channels/ping`.
    pub channel: Reference,
    /// Messages carried by the operation, in declared order.
    #[serde(default)]
    pub messages: Vec<Reference>,
}

/// Components section containing reusable messages and schemas.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    /// Messages keyed by name.
    #[serde(default)]
    pub messages: OrderedMap<String, Message>,
    /// Payload schemas keyed by name.
    #[serde(default)]
    pub schemas: OrderedMap<String, Schema>,
}

/// A protocol message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Declared machine name; the components key is the identity used everywhere.
    pub name: Option<String>,
    /// Human-readable title.
    pub title: Option<String>,
    /// One-line summary.
    pub summary: Option<String>,
    /// Content type; `defaultContentType` applies when absent.
    pub content_type: Option<String>,
    /// Reference to the payload schema.
    pub payload: Reference,
}

/// A `$ref` pointer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reference {
    /// Pointer text, e.g. `#/components/schemas/Ping`.
    #[serde(rename = "$ref")]
    pub path: String,
}

impl Reference {
    /// The referenced entity name: the path component after the last `/`.
    ///
    /// Returns `None` when that component is empty.
    pub fn target_name(&self) -> Option<&str> {
        let name = self.path.rsplit('/').next().unwrap_or_default();
        if name.is_empty() { None } else { Some(name) }
    }
}

/// JSON Schema definition used for message payloads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Schema {
    /// The type tag (string, number, integer, boolean, object, array).
    #[serde(rename = "type")]
    pub schema_type: Option<String>,

    /// Reference to another component schema.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Properties for object types, in declared order.
    #[serde(default)]
    pub properties: OrderedMap<String, Schema>,

    /// Required property names for object types.
    #[serde(default)]
    pub required: Vec<String>,

    /// Item schema for array types.
    pub items: Option<Box<Schema>>,

    /// Constant value, typically a message discriminator tag.
    #[serde(rename = "const")]
    pub const_value: Option<Value>,

    /// Allowed values.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,

    /// Alternatives of which exactly one must match.
    #[serde(rename = "oneOf", default)]
    pub one_of: Vec<Schema>,

    /// Alternatives of which at least one must match.
    #[serde(rename = "anyOf", default)]
    pub any_of: Vec<Schema>,

    /// Free-form description, emitted as a doc comment.
    pub description: Option<String>,
}

impl Schema {
    /// Whether `property` is listed in `required`.
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}

impl AsyncApiDocument {
    /// Deserialize a validated tree into the typed document.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_target_name() {
        let r = Reference {
            path: "#/components/messages/ping".to_string(),
        };
        assert_eq!(r.target_name(), Some("ping"));

        let bare = Reference {
            path: "ping".to_string(),
        };
        assert_eq!(bare.target_name(), Some("ping"));

        let empty = Reference {
            path: "#/components/messages/".to_string(),
        };
        assert_eq!(empty.target_name(), None);
    }

    #[test]
    fn test_schema_properties_keep_order() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "required": ["type"],
            "properties": {
                "type": { "type": "string", "const": "pong" },
                "timestamp": { "type": "number" },
                "details": { "type": "object" }
            }
        }))
        .unwrap();

        let names: Vec<_> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["type", "timestamp", "details"]);
        assert!(schema.is_required("type"));
        assert!(!schema.is_required("timestamp"));
        assert_eq!(
            schema.properties.get("type").unwrap().const_value,
            Some(json!("pong"))
        );
    }

    #[test]
    fn test_missing_payload_is_malformed() {
        let err = AsyncApiDocument::from_value(json!({
            "asyncapi": "3.0.0",
            "info": { "title": "T", "version": "1" },
            "channels": {},
            "components": { "messages": { "ping": { "title": "Ping" } } }
        }))
        .unwrap_err();
        assert!(matches!(err, crate::error::Error::MalformedDocument(_)));
    }

    #[test]
    fn test_optional_sections_default() {
        let doc = AsyncApiDocument::from_value(json!({
            "asyncapi": "3.0.0",
            "info": { "title": "T", "version": "1" },
            "channels": {},
            "components": {}
        }))
        .unwrap();
        assert!(doc.servers.is_empty());
        assert!(doc.operations.is_empty());
        assert!(doc.components.messages.is_empty());
        assert!(doc.components.schemas.is_empty());
    }

    #[test]
    fn test_numeric_version_scalars_are_kept_as_text() {
        let tree: Value = serde_yaml::from_str(
            "asyncapi: 3.0\ninfo:\n  title: T\n  version: 1.0\nchannels: {}\ncomponents: {}\n",
        )
        .unwrap();
        let doc = AsyncApiDocument::from_value(tree).unwrap();
        assert_eq!(doc.asyncapi, "3.0");
        assert_eq!(doc.info.version, "1.0");

        let err = AsyncApiDocument::from_value(json!({
            "asyncapi": ["3.0.0"],
            "info": {},
            "channels": {},
            "components": {}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("expected a string or number"));
    }

    #[test]
    fn test_schema_alternatives() {
        let schema: Schema = serde_json::from_value(json!({
            "oneOf": [{ "type": "string" }, { "$ref": "#/components/schemas/Id" }],
            "anyOf": [{ "type": "null" }]
        }))
        .unwrap();
        assert_eq!(schema.one_of.len(), 2);
        assert_eq!(
            schema.one_of[1].ref_path.as_deref(),
            Some("#/components/schemas/Id")
        );
        assert_eq!(schema.any_of[0].schema_type.as_deref(), Some("null"));
    }
}
