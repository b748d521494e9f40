//! Reference resolution.
//!
//! References in a document are shallow by construction (operation →
//! message → schema, plus operation → channel and channel → message), so a
//! reference is reduced to its last path component and looked up directly
//! in the relevant table. Every lookup yields a [`Resolution`]; a dangling
//! reference is turned into [`Error::UnresolvedReference`] by the caller.

use tracing::{debug, trace};

use crate::document::{AsyncApiDocument, Message, Reference, Schema};
use crate::error::{Error, Result};
use crate::model::{ResolvedChannel, ResolvedMessage};
use crate::ordered::OrderedMap;

/// Content type assumed when neither the message nor the document declares one.
pub const FALLBACK_CONTENT_TYPE: &str = "application/json";

/// Outcome of looking up one reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a, T> {
    /// The reference names a declared entity.
    Resolved(&'a T),
    /// Nothing is declared under the referenced name; carries the full path.
    Dangling(&'a str),
}

impl<'a, T> Resolution<'a, T> {
    /// Convert to a result, naming the referencing entity on failure.
    pub fn or_unresolved(self, referenced_by: impl FnOnce() -> String) -> Result<&'a T> {
        match self {
            Resolution::Resolved(entity) => Ok(entity),
            Resolution::Dangling(path) => Err(Error::UnresolvedReference {
                reference: path.to_string(),
                referenced_by: referenced_by(),
            }),
        }
    }
}

/// Look up `reference` in `table` by its target name.
pub fn lookup<'a, T>(reference: &'a Reference, table: &'a OrderedMap<String, T>) -> Resolution<'a, T> {
    match reference.target_name().and_then(|name| table.get(name)) {
        Some(entity) => Resolution::Resolved(entity),
        None => Resolution::Dangling(&reference.path),
    }
}

/// An operation whose channel and message references have been resolved.
///
/// The action is still the raw string; direction classification is a
/// separate stage.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRefs {
    /// Operation name as declared under `operations`.
    pub name: String,
    /// Raw action value.
    pub action: String,
    /// Description, or the summary when no description is given.
    pub description: Option<String>,
    /// Name of the resolved channel.
    pub channel: String,
    /// Resolved message names in declared order, without repeats.
    pub messages: Vec<String>,
}

/// Output of the resolver: every reference replaced by the entity it names.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDocument {
    /// Canonical resolved messages keyed by name, in order of first
    /// appearance: operation references first, then channel references,
    /// then any remaining component messages in declared order.
    pub messages: OrderedMap<String, ResolvedMessage>,
    /// Channels in document order.
    pub channels: Vec<ResolvedChannel>,
    /// Operations in document order.
    pub operations: Vec<OperationRefs>,
}

/// Resolve every reference in a document.
pub fn resolve(doc: &AsyncApiDocument) -> Result<ResolvedDocument> {
    let schemas = &doc.components.schemas;
    for (name, schema) in schemas {
        check_schema(name, schema, schemas)?;
    }

    let mut resolver = Resolver {
        doc,
        messages: OrderedMap::new(),
    };

    let mut operations = Vec::with_capacity(doc.operations.len());
    for (op_name, op) in &doc.operations {
        let channel_ref = &op.channel;
        lookup(channel_ref, &doc.channels).or_unresolved(|| format!("operation '{op_name}'"))?;
        let channel = channel_ref.target_name().unwrap_or_default().to_string();

        let mut names: Vec<String> = Vec::with_capacity(op.messages.len());
        for msg_ref in &op.messages {
            let name = resolver.message(msg_ref, || format!("operation '{op_name}'"))?;
            if !names.contains(&name) {
                names.push(name);
            }
        }

        operations.push(OperationRefs {
            name: op_name.clone(),
            action: op.action.clone(),
            description: op.description.clone().or_else(|| op.summary.clone()),
            channel,
            messages: names,
        });
    }

    let mut channels = Vec::with_capacity(doc.channels.len());
    for (channel_name, channel) in &doc.channels {
        let mut names = Vec::with_capacity(channel.messages.len());
        for msg_ref in channel.messages.values() {
            names.push(resolver.message(msg_ref, || format!("channel '{channel_name}'"))?);
        }
        channels.push(ResolvedChannel {
            name: channel_name.clone(),
            address: channel.address.clone(),
            messages: names,
        });
    }

    for (name, message) in &doc.components.messages {
        if !resolver.messages.contains_key(name) {
            let resolved = resolver.resolve_message(name, message)?;
            resolver.messages.insert_first(name.clone(), resolved);
        }
    }

    debug!(
        messages = resolver.messages.len(),
        channels = channels.len(),
        operations = operations.len(),
        "Resolved document references."
    );

    Ok(ResolvedDocument {
        messages: resolver.messages,
        channels,
        operations,
    })
}

struct Resolver<'a> {
    doc: &'a AsyncApiDocument,
    messages: OrderedMap<String, ResolvedMessage>,
}

impl Resolver<'_> {
    /// Resolve a message reference, registering the message on first sight.
    fn message(
        &mut self,
        reference: &Reference,
        referenced_by: impl FnOnce() -> String,
    ) -> Result<String> {
        let message = lookup(reference, &self.doc.components.messages).or_unresolved(referenced_by)?;
        let name = reference.target_name().unwrap_or_default();

        if self.messages.contains_key(name) {
            trace!(message = name, "Message already resolved, keeping first entry.");
        } else {
            let resolved = self.resolve_message(name, message)?;
            self.messages.insert_first(name.to_string(), resolved);
        }
        Ok(name.to_string())
    }

    fn resolve_message(&self, name: &str, message: &Message) -> Result<ResolvedMessage> {
        let schemas = &self.doc.components.schemas;
        let schema = lookup(&message.payload, schemas).or_unresolved(|| format!("message '{name}'"))?;
        let schema_name = message.payload.target_name().unwrap_or_default().to_string();

        let content_type = message
            .content_type
            .clone()
            .or_else(|| self.doc.default_content_type.clone())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        Ok(ResolvedMessage {
            name: name.to_string(),
            title: message.title.clone().or_else(|| message.name.clone()),
            summary: message.summary.clone(),
            content_type,
            schema_name,
            schema: schema.clone(),
        })
    }
}

/// Check a schema's internal invariants: nested `$ref`s resolve and every
/// required property is declared.
fn check_schema(path: &str, schema: &Schema, schemas: &OrderedMap<String, Schema>) -> Result<()> {
    if let Some(ref_path) = &schema.ref_path {
        let reference = Reference {
            path: ref_path.clone(),
        };
        lookup(&reference, schemas).or_unresolved(|| format!("schema '{path}'"))?;
    }

    for required in &schema.required {
        if !schema.properties.contains_key(required) {
            return Err(Error::UndeclaredRequiredProperty {
                schema: path.to_string(),
                property: required.clone(),
            });
        }
    }

    for (prop_name, prop) in &schema.properties {
        check_schema(&format!("{path}.{prop_name}"), prop, schemas)?;
    }

    if let Some(items) = &schema.items {
        check_schema(&format!("{path}[]"), items, schemas)?;
    }

    for (i, alternative) in schema.one_of.iter().enumerate() {
        check_schema(&format!("{path}.oneOf[{i}]"), alternative, schemas)?;
    }
    for (i, alternative) in schema.any_of.iter().enumerate() {
        check_schema(&format!("{path}.anyOf[{i}]"), alternative, schemas)?;
    }

    Ok(())
}
