//! `handlers.ts`: server-side handler interfaces, registry, and defaults.

use super::Emit;
use super::ts::{ImportItem, TsModule};
use super::types::type_name;
use super::utils::{escape_js_string, message_stem};
use crate::model::{ResolvedMessage, ResolvedModel};

/// Payload type names of `messages`, first occurrence first.
pub fn payload_imports<'a>(messages: impl Iterator<Item = &'a ResolvedMessage>) -> Vec<ImportItem> {
    let mut items: Vec<ImportItem> = Vec::new();
    for message in messages {
        let item = ImportItem::named(type_name(&message.schema_name));
        if !items.contains(&item) {
            items.push(item);
        }
    }
    items
}

/// Render `handlers.ts`.
pub fn render(model: &ResolvedModel) -> String {
    let send = model.send_operations();
    let mut module = TsModule::new("WebSocket message handlers with dependency injection");
    module.import(vec![ImportItem::named("WebSocket")], "ws", true);
    module.import(payload_imports(send.values()), "./types", true);

    module.comment("Handler interface for each message the server accepts");
    for message in send.values() {
        let stem = message_stem(&message.name);
        let payload = type_name(&message.schema_name);
        module.raw(format!(
            "export interface {stem}Handler {{\n  handle(ws: WebSocket, message: {payload}): void | Promise<void>;\n}}"
        ));
    }

    let handler_union = if send.is_empty() {
        "never".to_string()
    } else {
        send.values()
            .map(|m| format!("{}Handler", message_stem(&m.name)))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    module.raw(format!("export type MessageHandler = {handler_union};"));

    let mut registry = String::from(
        "export class MessageHandlerRegistry {\n  private handlers = new Map<string, MessageHandler>();\n",
    );
    for message in send.values() {
        let stem = message_stem(&message.name);
        registry.push_str(&format!(
            "\n  register{stem}(handler: {stem}Handler): void {{\n    this.handlers.set(\"{}\", handler);\n  }}\n",
            escape_js_string(&message.name)
        ));
    }
    registry.push_str(
        "\n  getHandler<T extends MessageHandler>(messageType: string): T | undefined {\n    return this.handlers.get(messageType) as T | undefined;\n  }\n}",
    );
    module.comment("Handler registry keyed by message type");
    module.raw(registry);

    if !send.is_empty() {
        module.comment("Default handler implementations");
    }
    for message in send.values() {
        module.raw(default_handler(model, message));
    }

    module.emit()
}

fn default_handler(model: &ResolvedModel, message: &ResolvedMessage) -> String {
    let stem = message_stem(&message.name);
    let payload = type_name(&message.schema_name);
    let name = escape_js_string(&message.name);

    let body = if message.name == "ping" && model.receive_operations().contains_key("pong") {
        "    ws.send(JSON.stringify({ type: \"pong\", timestamp: Date.now() }));\n".to_string()
    } else {
        format!("    // Respond to \"{name}\" here.\n")
    };

    format!(
        "export class Default{stem}Handler implements {stem}Handler {{\n  async handle(ws: WebSocket, message: {payload}): Promise<void> {{\n    console.log(\"Handling {name} message:\", message);\n{body}  }}\n}}"
    )
}
