//! `server.ts`: a `ws` server that dispatches incoming messages by `type`.

use super::Emit;
use super::handlers::payload_imports;
use super::ts::{ImportItem, TsModule};
use super::types::type_name;
use super::utils::{escape_js_string, message_stem};
use crate::model::{DEFAULT_PORT, ResolvedModel};

const HANDLE_MESSAGE_PRELUDE: &str = r#"  private async handleMessage(ws: WebSocket, raw: string): Promise<void> {
    let message: { type?: unknown };
    try {
      message = JSON.parse(raw);
    } catch (error) {
      this.sendError(ws, "Invalid JSON", error instanceof Error ? error.message : String(error));
      return;
    }

    if (!message || typeof message.type !== "string") {
      this.sendError(ws, "Invalid message format: missing type");
      return;
    }

    switch (message.type) {
"#;

const SERVER_EPILOGUE: &str = r#"      default:
        this.sendError(ws, `Unknown message type: ${message.type}`);
    }
  }

  private sendError(ws: WebSocket, error: string, details?: string): void {
    ws.send(JSON.stringify({ type: "error", error, details, timestamp: Date.now() }));
  }

  close(): void {
    this.wss.close();
  }
}"#;

/// Render `server.ts`.
pub fn render(model: &ResolvedModel) -> String {
    let send = model.send_operations();
    let port = model.primary_server().map_or(DEFAULT_PORT, |s| s.port_or_default());

    let mut module = TsModule::new("WebSocket server generated from the AsyncAPI document");
    module.import(
        vec![ImportItem::named("WebSocketServer"), ImportItem::named("WebSocket")],
        "ws",
        false,
    );
    module.import(vec![ImportItem::named("MessageHandlerRegistry")], "./handlers", false);
    module.import(
        send.values()
            .map(|m| ImportItem::named(format!("{}Handler", message_stem(&m.name))))
            .collect(),
        "./handlers",
        true,
    );
    module.import(payload_imports(send.values()), "./types", true);

    let mut class = format!(
        "export class AsyncApiWebSocketServer {{\n  private wss: WebSocketServer;\n  private handlerRegistry: MessageHandlerRegistry;\n\n  constructor(port: number = {port}, handlerRegistry: MessageHandlerRegistry = new MessageHandlerRegistry()) {{\n    this.handlerRegistry = handlerRegistry;\n    this.wss = new WebSocketServer({{ port }});\n    this.setupEventHandlers();\n    console.log(`WebSocket server started on port ${{port}}`);\n  }}\n\n"
    );

    class.push_str("  private setupEventHandlers(): void {\n    this.wss.on(\"connection\", (ws: WebSocket) => {\n      console.log(\"New client connected\");\n");
    if !model.receive_operations().is_empty() {
        class.push_str(&format!(
            "      ws.send(JSON.stringify({{ type: \"connected\", message: \"Welcome to {}\", timestamp: Date.now() }}));\n",
            escape_js_string(model.title())
        ));
    }
    class.push_str(
        "\n      ws.on(\"message\", async (data) => {\n        await this.handleMessage(ws, data.toString());\n      });\n\n      ws.on(\"close\", () => {\n        console.log(\"Client disconnected\");\n      });\n\n      ws.on(\"error\", (error) => {\n        console.error(\"WebSocket error:\", error);\n      });\n    });\n  }\n\n",
    );

    class.push_str(HANDLE_MESSAGE_PRELUDE);
    for message in send.values() {
        let stem = message_stem(&message.name);
        let name = escape_js_string(&message.name);
        let payload = type_name(&message.schema_name);
        class.push_str(&format!(
            "      case \"{name}\": {{\n        const handler = this.handlerRegistry.getHandler<{stem}Handler>(\"{name}\");\n        if (handler) {{\n          await handler.handle(ws, message as {payload});\n        }} else {{\n          console.warn(\"No handler registered for {name}\");\n        }}\n        break;\n      }}\n"
        ));
    }
    class.push_str(SERVER_EPILOGUE);
    module.raw(class);

    module.emit()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::emit::test_fixtures::{empty_model, ping_pong_model};

    #[test]
    fn test_server_dispatches_send_messages() {
        let out = render(&ping_pong_model());

        assert!(out.contains("import { WebSocketServer, WebSocket } from \"ws\";"));
        assert!(out.contains("import { MessageHandlerRegistry } from \"./handlers\";"));
        assert!(out.contains("import type { PingHandler } from \"./handlers\";"));
        assert!(out.contains("export class AsyncApiWebSocketServer {"));
        assert!(out.contains("case \"ping\": {"));
        assert!(out.contains("getHandler<PingHandler>(\"ping\")"));
        assert!(out.contains("await handler.handle(ws, message as Ping);"));
        assert!(!out.contains("case \"pong\""));
    }

    #[test]
    fn test_server_error_replies() {
        let out = render(&ping_pong_model());
        assert!(out.contains("this.sendError(ws, \"Invalid JSON\""));
        assert!(out.contains("Invalid message format: missing type"));
        assert!(out.contains("`Unknown message type: ${message.type}`"));
    }

    #[test]
    fn test_server_port_and_greeting() {
        let out = render(&ping_pong_model());
        assert!(out.contains("constructor(port: number = 9000,"));
        assert!(out.contains("type: \"connected\", message: \"Welcome to Ping Pong API\""));

        let empty = render(&empty_model());
        assert!(empty.contains("constructor(port: number = 8080,"));
        assert!(!empty.contains("\"connected\""));
        assert!(!empty.contains("case \""));
    }
}
