//! `client.ts`: a typed `ws` client with per-message listeners and senders.

use super::Emit;
use super::handlers::payload_imports;
use super::ts::TsModule;
use super::types::type_name;
use super::utils::{escape_js_string, message_stem};
use crate::model::{ResolvedModel, ServerInfo};

const CLIENT_CORE: &str = r#"  connect(): Promise<void> {
    return new Promise((resolve, reject) => {
      const ws = new WebSocket(this.url);
      this.ws = ws;

      ws.on("open", () => {
        console.log(`Connected to ${this.url}`);
        resolve();
      });

      ws.on("message", (data) => {
        void this.handleMessage(data.toString());
      });

      ws.on("error", (error) => {
        console.error("WebSocket error:", error);
        reject(error);
      });

      ws.on("close", () => {
        console.log("Disconnected");
        this.ws = null;
      });
    });
  }

  private async handleMessage(raw: string): Promise<void> {
    let message: { type?: unknown };
    try {
      message = JSON.parse(raw);
    } catch (error) {
      console.error("Failed to parse message:", error);
      return;
    }

    if (!message || typeof message.type !== "string") {
      console.warn("Received message without type:", message);
      return;
    }

    const listener = this.listeners.get(message.type);
    if (listener) {
      await listener(message);
    } else {
      console.log("Unhandled message type:", message.type);
    }
  }
"#;

const CLIENT_TAIL: &str = r#"
  private send(message: unknown): void {
    if (!this.ws || this.ws.readyState !== WebSocket.OPEN) {
      throw new Error("WebSocket is not connected");
    }
    this.ws.send(JSON.stringify(message));
  }

  close(): void {
    this.ws?.close();
  }

  get isConnected(): boolean {
    return this.ws !== null && this.ws.readyState === WebSocket.OPEN;
  }
}"#;

/// Render `client.ts`.
pub fn render(model: &ResolvedModel) -> String {
    let send = model.send_operations();
    let receive = model.receive_operations();
    let url = default_url(model);

    let mut module = TsModule::new("WebSocket client generated from the AsyncAPI document");
    module.import_default("WebSocket", "ws");
    module.import(payload_imports(send.values().chain(receive.values())), "./types", true);

    module.comment("Listener signature for each message the server sends");
    for message in receive.values() {
        module.raw(format!(
            "export type {}Handler = (message: {}) => void | Promise<void>;",
            message_stem(&message.name),
            type_name(&message.schema_name)
        ));
    }
    module.raw("type MessageListener = (message: unknown) => void | Promise<void>;");

    let mut class = format!(
        "export class AsyncApiWebSocketClient {{\n  private ws: WebSocket | null = null;\n  private listeners = new Map<string, MessageListener>();\n  private url: string;\n\n  constructor(url: string = \"{}\") {{\n    this.url = url;\n  }}\n\n",
        escape_js_string(&url)
    );
    class.push_str(CLIENT_CORE);

    for message in receive.values() {
        let stem = message_stem(&message.name);
        class.push_str(&format!(
            "\n  on{stem}(handler: {stem}Handler): void {{\n    this.listeners.set(\"{}\", handler as MessageListener);\n  }}\n",
            escape_js_string(&message.name)
        ));
    }
    for message in send.values() {
        let stem = message_stem(&message.name);
        let payload = type_name(&message.schema_name);
        class.push_str(&format!(
            "\n  send{stem}(message: {payload}): void {{\n    this.send(message);\n  }}\n"
        ));
    }

    class.push_str(CLIENT_TAIL);
    module.raw(class);

    module.emit()
}

/// URL a generated client connects to by default.
pub fn default_url(model: &ResolvedModel) -> String {
    model.primary_server().map_or_else(|| ServerInfo::default().url(), ServerInfo::url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::emit::test_fixtures::{empty_model, ping_pong_model};

    #[test]
    fn test_client_listeners_and_senders() {
        let out = render(&ping_pong_model());

        assert!(out.contains("import WebSocket from \"ws\";"));
        assert!(out.contains("import type { Ping, Pong } from \"./types\";"));
        assert!(out.contains("export type PongHandler = (message: Pong) => void | Promise<void>;"));
        assert!(out.contains("onPong(handler: PongHandler): void {"));
        assert!(out.contains("this.listeners.set(\"pong\", handler as MessageListener);"));
        assert!(out.contains("sendPing(message: Ping): void {"));
        assert!(!out.contains("onPing("));
        assert!(!out.contains("sendPong("));
    }

    #[test]
    fn test_client_connection_surface() {
        let out = render(&ping_pong_model());
        assert!(out.contains("constructor(url: string = \"ws://localhost:9000/ws\")"));
        assert!(out.contains("connect(): Promise<void> {"));
        assert!(out.contains("close(): void {"));
        assert!(out.contains("get isConnected(): boolean {"));
    }

    #[test]
    fn test_client_default_url() {
        let model = empty_model();
        assert_eq!(default_url(&model), "ws://localhost:8080");
        let out = render(&model);
        assert!(out.contains("constructor(url: string = \"ws://localhost:8080\")"));
    }
}
