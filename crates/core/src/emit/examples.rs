//! Runnable entry points: `index.ts` for the server, `client-example.ts`.

use super::Emit;
use super::ts::{ImportItem, TsModule};
use super::utils::{escape_js_string, message_stem};
use crate::model::{DEFAULT_PORT, ResolvedModel};

const SHUTDOWN: &str = "process.on(\"SIGINT\", () => {\n  console.log(\"Shutting down...\");\n";

/// Render `index.ts`: registers every default handler and starts the server.
pub fn render_server_example(model: &ResolvedModel) -> String {
    let send = model.send_operations();
    let port = model.primary_server().map_or(DEFAULT_PORT, |s| s.port_or_default());

    let mut module = TsModule::new(format!("Example server for {}", model.title()));
    module.import(vec![ImportItem::named("AsyncApiWebSocketServer")], "./server", false);
    let mut handler_imports = vec![ImportItem::named("MessageHandlerRegistry")];
    handler_imports.extend(
        send.values()
            .map(|m| ImportItem::named(format!("Default{}Handler", message_stem(&m.name)))),
    );
    module.import(handler_imports, "./handlers", false);

    let mut setup = String::from("const registry = new MessageHandlerRegistry();\n");
    for message in send.values() {
        let stem = message_stem(&message.name);
        setup.push_str(&format!("registry.register{stem}(new Default{stem}Handler());\n"));
    }
    module.comment("Register the default handler for every message the server accepts");
    module.raw(setup);

    module.raw(format!(
        "const server = new AsyncApiWebSocketServer({port}, registry);\n\n{SHUTDOWN}  server.close();\n  process.exit(0);\n}});"
    ));

    module.emit()
}

/// Render `client-example.ts`: subscribes to every server message and connects.
pub fn render_client_example(model: &ResolvedModel) -> String {
    let mut module = TsModule::new(format!("Example client for {}", model.title()));
    module.import(vec![ImportItem::named("AsyncApiWebSocketClient")], "./client", false);

    let mut body = String::from("const client = new AsyncApiWebSocketClient();\n");
    for message in model.receive_operations().values() {
        let stem = message_stem(&message.name);
        body.push_str(&format!(
            "\nclient.on{stem}((message) => {{\n  console.log(\"Received {}:\", message);\n}});\n",
            escape_js_string(&message.name)
        ));
    }
    module.raw(body);

    module.raw(format!(
        "async function main(): Promise<void> {{\n  await client.connect();\n  console.log(\"Client connected\");\n}}\n\nmain().catch((error) => {{\n  console.error(\"Failed to connect:\", error);\n  process.exit(1);\n}});\n\n{SHUTDOWN}  client.close();\n  process.exit(0);\n}});"
    ));

    module.emit()
}
