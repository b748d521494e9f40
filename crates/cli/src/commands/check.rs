use clap::Args;
use std::path::PathBuf;

use wsgen_core::ResolvedModel;

use crate::commands::run_command;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[arg(value_name = "SCHEMA", help = "AsyncAPI document (.yaml, .yml or .json)")]
    pub schema: PathBuf,
}

pub fn run(args: CheckArgs) -> i32 {
    run_command(|| run_inner(&args))
}

pub fn run_inner(args: &CheckArgs) -> Result<(), String> {
    let model = wsgen_core::load_model(&args.schema)
        .map_err(|err| format!("{}: {err}", args.schema.display()))?;
    print!("{}", summary(&model));
    Ok(())
}

/// Human-readable overview of a resolved model.
pub fn summary(model: &ResolvedModel) -> String {
    let list = |names: Vec<&str>| {
        if names.is_empty() {
            "(none)".to_string()
        } else {
            names.join(", ")
        }
    };

    let mut out = format!("{} {}\n", model.title(), model.version());
    if let Some(description) = model.description() {
        out.push_str(&format!("{}\n", description.trim_end()));
    }
    for server in model.servers() {
        out.push_str(&format!("server {}: {}\n", server.name, server.url()));
    }
    out.push_str(&format!(
        "channels: {}\n",
        list(model.channels().iter().map(|c| c.name.as_str()).collect())
    ));
    out.push_str(&format!(
        "schemas: {}\n",
        list(model.schemas().keys().map(String::as_str).collect())
    ));
    out.push_str(&format!(
        "messages: {}\n",
        list(model.messages().keys().map(String::as_str).collect())
    ));
    for op in model.operations() {
        out.push_str(&format!(
            "operation {} ({} on {}): {}\n",
            op.name,
            op.direction.as_str(),
            op.channel,
            list(op.messages.iter().map(String::as_str).collect())
        ));
    }
    out.push_str(&format!(
        "send: {}\n",
        list(model.send_operations().keys().map(String::as_str).collect())
    ));
    out.push_str(&format!(
        "receive: {}\n",
        list(model.receive_operations().keys().map(String::as_str).collect())
    ));
    out.push_str(&format!("message types: {}\n", list(model.message_type_union())));
    out
}
