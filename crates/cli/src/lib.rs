//! Command-line front end for `wsgen`.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod commands;
pub mod config;
pub mod writer;

pub use commands::check::summary;

/// Filter target covering every wsgen crate.
const LOG_TARGET: &str = "wsgen";

#[derive(Parser, Debug)]
#[command(
    name = "wsgen",
    version,
    about = "Generate typed WebSocket servers and clients from AsyncAPI documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate TypeScript server and client code
    Generate(commands::generate::GenerateArgs),
    /// Validate a document and print its resolved model
    Check(commands::check::CheckArgs),
}

/// Parse `args` (including the program name) and run the chosen command.
///
/// Returns the process exit code.
pub fn run(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => commands::generate::run(args),
            Some(Commands::Check(args)) => commands::check::run(args),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

/// Install the stderr log subscriber.
pub fn init_tracing() {
    // WSGEN_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "wsgen_core=trace,wsgen_cli=info"
    let filter = log_filter(std::env::var("WSGEN_LOG").ok().as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn log_filter(env: Option<&str>) -> String {
    match env {
        Some(level) if is_plain_level(level) => format!("{LOG_TARGET}={level}"),
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ => format!("{LOG_TARGET}=info"),
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
