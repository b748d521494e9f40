use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::commands::run_command;
use crate::config::{GenerateSection, Mode, load_config};
use crate::writer::write_all;

#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateArgs {
    #[arg(value_name = "SCHEMA", help = "AsyncAPI document (.yaml, .yml or .json)")]
    pub schema: PathBuf,

    #[arg(short, long, value_name = "DIR", help = "Output directory [default: generated]")]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, help = "Which side to generate [default: both]")]
    pub mode: Option<Mode>,

    #[arg(long, help = "Skip types.ts")]
    pub no_types: bool,

    #[arg(long, help = "Skip handlers.ts")]
    pub no_handlers: bool,

    #[arg(long, help = "Skip server.ts and index.ts")]
    pub no_server: bool,

    #[arg(long, help = "Skip client.ts and client-example.ts")]
    pub no_client: bool,

    #[arg(long, value_name = "FILE", help = "Config file [default: ./wsgen.toml if present]")]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Flags as a config layer; unset flags leave the lower layers alone.
    fn overrides(&self) -> GenerateSection {
        let off = |flag: bool| flag.then_some(false);
        GenerateSection {
            out: self.out.clone(),
            mode: self.mode,
            types: off(self.no_types),
            handlers: off(self.no_handlers),
            server: off(self.no_server),
            client: off(self.no_client),
        }
    }
}

pub fn run(args: GenerateArgs) -> i32 {
    run_command(|| run_inner(&args))
}

pub fn run_inner(args: &GenerateArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let settings = config.generate.merge(args.overrides()).settings();
    debug!(?settings, "Resolved generate settings.");

    let artifacts = settings.artifacts();
    if artifacts.is_empty() {
        return Err("Nothing to generate: every artifact is disabled".to_string());
    }

    let model = wsgen_core::load_model(&args.schema)
        .map_err(|err| format!("{}: {err}", args.schema.display()))?;

    // Render everything before touching the output directory.
    let rendered = wsgen_core::render_all(&model, &artifacts);
    let written = write_all(&settings.out, &rendered)?;

    info!(
        out = %settings.out.display(),
        files = written.len(),
        "Generated WebSocket code."
    );
    for path in &written {
        println!("Generated {}", path.display());
    }
    Ok(())
}
