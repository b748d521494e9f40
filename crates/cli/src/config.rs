//! `wsgen.toml` handling and layering of generate settings.
//!
//! Precedence, lowest first: built-in defaults, the config file, flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use wsgen_core::Artifact;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "wsgen.toml";
/// Output directory used when neither the file nor a flag sets one.
pub const DEFAULT_OUT_DIR: &str = "generated";

/// Which side of the protocol to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Types, handlers, server, and the server example.
    Server,
    /// Types, client, and the client example.
    Client,
    /// Everything.
    #[default]
    Both,
}

impl Mode {
    fn artifacts(self) -> &'static [Artifact] {
        match self {
            Mode::Server => &[
                Artifact::Types,
                Artifact::Handlers,
                Artifact::Server,
                Artifact::ServerExample,
            ],
            Mode::Client => &[Artifact::Types, Artifact::Client, Artifact::ClientExample],
            Mode::Both => &Artifact::ALL,
        }
    }
}

/// Parsed `wsgen.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Settings for `wsgen generate`.
    #[serde(default)]
    pub generate: GenerateSection,
}

/// The `[generate]` table; also used to carry command-line overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateSection {
    /// Output directory.
    pub out: Option<PathBuf>,
    /// Side to generate.
    pub mode: Option<Mode>,
    /// Emit `types.ts`.
    pub types: Option<bool>,
    /// Emit `handlers.ts`.
    pub handlers: Option<bool>,
    /// Emit `server.ts` and `index.ts`.
    pub server: Option<bool>,
    /// Emit `client.ts` and `client-example.ts`.
    pub client: Option<bool>,
}

impl GenerateSection {
    /// Layer `over` on top of `self`; any field set in `over` wins.
    pub fn merge(self, over: GenerateSection) -> GenerateSection {
        GenerateSection {
            out: over.out.or(self.out),
            mode: over.mode.or(self.mode),
            types: over.types.or(self.types),
            handlers: over.handlers.or(self.handlers),
            server: over.server.or(self.server),
            client: over.client.or(self.client),
        }
    }

    /// Fill unset fields with built-in defaults.
    pub fn settings(self) -> GenerateSettings {
        GenerateSettings {
            out: self.out.unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            mode: self.mode.unwrap_or_default(),
            types: self.types.unwrap_or(true),
            handlers: self.handlers.unwrap_or(true),
            server: self.server.unwrap_or(true),
            client: self.client.unwrap_or(true),
        }
    }
}

/// Effective settings for one `generate` run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateSettings {
    /// Output directory.
    pub out: PathBuf,
    /// Side to generate.
    pub mode: Mode,
    /// Emit `types.ts`.
    pub types: bool,
    /// Emit `handlers.ts`.
    pub handlers: bool,
    /// Emit `server.ts` and `index.ts`.
    pub server: bool,
    /// Emit `client.ts` and `client-example.ts`.
    pub client: bool,
}

impl GenerateSettings {
    /// Artifacts selected by the mode, minus those switched off.
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.mode
            .artifacts()
            .iter()
            .copied()
            .filter(|artifact| match artifact {
                Artifact::Types => self.types,
                Artifact::Handlers => self.handlers,
                Artifact::Server | Artifact::ServerExample => self.server,
                Artifact::Client | Artifact::ClientExample => self.client,
            })
            .collect()
    }
}

/// Load the config file.
///
/// An explicit path must exist. Without one, `./wsgen.toml` is used when
/// present and an empty config otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigFile, String> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = PathBuf::from(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                debug!("No {CONFIG_FILE_NAME} found, using defaults.");
                return Ok(ConfigFile::default());
            }
            candidate
        }
    };

    let content = fs::read_to_string(&path)
        .map_err(|err| format!("Failed to read config {}: {err}", path.display()))?;
    let config = parse_config(&content)
        .map_err(|err| format!("Invalid config {}: {err}", path.display()))?;

    debug!(path = %path.display(), "Loaded config file.");
    Ok(config)
}

/// Parse config file contents.
pub fn parse_config(content: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(content)
}
