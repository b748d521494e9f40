//! Document loading: read a schema file and parse it into an untyped tree.
//!
//! The format is chosen from the file extension. Both formats land in a
//! `serde_json::Value` whose maps keep document order, so every later stage
//! sees one tree shape regardless of the source format.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// Source format of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl Format {
    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }
}

/// Parse document text in the given format.
pub fn parse_str(content: &str, format: Format) -> std::result::Result<Value, String> {
    match format {
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Read and parse a schema file.
pub fn load(path: &Path) -> Result<Value> {
    let format = Format::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        format = ?format,
        bytes = content.len(),
        "Loaded schema document."
    );

    parse_str(&content, format).map_err(|message| Error::Parse {
        path: path.to_path_buf(),
        message,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("a.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("dir/a.json")).unwrap(), Format::Json);

        let err = Format::from_path(Path::new("a.toml")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "toml"));

        let err = Format::from_path(Path::new("schema")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension.is_empty()));
    }

    #[test]
    fn test_yaml_keeps_key_order() {
        let value = parse_str("zeta: 1\nalpha: 2\nmid: 3\n", Format::Yaml).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_json_and_yaml_agree() {
        let json = parse_str(r#"{"asyncapi": "3.0.0", "info": {"title": "T"}}"#, Format::Json).unwrap();
        let yaml = parse_str("asyncapi: 3.0.0\ninfo:\n  title: T\n", Format::Yaml).unwrap();
        assert_eq!(json, yaml);
    }

    #[test]
    fn test_invalid_text_is_reported() {
        assert!(parse_str("{ not json", Format::Json).is_err());
        assert!(parse_str("a: [1, 2", Format::Yaml).is_err());
    }
}
