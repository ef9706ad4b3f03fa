//! CLI subcommands.

pub mod load;
pub mod validate;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors reading an input file.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported file extension for {}: use .json, .yaml or .yml", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Input document syntax, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Syntax {
    Json,
    Yaml,
}

impl Syntax {
    fn of(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, InputError> {
        Ok(match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
        })
    }
}

/// Read and deserialize a JSON or YAML file.
///
/// # Errors
///
/// Returns `InputError` if the file is missing, has an unknown extension,
/// cannot be read, or does not deserialize into `T`.
pub async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    let syntax =
        Syntax::of(path).ok_or_else(|| InputError::UnsupportedExtension(path.to_path_buf()))?;

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    syntax.parse(&content)
}
