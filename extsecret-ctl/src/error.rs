//! Error types for CLI operations.

use std::path::PathBuf;

use extsecret_tooling::GenerateError;

pub(crate) type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{0} already exists")]
    AlreadyExists(PathBuf),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("scaffold rendering failed: {0}")]
    Scaffold(#[from] askama::Error),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}
