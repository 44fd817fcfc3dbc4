//! Error types for a generation run.
//!
//! Every variant is terminal: the pipeline stops at the first one and nothing is
//! retried. Each carries the path it concerns so the top level can report it.

use std::path::PathBuf;

/// Result type for generation operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no JSON files found in directory: {dir}")]
    NoMatchingFiles { dir: PathBuf },

    #[error("failed to read template file {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse template file {path}: {source}")]
    TemplateParse { path: PathBuf, source: tera::Error },

    #[error("failed to create output directory {path}: {source}")]
    OutputDirCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read JSON file {path}: {source}")]
    JsonFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to unmarshal JSON file {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to open output file {path}: {source}")]
    OutputFileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to execute template for JSON file {path}: {source}")]
    TemplateExec { path: PathBuf, source: tera::Error },
}

impl GenerateError {
    /// Path of the file or directory the error concerns.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::DirectoryRead { path, .. }
            | Self::TemplateRead { path, .. }
            | Self::TemplateParse { path, .. }
            | Self::OutputDirCreate { path, .. }
            | Self::JsonFileRead { path, .. }
            | Self::JsonParse { path, .. }
            | Self::OutputFileOpen { path, .. }
            | Self::OutputWrite { path, .. }
            | Self::TemplateExec { path, .. } => path,
            Self::NoMatchingFiles { dir } => dir,
        }
    }
}
