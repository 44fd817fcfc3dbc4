//! Secret definition discovery via a single-level directory scan.
//!
//! Only direct entries of the input directory are considered. An entry matches
//! when it is not a directory and its extension is exactly `json`. Matches are
//! sorted by file name so manifest order does not depend on the filesystem.

use std::path::Path;

use crate::error::{GenerateError, GenerateResult};
use crate::secret::SecretFile;

const SECRET_EXTENSION: &str = "json";

/// Discover all secret definition files directly under `dir`.
pub fn discover_secret_files(dir: &Path) -> GenerateResult<Vec<SecretFile>> {
    let entries = std::fs::read_dir(dir).map_err(|e| directory_read_error(dir, e))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| directory_read_error(dir, e))?;
        let path = entry.path();
        if path.is_dir() || !is_secret_file(&path) {
            continue;
        }
        found.push(SecretFile::new(path));
    }

    if found.is_empty() {
        tracing::error!(?dir, "No JSON files found in directory");
        return Err(GenerateError::NoMatchingFiles {
            dir: dir.to_path_buf(),
        });
    }

    found.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    for file in &found {
        tracing::info!(path = %file.path.display(), "Found JSON file");
    }

    Ok(found)
}

fn directory_read_error(dir: &Path, e: std::io::Error) -> GenerateError {
    tracing::error!(?dir, error = %e, "Error reading directory");
    GenerateError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    }
}

fn is_secret_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(SECRET_EXTENSION)
}
