//! Secret definition types: discovered files, parsed records, and the per-file
//! template context.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

/// Parsed contents of one secret definition file. Any JSON object is accepted.
pub type SecretRecord = Map<String, Value>;

/// A discovered secret definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretFile {
    /// Path joined with the directory that was searched.
    pub path: PathBuf,
    /// File name without its extension, used as the manifest name.
    pub name: String,
}

impl SecretFile {
    pub fn new(path: PathBuf) -> Self {
        let name = base_name(&path);
        Self { path, name }
    }
}

/// File name minus its last extension: `/a/b/my-secret.json` → `my-secret`, `config` → `config`.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parse raw bytes into a [`SecretRecord`]. Top-level values other than objects are rejected.
pub fn parse_record(bytes: &[u8]) -> Result<SecretRecord, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Values exposed to the manifest template for a single secret.
///
/// Field names are serialized as `Name`, `Namespace`, `VaultPath` and `Data`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateContext {
    pub name: String,
    pub namespace: String,
    pub vault_path: String,
    pub data: SecretRecord,
}

impl TemplateContext {
    pub fn new(
        file: &SecretFile,
        namespace: impl Into<String>,
        vault_path: impl Into<String>,
        data: SecretRecord,
    ) -> Self {
        Self {
            name: file.name.clone(),
            namespace: namespace.into(),
            vault_path: vault_path.into(),
            data,
        }
    }

    /// Build the Tera context. `JsonData` is kept as an alias of `Data` for older templates.
    pub fn to_tera_context(&self) -> Result<tera::Context, tera::Error> {
        let mut context = tera::Context::from_serialize(self)?;
        context.insert("JsonData", &self.data);
        Ok(context)
    }
}
