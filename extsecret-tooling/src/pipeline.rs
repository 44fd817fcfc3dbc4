//! Generation pipeline: discover → parse template → render every secret → commit.
//!
//! Rendered blocks are collected in discovery order and written once at the end,
//! so a failing run never leaves a half-written manifest behind. How the
//! finished manifest meets an existing file is decided by [`OutputMode`].

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::discovery::discover_secret_files;
use crate::error::{GenerateError, GenerateResult};
use crate::secret::{parse_record, SecretFile, TemplateContext};
use crate::template_engine::SecretTemplate;

/// Default manifest file name inside the output directory.
pub const DEFAULT_OUTPUT_FILE: &str = "ext-secrets.yaml";

/// How the rendered manifest is written to the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Atomically replace the output file. Re-runs produce identical output.
    #[default]
    Replace,
    /// Append to the existing output file. Re-runs stack duplicate blocks.
    Append,
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Replace => write!(f, "replace"),
            Self::Append => write!(f, "append"),
        }
    }
}

/// Everything a run needs, resolved before the pipeline starts.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub output_file: String,
    pub template_path: PathBuf,
    pub namespace: String,
    pub vault_path: String,
    pub mode: OutputMode,
}

impl GeneratorSettings {
    /// Full path of the manifest file.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunSummary {
    pub files: Vec<SecretFile>,
    pub output_path: PathBuf,
    pub bytes_written: usize,
    pub mode: OutputMode,
}

#[derive(Debug)]
pub struct Pipeline {
    settings: GeneratorSettings,
}

impl Pipeline {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// List the secret files a run would process, without rendering anything.
    pub fn discover(&self) -> GenerateResult<Vec<SecretFile>> {
        discover_secret_files(&self.settings.input_dir)
    }

    /// Run the full generation pass.
    pub fn run(&self) -> GenerateResult<RunSummary> {
        let files = self.discover()?;
        let template = SecretTemplate::load(&self.settings.template_path)?;

        let output_dir = &self.settings.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|e| {
            tracing::error!(?output_dir, error = %e, "Error creating output directory");
            GenerateError::OutputDirCreate {
                path: output_dir.clone(),
                source: e,
            }
        })?;

        let mut manifest = Vec::new();
        for file in &files {
            let context = self.load_context(file)?;
            template.render_to(&context, &file.path, &mut manifest)?;
            tracing::info!(path = %file.path.display(), name = %file.name, "Processed JSON file");
        }

        let output_path = self.settings.output_path();
        match self.settings.mode {
            OutputMode::Replace => replace_output(&output_path, &manifest)?,
            OutputMode::Append => append_output(&output_path, &manifest)?,
        }

        tracing::info!(
            path = %output_path.display(),
            files = files.len(),
            mode = %self.settings.mode,
            "Successfully generated manifest"
        );

        Ok(RunSummary {
            files,
            output_path,
            bytes_written: manifest.len(),
            mode: self.settings.mode,
        })
    }

    /// Render a single secret definition file without touching the output directory.
    pub fn preview(&self, path: &Path) -> GenerateResult<String> {
        let template = SecretTemplate::load(&self.settings.template_path)?;
        let file = SecretFile::new(path.to_path_buf());
        let context = self.load_context(&file)?;
        template.render(&context, &file.path)
    }

    fn load_context(&self, file: &SecretFile) -> GenerateResult<TemplateContext> {
        let path = &file.path;
        let bytes = std::fs::read(path).map_err(|e| {
            tracing::error!(?path, error = %e, "Error reading JSON file");
            GenerateError::JsonFileRead {
                path: path.clone(),
                source: e,
            }
        })?;

        let record = parse_record(&bytes).map_err(|e| {
            tracing::error!(?path, error = %e, "Error unmarshalling JSON file");
            GenerateError::JsonParse {
                path: path.clone(),
                source: e,
            }
        })?;

        Ok(TemplateContext::new(
            file,
            &self.settings.namespace,
            &self.settings.vault_path,
            record,
        ))
    }
}

/// Write to a temp file beside the target, then rename over it.
fn replace_output(path: &Path, contents: &[u8]) -> GenerateResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        tracing::error!(?path, error = %e, "Error opening output file");
        GenerateError::OutputFileOpen {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    let write_error = |e: std::io::Error| {
        tracing::error!(?path, error = %e, "Error writing output file");
        GenerateError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        }
    };

    let permissions = target_permissions(path)?;
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(write_error)?;
    tmp.write_all(contents).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

/// Permissions the replaced manifest should carry: those of the existing file,
/// or for a new file whatever a plain create gives under the process umask
/// (the same mode [`OutputMode::Append`] produces).
fn target_permissions(path: &Path) -> GenerateResult<std::fs::Permissions> {
    let open_error = |e: std::io::Error| {
        tracing::error!(?path, error = %e, "Error opening output file");
        GenerateError::OutputFileOpen {
            path: path.to_path_buf(),
            source: e,
        }
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_error)?;
    file.metadata().map(|m| m.permissions()).map_err(open_error)
}

fn append_output(path: &Path, contents: &[u8]) -> GenerateResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            tracing::error!(?path, error = %e, "Error opening output file");
            GenerateError::OutputFileOpen {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

    file.write_all(contents).map_err(|e| {
        tracing::error!(?path, error = %e, "Error writing output file");
        GenerateError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        }
    })
}
