//! Config file discovery and loading for `.extsecret.toml`.
//!
//! An explicit `--config` path wins and must be readable. Otherwise two
//! locations are checked in precedence order:
//! 1. `./.extsecret.toml` (project-local)
//! 2. `~/.config/extsecret.toml` (user-global)
//!
//! Loading runs before logging is set up, so the outcome is returned as a
//! [`ConfigSource`] for the caller to log.

use std::path::{Path, PathBuf};

use super::CliConfig;
use crate::error::{CliError, CliResult};

pub(crate) const CONFIG_FILENAME: &str = ".extsecret.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "extsecret.toml";

/// Where the active configuration came from.
#[derive(Debug)]
pub(crate) enum ConfigSource {
    /// Loaded from this file.
    File(PathBuf),
    /// A discovered file could not be used; defaults apply.
    Ignored { path: PathBuf, reason: String },
    /// No config file found.
    Defaults,
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            Self::File(path) => tracing::debug!(?path, "Loaded CLI config"),
            Self::Ignored { path, reason } => {
                tracing::warn!(?path, error = %reason, "Failed to load CLI config, using defaults");
            }
            Self::Defaults => tracing::debug!("No CLI config file found, using defaults"),
        }
    }
}

/// Load CLI config from `explicit`, or from the first discovered location, or return defaults.
pub(crate) fn load_cli_config(explicit: Option<&Path>) -> CliResult<(CliConfig, ConfigSource)> {
    if let Some(path) = explicit {
        let config = read_config(path)?;
        return Ok((config, ConfigSource::File(path.to_path_buf())));
    }

    match find_config_file() {
        Some(path) => match read_config(&path) {
            Ok(config) => Ok((config, ConfigSource::File(path))),
            Err(e) => Ok((
                CliConfig::default(),
                ConfigSource::Ignored {
                    path,
                    reason: e.to_string(),
                },
            )),
        },
        None => Ok((CliConfig::default(), ConfigSource::Defaults)),
    }
}

fn read_config(path: &Path) -> CliResult<CliConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&contents).map_err(|e| CliError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Search for config file in precedence order.
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    if let Some(home) = home_dir() {
        let global = home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME);
        if global.is_file() {
            return Some(global);
        }
    }

    None
}

/// Expand configured paths, resolving `~` to the home directory.
pub(crate) fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
