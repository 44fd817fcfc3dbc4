//! `extsecret-ctl` — render a directory of JSON secret definitions into one
//! `ExternalSecret` manifest.

mod cli_config;
mod commands;
mod error;
mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::cli_config::{load_cli_config, resolve_settings, DEFAULT_ENVIRONMENT};
use crate::logging::Environment;

#[derive(Debug, Parser)]
#[command(name = "extsecret-ctl", version, about, styles = output::clap_styles())]
pub(crate) struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Settings shared by every command. Unset values fall back to the config file, then defaults.
#[derive(Debug, Args, Default, Clone)]
pub(crate) struct GlobalArgs {
    /// Config file (default: ./.extsecret.toml, then ~/.config/extsecret.toml)
    #[arg(long, global = true, env = "EXTSECRET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the *.json secret definitions
    #[arg(long, global = true, env = "EXTSECRET_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory the manifest is written to
    #[arg(long, global = true, env = "EXTSECRET_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Manifest file name inside the output directory
    #[arg(long, global = true, env = "EXTSECRET_OUTPUT_FILE")]
    pub output_file: Option<String>,

    /// Tera template used for every secret
    #[arg(long, global = true, env = "EXTSECRET_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Kubernetes namespace for the generated manifests
    #[arg(long, global = true, env = "EXTSECRET_NAMESPACE")]
    pub namespace: Option<String>,

    /// Vault secret-path prefix
    #[arg(long, global = true, env = "EXTSECRET_VAULT_PATH")]
    pub vault_path: Option<String>,

    /// Environment tag ("prod" switches to JSON logs)
    #[arg(long, global = true, env = "EXTSECRET_ENV")]
    pub environment: Option<String>,

    /// Append to the existing manifest instead of replacing it
    #[arg(long, global = true, env = "EXTSECRET_APPEND")]
    pub append: bool,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Render every secret definition into the output manifest (default)
    Generate,
    /// Show the secret definitions a run would process
    List,
    /// Render a single secret definition to stdout
    Preview {
        /// JSON secret definition file
        file: PathBuf,
    },
    /// Write a starter .extsecret.toml and manifest template
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "extsecret-ctl failed");
            output::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let (file_config, source) = match load_cli_config(cli.global.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            // No config to read the environment from; flags and defaults decide the log format.
            let tag = cli.global.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT);
            logging::init_logging(Environment::from_tag(tag));
            return Err(e).context("Error loading CLI config");
        }
    };
    let settings = resolve_settings(&cli.global, &file_config);

    logging::init_logging(settings.environment);
    source.log();
    tracing::debug!(environment = %settings.environment, generator = ?settings.generator, "Resolved settings");

    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Generate => commands::handle_generate_command(&settings)
            .context("Error generating ExternalSecret manifest"),
        Commands::List => {
            commands::handle_list_command(&settings).context("Error listing secret files")
        }
        Commands::Preview { file } => commands::handle_preview_command(&settings, &file)
            .with_context(|| format!("Error previewing {}", file.display())),
        Commands::Init { force } => {
            commands::handle_init_command(&settings, force).context("Error initializing project")
        }
    }
}
