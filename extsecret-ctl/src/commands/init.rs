//! `extsecret-ctl init`: bootstrap a `.extsecret.toml` and a starter manifest template.

use std::path::{Path, PathBuf};

use askama::Template;
use extsecret_tooling::OutputMode;

use crate::cli_config::loader::CONFIG_FILENAME;
use crate::cli_config::ResolvedSettings;
use crate::error::{CliError, CliResult};
use crate::output;

/// Starter `ExternalSecret` template written next to the config.
const STARTER_TEMPLATE: &str = include_str!("../../templates/ext-secret.yaml.tera");

/// Askama template for generating `.extsecret.toml`.
///
/// String fields hold already-quoted TOML values.
#[derive(Template, Debug)]
#[template(path = "init-config.toml", escape = "none")]
struct InitConfigTemplate {
    environment: String,
    namespace: String,
    vault_path: String,
    input_dir: String,
    output_dir: String,
    output_file: String,
    template: String,
    append: bool,
}

impl InitConfigTemplate {
    fn from_settings(settings: &ResolvedSettings) -> Self {
        let g = &settings.generator;
        Self {
            environment: toml_string(settings.environment.to_string()),
            namespace: toml_string(&g.namespace),
            vault_path: toml_string(&g.vault_path),
            input_dir: toml_string(g.input_dir.display().to_string()),
            output_dir: toml_string(g.output_dir.display().to_string()),
            output_file: toml_string(&g.output_file),
            template: toml_string(g.template_path.display().to_string()),
            append: g.mode == OutputMode::Append,
        }
    }
}

fn toml_string(value: impl Into<String>) -> String {
    toml::Value::String(value.into()).to_string()
}

pub(crate) fn handle_init_command(settings: &ResolvedSettings, force: bool) -> CliResult<()> {
    let created = write_scaffold(Path::new("."), settings, force).inspect_err(|e| {
        if matches!(e, CliError::AlreadyExists(_)) {
            output::warning(format!("{e}."));
            output::hint("Pass --force to overwrite it.");
        }
    })?;

    for path in &created {
        output::success(format!("Created {}", path.display()));
    }
    if created.is_empty() {
        output::dim("Nothing to create; config and template already exist.");
    }

    output::blank();
    output::hint("Next steps:");
    output::plain("  extsecret-ctl list        # Check which secret files will be rendered");
    output::plain("  extsecret-ctl generate    # Write the ExternalSecret manifest");

    Ok(())
}

/// Write the config file and, if missing, the starter template under `base`.
///
/// An existing config is an error unless `force` is set. An existing template is
/// left alone unless `force` is set.
fn write_scaffold(base: &Path, settings: &ResolvedSettings, force: bool) -> CliResult<Vec<PathBuf>> {
    let config_path = base.join(CONFIG_FILENAME);
    if config_path.exists() && !force {
        return Err(CliError::AlreadyExists(config_path));
    }

    let content = InitConfigTemplate::from_settings(settings).render()?;
    write_file(&config_path, &content)?;
    let mut created = vec![config_path];

    let template_path = base.join(&settings.generator.template_path);
    if force || !template_path.exists() {
        if let Some(parent) = template_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CliError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        write_file(&template_path, STARTER_TEMPLATE)?;
        created.push(template_path);
    }

    Ok(created)
}

fn write_file(path: &Path, content: &str) -> CliResult<()> {
    std::fs::write(path, content).map_err(|e| CliError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(?path, "Wrote scaffold file");
    Ok(())
}
