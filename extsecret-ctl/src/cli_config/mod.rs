//! CLI configuration: the optional `.extsecret.toml` file and its merge with flags.
//!
//! Precedence for every setting is flag (or its environment variable) > config
//! file > built-in default.

pub(crate) mod loader;

pub(crate) use loader::load_cli_config;

use std::path::PathBuf;

use extsecret_tooling::pipeline::DEFAULT_OUTPUT_FILE;
use extsecret_tooling::{GeneratorSettings, OutputMode};
use serde::Deserialize;

use crate::logging::Environment;
use crate::GlobalArgs;

pub(crate) const DEFAULT_INPUT_DIR: &str = "../vault-secrets";
pub(crate) const DEFAULT_OUTPUT_DIR: &str = "../ext-secrets";
pub(crate) const DEFAULT_TEMPLATE: &str = "./template/ext-secret.yaml.tera";
pub(crate) const DEFAULT_ENVIRONMENT: &str = "devel";
pub(crate) const DEFAULT_NAMESPACE: &str = "default";
pub(crate) const DEFAULT_VAULT_PATH: &str = "secret/test";

/// Settings read from `.extsecret.toml`. Every field is optional.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Environment tag; `prod` switches logs to JSON.
    pub environment: Option<String>,

    /// Kubernetes namespace written into every manifest.
    pub namespace: Option<String>,

    /// Vault secret-path prefix.
    pub vault_path: Option<String>,

    /// Directory holding the `*.json` secret definitions.
    pub input_dir: Option<String>,

    /// Directory the manifest is written to.
    pub output_dir: Option<String>,

    /// Manifest file name inside `output-dir`.
    pub output_file: Option<String>,

    /// Path to the Tera manifest template.
    pub template: Option<String>,

    /// Append to the existing manifest instead of replacing it.
    pub append: Option<bool>,
}

/// Fully merged settings for one invocation.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedSettings {
    pub environment: Environment,
    pub generator: GeneratorSettings,
}

/// Merge flags over the config file over built-in defaults.
pub(crate) fn resolve_settings(args: &GlobalArgs, config: &CliConfig) -> ResolvedSettings {
    let environment = pick(&args.environment, &config.environment, DEFAULT_ENVIRONMENT);

    let path = |flag: &Option<PathBuf>, file: &Option<String>, default: &str| -> PathBuf {
        match (flag, file) {
            (Some(p), _) => p.clone(),
            (None, Some(p)) => loader::expand_path(p),
            (None, None) => PathBuf::from(default),
        }
    };

    let append = args.append || config.append.unwrap_or(false);

    ResolvedSettings {
        environment: Environment::from_tag(&environment),
        generator: GeneratorSettings {
            input_dir: path(&args.input_dir, &config.input_dir, DEFAULT_INPUT_DIR),
            output_dir: path(&args.output_dir, &config.output_dir, DEFAULT_OUTPUT_DIR),
            output_file: pick(&args.output_file, &config.output_file, DEFAULT_OUTPUT_FILE),
            template_path: path(&args.template, &config.template, DEFAULT_TEMPLATE),
            namespace: pick(&args.namespace, &config.namespace, DEFAULT_NAMESPACE),
            vault_path: pick(&args.vault_path, &config.vault_path, DEFAULT_VAULT_PATH),
            mode: if append {
                OutputMode::Append
            } else {
                OutputMode::Replace
            },
        },
    }
}

fn pick(flag: &Option<String>, file: &Option<String>, default: &str) -> String {
    flag.clone()
        .or_else(|| file.clone())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_set() {
        let resolved = resolve_settings(&GlobalArgs::default(), &CliConfig::default());
        let g = &resolved.generator;
        assert_eq!(resolved.environment, Environment::Devel);
        assert_eq!(g.input_dir, PathBuf::from("../vault-secrets"));
        assert_eq!(g.output_dir, PathBuf::from("../ext-secrets"));
        assert_eq!(g.output_path(), PathBuf::from("../ext-secrets/ext-secrets.yaml"));
        assert_eq!(g.template_path, PathBuf::from("./template/ext-secret.yaml.tera"));
        assert_eq!(g.namespace, "default");
        assert_eq!(g.vault_path, "secret/test");
        assert_eq!(g.mode, OutputMode::Replace);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
environment = "prod"
namespace = "payments"
vault-path = "secret/payments"
input-dir = "./secrets"
append = true
"#,
        )
        .unwrap();
        let resolved = resolve_settings(&GlobalArgs::default(), &config);
        assert_eq!(resolved.environment, Environment::Prod);
        assert_eq!(resolved.generator.namespace, "payments");
        assert_eq!(resolved.generator.vault_path, "secret/payments");
        assert_eq!(resolved.generator.input_dir, PathBuf::from("./secrets"));
        assert_eq!(resolved.generator.mode, OutputMode::Append);
    }

    #[test]
    fn test_flags_override_config_file() {
        let config = CliConfig {
            namespace: Some("payments".to_string()),
            output_dir: Some("./from-file".to_string()),
            ..Default::default()
        };
        let args = GlobalArgs {
            namespace: Some("billing".to_string()),
            output_dir: Some(PathBuf::from("./from-flag")),
            ..Default::default()
        };
        let resolved = resolve_settings(&args, &config);
        assert_eq!(resolved.generator.namespace, "billing");
        assert_eq!(resolved.generator.output_dir, PathBuf::from("./from-flag"));
    }

    #[test]
    fn test_config_paths_expand_home() {
        let config = CliConfig {
            template: Some("~/templates/ext-secret.yaml.tera".to_string()),
            ..Default::default()
        };
        let resolved = resolve_settings(&GlobalArgs::default(), &config);
        let template = resolved.generator.template_path.to_string_lossy().into_owned();
        assert!(template.ends_with("templates/ext-secret.yaml.tera"));
        assert!(!template.starts_with('~'));
    }

    #[test]
    fn test_unknown_config_key_rejected() {
        let result: Result<CliConfig, _> = toml::from_str("namespce = \"typo\"\n");
        assert!(result.is_err());
    }
}
