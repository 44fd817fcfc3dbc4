//! Tera-based manifest template, parsed once and rendered per secret.

use std::io::Write;
use std::path::{Path, PathBuf};

use tera::Tera;

use super::filters;
use crate::error::{GenerateError, GenerateResult};
use crate::secret::TemplateContext;

const TEMPLATE_NAME: &str = "ext-secret";

/// A parsed manifest template with the custom filters registered.
#[derive(Debug)]
pub struct SecretTemplate {
    tera: Tera,
    path: PathBuf,
}

impl SecretTemplate {
    /// Read and parse the template at `path`.
    pub fn load(path: &Path) -> GenerateResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!(?path, error = %e, "Error reading template file");
            GenerateError::TemplateRead {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
        Self::from_source(path, &source)
    }

    /// Parse template source that was read elsewhere. `path` is only used for error reporting.
    pub fn from_source(path: &Path, source: &str) -> GenerateResult<Self> {
        let mut tera = Tera::default();
        // Manifests are YAML, never HTML.
        tera.autoescape_on(Vec::new());

        tera.register_filter("snake_case", filters::snake_case);
        tera.register_filter("pascal_case", filters::pascal_case);
        tera.register_filter("camel_case", filters::camel_case);
        tera.register_filter("kebab_case", filters::kebab_case);
        tera.register_filter("dns_label", filters::dns_label);

        tera.add_raw_template(TEMPLATE_NAME, source).map_err(|e| {
            tracing::error!(?path, error = %e, "Error parsing template file");
            GenerateError::TemplateParse {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        Ok(Self {
            tera,
            path: path.to_path_buf(),
        })
    }

    /// Where the template source came from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render one secret. `origin` is the JSON file the context was built from.
    pub fn render(&self, context: &TemplateContext, origin: &Path) -> GenerateResult<String> {
        let mut buf = Vec::new();
        self.render_to(context, origin, &mut buf)?;
        // Tera only emits what the template and the (UTF-8) JSON values contain.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Render one secret into `out`.
    pub fn render_to(
        &self,
        context: &TemplateContext,
        origin: &Path,
        out: impl Write,
    ) -> GenerateResult<()> {
        let exec_error = |e: tera::Error| {
            tracing::error!(path = ?origin, error = %e, "Error executing template for JSON file");
            GenerateError::TemplateExec {
                path: origin.to_path_buf(),
                source: e,
            }
        };

        let tera_context = context.to_tera_context().map_err(exec_error)?;
        self.tera
            .render_to(TEMPLATE_NAME, &tera_context, out)
            .map_err(exec_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret::{parse_record, SecretFile, SecretRecord};
    use std::fs;

    const MANIFEST_TEMPLATE: &str = r#"---
apiVersion: external-secrets.io/v1beta1
kind: ExternalSecret
metadata:
  name: {{ Name }}
  namespace: {{ Namespace }}
spec:
  data:
{%- for key, value in Data %}
    - secretKey: {{ key }}
      remoteRef:
        key: {{ VaultPath }}/{{ Name }}
        property: {{ key }}
{%- endfor %}
"#;

    fn context(json: &str) -> TemplateContext {
        let file = SecretFile::new(PathBuf::from("/a/b/my-secret.json"));
        TemplateContext::new(&file, "default", "secret/test", parse_record(json.as_bytes()).unwrap())
    }

    #[test]
    fn test_render_enumerates_record_keys() {
        let template = SecretTemplate::from_source(Path::new("inline"), MANIFEST_TEMPLATE).unwrap();
        let rendered = template
            .render(&context(r#"{"user":"alice","pass":"secret"}"#), Path::new("my-secret.json"))
            .unwrap();

        assert!(rendered.contains("name: my-secret"));
        assert!(rendered.contains("namespace: default"));
        assert!(rendered.contains("secretKey: user"));
        assert!(rendered.contains("secretKey: pass"));
        assert!(rendered.contains("key: secret/test/my-secret"));
    }

    #[test]
    fn test_render_key_value_pairs_verbatim() {
        let template =
            SecretTemplate::from_source(Path::new("inline"), "name: {{ Name }}\n{% for k, v in Data %}{{ k }}: {{ v }}\n{% endfor %}")
                .unwrap();
        let rendered = template
            .render(&context(r#"{"user":"alice","pass":"secret"}"#), Path::new("my-secret.json"))
            .unwrap();

        assert!(rendered.contains("name: my-secret"));
        assert!(rendered.contains("user: alice"));
        assert!(rendered.contains("pass: secret"));
    }

    #[test]
    fn test_render_nested_values() {
        let template = SecretTemplate::from_source(
            Path::new("inline"),
            "{{ Data.db.host }}:{{ Data.db.port }} {% for h in Data.hosts %}[{{ h }}]{% endfor %}",
        )
        .unwrap();
        let rendered = template
            .render(
                &context(r#"{"db":{"host":"pg","port":5432},"hosts":["a","b"]}"#),
                Path::new("my-secret.json"),
            )
            .unwrap();
        assert_eq!(rendered, "pg:5432 [a][b]");
    }

    #[test]
    fn test_render_does_not_escape() {
        let template = SecretTemplate::from_source(Path::new("inline"), "{{ Data.pass }}").unwrap();
        let rendered = template
            .render(&context(r#"{"pass":"<a&b>"}"#), Path::new("my-secret.json"))
            .unwrap();
        assert_eq!(rendered, "<a&b>");
    }

    #[test]
    fn test_render_with_filters() {
        let template =
            SecretTemplate::from_source(Path::new("inline"), "{{ Name | dns_label }}/{{ Name | snake_case }}")
                .unwrap();
        let rendered = template.render(&context("{}"), Path::new("my-secret.json")).unwrap();
        assert_eq!(rendered, "my-secret/my_secret");
    }

    #[test]
    fn test_dns_label_on_multibyte_name() {
        let template =
            SecretTemplate::from_source(Path::new("inline"), "{{ Name | dns_label }}").unwrap();

        let file = SecretFile::new(PathBuf::from("пароль-базы-данных-prod-db.json"));
        let ctx = TemplateContext::new(&file, "default", "secret/test", SecretRecord::new());
        assert_eq!(template.render(&ctx, &file.path).unwrap(), "prod-db");

        let file = SecretFile::new(PathBuf::from("пароль-базы-данных-основной.json"));
        let ctx = TemplateContext::new(&file, "default", "secret/test", SecretRecord::new());
        let err = template.render(&ctx, &file.path).unwrap_err();
        assert!(matches!(err, GenerateError::TemplateExec { .. }));
        assert_eq!(err.path(), file.path.as_path());
    }

    #[test]
    fn test_legacy_json_data_alias() {
        let template = SecretTemplate::from_source(Path::new("inline"), "{{ JsonData.user }}").unwrap();
        let rendered = template
            .render(&context(r#"{"user":"alice"}"#), Path::new("my-secret.json"))
            .unwrap();
        assert_eq!(rendered, "alice");
    }

    #[test]
    fn test_undefined_variable_names_input_file() {
        let template = SecretTemplate::from_source(Path::new("inline"), "{{ Data.missing }}").unwrap();
        let err = template
            .render(&context(r#"{"user":"alice"}"#), Path::new("vault/db.json"))
            .unwrap_err();
        assert!(matches!(err, GenerateError::TemplateExec { .. }));
        assert_eq!(err.path(), Path::new("vault/db.json"));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = SecretTemplate::from_source(Path::new("broken.tera"), "{% for k in Data %}").unwrap_err();
        assert!(matches!(err, GenerateError::TemplateParse { .. }));
        assert_eq!(err.path(), Path::new("broken.tera"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ext-secret.yaml.tera");
        fs::write(&path, MANIFEST_TEMPLATE).unwrap();

        let template = SecretTemplate::load(&path).unwrap();
        assert_eq!(template.path(), path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SecretTemplate::load(Path::new("/nonexistent/ext-secret.yaml.tera")).unwrap_err();
        assert!(matches!(err, GenerateError::TemplateRead { .. }));
    }

    #[test]
    fn test_rendered_manifest_is_valid_yaml() {
        let template = SecretTemplate::from_source(Path::new("inline"), MANIFEST_TEMPLATE).unwrap();
        let rendered = template
            .render(&context(r#"{"user":"alice","pass":"secret"}"#), Path::new("my-secret.json"))
            .unwrap();

        let doc: serde_yaml::Value = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(doc["kind"], "ExternalSecret");
        assert_eq!(doc["metadata"]["name"], "my-secret");
        assert_eq!(doc["spec"]["data"].as_sequence().unwrap().len(), 2);
    }
}
