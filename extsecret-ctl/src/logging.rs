//! Tracing subscriber setup keyed on the environment tag.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "extsecret_ctl=info,extsecret_tooling=info";

/// Deployment environment. Only affects log formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Environment {
    /// Human-readable console logs.
    Devel,
    /// One JSON object per log line.
    Prod,
}

impl Environment {
    /// `prod` (any case) selects [`Environment::Prod`]; every other tag is development.
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("prod") {
            Self::Prod
        } else {
            Self::Devel
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Devel => write!(f, "devel"),
            Self::Prod => write!(f, "prod"),
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub(crate) fn init_logging(environment: Environment) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match environment {
        Environment::Prod => builder.json().init(),
        Environment::Devel => builder.with_target(false).init(),
    }
}
