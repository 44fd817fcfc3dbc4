//! Shared tooling for turning JSON secret definitions into an `ExternalSecret` manifest.
//!
//! This crate holds everything `extsecret-ctl` needs to run a generation pass. It has
//! no CLI concerns: configuration arrives as a [`GeneratorSettings`] value.
//!
//! # Modules
//!
//! - [`discovery`] — Non-recursive lookup of `*.json` secret definition files
//! - [`secret`] — Secret file, record and template context types
//! - [`template_engine`] — Tera-based manifest template with custom filters
//! - [`pipeline`] — Discover → parse → render → commit driver
//! - [`error`] — Error taxonomy shared by all stages

pub mod discovery;
pub mod error;
pub mod pipeline;
pub mod secret;
pub mod template_engine;

pub use error::{GenerateError, GenerateResult};
pub use pipeline::{GeneratorSettings, OutputMode, Pipeline, RunSummary};
pub use secret::{SecretFile, SecretRecord, TemplateContext};
pub use template_engine::SecretTemplate;
