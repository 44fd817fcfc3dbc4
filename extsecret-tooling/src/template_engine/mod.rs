//! Runtime template engine for `ExternalSecret` manifests.

mod engine;
mod filters;

pub use engine::SecretTemplate;
