//! `extsecret-ctl preview <file>`: render one secret definition to stdout.

use std::path::Path;

use extsecret_tooling::Pipeline;

use crate::cli_config::ResolvedSettings;
use crate::error::CliResult;
use crate::output;

pub(crate) fn handle_preview_command(settings: &ResolvedSettings, file: &Path) -> CliResult<()> {
    let pipeline = Pipeline::new(settings.generator.clone());
    let rendered = pipeline.preview(file)?;
    output::raw(&rendered);
    Ok(())
}
