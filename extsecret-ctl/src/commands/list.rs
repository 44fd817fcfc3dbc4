//! `extsecret-ctl list`: show the secret definitions a run would process.

use extsecret_tooling::Pipeline;

use crate::cli_config::ResolvedSettings;
use crate::error::CliResult;
use crate::output;

pub(crate) fn handle_list_command(settings: &ResolvedSettings) -> CliResult<()> {
    let pipeline = Pipeline::new(settings.generator.clone());
    let files = pipeline.discover()?;

    output::header(format!(
        "Secret definitions in {}:",
        settings.generator.input_dir.display()
    ));
    output::blank();
    for file in &files {
        output::item(&file.name);
        output::dim(format!("    {}", file.path.display()));
    }
    output::blank();
    output::label("Output", settings.generator.output_path().display());
    output::label("Template", settings.generator.template_path.display());

    Ok(())
}
