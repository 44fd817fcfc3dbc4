//! `extsecret-ctl generate`: render every secret definition into the manifest.

use extsecret_tooling::{OutputMode, Pipeline};

use crate::cli_config::ResolvedSettings;
use crate::error::CliResult;
use crate::output;

pub(crate) fn handle_generate_command(settings: &ResolvedSettings) -> CliResult<()> {
    let pipeline = Pipeline::new(settings.generator.clone());
    let summary = pipeline.run()?;

    for file in &summary.files {
        output::item(format!("{} ({})", file.name, file.path.display()));
    }
    output::blank();
    output::success(format!(
        "Generated {} ExternalSecret manifest(s) into {}",
        summary.files.len(),
        summary.output_path.display()
    ));
    output::label("Namespace", &settings.generator.namespace);
    output::label("Vault path", &settings.generator.vault_path);
    output::label("Bytes written", summary.bytes_written);

    if summary.mode == OutputMode::Append {
        output::hint("Append mode: re-running without clearing the output stacks duplicate blocks.");
    }

    Ok(())
}
