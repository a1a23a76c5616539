use std::fs;

use anyhow::{Context, Result};

use super::super::args::ExportCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::print_export_saved;
use super::helper::CommandContext;
use crate::core::export::{export_translation_keys, render_templates};
use crate::processors::PostprocessorRef;

pub fn export(cmd: ExportCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let extract = ctx.extract_options(cmd.preprocessor.as_deref(), cmd.typescript)?;

    let postprocessor = match cmd.postprocessor.as_deref().or(ctx.config.postprocessor.as_deref()) {
        Some(name) => Some(ctx.registry.resolve_postprocessor(&PostprocessorRef::from(name))?),
        None => None,
    };

    let mut options = ctx.export_options(cmd.filter.as_deref(), extract)?;
    options.file_path = cmd.file.clone();

    let export = export_translation_keys(&options, &ctx.logger)?;
    let rendered = render_templates(
        &export.templates,
        postprocessor.as_deref(),
        ctx.indent(cmd.indent),
    )?;

    match &cmd.output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            print_export_saved(export.key_count(), &path.display().to_string());
        }
        None => println!("{}", rendered),
    }

    Ok(ExitStatus::Success)
}
