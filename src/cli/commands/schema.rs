use anyhow::Result;

use super::super::args::SchemaCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::print_schema_diff;
use super::helper::CommandContext;
use crate::core::parsers::json::to_json_string;
use crate::core::schema::{SchemaOptions, generate_translation_schema};

pub fn schema(cmd: SchemaCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let extract = ctx.extract_options(cmd.preprocessor.as_deref(), cmd.typescript)?;
    let indent = ctx.indent(cmd.indent);

    let options = SchemaOptions {
        export: ctx.export_options(cmd.filter.as_deref(), extract)?,
        schema_path: if cmd.stdout {
            None
        } else {
            Some(ctx.schema_path(cmd.schema.as_deref()))
        },
        indent,
    };

    let outcome = generate_translation_schema(&options, &ctx.logger)?;

    if cmd.stdout {
        println!("{}", to_json_string(&outcome.schema, indent)?);
    } else if let Some(diff) = &outcome.diff {
        print_schema_diff(diff);
    }

    Ok(ExitStatus::Success)
}
