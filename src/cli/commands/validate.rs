use anyhow::Result;

use super::super::args::ValidateCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::print_validation;
use super::helper::CommandContext;
use crate::core::validate::{ValidateOptions, validate_translations};

pub fn validate(cmd: ValidateCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let options = ValidateOptions::new(ctx.root()?, ctx.schema_path(cmd.schema.as_deref()));

    let summary = validate_translations(&options, &ctx.logger)?;
    print_validation(&summary);

    if summary.is_success() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}
