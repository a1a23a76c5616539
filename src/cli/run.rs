//! Dispatches parsed arguments to the command handlers.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{export::export, init::init, schema::schema, validate::validate},
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Schema(cmd)) => schema(cmd),
        Some(Command::Export(cmd)) => export(cmd),
        Some(Command::Validate(cmd)) => validate(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
