//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `schema`: Generate the translation JSON Schema from source files
//! - `export`: Export the aggregated template list (JSON or postprocessed)
//! - `validate`: Validate translation files against the schema
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Root directory (overrides `rootPath` from the config file)
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct SchemaCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Schema output path (default: ./translation.schema.json)
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Regular expression matched against source file names (default: \.jsx?$)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Indent with N spaces instead of tabs
    #[arg(short, long)]
    pub indent: Option<usize>,

    /// Registered preprocessor applied to sources before parsing
    #[arg(long)]
    pub preprocessor: Option<String>,

    /// Parse every source file with the TypeScript grammar
    #[arg(long)]
    pub typescript: bool,

    /// Print the schema to stdout instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug, Args)]
pub struct ExportCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Export a single source file instead of the whole root
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Regular expression matched against source file names (default: \.jsx?$)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Registered postprocessor used to render the templates (e.g. po)
    #[arg(long)]
    pub postprocessor: Option<String>,

    /// Registered preprocessor applied to sources before parsing
    #[arg(long)]
    pub preprocessor: Option<String>,

    /// Parse every source file with the TypeScript grammar
    #[arg(long)]
    pub typescript: bool,

    /// Indent JSON output with N spaces instead of tabs
    #[arg(short, long)]
    pub indent: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Schema to validate against (default: ./translation.schema.json)
    #[arg(short, long)]
    pub schema: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a JSON Schema from i18n tagged template literals
    Schema(SchemaCommand),
    /// Export the extracted translation templates
    Export(ExportCommand),
    /// Validate translation files against the generated schema
    Validate(ValidateCommand),
    /// Initialize a new .i18n-tag-schema.json configuration file
    Init,
}
