//! CLI argument definitions for the upload validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "wfp",
    version,
    about = "Workforce planning upload validator",
    long_about = "Validate workforce-planning uploads against registered file types.\n\n\
                  Valid files are reshaped to long format, stamped with an upload key,\n\
                  and written to their configured export destination."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Load file-type rules from a JSON file instead of the builtin set.
    #[arg(long = "rules", value_name = "PATH", global = true)]
    pub rules: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate an upload and export it when valid.
    Validate(ValidateArgs),

    /// Write sample CSV templates for a file type.
    Template(TemplateArgs),

    /// List registered file types.
    Types,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Registered file type the upload claims to be.
    #[arg(value_name = "FILE_TYPE")]
    pub file_type: String,

    /// Input CSV path, or Sheet=path pairs for multi-sheet types.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Free-text remarks stamped onto every exported row.
    #[arg(long = "remarks")]
    pub remarks: Option<String>,

    /// Explicit upload key (default: derived from the filename and time).
    #[arg(long = "key")]
    pub key: Option<String>,
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// File type to generate templates for (default: all).
    #[arg(value_name = "FILE_TYPE")]
    pub file_type: Option<String>,

    /// Directory the template CSVs are written to.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "templates")]
    pub output_dir: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
