use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Converts legacy form definition files into canonical JSON form documents.
///
/// A definition file describes a form's components and their static
/// properties; an optional metadata file adds field, validation and
/// entity records. The result is one JSON document for a modern renderer.
#[derive(Parser)]
#[command(
    name = "form-forge",
    version,
    about = "Convert legacy form definitions into canonical JSON form documents",
    after_help = "Use 'form-forge <command> --help' for more information about a command.",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Global options available to all subcommands.
#[derive(Args, Debug)]
pub struct GlobalOpts {
    /// Configuration file path [env: FORM_FORGE_CONFIG]
    #[arg(short = 'c', long = "config", global = true, env = "FORM_FORGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format: human (default), json, plain
    #[arg(
        long,
        global = true,
        default_value = "human",
        value_parser = ["human", "json", "plain"]
    )]
    pub format: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output [env: NO_COLOR]
    #[arg(long = "no-color", global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Convert a definition file and its metadata into a JSON form document
    Convert(ConvertArgs),

    /// Inspect the components of definition files
    Inspect(InspectArgs),

    /// Ask the assistant a question about a converted form
    Ask(AskArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

/// Which assistant answers `ask` questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// An OpenAI-compatible chat-completions endpoint
    #[default]
    Openai,
    /// Rule-based answers from the converted document only
    Offline,
}

/// Arguments for `form-forge convert`.
#[derive(Args)]
pub struct ConvertArgs {
    /// Definition file to convert
    pub definition: PathBuf,

    /// Metadata file with field, validation and entity records
    #[arg(short = 'm', long)]
    pub metadata: Option<PathBuf>,

    /// Form id used when the definition has no form header
    #[arg(long = "form-id")]
    pub form_id: Option<String>,

    /// Write the document to this file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for `form-forge inspect`.
#[derive(Args)]
pub struct InspectArgs {
    /// Definition files or directories (searched for **/*.dfm)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Metadata file to summarize alongside the components
    #[arg(short = 'm', long)]
    pub metadata: Option<PathBuf>,

    /// Show every skipped or repaired line with source context
    #[arg(long)]
    pub diagnostics: bool,
}

/// Arguments for `form-forge ask`.
#[derive(Args)]
pub struct AskArgs {
    /// Question to ask; omit to start an interactive session
    pub question: Option<String>,

    /// Form document (.json) or definition file to ground answers in
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Metadata file used when --context is a definition file
    #[arg(short = 'm', long)]
    pub metadata: Option<PathBuf>,

    /// Assistant provider (overrides config)
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,

    /// Model name (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Seconds to wait for an answer (overrides config)
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for `form-forge completions`.
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_parser = ["bash", "zsh", "fish", "powershell", "elvish"])]
    pub shell: String,
}
