use clap::{Parser, Subcommand, ValueEnum};
use promptlint_core::Severity;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "promptlint",
    version,
    about = "Quality hints and one-click fixes for structured image and video prompts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate a prompt context and report issues
    Lint(LintArgs),
    /// Apply the fixes offered for a prompt context
    Fix(FixArgs),
    /// Show the rule catalog, or a single rule
    Rules(RulesArgs),
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
pub struct LintArgs {
    /// Context document (schema, state, validation) as JSON or YAML
    #[arg(value_name = "CONTEXT")]
    pub context: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Fail (exit 1) if issues at or above this severity exist. Overrides the config.
    #[arg(long)]
    pub fail_on: Option<Severity>,

    /// Drop issues below this severity. Overrides the config.
    #[arg(long)]
    pub min_severity: Option<Severity>,

    /// Comma-separated rule ids to skip, on top of the config's disabled_rules
    #[arg(long, value_delimiter = ',')]
    pub disable: Vec<String>,

    /// Order by severity (warnings first) instead of rule order
    #[arg(long)]
    pub sort: bool,

    /// Lint config; defaults to ./promptlint.yaml when present
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct FixArgs {
    #[arg(value_name = "CONTEXT")]
    pub context: PathBuf,

    /// Only apply these fix ids (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// List offered fixes and exit
    #[arg(long)]
    pub list: bool,

    /// Apply without prompting
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Print a unified diff instead of writing
    #[arg(long)]
    pub dry_run: bool,

    /// Write the fixed context here instead of overwriting CONTEXT
    #[arg(long)]
    pub out: Option<PathBuf>,

    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct RulesArgs {
    /// Rule id to explain
    #[arg(value_name = "RULE_ID")]
    pub rule_id: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
