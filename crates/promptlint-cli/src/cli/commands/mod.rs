use super::args::*;

pub mod fix;
pub mod lint;
pub mod rules;

use crate::exit_codes;
use anyhow::Context;
use promptlint_core::config::DEFAULT_CONFIG_FILE;
use promptlint_core::LintConfig;
use std::path::Path;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Lint(args) => lint::run(args),
        Command::Fix(args) => fix::run(args),
        Command::Rules(args) => rules::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

/// Explicit `--config` must exist. Without it, `./promptlint.yaml` is used
/// when present and defaults otherwise.
pub(crate) fn load_lint_config(explicit: Option<&Path>) -> anyhow::Result<LintConfig> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(LintConfig::default());
            }
            default
        }
    };
    LintConfig::load(path).with_context(|| format!("invalid lint config {}", path.display()))
}
