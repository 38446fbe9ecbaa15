use anyhow::{bail, Result};
use promptlint_core::{
    evaluate_with_options, rule_by_id, sort_by_urgency, summarize, Issue, IssueSummary, Severity,
};
use serde_json::json;

use super::load_lint_config;
use crate::cli::args::{LintArgs, OutputFormat};
use crate::exit_codes;
use crate::input::ContextDocument;

pub fn run(args: LintArgs) -> Result<i32> {
    let config = load_lint_config(args.config.as_deref())?;
    let ctx = ContextDocument::read(&args.context)?.context;

    let mut options = config.lint_options();
    for rule_id in &args.disable {
        if rule_by_id(rule_id).is_none() {
            bail!("unknown rule id '{}' (see `promptlint rules`)", rule_id);
        }
        options.disabled_rules.insert(rule_id.clone());
    }
    if let Some(min) = args.min_severity {
        options.min_severity = Some(min);
    }
    let fail_on = args.fail_on.unwrap_or(config.fail_on);

    let mut issues = evaluate_with_options(&ctx, &options);
    if args.sort {
        sort_by_urgency(&mut issues);
    }
    let summary = summarize(&issues);

    match args.format {
        OutputFormat::Json => {
            let report = json!({
                "context": args.context.display().to_string(),
                "issues": issues,
                "summary": summary,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_text(&args.context.display().to_string(), &issues, &summary),
    }

    if summary.has_issues_at_or_above(fail_on) {
        Ok(exit_codes::ISSUES_FOUND)
    } else {
        Ok(exit_codes::OK)
    }
}

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "[WARN]",
        Severity::Suggestion => "[SUGG]",
        Severity::Info => "[INFO]",
    }
}

fn print_text(source: &str, issues: &[Issue], summary: &IssueSummary) {
    eprintln!("Prompt Lint");
    eprintln!("===========");
    eprintln!("Context: {}", source);
    eprintln!();

    if issues.is_empty() {
        eprintln!("No issues found.");
        return;
    }

    for issue in issues {
        let location = issue
            .target
            .as_ref()
            .map(|target| format!(" ({})", target))
            .unwrap_or_default();
        println!(
            "{} {}{}: {}",
            severity_marker(issue.severity),
            issue.id,
            location,
            issue.message
        );
        for fix in &issue.fixes {
            println!("       fix available: {} ({})", fix.id, fix.label);
        }
    }

    eprintln!();
    eprintln!(
        "Summary: {} total ({} warnings, {} suggestions, {} info), {} fixable",
        summary.total, summary.warnings, summary.suggestions, summary.infos, summary.fixable
    );
}
