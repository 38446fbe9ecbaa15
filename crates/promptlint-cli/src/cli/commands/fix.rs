use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Confirm};
use similar::TextDiff;
use std::collections::BTreeSet;

use promptlint_core::{evaluate_with_options, summarize, Fix};

use super::load_lint_config;
use crate::cli::args::FixArgs;
use crate::exit_codes;
use crate::input::{render_document, ContextDocument, DocumentFormat};

pub fn run(args: FixArgs) -> Result<i32> {
    let config = load_lint_config(args.config.as_deref())?;
    let options = config.lint_options();
    let doc = ContextDocument::read(&args.context)?;
    let ctx = &doc.context;

    // 1) Collect offered fixes in rule order
    let issues = evaluate_with_options(ctx, &options);
    let mut offered: Vec<(String, Fix)> = issues
        .iter()
        .flat_map(|issue| {
            issue
                .fixes
                .iter()
                .map(move |fix| (issue.id.clone(), fix.clone()))
        })
        .collect();

    if offered.is_empty() {
        eprintln!("No fixes offered. Nothing to fix.");
        return Ok(exit_codes::OK);
    }

    // 2) --only filter
    let only_set: BTreeSet<&str> = args.only.iter().map(String::as_str).collect();
    offered.retain(|(_, fix)| only_set.is_empty() || only_set.contains(fix.id.as_str()));

    if offered.is_empty() {
        eprintln!("No fixes match the provided filter (--only).");
        return Ok(exit_codes::OK);
    }

    if args.list {
        // format: <fix id>\t<issue id>\t<label>
        for (issue_id, fix) in &offered {
            println!("{}\t{}\t{}", fix.id, issue_id, fix.label);
        }
        return Ok(exit_codes::OK);
    }

    // 3) Apply against the evolving state
    let theme = ColorfulTheme::default();
    let mut state = ctx.state.clone();
    let mut applied: Vec<String> = Vec::new();

    for (issue_id, fix) in &offered {
        let do_apply = if args.yes {
            true
        } else {
            Confirm::with_theme(&theme)
                .with_prompt(format!("Apply '{}' (id: {}) for {}?", fix.label, fix.id, issue_id))
                .default(false)
                .interact()
                .unwrap_or(false)
        };
        if !do_apply {
            continue;
        }

        let next = fix.apply(&state);
        if next == state {
            tracing::debug!(fix = %fix.id, "fix left state unchanged");
        }
        state = next;
        applied.push(fix.id.clone());
    }

    if applied.is_empty() {
        eprintln!("No fixes applied.");
        return Ok(exit_codes::OK);
    }

    // Only the state entries the fixes changed are written back.
    let target = args.out.clone().unwrap_or_else(|| args.context.clone());
    let format = DocumentFormat::for_path(&target);
    let rendered = render_document(&doc.patched(&state)?, format)?;

    if args.dry_run {
        // Diff against the bytes currently on disk, so reformatting shows up too.
        let before = if target == args.context {
            doc.text.clone()
        } else {
            std::fs::read_to_string(&target).unwrap_or_default()
        };
        print_unified_diff(&target.display().to_string(), &applied, &before, &rendered);
        return Ok(exit_codes::OK);
    }

    std::fs::write(&target, &rendered)
        .with_context(|| format!("failed to write context {}", target.display()))?;
    for fix_id in &applied {
        eprintln!("Applied: {} -> {}", fix_id, target.display());
    }

    // 4) Re-evaluate so the caller sees what is left
    let written = ContextDocument::parse(rendered, format)?;
    let remaining = summarize(&evaluate_with_options(&written.context, &options));
    eprintln!(
        "Done. Applied {} fix(es). Remaining: {} issue(s) ({} warnings, {} suggestions, {} info).",
        applied.len(),
        remaining.total,
        remaining.warnings,
        remaining.suggestions,
        remaining.infos
    );

    if remaining.has_issues_at_or_above(config.fail_on) {
        Ok(exit_codes::ISSUES_FOUND)
    } else {
        Ok(exit_codes::OK)
    }
}

fn print_unified_diff(file: &str, applied: &[String], before: &str, after: &str) {
    println!("--- {} (dry-run) fixes={} ---", file, applied.join(","));

    if before == after {
        println!("(no changes)");
        println!("--- end ---");
        return;
    }

    let diff = TextDiff::from_lines(before, after);
    print!(
        "{}",
        diff.unified_diff().context_radius(3).header(file, file)
    );

    println!("--- end ---");
}
