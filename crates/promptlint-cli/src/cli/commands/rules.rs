use anyhow::{anyhow, Result};
use promptlint_core::{rule_by_id, RuleDefinition, RULES};
use serde_json::{json, Value};

use crate::cli::args::{OutputFormat, RulesArgs};
use crate::exit_codes;

pub fn run(args: RulesArgs) -> Result<i32> {
    let selected: Vec<&RuleDefinition> = match &args.rule_id {
        Some(id) => {
            let rule = rule_by_id(id)
                .ok_or_else(|| anyhow!("unknown rule id '{}' (see `promptlint rules`)", id))?;
            vec![rule]
        }
        None => RULES.iter().collect(),
    };

    match args.format {
        OutputFormat::Json => {
            let entries: Vec<Value> = selected.iter().map(|rule| rule_json(rule)).collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text if args.rule_id.is_some() => {
            for rule in selected {
                print_rule_detail(rule);
            }
        }
        OutputFormat::Text => {
            for rule in selected {
                let fixable = if rule.fixable { "fixable" } else { "" };
                println!(
                    "{:<40} {:<10} {:<8} {}",
                    rule.id,
                    rule.default_severity.as_str(),
                    fixable,
                    rule.title
                );
            }
        }
    }

    Ok(exit_codes::OK)
}

fn rule_json(rule: &RuleDefinition) -> Value {
    json!({
        "id": rule.id,
        "severity": rule.default_severity,
        "title": rule.title,
        "description": rule.description,
        "rationale": rule.rationale,
        "fixable": rule.fixable,
    })
}

fn print_rule_detail(rule: &RuleDefinition) {
    println!("{}", rule.id);
    println!("  severity:  {}", rule.default_severity);
    println!("  title:     {}", rule.title);
    println!("  checks:    {}", rule.description);
    println!("  why:       {}", rule.rationale);
    println!("  fixable:   {}", if rule.fixable { "yes" } else { "no" });
}
