use super::rules::RULES;
use super::{Fix, Issue, IssueSummary, Severity};
use crate::context::EvaluationContext;
use std::collections::BTreeSet;

/// Evaluation options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintOptions {
    /// Rule ids to skip. Remaining rules keep registry order.
    pub disabled_rules: BTreeSet<String>,
    /// Drop issues below this severity.
    pub min_severity: Option<Severity>,
}

impl LintOptions {
    pub fn disable(mut self, rule_id: impl Into<String>) -> Self {
        self.disabled_rules.insert(rule_id.into());
        self
    }

    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = Some(severity);
        self
    }
}

/// Run every registered rule against `ctx`, in registry order.
///
/// Pure: the result depends only on `ctx`, so it is safe to call on every
/// state change without caching.
pub fn evaluate(ctx: &EvaluationContext) -> Vec<Issue> {
    evaluate_with_options(ctx, &LintOptions::default())
}

/// Run the registry with options applied.
pub fn evaluate_with_options(ctx: &EvaluationContext, options: &LintOptions) -> Vec<Issue> {
    let mut issues = Vec::new();

    for rule in RULES {
        if options.disabled_rules.contains(rule.id) {
            tracing::trace!(rule = rule.id, "rule disabled");
            continue;
        }
        let found = rule.run(ctx);
        if !found.is_empty() {
            tracing::debug!(rule = rule.id, count = found.len(), "rule produced issues");
        }
        issues.extend(found);
    }

    if let Some(min) = options.min_severity {
        issues.retain(|issue| issue.severity >= min);
    }

    issues
}

pub fn summarize(issues: &[Issue]) -> IssueSummary {
    let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();

    IssueSummary {
        total: issues.len(),
        warnings: count(Severity::Warning),
        suggestions: count(Severity::Suggestion),
        infos: count(Severity::Info),
        fixable: issues.iter().filter(|i| i.is_fixable()).count(),
    }
}

/// Stable sort, most urgent first. Ties keep registry order.
pub fn sort_by_urgency(issues: &mut [Issue]) {
    issues.sort_by(|a, b| b.severity.cmp(&a.severity));
}

/// Look up an offered fix by id across all issues.
pub fn find_fix<'a>(issues: &'a [Issue], fix_id: &str) -> Option<&'a Fix> {
    issues.iter().find_map(|issue| issue.fix(fix_id))
}
