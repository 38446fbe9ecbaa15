pub mod engine;
pub mod fix;
pub mod rules;

pub use fix::Fix;

use crate::errors::ParseSeverityError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Issue urgency, ascending. Ordering is for display only; the evaluator
/// never sorts by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Suggestion,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Suggestion => "suggestion",
            Severity::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "suggestion" | "suggest" => Ok(Severity::Suggestion),
            "warning" | "warn" => Ok(Severity::Warning),
            _ => Err(ParseSeverityError {
                input: s.trim().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Section,
    Metadata,
    Negative,
}

/// What an issue points at. `index` is only set for one entry of a
/// repeatable section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTarget {
    pub kind: TargetKind,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl IssueTarget {
    pub fn section(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Section,
            id: id.into(),
            index: None,
        }
    }

    pub fn section_entry(id: impl Into<String>, index: usize) -> Self {
        Self {
            kind: TargetKind::Section,
            id: id.into(),
            index: Some(index),
        }
    }

    pub fn metadata(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Metadata,
            id: id.into(),
            index: None,
        }
    }

    pub fn negative() -> Self {
        Self {
            kind: TargetKind::Negative,
            id: "negativePrompt".into(),
            index: None,
        }
    }
}

impl std::fmt::Display for IssueTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            TargetKind::Section => "section",
            TargetKind::Metadata => "metadata",
            TargetKind::Negative => "negative",
        };
        match self.index {
            Some(index) => write!(f, "{}:{}[{}]", kind, self.id, index),
            None => write!(f, "{}:{}", kind, self.id),
        }
    }
}

/// One finding produced by a rule.
///
/// `id` is stable for a given (rule, target) pair so callers can key
/// re-renders on it across evaluations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<IssueTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix_preview: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<Fix>,
}

impl Issue {
    pub fn new(
        id: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            title: title.into(),
            message: message.into(),
            rationale: rationale.into(),
            target: None,
            fix_preview: None,
            fixes: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: IssueTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_fix_preview(mut self, preview: impl Into<String>) -> Self {
        self.fix_preview = Some(preview.into());
        self
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fixes.push(fix);
        self
    }

    pub fn is_fixable(&self) -> bool {
        !self.fixes.is_empty()
    }

    pub fn fix(&self, fix_id: &str) -> Option<&Fix> {
        self.fixes.iter().find(|fix| fix.id == fix_id)
    }
}

/// Issue counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueSummary {
    pub total: usize,
    pub warnings: usize,
    pub suggestions: usize,
    pub infos: usize,
    pub fixable: usize,
}

impl IssueSummary {
    pub fn has_issues_at_or_above(&self, threshold: Severity) -> bool {
        match threshold {
            Severity::Warning => self.warnings > 0,
            Severity::Suggestion => self.warnings + self.suggestions > 0,
            Severity::Info => self.total > 0,
        }
    }
}
