pub mod config;
pub mod context;
pub mod errors;
pub mod lint;
pub mod normalize;
pub mod schema;
pub mod state;

// Convenience re-exports
pub use config::LintConfig;
pub use context::{EvaluationContext, ValidationSummary};
pub use errors::{ConfigError, ConfigResult, ParseSeverityError};
pub use lint::engine::{
    evaluate, evaluate_with_options, find_fix, sort_by_urgency, summarize, LintOptions,
};
pub use lint::rules::{rule_by_id, RuleDefinition, RULES};
pub use lint::{Fix, Issue, IssueSummary, IssueTarget, Severity, TargetKind};
pub use schema::{InputType, MetadataField, NegativePromptConfig, PromptSchema, Section};
pub use state::{MetadataValue, PromptState, SectionValue};
