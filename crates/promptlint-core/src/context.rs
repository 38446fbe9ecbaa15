use crate::schema::PromptSchema;
use crate::state::PromptState;
use serde::{Deserialize, Serialize};

/// Upstream required-field check, treated as an opaque gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    #[serde(default)]
    pub has_errors: bool,
}

/// Everything a rule is allowed to look at.
///
/// Built by the caller for each evaluation; the engine only borrows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationContext {
    #[serde(default)]
    pub schema: PromptSchema,
    #[serde(default)]
    pub state: PromptState,
    #[serde(default)]
    pub validation: ValidationSummary,
}

impl EvaluationContext {
    pub fn new(schema: PromptSchema, state: PromptState) -> Self {
        Self {
            schema,
            state,
            validation: ValidationSummary::default(),
        }
    }

    pub fn with_validation_errors(mut self, has_errors: bool) -> Self {
        self.validation.has_errors = has_errors;
        self
    }

    /// Same schema and validation, different state. Used to re-evaluate after
    /// a fix has been applied.
    pub fn with_state(&self, state: PromptState) -> Self {
        Self {
            schema: self.schema.clone(),
            state,
            validation: self.validation,
        }
    }
}
