//! One-click corrections attached to issues.
//!
//! A fix captures only identifiers and schema constants. The replacement is
//! recomputed from the state passed to [`Fix::apply`], so applying a fix to
//! its own output leaves the state unchanged, and applying a stale fix to a
//! state edited since the issue was raised still does the right thing.

use crate::normalize::{collapse_whitespace, split_comma_list};
use crate::state::{MetadataValue, PromptState, SectionValue};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

pub type FixFn = Arc<dyn Fn(&PromptState) -> PromptState + Send + Sync>;

#[derive(Clone, Serialize)]
pub struct Fix {
    pub id: String,
    pub label: String,
    #[serde(skip)]
    apply: FixFn,
}

impl Fix {
    pub fn new<F>(id: impl Into<String>, label: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&PromptState) -> PromptState + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            label: label.into(),
            apply: Arc::new(apply),
        }
    }

    /// Produce the corrected state. The input is never modified.
    pub fn apply(&self, state: &PromptState) -> PromptState {
        (self.apply)(state)
    }
}

impl fmt::Debug for Fix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fix")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Replace a text section with its whitespace-collapsed form. Entry
/// sequences are collapsed entry by entry.
pub fn collapse_section_whitespace(section_id: &str) -> Fix {
    let id = section_id.to_string();
    Fix::new(
        format!("fix-trim-{}", section_id),
        "Trim whitespace",
        move |state| {
            let collapsed = match state.section(&id) {
                Some(SectionValue::Text(text)) => SectionValue::Text(collapse_whitespace(text)),
                Some(SectionValue::Entries(entries)) => SectionValue::Entries(
                    entries
                        .iter()
                        .map(|entry| collapse_whitespace(entry))
                        .collect(),
                ),
                None => {
                    tracing::trace!(section = %id, "trim fix: section absent, no-op");
                    return state.clone();
                }
            };
            state.with_section(&id, collapsed)
        },
    )
}

/// Turn a raw comma-separated string stored in a list section into entries.
pub fn split_list_section(section_id: &str) -> Fix {
    let id = section_id.to_string();
    Fix::new(
        format!("fix-list-{}", section_id),
        "Convert to list",
        move |state| match state.section(&id) {
            Some(SectionValue::Text(raw)) => {
                state.with_section(&id, SectionValue::Entries(split_comma_list(raw)))
            }
            _ => {
                tracing::trace!(section = %id, "list fix: section is not raw text, no-op");
                state.clone()
            }
        },
    )
}

/// Set a metadata field to its schema default while it is empty.
pub fn set_metadata_default(fix_id: &str, label: &str, field_id: &str, default: MetadataValue) -> Fix {
    let id = field_id.to_string();
    Fix::new(fix_id, label, move |state| {
        if state.is_metadata_empty(&id) {
            state.with_metadata(&id, default.clone())
        } else {
            tracing::trace!(field = %id, "default fix: field already set, no-op");
            state.clone()
        }
    })
}
