//! Context document I/O. `.json` files are JSON, everything else is YAML.
//!
//! The raw document is kept next to the decoded context. Writing back only
//! replaces the state entries that changed, so keys the decoder ignores,
//! numeric entries and nulls elsewhere in the file survive a fix.

use anyhow::{anyhow, Context, Result};
use promptlint_core::{EvaluationContext, PromptState};
use serde::Deserialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn for_path(path: &Path) -> Self {
        let is_json = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            Self::Json
        } else {
            Self::Yaml
        }
    }
}

/// A context file as read from disk: original text, untyped tree, and the
/// decoded context.
#[derive(Debug)]
pub struct ContextDocument {
    pub text: String,
    raw: JsonValue,
    pub context: EvaluationContext,
}

impl ContextDocument {
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read context {}", path.display()))?;
        Self::parse(text, DocumentFormat::for_path(path))
            .with_context(|| format!("invalid context {}", path.display()))
    }

    pub fn parse(text: String, format: DocumentFormat) -> Result<Self> {
        let raw: JsonValue = match format {
            DocumentFormat::Json => serde_json::from_str(&text).context("failed to parse JSON")?,
            DocumentFormat::Yaml => {
                let y: serde_yaml::Value =
                    serde_yaml::from_str(&text).context("failed to parse YAML")?;
                serde_json::to_value(y).context("failed to convert YAML->JSON")?
            }
        };
        let context =
            EvaluationContext::deserialize(&raw).context("document is not a prompt context")?;
        Ok(Self { text, raw, context })
    }

    /// The raw tree with every state entry that differs between the decoded
    /// state and `updated` replaced. Nothing outside `state` is touched.
    pub fn patched(&self, updated: &PromptState) -> Result<JsonValue> {
        let before = &self.context.state;
        let mut raw = self.raw.clone();
        let root = raw
            .as_object_mut()
            .ok_or_else(|| anyhow!("context document is not an object"))?;
        let state = child_object(root, "state")?;

        let sections = changed_keys(&before.sections, &updated.sections);
        if !sections.is_empty() {
            let target = child_object(state, "sections")?;
            for id in sections {
                match updated.sections.get(id) {
                    Some(value) => {
                        target.insert(id.clone(), serde_json::to_value(value)?);
                    }
                    None => {
                        target.remove(id);
                    }
                }
            }
        }

        let metadata = changed_keys(&before.metadata, &updated.metadata);
        if !metadata.is_empty() {
            let target = child_object(state, "metadata")?;
            for id in metadata {
                match updated.metadata.get(id) {
                    Some(value) => {
                        target.insert(id.clone(), serde_json::to_value(value)?);
                    }
                    None => {
                        target.remove(id);
                    }
                }
            }
        }

        if before.negative_prompt != updated.negative_prompt {
            state.insert(
                "negativePrompt".to_string(),
                JsonValue::String(updated.negative_prompt.clone()),
            );
        }

        Ok(raw)
    }
}

pub fn render_document(value: &JsonValue, format: DocumentFormat) -> Result<String> {
    let mut out = match format {
        DocumentFormat::Json => serde_json::to_string_pretty(value)?,
        DocumentFormat::Yaml => serde_yaml::to_string(value)?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Object under `key`, created when absent or null.
fn child_object<'a>(
    parent: &'a mut JsonMap<String, JsonValue>,
    key: &str,
) -> Result<&'a mut JsonMap<String, JsonValue>> {
    let slot = parent
        .entry(key)
        .or_insert_with(|| JsonValue::Object(JsonMap::new()));
    if slot.is_null() {
        *slot = JsonValue::Object(JsonMap::new());
    }
    slot.as_object_mut()
        .ok_or_else(|| anyhow!("`{}` in context document is not an object", key))
}

fn changed_keys<'a, V: PartialEq>(
    before: &'a BTreeMap<String, V>,
    after: &'a BTreeMap<String, V>,
) -> BTreeSet<&'a String> {
    before
        .keys()
        .chain(after.keys())
        .filter(|key| before.get(*key) != after.get(*key))
        .collect()
}
