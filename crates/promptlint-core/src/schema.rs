//! Read-only prompt schema supplied by the question-flow loader.

use crate::state::MetadataValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    List,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub label: String,
    pub input_type: InputType,
    #[serde(default)]
    pub repeatable: bool,
}

impl Section {
    pub fn new(id: impl Into<String>, label: impl Into<String>, input_type: InputType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            input_type,
            repeatable: false,
        }
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    pub fn is_text(&self) -> bool {
        self.input_type == InputType::Text
    }

    /// Case-insensitive substring match on the label.
    pub fn label_contains(&self, keyword: &str) -> bool {
        self.label.to_lowercase().contains(&keyword.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataField {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<MetadataValue>,
}

impl MetadataField {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<MetadataValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Matches when the id contains `id_fragment` or the lowercased label
    /// contains `label_keyword`.
    pub fn matches(&self, id_fragment: &str, label_keyword: &str) -> bool {
        self.id.contains(id_fragment) || self.label.to_lowercase().contains(label_keyword)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegativePromptConfig {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSchema {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub metadata_fields: Vec<MetadataField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<NegativePromptConfig>,
}

impl PromptSchema {
    /// First section whose label contains `keyword`, ignoring case.
    pub fn section_by_label(&self, keyword: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.label_contains(keyword))
    }

    /// The primary prompt: first non-repeatable text section.
    pub fn primary_text_section(&self) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.is_text() && !section.repeatable)
    }

    /// First metadata field matching by id fragment or label keyword.
    pub fn metadata_field_matching(
        &self,
        id_fragment: &str,
        label_keyword: &str,
    ) -> Option<&MetadataField> {
        self.metadata_fields
            .iter()
            .find(|field| field.matches(id_fragment, label_keyword))
    }

    pub fn negative_prompt_enabled(&self) -> bool {
        self.negative_prompt.is_some_and(|config| config.enabled)
    }
}
