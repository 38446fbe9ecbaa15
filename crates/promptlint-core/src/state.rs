//! Prompt state under audit.
//!
//! The state arrives from an upstream editor, so decoding is
//! forgiving: numbers are accepted wherever text is expected and `null`
//! values mean "absent".

use crate::normalize::collapse_whitespace;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Current value of one section.
///
/// A list-typed section normally holds [`SectionValue::Entries`]; holding
/// [`SectionValue::Text`] there is the raw comma-separated form the
/// list-from-string rule repairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionValue {
    Text(String),
    Entries(Vec<String>),
}

impl SectionValue {
    /// True for an empty string, an empty sequence, or a sequence whose
    /// entries are all blank after normalization.
    pub fn is_empty(&self) -> bool {
        match self {
            SectionValue::Text(text) => collapse_whitespace(text).is_empty(),
            SectionValue::Entries(entries) => entries
                .iter()
                .all(|entry| collapse_whitespace(entry).is_empty()),
        }
    }

    /// Raw entry count; a text value is never counted as entries.
    pub fn entry_count(&self) -> usize {
        match self {
            SectionValue::Text(_) => 0,
            SectionValue::Entries(entries) => entries.len(),
        }
    }
}

impl From<&str> for SectionValue {
    fn from(value: &str) -> Self {
        SectionValue::Text(value.to_string())
    }
}

impl From<String> for SectionValue {
    fn from(value: String) -> Self {
        SectionValue::Text(value)
    }
}

impl From<Vec<String>> for SectionValue {
    fn from(value: Vec<String>) -> Self {
        SectionValue::Entries(value)
    }
}

impl From<Vec<&str>> for SectionValue {
    fn from(value: Vec<&str>) -> Self {
        SectionValue::Entries(value.into_iter().map(String::from).collect())
    }
}

/// Wire shapes accepted for a section value.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSectionValue {
    Text(String),
    Number(serde_json::Number),
    Entries(Vec<Option<RawEntry>>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawSectionValue> for SectionValue {
    fn from(raw: RawSectionValue) -> Self {
        match raw {
            RawSectionValue::Text(text) => SectionValue::Text(text),
            RawSectionValue::Number(number) => SectionValue::Text(number.to_string()),
            // A null entry keeps its slot so entry positions stay stable.
            RawSectionValue::Entries(entries) => SectionValue::Entries(
                entries
                    .into_iter()
                    .map(|entry| match entry {
                        Some(RawEntry::Text(text)) => text,
                        Some(RawEntry::Number(number)) => number.to_string(),
                        None => String::new(),
                    })
                    .collect(),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for SectionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawSectionValue::deserialize(deserializer).map(SectionValue::from)
    }
}

/// Scalar metadata value (aspect ratio, fps, seed, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Number(serde_json::Number),
    Text(String),
    Flag(bool),
}

impl MetadataValue {
    /// Only text can be empty; any number or flag counts as set.
    pub fn is_empty(&self) -> bool {
        match self {
            MetadataValue::Text(text) => collapse_whitespace(text).is_empty(),
            MetadataValue::Number(_) | MetadataValue::Flag(_) => false,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Number(number) => write!(f, "{}", number),
            MetadataValue::Text(text) => write!(f, "{}", text),
            MetadataValue::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

impl From<u64> for MetadataValue {
    fn from(value: u64) -> Self {
        MetadataValue::Number(value.into())
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

/// The structured prompt a user is editing.
///
/// Section values sit behind `Arc`: a state derived through
/// [`PromptState::with_section`] shares every section it did not replace with
/// its parent, so callers can detect changed sections with `Arc::ptr_eq`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptState {
    #[serde(default, deserialize_with = "skip_null_values")]
    pub sections: BTreeMap<String, Arc<SectionValue>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub negative_prompt: String,
    #[serde(default, deserialize_with = "skip_null_values")]
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl PromptState {
    pub fn section(&self, id: &str) -> Option<&SectionValue> {
        self.sections.get(id).map(Arc::as_ref)
    }

    /// True when both states hold the very same allocation for section `id`,
    /// or both lack it.
    pub fn shares_section(&self, other: &PromptState, id: &str) -> bool {
        match (self.sections.get(id), other.sections.get(id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn metadata_value(&self, id: &str) -> Option<&MetadataValue> {
        self.metadata.get(id)
    }

    /// Absent sections are empty.
    pub fn is_section_empty(&self, id: &str) -> bool {
        self.section(id).map_or(true, SectionValue::is_empty)
    }

    /// Absent metadata values are empty.
    pub fn is_metadata_empty(&self, id: &str) -> bool {
        self.metadata_value(id).map_or(true, MetadataValue::is_empty)
    }

    /// Copy of this state with one section replaced. `self` is left untouched
    /// and the other sections are shared, not cloned.
    pub fn with_section(&self, id: &str, value: SectionValue) -> PromptState {
        let mut sections = self.sections.clone();
        sections.insert(id.to_string(), Arc::new(value));
        PromptState {
            sections,
            negative_prompt: self.negative_prompt.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Copy of this state with one metadata value replaced. Sections are
    /// shared; metadata scalars are small and copied.
    pub fn with_metadata(&self, id: &str, value: MetadataValue) -> PromptState {
        let mut metadata = self.metadata.clone();
        metadata.insert(id.to_string(), value);
        PromptState {
            sections: self.sections.clone(),
            negative_prompt: self.negative_prompt.clone(),
            metadata,
        }
    }
}

fn skip_null_values<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let raw: BTreeMap<String, Option<V>> = BTreeMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
