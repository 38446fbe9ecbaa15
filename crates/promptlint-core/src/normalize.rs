//! Shared text primitives.
//!
//! Every length, emptiness and equality comparison made by a rule goes
//! through [`collapse_whitespace`] first.

use crate::state::SectionValue;

/// Collapse every run of whitespace into a single space and trim both ends.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a comma-separated string into trimmed, non-empty items.
pub fn split_comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Number of literal commas in `value`.
pub fn count_commas(value: &str) -> usize {
    value.matches(',').count()
}

/// Normalized text of a section value.
///
/// Entry sequences are rendered as their non-empty normalized entries joined
/// with `", "`. An absent value is the empty string.
pub fn section_text(value: Option<&SectionValue>) -> String {
    match value {
        None => String::new(),
        Some(SectionValue::Text(text)) => collapse_whitespace(text),
        Some(SectionValue::Entries(entries)) => entries
            .iter()
            .map(|entry| collapse_whitespace(entry))
            .filter(|entry| !entry.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    }
}
