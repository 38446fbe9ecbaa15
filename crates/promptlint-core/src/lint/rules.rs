use super::fix;
use super::{Issue, IssueTarget, Severity};
use crate::context::EvaluationContext;
use crate::normalize::{collapse_whitespace, count_commas, section_text};
use crate::schema::InputType;
use crate::state::SectionValue;
use std::collections::HashMap;

/// Rule definition for the lint registry.
pub struct RuleDefinition {
    pub id: &'static str,
    pub default_severity: Severity,
    pub title: &'static str,
    pub description: &'static str,
    /// Why the rule exists, independent of any particular trigger.
    pub rationale: &'static str,
    pub fixable: bool,
    pub check: fn(&RuleDefinition, &EvaluationContext) -> Vec<Issue>,
}

/// Static rule registry. Evaluation order is the order of this slice.
pub static RULES: &[RuleDefinition] = &[
    RuleDefinition {
        id: "lint-validation-errors-banner",
        default_severity: Severity::Info,
        title: "Fix validation errors first",
        description: "Required fields are missing",
        rationale: "Missing required fields can make prompts invalid or incomplete.",
        fixable: false,
        check: check_validation_banner,
    },
    RuleDefinition {
        id: "lint-main-too-short",
        default_severity: Severity::Suggestion,
        title: "Main prompt is short",
        description: "Primary text section has fewer than 20 characters",
        rationale: "Short prompts often under-specify the scene and lead to inconsistent outputs.",
        fixable: false,
        check: check_main_too_short,
    },
    RuleDefinition {
        id: "lint-style-missing",
        default_severity: Severity::Suggestion,
        title: "Style is empty",
        description: "Style section is empty while the main prompt has content",
        rationale: "Style guidance helps the model converge on a consistent aesthetic.",
        fixable: false,
        check: check_style_missing,
    },
    RuleDefinition {
        id: "lint-metadata-aspect-ratio",
        default_severity: Severity::Suggestion,
        title: "Aspect ratio not set",
        description: "Aspect ratio metadata field is empty",
        rationale: "Aspect ratio influences composition and framing.",
        fixable: false,
        check: check_aspect_ratio_missing,
    },
    RuleDefinition {
        id: "lint-negative-too-generic",
        default_severity: Severity::Info,
        title: "Negative prompt is short",
        description: "Negative prompt has fewer than 25 characters",
        rationale: "Specific negatives reduce recurring artifacts more effectively than generic terms.",
        fixable: false,
        check: check_negative_too_generic,
    },
    RuleDefinition {
        id: "lint-text-too-comma-heavy",
        default_severity: Severity::Warning,
        title: "Too many comma-separated tokens",
        description: "Text section contains six or more commas",
        rationale: "Long comma chains can reduce clarity and make edits harder.",
        fixable: false,
        check: check_comma_heavy,
    },
    RuleDefinition {
        id: "lint-video-duration-missing",
        default_severity: Severity::Suggestion,
        title: "Total duration missing",
        description: "Scene durations are set but total duration is empty",
        rationale: "Total duration helps the model align timing across scenes.",
        fixable: false,
        check: check_video_duration_missing,
    },
    RuleDefinition {
        id: "lint-multiple-scenes-no-global-camera",
        default_severity: Severity::Suggestion,
        title: "Global camera rules missing",
        description: "Two or more scenes without a camera section",
        rationale: "Global camera guidance keeps scenes visually cohesive.",
        fixable: false,
        check: check_multi_scene_no_camera,
    },
    RuleDefinition {
        id: "lint-repeatable-duplicates",
        default_severity: Severity::Warning,
        title: "Repeated scene content",
        description: "Entry of a repeatable section repeats an earlier entry",
        rationale: "Repeated scenes reduce narrative variety and visual interest.",
        fixable: false,
        check: check_repeatable_duplicates,
    },
    RuleDefinition {
        id: "lint-trim-whitespace",
        default_severity: Severity::Suggestion,
        title: "Extra whitespace",
        description: "Text contains repeated or surrounding whitespace",
        rationale: "Cleaner text improves readability and reduces token noise.",
        fixable: true,
        check: check_whitespace,
    },
    RuleDefinition {
        id: "lint-list-from-string",
        default_severity: Severity::Suggestion,
        title: "List field contains comma-separated text",
        description: "List section holds a raw string instead of entries",
        rationale: "List fields render more predictably and are easier to edit.",
        fixable: true,
        check: check_list_from_string,
    },
    RuleDefinition {
        id: "lint-default-fps",
        default_severity: Severity::Suggestion,
        title: "FPS not set",
        description: "FPS metadata field is empty and the schema declares a default",
        rationale: "FPS controls motion smoothness and timing.",
        fixable: true,
        check: check_default_fps,
    },
];

const MAIN_MIN_CHARS: usize = 20;
const NEGATIVE_MIN_CHARS: usize = 25;
const COMMA_HEAVY_THRESHOLD: usize = 6;
const MIN_SCENES_FOR_CAMERA: usize = 2;

pub fn rule_by_id(id: &str) -> Option<&'static RuleDefinition> {
    RULES.iter().find(|rule| rule.id == id)
}

impl RuleDefinition {
    pub fn run(&self, ctx: &EvaluationContext) -> Vec<Issue> {
        (self.check)(self, ctx)
    }

    /// Issue pre-filled with this rule's severity, title and rationale.
    fn issue(&self, id: impl Into<String>, message: impl Into<String>) -> Issue {
        Issue::new(id, self.default_severity, self.title, message, self.rationale)
    }
}

fn check_validation_banner(rule: &RuleDefinition, ctx: &EvaluationContext) -> Vec<Issue> {
    if !ctx.validation.has_errors {
        return vec![];
    }
    vec![rule.issue(
        rule.id,
        "There are required fields missing. Fix them before refining the prompt.",
    )]
}

fn check_main_too_short(rule: &RuleDefinition, ctx: &EvaluationContext) -> Vec<Issue> {
    let Some(main) = ctx.schema.primary_text_section() else {
        return vec![];
    };
    let length = section_text(ctx.state.section(&main.id)).chars().count();
    if length == 0 || length >= MAIN_MIN_CHARS {
        return vec![];
    }
    vec![rule
        .issue(
            rule.id,
            "Consider adding more detail to the main description (subject, setting, lighting).",
        )
        .with_target(IssueTarget::section(&main.id))]
}

fn check_style_missing(rule: &RuleDefinition, ctx: &EvaluationContext) -> Vec<Issue> {
    let Some(style) = ctx.schema.section_by_label("style") else {
        return vec![];
    };
    if !ctx.state.is_section_empty(&style.id) {
        return vec![];
    }
    // Stay quiet on a blank form: only nag once the main prompt has content.
    if let Some(main) = ctx.schema.primary_text_section() {
        if ctx.state.is_section_empty(&main.id) {
            return vec![];
        }
    }
    vec![rule
        .issue(
            rule.id,
            "Add a style or medium to make the output more consistent.",
        )
        .with_target(IssueTarget::section(&style.id))]
}

fn check_aspect_ratio_missing(rule: &RuleDefinition, ctx: &EvaluationContext) -> Vec<Issue> {
    let Some(field) = ctx
        .schema
        .metadata_field_matching("aspect_ratio", "aspect ratio")
    else {
        return vec![];
    };
    if !ctx.state.is_metadata_empty(&field.id) {
        return vec![];
    }
    vec![rule
        .issue(rule.id, "Choose an aspect ratio for predictable framing.")
        .with_target(IssueTarget::metadata(&field.id))]
}

fn check_negative_too_generic(rule: &RuleDefinition, ctx: &EvaluationContext) -> Vec<Issue> {
    if !ctx.schema.negative_prompt_enabled() {
        return vec![];
    }
    let length = collapse_whitespace(&ctx.state.negative_prompt)
        .chars()
        .count();
    if length == 0 || length >= NEGATIVE_MIN_CHARS {
        return vec![];
    }
    vec![rule
        .issue(
            rule.id,
            "Consider adding specific artifacts you want to avoid.",
        )
        .with_target(IssueTarget::negative())]
}

fn check_comma_heavy(rule: &RuleDefinition, ctx: &EvaluationContext) -> Vec<Issue> {
    ctx.schema
        .sections
        .iter()
        .filter(|section| section.is_text() && !section.repeatable)
        .filter_map(|section| {
            let value = section_text(ctx.state.section(&section.id));
            if value.is_empty() || count_commas(&value) < COMMA_HEAVY_THRESHOLD {
                return None;
            }
            Some(
                rule.issue(
                    format!("{}-{}", rule.id, section.id),
                    "Consider moving lists into a list-style section for clarity.",
                )
                .with_target(IssueTarget::section(&section.id)),
            )
        })
        .collect()
}

fn check_video_duration_missing(rule: &RuleDefinition, ctx: &EvaluationContext) -> Vec<Issue> {
    let (Some(durations), Some(total)) = (
        ctx.schema.section_by_label("duration"),
        ctx.schema
            .metadata_field_matching("total_duration", "total duration"),
    ) else {
        return vec![];
    };
    if ctx.state.is_section_empty(&durations.id) || !ctx.state.is_metadata_empty(&total.id) {
        return vec![];
    }
    vec![rule
        .issue(
            rule.id,
            "Scenes have durations but total duration is not set.",
        )
        .with_target(IssueTarget::metadata(&total.id))]
}

fn check_multi_scene_no_camera(rule: &RuleDefinition, ctx: &EvaluationContext) -> Vec<Issue> {
    let (Some(scenes), Some(camera)) = (
        ctx.schema.section_by_label("scene"),
        ctx.schema.section_by_label("camera"),
    ) else {
        return vec![];
    };
    let scene_count = ctx
        .state
        .section(&scenes.id)
        .map_or(0, SectionValue::entry_count);
    if scene_count < MIN_SCENES_FOR_CAMERA || !ctx.state.is_section_empty(&camera.id) {
        return vec![];
    }
    vec![rule
        .issue(
            rule.id,
            "Multiple scenes benefit from a consistent camera style.",
        )
        .with_target(IssueTarget::section(&camera.id))]
}

fn check_repeatable_duplicates(rule: &RuleDefinition, ctx: &EvaluationContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    for section in ctx
        .schema
        .sections
        .iter()
        .filter(|section| section.is_text() && section.repeatable)
    {
        let Some(SectionValue::Entries(entries)) = ctx.state.section(&section.id) else {
            continue;
        };
        let mut first_seen: HashMap<String, usize> = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            let text = collapse_whitespace(entry);
            if text.is_empty() {
                continue;
            }
            match first_seen.get(&text) {
                Some(&first) => issues.push(
                    rule.issue(
                        format!("{}-{}-{}", rule.id, section.id, index),
                        format!(
                            "Scene {} repeats Scene {}. Consider differentiating them.",
                            index + 1,
                            first + 1
                        ),
                    )
                    .with_target(IssueTarget::section_entry(&section.id, index)),
                ),
                None => {
                    first_seen.insert(text, index);
                }
            }
        }
    }

    issues
}

fn has_whitespace_drift(value: &SectionValue) -> bool {
    match value {
        SectionValue::Text(text) => !text.is_empty() && *text != collapse_whitespace(text),
        SectionValue::Entries(entries) => entries
            .iter()
            .any(|entry| !entry.is_empty() && *entry != collapse_whitespace(entry)),
    }
}

fn check_whitespace(rule: &RuleDefinition, ctx: &EvaluationContext) -> Vec<Issue> {
    ctx.schema
        .sections
        .iter()
        .filter(|section| section.is_text())
        .filter(|section| {
            ctx.state
                .section(&section.id)
                .is_some_and(has_whitespace_drift)
        })
        .map(|section| {
            rule.issue(
                format!("lint-trim-{}", section.id),
                "Trim repeated spaces for cleaner prompts.",
            )
            .with_target(IssueTarget::section(&section.id))
            .with_fix_preview("Trim whitespace and collapse multiple spaces.")
            .with_fix(fix::collapse_section_whitespace(&section.id))
        })
        .collect()
}

fn check_list_from_string(rule: &RuleDefinition, ctx: &EvaluationContext) -> Vec<Issue> {
    ctx.schema
        .sections
        .iter()
        .filter(|section| section.input_type == InputType::List)
        .filter(|section| matches!(ctx.state.section(&section.id), Some(SectionValue::Text(_))))
        .map(|section| {
            rule.issue(
                format!("lint-list-string-{}", section.id),
                "Convert to a list for clearer rendering.",
            )
            .with_target(IssueTarget::section(&section.id))
            .with_fix_preview("Split comma-separated items into a list.")
            .with_fix(fix::split_list_section(&section.id))
        })
        .collect()
}

fn check_default_fps(rule: &RuleDefinition, ctx: &EvaluationContext) -> Vec<Issue> {
    let Some(field) = ctx.schema.metadata_field_matching("fps", "fps") else {
        return vec![];
    };
    if !ctx.state.is_metadata_empty(&field.id) {
        return vec![];
    }
    let Some(default) = field.default.as_ref().filter(|value| !value.is_empty()) else {
        return vec![];
    };
    let label = format!("Set FPS to {}", default);
    vec![rule
        .issue(
            rule.id,
            "Use the default FPS for smoother video output.",
        )
        .with_target(IssueTarget::metadata(&field.id))
        .with_fix_preview(format!("{}.", label))
        .with_fix(fix::set_metadata_default(
            "fix-default-fps",
            &label,
            &field.id,
            default.clone(),
        ))]
}
