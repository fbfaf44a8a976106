//! The structured response contract.
//!
//! One fixed shape shared between request construction and response
//! validation: [`response_schema`] is the JSON schema handed to the model,
//! and the serde types below are the validated form the rest of the app
//! consumes. [`normalize`] is the only path from a raw payload to an
//! [`AnalysisResponse`].

use crate::error::CritiqueError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub meta: Meta,
    pub scores: Scores,
    pub macro_feedback: MacroFeedback,
    pub meso_feedback: Vec<MesoFeedback>,
    pub micro_feedback: Vec<MicroFeedback>,
    pub style_tuning: StyleTuning,
    pub citation_review: CitationReview,
    pub originality_and_claims: OriginalityAndClaims,
    pub prioritized_action_plan: Vec<ActionPlanItem>,
    pub one_pass_polish: OnePassPolish,
    /// Present whenever ultra mode was requested; see [`normalize`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultra_extras: Option<UltraExtras>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub reading_time_minutes: f64,
    pub estimated_grade_band: GradeBand,
    pub confidence: f64,
    pub ultra_mode_used: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeBand {
    A,
    B,
    C,
    Unclear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub thesis: i64,
    pub argumentation: i64,
    pub evidence: i64,
    pub organization: i64,
    pub style_and_voice: i64,
    pub mechanics: i64,
    pub citation_integrity: i64,
    pub originality_risk: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroFeedback {
    pub thesis_quality: ThesisQuality,
    pub argument_structure: ArgumentStructure,
    pub thematic_depth: ThematicDepth,
    pub evidence_use: EvidenceUse,
    pub counterargument: Counterargument,
    pub rubric_alignment: RubricAlignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThesisQuality {
    pub diagnosis: String,
    pub why_it_matters: String,
    pub fix: String,
    pub exemplar_rewrite: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentStructure {
    pub diagnosis: String,
    pub outline_current: Vec<String>,
    pub outline_improved: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThematicDepth {
    pub diagnosis: String,
    pub missed_angles: Vec<String>,
    pub how_to_deepen: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceUse {
    pub gaps: Vec<String>,
    pub irrelevancies: Vec<String>,
    pub integration_tips: Vec<String>,
    pub signal_phrases_examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counterargument {
    pub missing_or_weak: String,
    pub stronger_counterclaims: Vec<String>,
    pub rebuttals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricAlignment {
    pub likely_pitfalls: Vec<String>,
    pub targeted_moves_to_score_max: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MesoFeedback {
    pub paragraph_index: i64,
    pub topic_sentence_check: TopicSentenceCheck,
    pub logic_flow: LogicFlow,
    pub evidence_binding: EvidenceBinding,
    pub cohesion_score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSentenceCheck {
    pub status: TopicSentenceStatus,
    pub rewrite: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicSentenceStatus {
    Clear,
    Vague,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicFlow {
    pub issues: Vec<String>,
    pub bridges: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBinding {
    pub quotes_or_data_needed: Vec<String>,
    pub analysis_depth_tip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroFeedback {
    pub sentence_index: i64,
    pub original: String,
    pub issues: Vec<MicroIssue>,
    pub rewrite_stronger: String,
    pub why_rewrite_is_better: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MicroIssue {
    Wordiness,
    PassiveVoice,
    AmbiguousPronoun,
    CommaSplice,
    UnsupportedClaim,
    ToneMismatch,
    CitationMissing,
    TenseShift,
}

impl MicroIssue {
    pub fn label(self) -> &'static str {
        match self {
            MicroIssue::Wordiness => "wordiness",
            MicroIssue::PassiveVoice => "passive voice",
            MicroIssue::AmbiguousPronoun => "ambiguous pronoun",
            MicroIssue::CommaSplice => "comma splice",
            MicroIssue::UnsupportedClaim => "unsupported claim",
            MicroIssue::ToneMismatch => "tone mismatch",
            MicroIssue::CitationMissing => "citation missing",
            MicroIssue::TenseShift => "tense shift",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleTuning {
    pub target_style: String,
    pub diction_suggestions: Vec<String>,
    pub syntax_variation_tips: Vec<String>,
    pub tone_consistency_notes: Vec<String>,
    pub cadence_examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationReview {
    pub declared_style: CitationStyle,
    pub formatting_issues: Vec<String>,
    pub missing_attributions: Vec<String>,
    pub works_cited_gaps: Vec<String>,
    pub examples_correct_format: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitationStyle {
    #[serde(rename = "MLA")]
    Mla,
    #[serde(rename = "APA")]
    Apa,
    Chicago,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalityAndClaims {
    pub unsupported_claims: Vec<String>,
    pub checkable_facts: Vec<String>,
    pub speculative_language_to_hedge: Vec<String>,
    pub originality_risk_rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlanItem {
    pub priority: Priority,
    pub title: String,
    pub why: String,
    pub how: Vec<String>,
}

/// Urgency tier; P0 is most urgent and sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnePassPolish {
    pub global_rewrite_suggestions: Vec<String>,
    pub transitions_pack: Vec<String>,
    pub thesis_plus_map_rewrite: String,
    pub elevated_conclusion_rewrite: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UltraExtras {
    pub assumption_stress_tests: Vec<String>,
    pub alternatives_to_thesis: Vec<String>,
    pub high_impact_additions: Vec<String>,
    pub examiner_trap_questions: Vec<String>,
}

/// Placeholder injected when ultra was requested but the model skipped
/// the section, so consumers never branch on its absence.
pub fn ultra_extras_placeholder() -> UltraExtras {
    UltraExtras {
        assumption_stress_tests: vec![
            "Ultra mode analysis was requested, but this section was not generated by the model."
                .to_string(),
        ],
        alternatives_to_thesis: Vec::new(),
        high_impact_additions: Vec::new(),
        examiner_trap_questions: Vec::new(),
    }
}

/// Turn a raw model payload into a validated response.
///
/// When `ultra` was requested and `ultra_extras` is absent or null, the
/// placeholder section is injected before parsing. Every other missing
/// required section is a hard [`CritiqueError::Service`].
pub fn normalize(mut raw: Value, ultra: bool) -> Result<AnalysisResponse, CritiqueError> {
    if ultra {
        let missing = raw
            .get("ultra_extras")
            .map(Value::is_null)
            .unwrap_or(true);
        if missing {
            if let Some(obj) = raw.as_object_mut() {
                obj.insert(
                    "ultra_extras".to_string(),
                    serde_json::to_value(ultra_extras_placeholder())
                        .map_err(CritiqueError::service)?,
                );
            }
        }
    }
    serde_json::from_value(raw).map_err(CritiqueError::service)
}

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

/// The JSON schema sent with every request. All fields required except
/// `ultra_extras` (standard-mode responses may omit it).
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "meta": {
                "type": "OBJECT",
                "properties": {
                    "reading_time_minutes": { "type": "NUMBER" },
                    "estimated_grade_band": { "type": "STRING", "enum": ["A", "B", "C", "Unclear"] },
                    "confidence": { "type": "NUMBER" },
                    "ultra_mode_used": { "type": "BOOLEAN" },
                },
                "required": ["reading_time_minutes", "estimated_grade_band", "confidence", "ultra_mode_used"],
            },
            "scores": {
                "type": "OBJECT",
                "properties": {
                    "thesis": { "type": "INTEGER" },
                    "argumentation": { "type": "INTEGER" },
                    "evidence": { "type": "INTEGER" },
                    "organization": { "type": "INTEGER" },
                    "style_and_voice": { "type": "INTEGER" },
                    "mechanics": { "type": "INTEGER" },
                    "citation_integrity": { "type": "INTEGER" },
                    "originality_risk": { "type": "INTEGER" },
                },
                "required": ["thesis", "argumentation", "evidence", "organization", "style_and_voice", "mechanics", "citation_integrity", "originality_risk"],
            },
            "macro_feedback": {
                "type": "OBJECT",
                "properties": {
                    "thesis_quality": {
                        "type": "OBJECT",
                        "properties": {
                            "diagnosis": string(),
                            "why_it_matters": string(),
                            "fix": string(),
                            "exemplar_rewrite": string(),
                        },
                        "required": ["diagnosis", "why_it_matters", "fix", "exemplar_rewrite"],
                    },
                    "argument_structure": {
                        "type": "OBJECT",
                        "properties": {
                            "diagnosis": string(),
                            "outline_current": string_array(),
                            "outline_improved": string_array(),
                        },
                        "required": ["diagnosis", "outline_current", "outline_improved"],
                    },
                    "thematic_depth": {
                        "type": "OBJECT",
                        "properties": {
                            "diagnosis": string(),
                            "missed_angles": string_array(),
                            "how_to_deepen": string_array(),
                        },
                        "required": ["diagnosis", "missed_angles", "how_to_deepen"],
                    },
                    "evidence_use": {
                        "type": "OBJECT",
                        "properties": {
                            "gaps": string_array(),
                            "irrelevancies": string_array(),
                            "integration_tips": string_array(),
                            "signal_phrases_examples": string_array(),
                        },
                        "required": ["gaps", "irrelevancies", "integration_tips", "signal_phrases_examples"],
                    },
                    "counterargument": {
                        "type": "OBJECT",
                        "properties": {
                            "missing_or_weak": string(),
                            "stronger_counterclaims": string_array(),
                            "rebuttals": string_array(),
                        },
                        "required": ["missing_or_weak", "stronger_counterclaims", "rebuttals"],
                    },
                    "rubric_alignment": {
                        "type": "OBJECT",
                        "properties": {
                            "likely_pitfalls": string_array(),
                            "targeted_moves_to_score_max": string_array(),
                        },
                        "required": ["likely_pitfalls", "targeted_moves_to_score_max"],
                    },
                },
                "required": ["thesis_quality", "argument_structure", "thematic_depth", "evidence_use", "counterargument", "rubric_alignment"],
            },
            "meso_feedback": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "paragraph_index": { "type": "INTEGER" },
                        "topic_sentence_check": {
                            "type": "OBJECT",
                            "properties": {
                                "status": { "type": "STRING", "enum": ["clear", "vague", "missing"] },
                                "rewrite": string(),
                            },
                            "required": ["status", "rewrite"],
                        },
                        "logic_flow": {
                            "type": "OBJECT",
                            "properties": { "issues": string_array(), "bridges": string_array() },
                            "required": ["issues", "bridges"],
                        },
                        "evidence_binding": {
                            "type": "OBJECT",
                            "properties": {
                                "quotes_or_data_needed": string_array(),
                                "analysis_depth_tip": string(),
                            },
                            "required": ["quotes_or_data_needed", "analysis_depth_tip"],
                        },
                        "cohesion_score": { "type": "INTEGER" },
                    },
                    "required": ["paragraph_index", "topic_sentence_check", "logic_flow", "evidence_binding", "cohesion_score"],
                },
            },
            "micro_feedback": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "sentence_index": { "type": "INTEGER" },
                        "original": string(),
                        "issues": {
                            "type": "ARRAY",
                            "items": {
                                "type": "STRING",
                                "enum": ["wordiness", "passive_voice", "ambiguous_pronoun", "comma_splice", "unsupported_claim", "tone_mismatch", "citation_missing", "tense_shift"],
                            },
                        },
                        "rewrite_stronger": string(),
                        "why_rewrite_is_better": string(),
                    },
                    "required": ["sentence_index", "original", "issues", "rewrite_stronger", "why_rewrite_is_better"],
                },
            },
            "style_tuning": {
                "type": "OBJECT",
                "properties": {
                    "target_style": string(),
                    "diction_suggestions": string_array(),
                    "syntax_variation_tips": string_array(),
                    "tone_consistency_notes": string_array(),
                    "cadence_examples": string_array(),
                },
                "required": ["target_style", "diction_suggestions", "syntax_variation_tips", "tone_consistency_notes", "cadence_examples"],
            },
            "citation_review": {
                "type": "OBJECT",
                "properties": {
                    "declared_style": { "type": "STRING", "enum": ["MLA", "APA", "Chicago", "Unknown"] },
                    "formatting_issues": string_array(),
                    "missing_attributions": string_array(),
                    "works_cited_gaps": string_array(),
                    "examples_correct_format": string_array(),
                },
                "required": ["declared_style", "formatting_issues", "missing_attributions", "works_cited_gaps", "examples_correct_format"],
            },
            "originality_and_claims": {
                "type": "OBJECT",
                "properties": {
                    "unsupported_claims": string_array(),
                    "checkable_facts": string_array(),
                    "speculative_language_to_hedge": string_array(),
                    "originality_risk_rationale": string(),
                },
                "required": ["unsupported_claims", "checkable_facts", "speculative_language_to_hedge", "originality_risk_rationale"],
            },
            "prioritized_action_plan": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "priority": { "type": "STRING", "enum": ["P0", "P1", "P2"] },
                        "title": string(),
                        "why": string(),
                        "how": string_array(),
                    },
                    "required": ["priority", "title", "why", "how"],
                },
            },
            "one_pass_polish": {
                "type": "OBJECT",
                "properties": {
                    "global_rewrite_suggestions": string_array(),
                    "transitions_pack": string_array(),
                    "thesis_plus_map_rewrite": string(),
                    "elevated_conclusion_rewrite": string(),
                },
                "required": ["global_rewrite_suggestions", "transitions_pack", "thesis_plus_map_rewrite", "elevated_conclusion_rewrite"],
            },
            "ultra_extras": {
                "type": "OBJECT",
                "properties": {
                    "assumption_stress_tests": string_array(),
                    "alternatives_to_thesis": string_array(),
                    "high_impact_additions": string_array(),
                    "examiner_trap_questions": string_array(),
                },
                "required": ["assumption_stress_tests", "alternatives_to_thesis", "high_impact_additions", "examiner_trap_questions"],
            },
        },
        "required": [
            "meta", "scores", "macro_feedback", "meso_feedback", "micro_feedback",
            "style_tuning", "citation_review", "originality_and_claims",
            "prioritized_action_plan", "one_pass_polish",
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_response;

    #[test]
    fn test_priority_order() {
        let mut items = vec![Priority::P1, Priority::P0, Priority::P2];
        items.sort();
        assert_eq!(items, vec![Priority::P0, Priority::P1, Priority::P2]);
    }

    #[test]
    fn test_normalize_injects_ultra_placeholder() {
        let raw = serde_json::to_value(sample_response()).unwrap();
        assert!(raw.get("ultra_extras").is_none());

        let resp = normalize(raw, true).unwrap();
        let extras = resp.ultra_extras.expect("placeholder must be present");
        assert_eq!(extras.assumption_stress_tests.len(), 1);
        assert!(extras.alternatives_to_thesis.is_empty());
    }

    #[test]
    fn test_normalize_standard_leaves_ultra_absent() {
        let raw = serde_json::to_value(sample_response()).unwrap();
        let resp = normalize(raw, false).unwrap();
        assert!(resp.ultra_extras.is_none());
    }

    #[test]
    fn test_normalize_preserves_model_ultra_extras() {
        let mut raw = serde_json::to_value(sample_response()).unwrap();
        raw.as_object_mut().unwrap().insert(
            "ultra_extras".into(),
            serde_json::json!({
                "assumption_stress_tests": ["What if industrialization was inevitable?"],
                "alternatives_to_thesis": ["Frame around labor history."],
                "high_impact_additions": [],
                "examiner_trap_questions": ["Whose prosperity?"],
            }),
        );
        let resp = normalize(raw, true).unwrap();
        let extras = resp.ultra_extras.unwrap();
        assert_eq!(
            extras.assumption_stress_tests,
            vec!["What if industrialization was inevitable?".to_string()]
        );
    }

    #[test]
    fn test_normalize_missing_section_is_hard_failure() {
        let mut raw = serde_json::to_value(sample_response()).unwrap();
        raw.as_object_mut().unwrap().remove("scores");
        let err = normalize(raw, false).unwrap_err();
        assert!(matches!(err, CritiqueError::Service(_)));
    }

    #[test]
    fn test_normalize_rejects_unknown_enum_value() {
        let mut raw = serde_json::to_value(sample_response()).unwrap();
        raw["micro_feedback"][0]["issues"][0] = serde_json::json!("vagueness");
        assert!(normalize(raw, false).is_err());
    }

    #[test]
    fn test_schema_covers_every_response_section() {
        let schema = response_schema();
        let raw = serde_json::to_value(sample_response()).unwrap();
        let props = schema["properties"].as_object().unwrap();
        for key in raw.as_object().unwrap().keys() {
            assert!(props.contains_key(key), "schema missing property {key}");
        }
        // Everything except ultra_extras is required.
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(required.contains(&"meta"));
        assert!(required.contains(&"one_pass_polish"));
        assert!(!required.contains(&"ultra_extras"));
        assert!(props.contains_key("ultra_extras"));
    }
}
