//! Prompt construction for the critique request.

/// Everything the user supplies for one critique run. Only the essay text
/// is mandatory; the optional fields tighten the analysis when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EssayInputs {
    pub essay_text: String,
    pub prompt: Option<String>,
    pub rubric: Option<String>,
    pub style_target: Option<String>,
    pub constraints: Option<String>,
    pub ultra: bool,
}

pub const SYSTEM_INSTRUCTION: &str = "\
You are Quill, a rigorous and world-class essay editor. Your primary directive is to provide the most comprehensive, insightful, and actionable feedback possible to elevate a student's essay.
You must adhere to the requested mode (standard or ultra) and evaluate the essay based on all provided inputs (essay_text, prompt, rubric, style_target, constraints).
Your analysis must be exceptionally thorough. Prioritize depth and quality above all else. When you provide rewrites, they must be significant improvements, not just minor edits. They should be of similar or greater length and demonstrate a clear enhancement in argumentation, clarity, and style. Be specific, never vague.
You MUST return your analysis in the specified JSON format, using the provided schema. Fill every field; if a field is not applicable, provide a brief explanation within the string or an empty array.
If Ultra Mode is enabled, you must add deep adversarial counter-analysis, multiple alternative thesis framings, a fallacy scan, and suggest scholarly upgrades.
Do not invent sources; use placeholders like \"[CITATION NEEDED: ...]\".
Your entire output must be a single, complete JSON object conforming to the schema.";

/// Render the user-turn prompt. Absent optional fields are shown as
/// "Not provided." so the model never guesses at missing context.
pub fn build_prompt(inputs: &EssayInputs) -> String {
    fn or_not_provided(field: &Option<String>) -> &str {
        match field.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => "Not provided.",
        }
    }

    format!(
        "Analyze the following essay based on the provided details.\n\
         \n\
         Mode: {mode}\n\
         \n\
         Essay Text:\n\
         ---\n\
         {essay}\n\
         ---\n\
         \n\
         Assignment Prompt: {prompt}\n\
         Rubric: {rubric}\n\
         Style Target: {style}\n\
         Constraints: {constraints}\n\
         \n\
         Please provide your analysis in the required JSON format.",
        mode = if inputs.ultra { "Ultra" } else { "Standard" },
        essay = inputs.essay_text,
        prompt = or_not_provided(&inputs.prompt),
        rubric = or_not_provided(&inputs.rubric),
        style = or_not_provided(&inputs.style_target),
        constraints = or_not_provided(&inputs.constraints),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_labels_missing_fields() {
        let inputs = EssayInputs {
            essay_text: "An essay.".to_string(),
            ..Default::default()
        };
        let prompt = build_prompt(&inputs);
        assert!(prompt.contains("Mode: Standard"));
        assert!(prompt.contains("Assignment Prompt: Not provided."));
        assert!(prompt.contains("Rubric: Not provided."));
        assert!(prompt.contains("Style Target: Not provided."));
        assert!(prompt.contains("Constraints: Not provided."));
        assert!(prompt.contains("An essay."));
    }

    #[test]
    fn test_prompt_includes_supplied_fields() {
        let inputs = EssayInputs {
            essay_text: "Body.".to_string(),
            prompt: Some("Discuss industrialization.".to_string()),
            rubric: Some("AP rubric".to_string()),
            style_target: Some("Academic".to_string()),
            constraints: Some("1000 words max".to_string()),
            ultra: true,
        };
        let prompt = build_prompt(&inputs);
        assert!(prompt.contains("Mode: Ultra"));
        assert!(prompt.contains("Assignment Prompt: Discuss industrialization."));
        assert!(prompt.contains("Rubric: AP rubric"));
        assert!(prompt.contains("Style Target: Academic"));
        assert!(prompt.contains("Constraints: 1000 words max"));
    }

    #[test]
    fn test_blank_field_treated_as_missing() {
        let inputs = EssayInputs {
            essay_text: "Body.".to_string(),
            rubric: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(build_prompt(&inputs).contains("Rubric: Not provided."));
    }
}
