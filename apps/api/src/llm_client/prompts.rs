// Shared prompt constants.
// Each task defines its own templates in analysis::prompts; this file holds
// the cross-cutting fragments every task reuses.

/// System instruction fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every task prompt that produces user-facing prose.
pub const KOREAN_OUTPUT_INSTRUCTION: &str = "\
    All descriptive text in your response (descriptions, labels, personas, narratives) \
    MUST be written in natural, friendly Korean.";

/// Builds a full system instruction from a task persona and the JSON-only rule.
pub fn system_instruction(persona: &str) -> String {
    format!("{persona} {JSON_ONLY_SYSTEM}")
}

/// Fills `{name}` placeholders in one pass. Substituted values are never
/// rescanned, and braces that do not name a known placeholder (JSON examples
/// in the templates) are copied through.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let known = tail[1..].find('}').and_then(|end| {
            let key = &tail[1..1 + end];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end + 2))
        });
        match known {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
