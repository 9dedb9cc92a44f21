// Shared prompt fragments.
// Each feature that calls the LLM keeps its own prompt builders next to it;
// this file only holds cross-cutting text.

/// Appended to every prompt that expects a JSON object back.
pub const JSON_ONLY_INSTRUCTION: &str = "DO NOT return explanation, markdown, or extra text \u{2014} \
only return the JSON object directly.";
