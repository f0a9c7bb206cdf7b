// Shared prompt fragments. Each feature's own prompt templates live in
// gateway/prompts.rs; this file holds what every request appends.

/// Appended to every text prompt. The response schema already constrains the
/// shape; this keeps the model from wrapping it in prose.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with valid JSON only, matching the provided response schema. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences.";
