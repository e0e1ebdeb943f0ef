// Shared prompt fragments. Each service that calls the model keeps its own
// prompt template next to it and pulls these in.

/// Instruction that forbids anything outside the JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY valid JSON, nothing else. \
    Do NOT add explanations, apologies, or markdown code fences.";

/// Instruction for applicant-tracking-system friendly wording.
pub const ATS_INSTRUCTION: &str = "Keep the wording ATS friendly: plain section content, \
    standard job titles, no tables, no emojis, no special symbols.";
