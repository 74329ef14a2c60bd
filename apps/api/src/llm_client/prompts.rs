// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to prompts whose output is decoded as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with the JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT include explanations or apologies.";
