// Shared prompt fragments.
// Each module that talks to the model defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction appended to every prompt that must come back as bare JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every prompt that must come back as a plain skill list.
pub const SKILL_LIST_INSTRUCTION: &str = "Return the skills as a single comma-separated \
    list on one line. No numbering, no headings, no explanations.";

/// Guardrail for anything that advises the candidate.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Never suggest fabricating or overstating experience. \
    Recommend adding a skill only if the candidate plausibly has genuine exposure to it \
    or can realistically learn it before applying.";
