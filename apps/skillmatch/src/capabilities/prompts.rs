// Prompt constants for the skill extraction and advisory capabilities.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for resume skill extraction.
pub const RESUME_SKILLS_SYSTEM: &str = "You are an expert career assistant. \
    Given the text of a resume, extract ONLY the relevant technical and soft skills \
    the candidate demonstrates. Do NOT invent skills that are not supported by the text.";

/// System prompt for job description skill extraction.
pub const JD_SKILLS_SYSTEM: &str = "You are an expert career assistant. \
    Given a job description, extract ONLY the technical and soft skills the role asks for. \
    Do NOT include company benefits, locations or job titles.";

/// Skill extraction prompt. Replace: {role_focus}, {list_instruction}, {document}
pub const SKILLS_PROMPT_TEMPLATE: &str = "{role_focus}

{list_instruction}

DOCUMENT:
{document}";

/// Role focus line when a target role is configured. Replace: {role}
pub const ROLE_FOCUS_TEMPLATE: &str = "Focus on skills that matter for a {role} role.";

pub const GENERIC_ROLE_FOCUS: &str = "Focus on skills that matter for the role in question.";

/// System prompt for the advisory step.
pub const ADVISORY_SYSTEM: &str = "You are a career assistant helping a candidate improve \
    their resume for a specific job description. Keep your tone friendly, encouraging \
    and realistic.";

/// Advisory prompt. Replace: {common}, {missing}, {extra}, {no_fabrication}
pub const ADVISORY_PROMPT_TEMPLATE: &str = "You are given the result of comparing a resume \
against a job description.

Matched skills: {common}
Missing from resume: {missing}
Extra in resume: {extra}

Your task:
1. Suggest no more than 5 of the missing skills that would most improve the candidate's \
chances of being shortlisted, in priority order.
2. For each suggested skill, explain in 1-2 sentences why adding it would help.

{no_fabrication}";
