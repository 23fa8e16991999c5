// Prompt constants for the decision loop.

/// System prompt for every decision call. Replace: {catalog}, {json_only}
pub const DECISION_SYSTEM_TEMPLATE: &str = "You are an AI orchestrator that decides which \
tool to call next based on the user request and the current state.

You have access to the following tools:
{catalog}
When you respond, ALWAYS return a JSON object in exactly this format:
{\"tool\": \"<tool_name>\", \"input\": <tool_input>}

Call one tool per response. Once both skill lists are known, call compare_skills; \
suggestions are produced automatically after the comparison.

{json_only}";

/// Per-iteration context snapshot. Replace: {user_request}, {resume_skills},
/// {jd_skills}, {next_action}
pub const DECISION_PROMPT_TEMPLATE: &str = "User request:
{user_request}

CURRENT_STATE:
resume_skills: {resume_skills}
jd_skills: {jd_skills}

EXPECTED NEXT ACTION:
{next_action}

Respond with ONLY JSON:
{\"tool\": \"<tool_name>\", \"input\": <tool_input>}";

pub const PARSE_RESUME_ADVICE: &str = "resume_skills is empty: call parse_resume_skills \
with the resume file path provided by the user.";

pub const EXTRACT_JD_ADVICE: &str = "jd_skills is empty: call extract_jd_skills with the \
job description (file path or raw text) provided by the user.";

/// Replace: {payload}
pub const COMPARE_ADVICE_TEMPLATE: &str = "Both skill lists are present: call \
compare_skills with this input:
{payload}";

/// Request text for a run started from an upload. Replace: {resume_path}, {jd_path}
pub const UPLOAD_REQUEST_TEMPLATE: &str = "Parse the resume from {resume_path}, extract \
skills from the job description at {jd_path}, compare them, and suggest improvements.";

/// Appended to the upload request when the user adds instructions. Replace: {instructions}
pub const UPLOAD_INSTRUCTIONS_TEMPLATE: &str = "\n\nAdditional instructions from the user:\n{instructions}";
