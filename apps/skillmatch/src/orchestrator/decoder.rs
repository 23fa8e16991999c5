//! Response Decoder — turns raw model text into a validated `Decision`.
//!
//! All text cleanup happens here: code fences, language tags and a stray leading
//! `json` token are removed before parsing. Everything downstream of `decode_decision`
//! works only with structured decisions.

use serde_json::{Map, Value};
use thiserror::Error;

/// Offending text is quoted back in errors, capped at this many characters.
const MAX_EXCERPT_CHARS: usize = 200;

const TOOL_KEY: &str = "tool";
const INPUT_KEY: &str = "input";

/// One step requested by the model: which capability to run, and with what input.
///
/// Equality is structural; JSON objects compare without regard to key order.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub capability_name: String,
    pub input_payload: Value,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("model returned an empty decision")]
    Empty,

    #[error("invalid JSON ({source}); text was: {excerpt}")]
    Malformed {
        #[source]
        source: serde_json::Error,
        excerpt: String,
    },

    #[error("decision must be a JSON object; text was: {excerpt}")]
    NotAnObject { excerpt: String },

    #[error("decision is missing a string \"tool\" field; text was: {excerpt}")]
    MissingTool { excerpt: String },

    #[error("decision is missing the \"input\" field; text was: {excerpt}")]
    MissingInput { excerpt: String },

    #[error("decision has unexpected fields [{fields}]; text was: {excerpt}")]
    UnexpectedFields { fields: String, excerpt: String },
}

pub fn decode_decision(raw: &str) -> Result<Decision, DecodeError> {
    let cleaned = clean_decision_text(raw);
    if cleaned.is_empty() {
        return Err(DecodeError::Empty);
    }

    let value: Value = serde_json::from_str(cleaned).map_err(|source| DecodeError::Malformed {
        source,
        excerpt: excerpt(cleaned),
    })?;

    let Value::Object(mut object) = value else {
        return Err(DecodeError::NotAnObject {
            excerpt: excerpt(cleaned),
        });
    };

    let capability_name = match object.remove(TOOL_KEY) {
        Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_string(),
        _ => {
            return Err(DecodeError::MissingTool {
                excerpt: excerpt(cleaned),
            })
        }
    };

    let input_payload = object.remove(INPUT_KEY).ok_or_else(|| DecodeError::MissingInput {
        excerpt: excerpt(cleaned),
    })?;

    if !object.is_empty() {
        return Err(DecodeError::UnexpectedFields {
            fields: field_names(&object),
            excerpt: excerpt(cleaned),
        });
    }

    Ok(Decision {
        capability_name,
        input_payload,
    })
}

/// Strips surrounding whitespace, a ```` ```lang ```` fence pair, and a bare leading
/// `json` token.
pub fn clean_decision_text(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(after_fence) = text.strip_prefix("```") {
        text = strip_language_tag(after_fence);
        text = text.trim_end();
        if let Some(before_fence) = text.strip_suffix("```") {
            text = before_fence;
        }
        text = text.trim();
    }

    strip_json_token(text).trim()
}

/// Drops an alphabetic language tag directly after an opening fence (`json`, `JSON`, ...).
fn strip_language_tag(after_fence: &str) -> &str {
    let tag_len = after_fence
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(after_fence.len());
    let rest = &after_fence[tag_len..];
    // A tag must be followed by whitespace; "```{...}" carries none.
    if tag_len > 0 && (rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        rest
    } else {
        after_fence
    }
}

fn strip_json_token(text: &str) -> &str {
    match text.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("json") => &text[4..],
        _ => text,
    }
}

fn excerpt(text: &str) -> String {
    let mut out: String = text.chars().take(MAX_EXCERPT_CHARS).collect();
    if text.chars().count() > MAX_EXCERPT_CHARS {
        out.push('…');
    }
    out
}

fn field_names(object: &Map<String, Value>) -> String {
    object.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}
