//! Advisory Finalizer — turns a skill comparison into human-readable suggestions.
//!
//! Contract:
//! - nothing missing → fixed positive message, no model call
//! - otherwise → model text, returned verbatim
//! - any failure → fixed fallback message; errors never reach the caller

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::capabilities::prompts::{ADVISORY_PROMPT_TEMPLATE, ADVISORY_SYSTEM};
use crate::capabilities::{CapabilityError, CapabilityHandler, CapabilityOutput};
use crate::llm_client::prompts::NO_FABRICATION_INSTRUCTION;
use crate::llm_client::LanguageModel;
use crate::skills::ComparisonResult;

pub const FULL_COVERAGE_MESSAGE: &str =
    "Great news! Your resume already covers the key skills from the job description.";

pub const ADVISORY_FALLBACK_MESSAGE: &str = "Something went wrong while generating suggestions.";

pub struct AdvisoryFinalizer {
    llm: Arc<dyn LanguageModel>,
}

impl AdvisoryFinalizer {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    pub async fn advise(&self, comparison: &ComparisonResult) -> String {
        if comparison.is_full_coverage() {
            info!("No missing skills; skipping advisory model call");
            return FULL_COVERAGE_MESSAGE.to_string();
        }

        let prompt = build_advisory_prompt(comparison);
        match self.llm.invoke(ADVISORY_SYSTEM, &prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("Advisory model call returned empty text");
                ADVISORY_FALLBACK_MESSAGE.to_string()
            }
            Err(e) => {
                warn!("Advisory model call failed: {e}");
                ADVISORY_FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

#[async_trait]
impl CapabilityHandler for AdvisoryFinalizer {
    async fn invoke(&self, input: Value) -> Result<CapabilityOutput, CapabilityError> {
        let text = match comparison_from_envelope(&input) {
            Some(comparison) => self.advise(&comparison).await,
            None => {
                warn!("suggest_resume_improvements received invalid input: {input}");
                ADVISORY_FALLBACK_MESSAGE.to_string()
            }
        };
        Ok(CapabilityOutput::Text(text))
    }
}

/// Reads `{"comparison_result": {...}}`. A bare comparison object, or either form
/// string-encoded, is accepted too.
fn comparison_from_envelope(input: &Value) -> Option<ComparisonResult> {
    let decoded;
    let value = match input {
        Value::String(encoded) => {
            decoded = serde_json::from_str::<Value>(encoded).ok()?;
            &decoded
        }
        other => other,
    };

    let inner = value.get("comparison_result").unwrap_or(value);
    serde_json::from_value(inner.clone()).ok()
}

fn build_advisory_prompt(comparison: &ComparisonResult) -> String {
    ADVISORY_PROMPT_TEMPLATE
        .replace("{common}", &comparison.common.to_json_array())
        .replace("{missing}", &comparison.missing_from_resume.to_json_array())
        .replace("{extra}", &comparison.extra_in_resume.to_json_array())
        .replace("{no_fabrication}", NO_FABRICATION_INSTRUCTION)
}
