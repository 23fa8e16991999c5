//! Decision Loop — asks the model which capability to run next, runs it, and repeats
//! until the comparison completes or a guardrail trips.
//!
//! # State machine
//! ```text
//! AwaitingResumeSkills ─parse_resume_skills─▶ AwaitingJdSkills ─extract_jd_skills─▶ ReadyToCompare
//!                                                                                       │
//!                                                  compare_skills → advisory → stop     ▼
//!                                                                                   Completed
//! any phase ── decode / unknown capability / capability failure / stall / budget ──▶ Aborted
//! ```
//! The phase only advises the prompt. Whatever the model decides is validated against
//! the registry and executed; `compare_skills` is the single terminal transition.
//!
//! Iterations run strictly one after another. Each run owns its `SessionState`, so
//! concurrent runs share nothing but the immutable registry and model client.

use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::capabilities::advisory::ADVISORY_FALLBACK_MESSAGE;
use crate::capabilities::{CapabilityKind, CapabilityOutput, CapabilityRegistry};
use crate::llm_client::{LanguageModel, LlmError};
use crate::orchestrator::decoder::{decode_decision, DecodeError, Decision};
use crate::orchestrator::session::{FoldEffect, LoopPhase, SessionState};
use crate::orchestrator::snapshot::{build_decision_prompt, build_system_prompt};
use crate::skills::{compare_skill_sets, ComparisonResult};

pub const DEFAULT_MAX_STEPS: usize = 6;
pub const DEFAULT_STALL_THRESHOLD: u32 = 2;

/// Bounds on a single run. Both exist only to stop unbounded looping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopLimits {
    /// Maximum model decisions per run.
    pub max_steps: usize,
    /// Consecutive repeats of one decision tolerated before aborting.
    /// 2 means the third identical decision aborts.
    pub stall_threshold: u32,
}

impl Default for LoopLimits {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            stall_threshold: DEFAULT_STALL_THRESHOLD,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outcomes and errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("decode failure: could not parse LLM decision JSON ({0})")]
    Decode(#[from] DecodeError),

    #[error("unknown capability: tool '{0}' not found")]
    UnknownCapability(String),

    #[error("capability failure: tool '{capability}' failed with: {detail}")]
    CapabilityExecution {
        capability: CapabilityKind,
        detail: String,
    },

    #[error(
        "stalled: model repeated the same '{capability}' decision {occurrences} times. \
         Check prompts/state."
    )]
    Stalled {
        capability: String,
        occurrences: u32,
    },

    #[error("max steps reached: stopped after {0} steps without running compare_skills")]
    BudgetExhausted(usize),

    #[error("model unavailable: {0}")]
    ModelUnavailable(#[from] LlmError),
}

impl OrchestrationError {
    /// Guardrail stops are reported as "Stopped", genuine failures as "Error".
    pub fn user_message(&self) -> String {
        match self {
            OrchestrationError::Stalled { .. } | OrchestrationError::BudgetExhausted(_) => {
                format!("Stopped: {self}")
            }
            _ => format!("Error: {self}"),
        }
    }
}

/// Terminal value of one run.
#[derive(Debug)]
pub enum LoopOutcome {
    Completed(String),
    Aborted(OrchestrationError),
}

impl LoopOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, LoopOutcome::Completed(_))
    }

    /// The advisory text, or a human-readable description of why the run stopped.
    pub fn into_message(self) -> String {
        match self {
            LoopOutcome::Completed(text) => text,
            LoopOutcome::Aborted(err) => err.user_message(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Stall detection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct StallDetector {
    threshold: u32,
    last_decision: Option<Decision>,
    repeat_count: u32,
}

impl StallDetector {
    fn new(threshold: u32) -> Self {
        Self {
            threshold,
            last_decision: None,
            repeat_count: 0,
        }
    }

    /// Records a decision; true once it has repeated `threshold` times in a row.
    fn observe(&mut self, decision: &Decision) -> bool {
        if self.last_decision.as_ref() == Some(decision) {
            self.repeat_count += 1;
        } else {
            self.repeat_count = 0;
        }
        self.last_decision = Some(decision.clone());
        self.repeat_count >= self.threshold
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

pub struct SkillGapOrchestrator {
    model: Arc<dyn LanguageModel>,
    registry: Arc<CapabilityRegistry>,
    limits: LoopLimits,
    system_prompt: String,
}

impl SkillGapOrchestrator {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        registry: Arc<CapabilityRegistry>,
        limits: LoopLimits,
    ) -> Self {
        let system_prompt = build_system_prompt(&registry);
        Self {
            model,
            registry,
            limits,
            system_prompt,
        }
    }

    /// Runs one orchestration and always returns a printable result.
    pub async fn run(&self, user_request: &str) -> String {
        self.execute(user_request).await.into_message()
    }

    pub async fn execute(&self, user_request: &str) -> LoopOutcome {
        self.execute_run(Uuid::new_v4(), user_request).await
    }

    pub async fn execute_run(&self, run_id: Uuid, user_request: &str) -> LoopOutcome {
        info!("[run {run_id}] Orchestration started: {}", user_request.trim());

        match self.drive(run_id, user_request).await {
            Ok(advice) => {
                info!("[run {run_id}] Orchestration completed");
                LoopOutcome::Completed(advice)
            }
            Err(err) => {
                warn!("[run {run_id}] Orchestration aborted: {err}");
                LoopOutcome::Aborted(err)
            }
        }
    }

    async fn drive(&self, run_id: Uuid, user_request: &str) -> Result<String, OrchestrationError> {
        let mut state = SessionState::default();
        let mut stall = StallDetector::new(self.limits.stall_threshold);

        for step in 1..=self.limits.max_steps {
            let phase = LoopPhase::of(&state);
            let prompt = build_decision_prompt(user_request, &state);

            let raw = self.model.invoke(&self.system_prompt, &prompt).await?;
            debug!("[run {run_id}] Step {step} raw decision: {raw}");

            let decision = decode_decision(&raw)?;
            let descriptor = self
                .registry
                .resolve(&decision.capability_name)
                .map_err(|_| OrchestrationError::UnknownCapability(decision.capability_name.clone()))?;
            let kind = descriptor.kind;

            if stall.observe(&decision) {
                return Err(OrchestrationError::Stalled {
                    capability: decision.capability_name,
                    occurrences: self.limits.stall_threshold + 1,
                });
            }

            if kind != phase.expected_capability() {
                debug!(
                    "[run {run_id}] Model chose {kind} while {:?} expected {}",
                    phase,
                    phase.expected_capability()
                );
            }
            info!(
                "[run {run_id}] Step {step}/{}: invoking {kind}",
                self.limits.max_steps
            );

            let output = descriptor
                .invoke(decision.input_payload)
                .await
                .map_err(|e| OrchestrationError::CapabilityExecution {
                    capability: kind,
                    detail: e.to_string(),
                })?;

            if let Some(detail) = output.error_marker() {
                return Err(OrchestrationError::CapabilityExecution {
                    capability: kind,
                    detail,
                });
            }

            if kind == CapabilityKind::CompareSkills {
                let comparison = self.accept_comparison(run_id, &state, &output);
                return Ok(self.finalize(run_id, &comparison).await);
            }

            match state.fold(kind, &output) {
                FoldEffect::ResumeSkills { count } => {
                    info!("[run {run_id}] Updated resume_skills: {count} skills");
                }
                FoldEffect::JdSkills { count } => {
                    info!("[run {run_id}] Updated jd_skills: {count} skills");
                }
                FoldEffect::Unchanged(reason) => {
                    warn!("[run {run_id}] {kind} result not folded into state: {reason}");
                }
            }
        }

        Err(OrchestrationError::BudgetExhausted(self.limits.max_steps))
    }

    /// Uses the capability's comparison when it has the expected shape, otherwise
    /// recomputes it from the session state.
    fn accept_comparison(
        &self,
        run_id: Uuid,
        state: &SessionState,
        output: &CapabilityOutput,
    ) -> ComparisonResult {
        let parsed = match output {
            CapabilityOutput::Structured(value) => {
                serde_json::from_value::<ComparisonResult>(value.clone()).ok()
            }
            CapabilityOutput::Text(text) => serde_json::from_str::<ComparisonResult>(text).ok(),
        };

        parsed.unwrap_or_else(|| {
            warn!("[run {run_id}] compare_skills returned an unexpected shape; deriving comparison from state");
            compare_skill_sets(&state.resume_skills, &state.jd_skills)
        })
    }

    /// Terminal transition: hands the comparison to the advisory capability.
    /// Never fails; advisory problems degrade to the fallback message.
    async fn finalize(&self, run_id: Uuid, comparison: &ComparisonResult) -> String {
        info!(
            "[run {run_id}] Comparison: {} common, {} missing, {} extra",
            comparison.common.len(),
            comparison.missing_from_resume.len(),
            comparison.extra_in_resume.len()
        );

        let descriptor = match self.registry.get(CapabilityKind::SuggestResumeImprovements) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                warn!("[run {run_id}] Advisory capability unavailable: {e}");
                return ADVISORY_FALLBACK_MESSAGE.to_string();
            }
        };

        match descriptor.invoke(advisory_payload(comparison)).await {
            Ok(CapabilityOutput::Text(text)) => text,
            Ok(CapabilityOutput::Structured(value)) => {
                warn!("[run {run_id}] Advisory capability returned structured output: {value}");
                ADVISORY_FALLBACK_MESSAGE.to_string()
            }
            Err(e) => {
                warn!("[run {run_id}] Advisory capability failed: {e}");
                ADVISORY_FALLBACK_MESSAGE.to_string()
            }
        }
    }
}

fn advisory_payload(comparison: &ComparisonResult) -> Value {
    json!({ "comparison_result": comparison })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::advisory::FULL_COVERAGE_MESSAGE;
    use crate::capabilities::{AdvisoryFinalizer, CompareSkills};
    use crate::testing::{registry_with, ScriptedModel, StaticCapability};

    const PARSE_RESUME: &str = r#"{"tool": "parse_resume_skills", "input": "/tmp/resume.pdf"}"#;
    const EXTRACT_JD: &str = r#"{"tool": "extract_jd_skills", "input": "/tmp/jd.txt"}"#;
    const COMPARE: &str = "```json\n{\"tool\": \"compare_skills\", \"input\": {\"resume_skills\": [\"python\", \"sql\"], \"jd_skills\": [\"excel\", \"python\", \"sql\"]}}\n```";

    fn orchestrator(model: Arc<ScriptedModel>, registry: CapabilityRegistry) -> SkillGapOrchestrator {
        SkillGapOrchestrator::new(model, Arc::new(registry), LoopLimits::default())
    }

    #[tokio::test]
    async fn test_end_to_end_returns_advisory_text() {
        let model = ScriptedModel::new([
            PARSE_RESUME,
            EXTRACT_JD,
            COMPARE,
            "Consider learning Excel.",
        ]);
        let doubles = registry_with(
            StaticCapability::text("Python, SQL"),
            StaticCapability::text("SQL, Excel, Python"),
            model.clone(),
        );
        let (resume, jd) = (doubles.resume.clone(), doubles.jd.clone());
        let orchestrator = orchestrator(model.clone(), doubles.registry);

        let result = orchestrator.run("Parse /tmp/resume.pdf, extract /tmp/jd.txt, compare.").await;

        assert_eq!(result, "Consider learning Excel.");
        assert_eq!(model.call_count(), 4);
        assert_eq!(resume.inputs(), vec![json!("/tmp/resume.pdf")]);
        assert_eq!(jd.inputs(), vec![json!("/tmp/jd.txt")]);

        let calls = model.calls();
        assert!(calls[1].1.contains(r#"resume_skills: ["python","sql"]"#));
        assert!(calls[2].1.contains(r#"jd_skills: ["excel","python","sql"]"#));
        assert!(calls[3].1.contains(r#"Missing from resume: ["excel"]"#));
    }

    #[tokio::test]
    async fn test_full_coverage_skips_advisory_model_call() {
        let model = ScriptedModel::new([
            PARSE_RESUME,
            EXTRACT_JD,
            r#"{"tool": "compare_skills", "input": {"resume_skills": ["sql"], "jd_skills": ["SQL"]}}"#,
        ]);
        let doubles = registry_with(
            StaticCapability::text("SQL"),
            StaticCapability::text("sql"),
            model.clone(),
        );
        let outcome = orchestrator(model.clone(), doubles.registry)
            .execute("compare")
            .await;

        assert!(outcome.is_completed());
        assert_eq!(outcome.into_message(), FULL_COVERAGE_MESSAGE);
        assert_eq!(model.call_count(), 3);
    }

    #[tokio::test]
    async fn test_decode_failure_aborts_immediately() {
        let model = ScriptedModel::new([r#"{"tool": }"#, PARSE_RESUME]);
        let doubles = registry_with(
            StaticCapability::text("Python"),
            StaticCapability::text("SQL"),
            model.clone(),
        );
        let resume = doubles.resume.clone();

        let outcome = orchestrator(model.clone(), doubles.registry).execute("go").await;

        assert!(matches!(outcome, LoopOutcome::Aborted(OrchestrationError::Decode(_))));
        assert_eq!(model.call_count(), 1);
        assert_eq!(resume.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_capability_aborts_with_its_name() {
        let model = ScriptedModel::new([r#"{"tool": "send_email", "input": "hr@example.com"}"#]);
        let doubles = registry_with(
            StaticCapability::text("Python"),
            StaticCapability::text("SQL"),
            model.clone(),
        );

        let message = orchestrator(model, doubles.registry).run("go").await;

        assert_eq!(message, "Error: unknown capability: tool 'send_email' not found");
    }

    #[tokio::test]
    async fn test_capability_failure_aborts_with_detail() {
        let model = ScriptedModel::new([PARSE_RESUME]);
        let doubles = registry_with(
            StaticCapability::failing("resume.pdf is encrypted"),
            StaticCapability::text("SQL"),
            model.clone(),
        );

        let outcome = orchestrator(model, doubles.registry).execute("go").await;

        match outcome {
            LoopOutcome::Aborted(OrchestrationError::CapabilityExecution { capability, detail }) => {
                assert_eq!(capability, CapabilityKind::ParseResumeSkills);
                assert!(detail.contains("resume.pdf is encrypted"));
            }
            other => panic!("expected capability failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_compare_error_marker_aborts() {
        let model = ScriptedModel::new([r#"{"tool": "compare_skills", "input": "python | sql"}"#]);
        let doubles = registry_with(
            StaticCapability::text("Python"),
            StaticCapability::text("SQL"),
            model.clone(),
        );

        let outcome = orchestrator(model.clone(), doubles.registry).execute("go").await;

        assert!(matches!(
            outcome,
            LoopOutcome::Aborted(OrchestrationError::CapabilityExecution {
                capability: CapabilityKind::CompareSkills,
                ..
            })
        ));
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_stall_aborts_on_third_identical_decision() {
        let model = ScriptedModel::new([PARSE_RESUME, PARSE_RESUME, PARSE_RESUME, PARSE_RESUME]);
        // Extractor finds nothing, so the model keeps asking for the same thing.
        let doubles = registry_with(
            StaticCapability::text(""),
            StaticCapability::text("SQL"),
            model.clone(),
        );
        let resume = doubles.resume.clone();

        let outcome = orchestrator(model.clone(), doubles.registry).execute("go").await;

        match &outcome {
            LoopOutcome::Aborted(OrchestrationError::Stalled { capability, occurrences }) => {
                assert_eq!(capability, "parse_resume_skills");
                assert_eq!(*occurrences, 3);
            }
            other => panic!("expected stall, got {other:?}"),
        }
        assert_eq!(model.call_count(), 3);
        assert_eq!(resume.call_count(), 2);
        assert!(outcome.into_message().starts_with("Stopped: stalled"));
    }

    #[tokio::test]
    async fn test_repeat_counter_resets_on_different_decision() {
        let model = ScriptedModel::new([
            PARSE_RESUME,
            PARSE_RESUME,
            EXTRACT_JD,
            PARSE_RESUME,
            PARSE_RESUME,
            COMPARE,
            "Consider learning Excel.",
        ]);
        let doubles = registry_with(
            StaticCapability::text("Python, SQL"),
            StaticCapability::text("SQL, Excel, Python"),
            model.clone(),
        );

        let result = orchestrator(model, doubles.registry).run("go").await;

        assert_eq!(result, "Consider learning Excel.");
    }

    #[tokio::test]
    async fn test_budget_exhausted_after_exactly_max_steps() {
        let mut script = Vec::new();
        for _ in 0..10 {
            script.push(PARSE_RESUME);
            script.push(EXTRACT_JD);
        }
        let model = ScriptedModel::new(script);
        let doubles = registry_with(
            StaticCapability::text("Python"),
            StaticCapability::text("SQL"),
            model.clone(),
        );

        let outcome = orchestrator(model.clone(), doubles.registry).execute("go").await;

        assert!(matches!(
            outcome,
            LoopOutcome::Aborted(OrchestrationError::BudgetExhausted(6))
        ));
        assert_eq!(model.call_count(), 6);
        assert_eq!(
            outcome.into_message(),
            "Stopped: max steps reached: stopped after 6 steps without running compare_skills"
        );
    }

    #[tokio::test]
    async fn test_custom_limits_are_honoured() {
        let model = ScriptedModel::new([PARSE_RESUME, EXTRACT_JD, PARSE_RESUME]);
        let doubles = registry_with(
            StaticCapability::text("Python"),
            StaticCapability::text("SQL"),
            model.clone(),
        );
        let limits = LoopLimits {
            max_steps: 2,
            stall_threshold: 1,
        };

        let outcome = SkillGapOrchestrator::new(model.clone(), Arc::new(doubles.registry), limits)
            .execute("go")
            .await;

        assert!(matches!(
            outcome,
            LoopOutcome::Aborted(OrchestrationError::BudgetExhausted(2))
        ));
        assert_eq!(model.call_count(), 2);
    }

    #[tokio::test]
    async fn test_stall_threshold_one_aborts_on_second_repeat() {
        let model = ScriptedModel::new([PARSE_RESUME, PARSE_RESUME]);
        let doubles = registry_with(
            StaticCapability::text(""),
            StaticCapability::text("SQL"),
            model.clone(),
        );
        let limits = LoopLimits {
            max_steps: 6,
            stall_threshold: 1,
        };

        let outcome = SkillGapOrchestrator::new(model.clone(), Arc::new(doubles.registry), limits)
            .execute("go")
            .await;

        assert!(matches!(
            outcome,
            LoopOutcome::Aborted(OrchestrationError::Stalled { occurrences: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_model_failure_aborts_with_message() {
        let model = ScriptedModel::failing();
        let doubles = registry_with(
            StaticCapability::text("Python"),
            StaticCapability::text("SQL"),
            model.clone(),
        );

        let message = orchestrator(model, doubles.registry).run("go").await;

        assert!(message.starts_with("Error: model unavailable"));
        assert!(message.contains("503"));
    }

    #[tokio::test]
    async fn test_unexpected_fold_shape_is_not_fatal() {
        let model = ScriptedModel::new([PARSE_RESUME, PARSE_RESUME, EXTRACT_JD]);
        let resume = StaticCapability::structured(json!({"skills": "python"}));
        let doubles = registry_with(resume, StaticCapability::text("SQL"), model.clone());
        let limits = LoopLimits {
            max_steps: 3,
            stall_threshold: 2,
        };

        let outcome = SkillGapOrchestrator::new(model.clone(), Arc::new(doubles.registry), limits)
            .execute("go")
            .await;

        // Ran through all three steps instead of aborting on the odd shape.
        assert!(matches!(
            outcome,
            LoopOutcome::Aborted(OrchestrationError::BudgetExhausted(3))
        ));
        let calls = model.calls();
        assert!(calls[2].1.contains("resume_skills: []"));
    }

    #[tokio::test]
    async fn test_compare_with_unexpected_shape_derives_from_state() {
        let model = ScriptedModel::new([
            PARSE_RESUME,
            EXTRACT_JD,
            r#"{"tool": "compare_skills", "input": {}}"#,
            "Learn Excel.",
        ]);
        let registry = CapabilityRegistry::builder()
            .register(CapabilityKind::ParseResumeSkills, StaticCapability::text("Python, SQL"))
            .register(CapabilityKind::ExtractJdSkills, StaticCapability::text("SQL, Excel"))
            .register(
                CapabilityKind::CompareSkills,
                StaticCapability::structured(json!({"matches": 1})),
            )
            .register(
                CapabilityKind::SuggestResumeImprovements,
                Arc::new(AdvisoryFinalizer::new(model.clone())),
            )
            .build()
            .unwrap();

        let result = orchestrator(model.clone(), registry).run("go").await;

        assert_eq!(result, "Learn Excel.");
        assert!(model.calls()[3].1.contains(r#"Missing from resume: ["excel"]"#));
    }

    #[tokio::test]
    async fn test_advisory_failure_degrades_to_fallback() {
        let model = ScriptedModel::new([PARSE_RESUME, EXTRACT_JD, COMPARE]);
        let registry = CapabilityRegistry::builder()
            .register(CapabilityKind::ParseResumeSkills, StaticCapability::text("Python, SQL"))
            .register(CapabilityKind::ExtractJdSkills, StaticCapability::text("SQL, Excel"))
            .register(CapabilityKind::CompareSkills, Arc::new(CompareSkills))
            .register(
                CapabilityKind::SuggestResumeImprovements,
                StaticCapability::failing("advisor offline"),
            )
            .build()
            .unwrap();

        let outcome = orchestrator(model, registry).execute("go").await;

        assert!(outcome.is_completed());
        assert_eq!(outcome.into_message(), ADVISORY_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_model_may_skip_ahead_of_expected_phase() {
        // Compare chosen on the first step: the phase is advice, not a gate.
        let model = ScriptedModel::new([COMPARE, "Consider learning Excel."]);
        let doubles = registry_with(
            StaticCapability::text("unused"),
            StaticCapability::text("unused"),
            model.clone(),
        );

        let result = orchestrator(model, doubles.registry).run("go").await;

        assert_eq!(result, "Consider learning Excel.");
    }

    #[tokio::test]
    async fn test_concurrent_runs_do_not_share_state() {
        let model_a = ScriptedModel::new([PARSE_RESUME, EXTRACT_JD, COMPARE, "A"]);
        let model_b = ScriptedModel::new([PARSE_RESUME, EXTRACT_JD, COMPARE, "B"]);
        let a = orchestrator(
            model_a.clone(),
            registry_with(
                StaticCapability::text("Python, SQL"),
                StaticCapability::text("SQL, Excel"),
                model_a,
            )
            .registry,
        );
        let b = orchestrator(
            model_b.clone(),
            registry_with(
                StaticCapability::text("Go"),
                StaticCapability::text("Rust"),
                model_b,
            )
            .registry,
        );

        let (ra, rb) = tokio::join!(a.run("a"), b.run("b"));

        assert_eq!(ra, "A");
        assert_eq!(rb, "B");
    }

    #[test]
    fn test_stall_detector_counts_consecutive_repeats() {
        let decision = |name: &str| Decision {
            capability_name: name.to_string(),
            input_payload: json!("x"),
        };
        let mut detector = StallDetector::new(2);
        assert!(!detector.observe(&decision("a")));
        assert!(!detector.observe(&decision("a")));
        assert!(!detector.observe(&decision("b")));
        assert!(!detector.observe(&decision("b")));
        assert!(detector.observe(&decision("b")));
    }

    #[test]
    fn test_stall_detector_compares_input_payload() {
        let mut detector = StallDetector::new(1);
        let first = Decision {
            capability_name: "extract_jd_skills".to_string(),
            input_payload: json!("jd-1.txt"),
        };
        let second = Decision {
            capability_name: "extract_jd_skills".to_string(),
            input_payload: json!("jd-2.txt"),
        };
        assert!(!detector.observe(&first));
        assert!(!detector.observe(&second));
        assert!(detector.observe(&second));
    }

    #[test]
    fn test_default_limits() {
        let limits = LoopLimits::default();
        assert_eq!(limits.max_steps, 6);
        assert_eq!(limits.stall_threshold, 2);
    }
}
