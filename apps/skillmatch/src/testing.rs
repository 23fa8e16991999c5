//! Test doubles shared across module tests: a scripted model and canned capabilities.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::capabilities::{
    AdvisoryFinalizer, CapabilityError, CapabilityHandler, CapabilityKind, CapabilityOutput,
    CapabilityRegistry, CompareSkills,
};
use crate::config::Config;
use crate::llm_client::{LanguageModel, LlmError};
use crate::orchestrator::SkillGapOrchestrator;
use crate::state::AppState;

/// Replays canned responses in order and records every (system, prompt) pair it sees.
/// Once the script runs out every call fails with `EmptyContent`.
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedModel {
    pub fn new<I, S>(responses: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(|r| Ok(r.into())).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// A model whose every call fails at the transport level.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::from([Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })])),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn invoke(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Returns the same output on every call and records the inputs it receives.
pub struct StaticCapability {
    output: Result<CapabilityOutput, String>,
    inputs: Mutex<Vec<Value>>,
}

impl StaticCapability {
    pub fn text(text: &str) -> Arc<Self> {
        Self::with(Ok(CapabilityOutput::Text(text.to_string())))
    }

    pub fn structured(value: Value) -> Arc<Self> {
        Self::with(Ok(CapabilityOutput::Structured(value)))
    }

    pub fn failing(detail: &str) -> Arc<Self> {
        Self::with(Err(detail.to_string()))
    }

    fn with(output: Result<CapabilityOutput, String>) -> Arc<Self> {
        Arc::new(Self {
            output,
            inputs: Mutex::new(Vec::new()),
        })
    }

    pub fn inputs(&self) -> Vec<Value> {
        self.inputs.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }
}

#[async_trait]
impl CapabilityHandler for StaticCapability {
    async fn invoke(&self, input: Value) -> Result<CapabilityOutput, CapabilityError> {
        self.inputs.lock().unwrap().push(input);
        self.output
            .clone()
            .map_err(CapabilityError::Document)
    }
}

/// Canned extractors, the real compare, and the real advisory step over `advisory_model`.
pub struct Doubles {
    pub resume: Arc<StaticCapability>,
    pub jd: Arc<StaticCapability>,
    pub registry: CapabilityRegistry,
}

pub fn registry_with(
    resume: Arc<StaticCapability>,
    jd: Arc<StaticCapability>,
    advisory_model: Arc<dyn LanguageModel>,
) -> Doubles {
    let registry = CapabilityRegistry::builder()
        .register(CapabilityKind::ParseResumeSkills, resume.clone())
        .register(CapabilityKind::ExtractJdSkills, jd.clone())
        .register(CapabilityKind::CompareSkills, Arc::new(CompareSkills))
        .register(
            CapabilityKind::SuggestResumeImprovements,
            Arc::new(AdvisoryFinalizer::new(advisory_model)),
        )
        .build()
        .unwrap();

    Doubles {
        resume,
        jd,
        registry,
    }
}

/// A complete registry whose extractors return fixed skill lists.
pub fn full_registry() -> CapabilityRegistry {
    registry_with(
        StaticCapability::text("Python, SQL"),
        StaticCapability::text("SQL, Excel, Python"),
        ScriptedModel::new(Vec::<&str>::new()),
    )
    .registry
}

/// App state over the given model and registry, with default limits.
pub fn test_state(model: Arc<ScriptedModel>, registry: CapabilityRegistry) -> AppState {
    let config = Config::from_lookup(|key| {
        (key == "ANTHROPIC_API_KEY").then(|| "sk-test".to_string())
    })
    .unwrap();
    let orchestrator =
        SkillGapOrchestrator::new(model.clone(), Arc::new(registry), config.loop_limits());

    AppState {
        config,
        orchestrator: Arc::new(orchestrator),
        advisor: Arc::new(AdvisoryFinalizer::new(model)),
    }
}
