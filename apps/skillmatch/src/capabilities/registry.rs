//! Capability Registry — static name → handler lookup, built once at startup.
//!
//! The registry never executes business logic on its own; `CapabilityDescriptor::invoke`
//! simply forwards to the registered handler.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::capabilities::{
    AdvisoryFinalizer, CapabilityError, CapabilityHandler, CapabilityKind, CapabilityOutput,
    CompareSkills, DocumentRoot, ExtractJdSkills, ParseResumeSkills, Shape,
};
use crate::llm_client::LanguageModel;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Tool '{0}' not found")]
    UnknownCapability(String),

    #[error("capability '{0}' registered more than once")]
    Duplicate(CapabilityKind),

    #[error("capabilities missing from registry: {0}")]
    Missing(String),
}

/// One registered capability. Immutable once the registry is built.
#[derive(Clone)]
pub struct CapabilityDescriptor {
    pub kind: CapabilityKind,
    pub input_shape: Shape,
    pub output_shape: Shape,
    handler: Arc<dyn CapabilityHandler>,
}

impl CapabilityDescriptor {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub async fn invoke(&self, input: Value) -> Result<CapabilityOutput, CapabilityError> {
        self.handler.invoke(input).await
    }
}

impl std::fmt::Debug for CapabilityDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityDescriptor")
            .field("kind", &self.kind)
            .field("input_shape", &self.input_shape)
            .field("output_shape", &self.output_shape)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct CapabilityRegistry {
    entries: BTreeMap<CapabilityKind, CapabilityDescriptor>,
}

impl CapabilityRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Resolves a model-supplied capability name.
    pub fn resolve(&self, name: &str) -> Result<&CapabilityDescriptor, RegistryError> {
        let kind: CapabilityKind = name.parse()?;
        self.get(kind)
    }

    pub fn get(&self, kind: CapabilityKind) -> Result<&CapabilityDescriptor, RegistryError> {
        self.entries
            .get(&kind)
            .ok_or_else(|| RegistryError::UnknownCapability(kind.name().to_string()))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &CapabilityDescriptor> {
        self.entries.values()
    }

    /// Numbered tool catalog for the orchestrator's system prompt.
    pub fn catalog(&self) -> String {
        let mut buf = String::new();
        for (idx, descriptor) in self.descriptors().enumerate() {
            let _ = writeln!(
                buf,
                "{}. {}({}) -> {}. {}",
                idx + 1,
                descriptor.name(),
                descriptor.input_shape.signature(),
                descriptor.output_shape.signature(),
                descriptor.kind.description()
            );
        }
        buf
    }
}

/// Collects registrations and validates them in `build`.
#[derive(Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<CapabilityKind, CapabilityDescriptor>,
    duplicate: Option<CapabilityKind>,
}

impl RegistryBuilder {
    pub fn register(mut self, kind: CapabilityKind, handler: Arc<dyn CapabilityHandler>) -> Self {
        let descriptor = CapabilityDescriptor {
            kind,
            input_shape: kind.input_shape(),
            output_shape: kind.output_shape(),
            handler,
        };
        if self.entries.insert(kind, descriptor).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(kind);
        }
        self
    }

    /// Fails on duplicate registration or if any `CapabilityKind` has no handler.
    pub fn build(self) -> Result<CapabilityRegistry, RegistryError> {
        if let Some(kind) = self.duplicate {
            return Err(RegistryError::Duplicate(kind));
        }

        let missing: Vec<&str> = CapabilityKind::ALL
            .iter()
            .filter(|kind| !self.entries.contains_key(*kind))
            .map(|kind| kind.name())
            .collect();
        if !missing.is_empty() {
            return Err(RegistryError::Missing(missing.join(", ")));
        }

        Ok(CapabilityRegistry {
            entries: self.entries,
        })
    }
}

/// The production registry: LLM-backed extractors, set-algebra compare, LLM advisory.
pub fn default_registry(
    llm: Arc<dyn LanguageModel>,
    target_role: Option<String>,
    documents: DocumentRoot,
) -> Result<CapabilityRegistry, RegistryError> {
    CapabilityRegistry::builder()
        .register(
            CapabilityKind::ParseResumeSkills,
            Arc::new(ParseResumeSkills::new(
                llm.clone(),
                target_role.clone(),
                documents.clone(),
            )),
        )
        .register(
            CapabilityKind::ExtractJdSkills,
            Arc::new(ExtractJdSkills::new(llm.clone(), target_role, documents)),
        )
        .register(CapabilityKind::CompareSkills, Arc::new(CompareSkills))
        .register(
            CapabilityKind::SuggestResumeImprovements,
            Arc::new(AdvisoryFinalizer::new(llm)),
        )
        .build()
}
