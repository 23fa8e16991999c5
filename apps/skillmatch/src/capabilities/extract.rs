//! Resume and job description skill extraction into comma-separated skill lists.
//!
//! Both load their document, then ask the model for a flat skill list. The orchestrator
//! normalizes whatever comes back, so no cleanup happens here beyond trimming.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::capabilities::prompts::{
    GENERIC_ROLE_FOCUS, JD_SKILLS_SYSTEM, RESUME_SKILLS_SYSTEM, ROLE_FOCUS_TEMPLATE,
    SKILLS_PROMPT_TEMPLATE,
};
use crate::capabilities::{
    string_argument, CapabilityError, CapabilityHandler, CapabilityKind, CapabilityOutput,
};
use crate::llm_client::prompts::SKILL_LIST_INSTRUCTION;
use crate::llm_client::LanguageModel;

/// Arguments longer than this, or spanning lines, are never treated as file paths.
const MAX_PATH_LEN: usize = 1024;

/// The only directory documents are read from.
///
/// Both the root and every requested path are canonicalized before the prefix check,
/// so `..` segments and symlinks cannot reach files outside it.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
}

impl DocumentRoot {
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = std::fs::canonicalize(root)?;
        if !root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a directory", root.display()),
            ));
        }
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Canonical path of `argument` if it names an existing file inside the root.
    pub async fn resolve(&self, argument: &str) -> Option<PathBuf> {
        if argument.len() > MAX_PATH_LEN || argument.contains('\n') {
            return None;
        }
        let canonical = tokio::fs::canonicalize(argument).await.ok()?;
        if !canonical.starts_with(&self.root) {
            return None;
        }
        let metadata = tokio::fs::metadata(&canonical).await.ok()?;
        metadata.is_file().then_some(canonical)
    }
}

pub struct ParseResumeSkills {
    llm: Arc<dyn LanguageModel>,
    target_role: Option<String>,
    documents: DocumentRoot,
}

impl ParseResumeSkills {
    pub fn new(llm: Arc<dyn LanguageModel>, target_role: Option<String>, documents: DocumentRoot) -> Self {
        Self {
            llm,
            target_role,
            documents,
        }
    }
}

#[async_trait]
impl CapabilityHandler for ParseResumeSkills {
    async fn invoke(&self, input: Value) -> Result<CapabilityOutput, CapabilityError> {
        let argument = string_argument(&input, CapabilityKind::ParseResumeSkills)?;
        let path = self.documents.resolve(&argument).await.ok_or_else(|| {
            warn!("Refusing resume path outside {}: {argument}", self.documents.path().display());
            CapabilityError::InvalidInput(format!(
                "'{argument}' is not a readable document in the upload directory"
            ))
        })?;
        info!("Extracting resume skills from {}", path.display());

        let text = load_document(&path).await?;
        let skills = extract_skills(
            self.llm.as_ref(),
            RESUME_SKILLS_SYSTEM,
            self.target_role.as_deref(),
            &text,
        )
        .await?;

        Ok(CapabilityOutput::Text(skills))
    }
}

pub struct ExtractJdSkills {
    llm: Arc<dyn LanguageModel>,
    target_role: Option<String>,
    documents: DocumentRoot,
}

impl ExtractJdSkills {
    pub fn new(llm: Arc<dyn LanguageModel>, target_role: Option<String>, documents: DocumentRoot) -> Self {
        Self {
            llm,
            target_role,
            documents,
        }
    }
}

#[async_trait]
impl CapabilityHandler for ExtractJdSkills {
    async fn invoke(&self, input: Value) -> Result<CapabilityOutput, CapabilityError> {
        let argument = string_argument(&input, CapabilityKind::ExtractJdSkills)?;

        // Anything that is not a file inside the document root is job description text.
        let text = if let Some(path) = self.documents.resolve(&argument).await {
            info!("Extracting JD skills from file {}", path.display());
            load_document(&path).await?
        } else {
            info!("Extracting JD skills from {} chars of inline text", argument.len());
            argument
        };

        let skills = extract_skills(
            self.llm.as_ref(),
            JD_SKILLS_SYSTEM,
            self.target_role.as_deref(),
            &text,
        )
        .await?;

        Ok(CapabilityOutput::Text(skills))
    }
}

async fn extract_skills(
    llm: &dyn LanguageModel,
    system: &str,
    target_role: Option<&str>,
    document: &str,
) -> Result<String, CapabilityError> {
    let prompt = build_skills_prompt(target_role, document);
    let response = llm.invoke(system, &prompt).await?;
    debug!("Skill extraction returned: {response}");
    Ok(response.trim().to_string())
}

fn build_skills_prompt(target_role: Option<&str>, document: &str) -> String {
    let role_focus = match target_role.map(str::trim).filter(|r| !r.is_empty()) {
        Some(role) => ROLE_FOCUS_TEMPLATE.replace("{role}", role),
        None => GENERIC_ROLE_FOCUS.to_string(),
    };

    SKILLS_PROMPT_TEMPLATE
        .replace("{role_focus}", &role_focus)
        .replace("{list_instruction}", SKILL_LIST_INSTRUCTION)
        .replace("{document}", document)
}

/// Loads a document as text. PDFs go through `pdf-extract`; anything else is read as
/// UTF-8, replacing invalid sequences.
///
/// PDF extraction is CPU-bound, so it runs on the blocking pool.
pub async fn load_document(path: &Path) -> Result<String, CapabilityError> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    let text = if is_pdf {
        let owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
            .await
            .map_err(|e| CapabilityError::Document(format!("PDF extraction task failed: {e}")))?
            .map_err(|e| {
                CapabilityError::Document(format!("could not read PDF {}: {e}", path.display()))
            })?
    } else {
        let bytes = tokio::fs::read(path).await?;
        String::from_utf8_lossy(&bytes).into_owned()
    };

    if text.trim().is_empty() {
        return Err(CapabilityError::Document(format!(
            "{} contains no extractable text",
            path.display()
        )));
    }

    Ok(text)
}
