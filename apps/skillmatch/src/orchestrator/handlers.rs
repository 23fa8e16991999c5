use std::path::Path;

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::orchestrator::prompts::{UPLOAD_INSTRUCTIONS_TEMPLATE, UPLOAD_REQUEST_TEMPLATE};
use crate::orchestrator::LoopOutcome;
use crate::state::AppState;

const DEFAULT_RESUME_SUFFIX: &str = ".pdf";

#[derive(Debug, Deserialize)]
pub struct OrchestrateRequest {
    pub request: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Aborted,
}

#[derive(Debug, Serialize)]
pub struct OrchestrateResponse {
    pub run_id: Uuid,
    pub status: RunStatus,
    pub message: String,
    pub completed_at: DateTime<Utc>,
}

impl OrchestrateResponse {
    fn from_outcome(run_id: Uuid, outcome: LoopOutcome) -> Self {
        let status = if outcome.is_completed() {
            RunStatus::Completed
        } else {
            RunStatus::Aborted
        };
        Self {
            run_id,
            status,
            message: outcome.into_message(),
            completed_at: Utc::now(),
        }
    }
}

/// POST /api/v1/orchestrate
pub async fn handle_orchestrate(
    State(state): State<AppState>,
    Json(req): Json<OrchestrateRequest>,
) -> Result<Json<OrchestrateResponse>, AppError> {
    let request = req.request.trim();
    if request.is_empty() {
        return Err(AppError::Validation("request must not be empty".to_string()));
    }
    Ok(Json(run_orchestration(&state, request).await))
}

/// POST /api/v1/orchestrate/upload
///
/// Multipart parts: `resume` (file), `jd_text` (text), `instructions` (optional text).
/// Both documents live in temp files under the document root, removed once the run finishes.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<OrchestrateResponse>, AppError> {
    let form = UploadForm::read(multipart).await?;

    let dir = state.config.document_root.as_path();
    let resume_file = write_temp_file(dir, "resume-", &form.resume_suffix, &form.resume).await?;
    let jd_file = write_temp_file(dir, "jd-", ".txt", form.jd_text.as_bytes()).await?;
    info!(
        "Upload stored: resume {} bytes, job description {} bytes",
        form.resume.len(),
        form.jd_text.len()
    );

    let request = build_upload_request(
        resume_file.path(),
        jd_file.path(),
        form.instructions.as_deref(),
    );
    let response = run_orchestration(&state, &request).await;

    drop(resume_file);
    drop(jd_file);
    Ok(Json(response))
}

async fn run_orchestration(state: &AppState, request: &str) -> OrchestrateResponse {
    let run_id = Uuid::new_v4();
    let outcome = state.orchestrator.execute_run(run_id, request).await;
    OrchestrateResponse::from_outcome(run_id, outcome)
}

// ────────────────────────────────────────────────────────────────────────────
// Upload form
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct UploadForm {
    resume: Bytes,
    resume_suffix: String,
    jd_text: String,
    instructions: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut resume = None;
        let mut jd_text = None;
        let mut instructions = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" => {
                    let suffix = resume_suffix(field.file_name());
                    resume = Some((field.bytes().await?, suffix));
                }
                "jd_text" => jd_text = Some(field.text().await?),
                "instructions" => instructions = Some(field.text().await?),
                other => tracing::debug!("Ignoring unexpected upload part '{other}'"),
            }
        }

        let (resume, resume_suffix) = resume
            .filter(|(bytes, _)| !bytes.is_empty())
            .ok_or_else(|| AppError::Validation("a non-empty 'resume' file is required".to_string()))?;
        let jd_text = jd_text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AppError::Validation("'jd_text' must not be empty".to_string()))?;
        let instructions = instructions
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(Self {
            resume,
            resume_suffix,
            jd_text,
            instructions,
        })
    }
}

/// Keeps the uploaded file's extension so the loader can tell a PDF from plain text.
fn resume_suffix(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_else(|| DEFAULT_RESUME_SUFFIX.to_string())
}

async fn write_temp_file(
    dir: &Path,
    prefix: &str,
    suffix: &str,
    contents: &[u8],
) -> anyhow::Result<NamedTempFile> {
    let file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temp file for upload in {}", dir.display()))?;
    tokio::fs::write(file.path(), contents)
        .await
        .with_context(|| format!("Failed to write upload to {}", file.path().display()))?;
    Ok(file)
}

fn build_upload_request(resume_path: &Path, jd_path: &Path, instructions: Option<&str>) -> String {
    let mut request = UPLOAD_REQUEST_TEMPLATE
        .replace("{resume_path}", &resume_path.display().to_string())
        .replace("{jd_path}", &jd_path.display().to_string());
    if let Some(instructions) = instructions {
        request.push_str(&UPLOAD_INSTRUCTIONS_TEMPLATE.replace("{instructions}", instructions));
    }
    request
}
