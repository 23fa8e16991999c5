use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::capabilities::compare::CompareRequest;
use crate::skills::{compare_skill_sets, ComparisonResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub comparison_result: ComparisonResult,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: String,
}

/// POST /api/v1/skills/compare
/// Set algebra only; no model call.
pub async fn handle_compare(Json(req): Json<CompareRequest>) -> Json<ComparisonResult> {
    Json(compare_skill_sets(&req.resume_skills, &req.jd_skills))
}

/// POST /api/v1/skills/suggest
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Json<SuggestResponse> {
    let suggestions = state.advisor.advise(&req.comparison_result).await;
    Json(SuggestResponse { suggestions })
}
