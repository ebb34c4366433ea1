use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::job::JobListing;
use crate::search::agent::{search_jobs, JobSearchQuery};
use crate::search::listings::JobSearchSummary;
use crate::search::progress::{AgentStep, StepTimeline};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobSearchResponse {
    pub jobs: Vec<JobListing>,
    pub steps: Vec<AgentStep>,
    pub summary: JobSearchSummary,
}

/// POST /api/v1/jobs/search
///
/// Returns the ranked listings plus the final state of each progress step.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Json(query): Json<JobSearchQuery>,
) -> Result<Json<JobSearchResponse>, AppError> {
    if query.query.trim().is_empty() {
        return Err(AppError::Validation("query must not be empty".to_string()));
    }

    let timeline = StepTimeline::new();
    let jobs = search_jobs(
        state.llm.as_ref(),
        state.sink.as_ref(),
        state.search_delays,
        &query,
        &timeline,
    )
    .await?;

    let summary = JobSearchSummary::from_jobs(&jobs);
    Ok(Json(JobSearchResponse {
        jobs,
        steps: timeline.snapshot(),
        summary,
    }))
}
