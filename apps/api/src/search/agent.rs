//! Job Search Agent — one completion call wrapped in a five-step progress model.
//!
//! Flow: initialize ✓ → search (completion call) → analyze (pause) → rank (pause) →
//!       complete ✓ → parse listings (fallback on failure) → score → sort → persist.
//!
//! The analyze and rank pauses only pace live progress views. Scoring runs after
//! every step has reported completed, so an unparseable reply never shows as failed.

use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_ARRAY_ONLY};
use crate::llm_client::{CompletionBackend, CompletionRequest, LlmError};
use crate::models::job::JobListing;
use crate::persistence::{emit, RecordSink, RecordTable};
use crate::search::fallback::generate_fallback_jobs;
use crate::search::listings::{parse_job_listings, rank_listings, sort_by_relevance};
use crate::search::progress::{ProgressReporter, SearchPhase, SearchSteps, StepStatus};
use crate::search::prompts::{JOB_SEARCH_PROMPT_TEMPLATE, JOB_SEARCH_SYSTEM};

const SEARCH_MAX_TOKENS: u32 = 4000;
const SEARCH_TEMPERATURE: f32 = 0.7;
const DEFAULT_LOCATION: &str = "Remote/Any";

/// Pacing pauses for the analyze and rank steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchDelays {
    pub analyze: Duration,
    pub rank: Duration,
}

impl Default for SearchDelays {
    fn default() -> Self {
        Self {
            analyze: Duration::from_millis(1000),
            rank: Duration::from_millis(800),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchQuery {
    pub query: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl JobSearchQuery {
    fn location_or_default(&self) -> &str {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LOCATION)
    }
}

pub fn build_search_request(query: &JobSearchQuery) -> CompletionRequest {
    let skills = query.skills.join(", ");
    let prompt = fill_template(
        JOB_SEARCH_PROMPT_TEMPLATE,
        &[
            ("skills", skills.as_str()),
            ("query", query.query.as_str()),
            ("location", query.location_or_default()),
            ("json_only", JSON_ARRAY_ONLY),
        ],
    );
    CompletionRequest::new(JOB_SEARCH_SYSTEM, prompt, SEARCH_MAX_TOKENS, SEARCH_TEMPERATURE)
}

/// Runs the search pipeline, reporting each step transition to `reporter`.
///
/// A completion failure marks the in-flight step failed and propagates; no
/// further steps are reported.
pub async fn search_jobs(
    llm: &dyn CompletionBackend,
    sink: &dyn RecordSink,
    delays: SearchDelays,
    query: &JobSearchQuery,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<JobListing>, AppError> {
    let mut steps = SearchSteps::new(reporter);

    steps.transition(SearchPhase::Initialize, StepStatus::Completed);
    steps.transition(SearchPhase::Search, StepStatus::InProgress);

    let request = build_search_request(query);
    let content = match llm.complete(&request).await {
        Ok(content) => Some(content),
        Err(LlmError::EmptyContent) => None,
        Err(e) => {
            let err = AppError::from(e);
            error!("Job search failed: {err}");
            steps.fail_current(err.to_string());
            return Err(err);
        }
    };
    steps.transition(SearchPhase::Search, StepStatus::Completed);

    steps.transition(SearchPhase::Analyze, StepStatus::InProgress);
    tokio::time::sleep(delays.analyze).await;
    steps.transition(SearchPhase::Analyze, StepStatus::Completed);

    steps.transition(SearchPhase::Rank, StepStatus::InProgress);
    tokio::time::sleep(delays.rank).await;
    steps.transition(SearchPhase::Rank, StepStatus::Completed);

    steps.transition(SearchPhase::Complete, StepStatus::Completed);

    let parsed = content
        .ok_or_else(|| {
            AppError::MalformedResponse("job search response had no content".to_string())
        })
        .and_then(|content| parse_job_listings(&content));

    let jobs = match parsed {
        Ok(raw) => rank_listings(raw, &query.skills),
        Err(e) => {
            warn!("Falling back to generated listings: {e}");
            sort_by_relevance(generate_fallback_jobs(
                &query.query,
                query.location.as_deref(),
                &query.skills,
                Utc::now().date_naive(),
            ))
        }
    };

    info!(
        "Job search for '{}' returned {} listings",
        query.query,
        jobs.len()
    );

    emit(
        sink,
        RecordTable::JobListings,
        json!({
            "query": query.query,
            "location": query.location,
            "skills": query.skills,
            "jobs": &jobs,
        }),
    )
    .await;

    Ok(jobs)
}
