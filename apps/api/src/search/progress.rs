//! Progress reporting for the job search agent.
//!
//! Every transition is reported as the full current `AgentStep`, keyed by `id`;
//! consumers upsert by id (see `StepTimeline`).

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStep {
    pub id: String,
    pub step: String,
    pub status: StepStatus,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// The five fixed phases of a search, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Initialize,
    Search,
    Analyze,
    Rank,
    Complete,
}

impl SearchPhase {
    pub const ALL: [SearchPhase; 5] = [
        SearchPhase::Initialize,
        SearchPhase::Search,
        SearchPhase::Analyze,
        SearchPhase::Rank,
        SearchPhase::Complete,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SearchPhase::Initialize => "1",
            SearchPhase::Search => "2",
            SearchPhase::Analyze => "3",
            SearchPhase::Rank => "4",
            SearchPhase::Complete => "5",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SearchPhase::Initialize => "initialize",
            SearchPhase::Search => "search",
            SearchPhase::Analyze => "analyze",
            SearchPhase::Rank => "rank",
            SearchPhase::Complete => "complete",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SearchPhase::Initialize => "Resume analysis complete",
            SearchPhase::Search => "Searching job databases...",
            SearchPhase::Analyze => "Analyzing job relevance",
            SearchPhase::Rank => "Ranking by compatibility",
            SearchPhase::Complete => "Results ready",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

/// Receives step transitions. Invoked synchronously, possibly after the caller
/// has stopped caring about the result.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, step: AgentStep);
}

impl<F> ProgressReporter for F
where
    F: Fn(AgentStep) + Send + Sync,
{
    fn report(&self, step: AgentStep) {
        self(step)
    }
}

/// Upsert-by-id view of the steps seen so far, in first-seen order.
#[derive(Debug, Default)]
pub struct StepTimeline {
    steps: Mutex<Vec<AgentStep>>,
}

impl StepTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, step: AgentStep) {
        let mut steps = self.steps.lock().unwrap_or_else(|e| e.into_inner());
        match steps.iter_mut().find(|s| s.id == step.id) {
            Some(existing) => *existing = step,
            None => steps.push(step),
        }
    }

    pub fn snapshot(&self) -> Vec<AgentStep> {
        self.steps.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ProgressReporter for StepTimeline {
    fn report(&self, step: AgentStep) {
        self.upsert(step);
    }
}

pub const SEARCH_FAILED_DESCRIPTION: &str = "Job search failed. Please try again.";

/// The per-search state machine. Owns the five steps and reports each transition.
pub struct SearchSteps<'a> {
    steps: Vec<AgentStep>,
    reporter: &'a dyn ProgressReporter,
}

impl<'a> SearchSteps<'a> {
    pub fn new(reporter: &'a dyn ProgressReporter) -> Self {
        let now = Utc::now();
        let steps = SearchPhase::ALL
            .iter()
            .map(|phase| AgentStep {
                id: phase.id().to_string(),
                step: phase.name().to_string(),
                status: StepStatus::Pending,
                description: phase.description().to_string(),
                timestamp: now,
                details: None,
            })
            .collect();
        Self { steps, reporter }
    }

    pub fn transition(&mut self, phase: SearchPhase, status: StepStatus) {
        let step = &mut self.steps[phase.index()];
        step.status = status;
        step.timestamp = Utc::now();
        self.reporter.report(step.clone());
    }

    /// Marks whichever step is in progress (or `search` when none is) as failed.
    pub fn fail_current(&mut self, details: impl Into<String>) {
        let index = self
            .steps
            .iter()
            .position(|s| s.status == StepStatus::InProgress)
            .unwrap_or_else(|| SearchPhase::Search.index());
        let step = &mut self.steps[index];
        step.status = StepStatus::Failed;
        step.description = SEARCH_FAILED_DESCRIPTION.to_string();
        step.details = Some(details.into());
        step.timestamp = Utc::now();
        self.reporter.report(step.clone());
    }
}
