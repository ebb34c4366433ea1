//! Turning raw completion text into ranked `JobListing`s.

use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::job::{JobListing, RawJobListing};
use crate::search::relevance::score_relevance;

/// Locates the first balanced `[...]` span, ignoring brackets inside JSON strings.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extracts and parses the listing array out of free-form completion text.
pub fn parse_job_listings(text: &str) -> Result<Vec<RawJobListing>, AppError> {
    let array = extract_json_array(text).ok_or_else(|| {
        AppError::MalformedResponse("no JSON array found in job search response".to_string())
    })?;
    serde_json::from_str(array).map_err(|e| AppError::MalformedResponse(e.to_string()))
}

/// Keeps a usable model score (clamped to 0–100) or computes one from the description.
pub fn resolve_score(raw: &RawJobListing, skills: &[String]) -> u8 {
    match raw.supplied_score() {
        Some(score) => {
            let clamped = score.round().clamp(0.0, 100.0);
            if clamped != score {
                debug!("Clamped model relevance score {score} for listing '{}'", raw.id);
            }
            // Whole number in 0..=100 after the clamp, so the cast is exact.
            clamped as u8
        }
        None => score_relevance(&raw.description, skills),
    }
}

/// Scores every listing and sorts by relevance, highest first. Ties keep input order.
pub fn rank_listings(raw: Vec<RawJobListing>, skills: &[String]) -> Vec<JobListing> {
    let listings = raw
        .into_iter()
        .map(|listing| {
            let score = resolve_score(&listing, skills);
            listing.into_listing(score)
        })
        .collect();
    sort_by_relevance(listings)
}

pub fn sort_by_relevance(mut listings: Vec<JobListing>) -> Vec<JobListing> {
    listings.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    listings
}

/// Aggregate view of a result batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSearchSummary {
    pub total: usize,
    pub average_relevance: u8,
    /// Listings scoring 80 or above.
    pub top_matches: usize,
    pub distinct_locations: usize,
}

const TOP_MATCH_THRESHOLD: u8 = 80;

impl JobSearchSummary {
    pub fn from_jobs(jobs: &[JobListing]) -> Self {
        let total = jobs.len();
        let average_relevance = if total == 0 {
            0
        } else {
            let sum: u32 = jobs.iter().map(|j| u32::from(j.relevance_score)).sum();
            (f64::from(sum) / total as f64).round() as u8
        };
        let mut locations: Vec<&str> = jobs.iter().map(|j| j.location.as_str()).collect();
        locations.sort_unstable();
        locations.dedup();

        Self {
            total,
            average_relevance,
            top_matches: jobs
                .iter()
                .filter(|j| j.relevance_score >= TOP_MATCH_THRESHOLD)
                .count(),
            distinct_locations: locations.len(),
        }
    }
}
