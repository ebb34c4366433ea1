//! Resume Parsing — turns raw resume text into a `ResumeRecord` with one completion call.
//!
//! Flow: estimate system cost → fit user text to the budget (front-truncation) →
//!       complete → parse JSON (keyword fallback on failure) → normalize → persist.

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_OBJECT_ONLY;
use crate::llm_client::{strip_json_fences, CompletionBackend, CompletionRequest, LlmError};
use crate::models::resume::ResumeRecord;
use crate::persistence::{emit, RecordSink, RecordTable};
use crate::resume::budget::{estimate_tokens, TokenBudget};
use crate::resume::prompts::RESUME_PARSE_SYSTEM;
use crate::resume::skills::extract_known_skills;

const RESUME_TEMPERATURE: f32 = 0.3;
const FALLBACK_SUMMARY_CHARS: usize = 200;

fn resume_system_prompt() -> String {
    format!("{RESUME_PARSE_SYSTEM} {JSON_OBJECT_ONLY}")
}

/// Parses a resume the caller has already size-checked.
///
/// Fails before the network call when the request cannot fit the context
/// ceiling; fails after it on a non-2xx response. An unparseable reply is
/// recovered locally with keyword extraction and never fails the stage.
pub async fn parse_resume(
    llm: &dyn CompletionBackend,
    sink: &dyn RecordSink,
    resume_text: &str,
) -> Result<ResumeRecord, AppError> {
    let budget = TokenBudget::default();
    let system = resume_system_prompt();
    // The system message is costed as it is serialized on the wire.
    let system_units = estimate_tokens(&json!({"role": "system", "content": &system}).to_string());

    let fitted = budget.fit(resume_text, system_units)?;
    debug!(
        "Token breakdown: system={}, user={}/{} (truncated: {}), completion={}, total={}",
        system_units,
        fitted.units,
        fitted.max_units,
        fitted.truncated,
        budget.completion_ceiling,
        system_units + fitted.units + budget.completion_ceiling
    );

    let request = CompletionRequest::new(
        system,
        fitted.text,
        budget.completion_ceiling as u32,
        RESUME_TEMPERATURE,
    );

    let record = match llm.complete(&request).await {
        Ok(content) => match parse_resume_payload(&content) {
            Ok(record) => record,
            Err(e) => {
                warn!("Resume response was not usable JSON, falling back to keyword extraction: {e}");
                fallback_resume(resume_text)
            }
        },
        Err(LlmError::EmptyContent) => {
            warn!("Resume response had no content, falling back to keyword extraction");
            fallback_resume(resume_text)
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        "Parsed resume: {} skills, {} positions, {} degrees",
        record.skills.len(),
        record.work_experience.len(),
        record.education.len()
    );

    emit(
        sink,
        RecordTable::ParsedResumes,
        json!({
            "resume_text": fitted.text,
            "parsed_data": &record,
        }),
    )
    .await;

    Ok(record)
}

/// Reads the completion text as a JSON object and normalizes it.
pub fn parse_resume_payload(content: &str) -> Result<ResumeRecord, AppError> {
    let value: Value = serde_json::from_str(strip_json_fences(content))
        .map_err(|e| AppError::MalformedResponse(e.to_string()))?;
    if !value.is_object() {
        return Err(AppError::MalformedResponse(
            "resume payload is not a JSON object".to_string(),
        ));
    }
    Ok(ResumeRecord::from_untrusted(&value))
}

/// Best-effort record built from the original text alone.
pub fn fallback_resume(resume_text: &str) -> ResumeRecord {
    let head: String = resume_text.chars().take(FALLBACK_SUMMARY_CHARS).collect();
    ResumeRecord {
        skills: extract_known_skills(resume_text),
        summary: format!("{head}..."),
        ..ResumeRecord::default()
    }
}
