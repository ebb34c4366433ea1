//! Cover letter generation: one completion call per invocation, no caching.
//!
//! The model's prose is the result: output is trimmed and returned without
//! parsing, so there is no fallback path. Regenerating with different options is
//! a fresh call.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::cover_letter::prompts::{COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{CompletionBackend, CompletionRequest};
use crate::models::resume::ResumeRecord;
use crate::persistence::{emit, RecordSink, RecordTable};

const COVER_LETTER_MAX_TOKENS: u32 = 1500;
const COVER_LETTER_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverLetterTone {
    #[default]
    Formal,
    Friendly,
}

impl CoverLetterTone {
    pub fn instruction(&self) -> &'static str {
        match self {
            CoverLetterTone::Formal => {
                "Use a professional, formal tone with proper business language."
            }
            CoverLetterTone::Friendly => {
                "Use a friendly, approachable tone while maintaining professionalism."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverLetterLanguage {
    #[default]
    English,
    French,
}

impl CoverLetterLanguage {
    pub fn instruction(&self) -> &'static str {
        match self {
            CoverLetterLanguage::English => "Write the cover letter in English.",
            CoverLetterLanguage::French => "Write the cover letter in French.",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverLetterOptions {
    pub tone: CoverLetterTone,
    pub language: CoverLetterLanguage,
}

/// Renders the user prompt from the job description and resume highlights.
pub fn build_cover_letter_prompt(
    job_description: &str,
    resume: &ResumeRecord,
    options: CoverLetterOptions,
) -> String {
    let experience = resume
        .work_experience
        .iter()
        .map(|exp| format!("{} at {}", exp.position, exp.company))
        .collect::<Vec<_>>()
        .join(", ");
    let education = resume
        .education
        .iter()
        .map(|edu| format!("{} from {}", edu.degree, edu.institution))
        .collect::<Vec<_>>()
        .join(", ");

    let skills = resume.skills.join(", ");

    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("job_description", job_description),
            ("skills", skills.as_str()),
            ("experience", experience.as_str()),
            ("education", education.as_str()),
            ("summary", resume.summary.as_str()),
            ("tone_instruction", options.tone.instruction()),
            ("language_instruction", options.language.instruction()),
        ],
    )
}

/// Generates a cover letter. Any completion failure, including an empty reply,
/// propagates to the caller.
pub async fn generate_cover_letter(
    llm: &dyn CompletionBackend,
    sink: &dyn RecordSink,
    job_description: &str,
    resume: &ResumeRecord,
    options: CoverLetterOptions,
) -> Result<String, AppError> {
    let request = CompletionRequest::new(
        COVER_LETTER_SYSTEM,
        build_cover_letter_prompt(job_description, resume, options),
        COVER_LETTER_MAX_TOKENS,
        COVER_LETTER_TEMPERATURE,
    );

    let cover_letter = llm.complete(&request).await?.trim().to_string();
    info!(
        "Generated {:?}/{:?} cover letter ({} chars)",
        options.tone,
        options.language,
        cover_letter.chars().count()
    );

    emit(
        sink,
        RecordTable::CoverLetters,
        json!({
            "job_description": job_description,
            "resume_data": resume,
            "cover_letter": &cover_letter,
            "tone": options.tone,
            "language": options.language,
        }),
    )
    .await;

    Ok(cover_letter)
}
