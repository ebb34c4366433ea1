use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::cover_letter::generator::{generate_cover_letter, CoverLetterOptions};
use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub job_description: String,
    #[serde(default)]
    pub resume: ResumeRecord,
    #[serde(default)]
    pub options: CoverLetterOptions,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

/// POST /api/v1/cover-letters
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description must not be empty".to_string(),
        ));
    }

    let cover_letter = generate_cover_letter(
        state.llm.as_ref(),
        state.sink.as_ref(),
        &request.job_description,
        &request.resume,
        request.options,
    )
    .await?;

    Ok(Json(CoverLetterResponse { cover_letter }))
}
