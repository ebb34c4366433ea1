use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::resume::intake::{read_resume_upload, validate_resume_text};
use crate::resume::parser::parse_resume;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseResumeRequest {
    pub resume_text: String,
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseResumeRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    validate_resume_text(&request.resume_text)?;
    let record = parse_resume(state.llm.as_ref(), state.sink.as_ref(), &request.resume_text).await?;
    Ok(Json(record))
}

/// POST /api/v1/resumes/upload
///
/// Multipart upload with a single `file` field (PDF or TXT, max 1MB).
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeRecord>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;

        let text =
            read_resume_upload(bytes, file_name.as_deref(), content_type.as_deref()).await?;
        let record = parse_resume(state.llm.as_ref(), state.sink.as_ref(), &text).await?;
        return Ok(Json(record));
    }

    Err(AppError::Validation(
        "multipart body must contain a `file` field".to_string(),
    ))
}
