use axum::{extract::State, Json};
use serde::Deserialize;

use crate::applications::tracker::{list_applications, record_application, ApplicationRecord};
use crate::errors::AppError;
use crate::models::job::JobListing;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub job: JobListing,
}

/// POST /api/v1/applications
pub async fn handle_record_application(
    State(state): State<AppState>,
    Json(request): Json<ApplyRequest>,
) -> Json<ApplicationRecord> {
    Json(record_application(state.sink.as_ref(), &request.job).await)
}

/// GET /api/v1/applications
///
/// Newest application first.
pub async fn handle_list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationRecord>>, AppError> {
    let records = list_applications(state.applications.as_ref()).await?;
    Ok(Json(records))
}
