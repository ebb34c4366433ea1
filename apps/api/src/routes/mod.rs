pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::cover_letter::handlers as cover_letters;
use crate::resume::handlers as resumes;
use crate::search::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume stage
        .route("/api/v1/resumes/parse", post(resumes::handle_parse_resume))
        .route("/api/v1/resumes/upload", post(resumes::handle_upload_resume))
        // Job search stage
        .route("/api/v1/jobs/search", post(jobs::handle_search_jobs))
        // Cover letter stage
        .route(
            "/api/v1/cover-letters",
            post(cover_letters::handle_generate_cover_letter),
        )
        .route(
            "/api/v1/applications",
            post(applications::handle_record_application)
                .get(applications::handle_list_applications),
        )
        .with_state(state)
}
