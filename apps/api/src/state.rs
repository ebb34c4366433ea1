use std::sync::Arc;

use crate::applications::store::ApplicationStore;
use crate::llm_client::CompletionBackend;
use crate::persistence::RecordSink;
use crate::search::agent::SearchDelays;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion endpoint. `CompletionClient` in production, a scripted fake in tests.
    pub llm: Arc<dyn CompletionBackend>,
    pub sink: Arc<dyn RecordSink>,
    /// Read side of the `applications` records written through `sink`.
    pub applications: Arc<dyn ApplicationStore>,
    pub search_delays: SearchDelays,
}
