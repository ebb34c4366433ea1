// Job search stage: completion call, progress reporting, parsing, scoring and fallback.

pub mod agent;
pub mod fallback;
pub mod handlers;
pub mod listings;
pub mod progress;
pub mod prompts;
pub mod relevance;
