// Resume stage: intake checks, token budgeting and LLM extraction into ResumeRecord.

pub mod budget;
pub mod handlers;
pub mod intake;
pub mod parser;
pub mod prompts;
pub mod skills;
