// Cover letter stage: tone/language-parameterised generation, returned verbatim.

pub mod generator;
pub mod handlers;
pub mod prompts;
