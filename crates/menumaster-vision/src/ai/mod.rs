//! AI-facing pieces: prompt text, response schema, and model backends

pub mod backend;
pub mod gemini;
pub mod prompts;
pub mod schema;
