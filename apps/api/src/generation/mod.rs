// Resume generation: prompt → model → tolerant parse → render.
// All model calls go through llm_client::TextGenerator.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod reply_parser;
pub mod synthesizer;
