// Resume analysis: prompt construction, model dispatch, response sectioning.
// All model calls go through llm_client — nothing here talks HTTP directly.

pub mod handlers;
pub mod prompts;
pub mod sections;
pub mod service;
