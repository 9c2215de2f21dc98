// Report generation: prompt/schema definitions for the three model tasks,
// the orchestrator that runs them, and the HTTP handlers in front of it.
// All model calls go through llm_client — no direct Gemini calls here.

pub mod celebrity_match;
pub mod handlers;
pub mod orchestrator;
pub mod personality;
pub mod prompts;
pub mod tasks;
pub mod view;
pub mod visualization;

#[cfg(test)]
pub mod testing;
