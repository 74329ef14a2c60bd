// Interview practice: question generation, answer scoring, mock interviews.
// All completion calls go through llm_client::CompletionClient.

pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod sessions;
