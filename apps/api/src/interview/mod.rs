// Interview session engine.
// Generates questions for a role, grades answers one at a time, and summarizes at the end.
// Providers sit behind traits so the orchestrator never talks to an LLM directly.

pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod providers;
pub mod sentiment;
pub mod store;

#[cfg(test)]
pub mod test_support;
