// Interview question generation for the voice assistant.
// All LLM calls go through llm_client; all writes go through the DocumentStore trait.

pub mod covers;
pub mod generator;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod request;
