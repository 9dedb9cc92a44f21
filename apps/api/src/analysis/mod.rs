// AI commentary on provider profiles.
// Prompts go out through the shared LLM client; replies are normalized into
// fixed shapes, with heuristic payloads when a reply cannot be validated.

pub mod fallback;
pub mod handlers;
pub mod linkedin;
pub mod models;
pub mod normalizer;
pub mod prompts;
