// Skill extraction: LLM-backed with a deterministic keyword fallback.
// All LLM calls go through llm_client; extraction never fails the caller.

pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod vocabulary;
