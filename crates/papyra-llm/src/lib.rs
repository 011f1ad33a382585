//! papyra-llm — hosted chat-completion access.
//!
//! `backend` holds the [`backend::LlmBackend`] trait and the OpenAI
//! implementation; `enrich` holds the article enrichment calls (summary,
//! topics) and the chatbot answer call, each with its fixed fallback.

pub mod backend;
pub mod enrich;

pub use backend::{LlmBackend, LlmError, LlmRequest, LlmResponse, Message, OpenAiBackend};
pub use enrich::LlmService;
