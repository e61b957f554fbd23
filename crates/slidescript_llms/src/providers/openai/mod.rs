//! OpenAI-compatible chat-completions provider (OpenAI, Groq)

mod convert;
mod provider;
mod types;

pub use provider::OpenAIProvider;
pub use types::{GROQ_BASE_URL, OPENAI_BASE_URL, OpenAIConfig};
