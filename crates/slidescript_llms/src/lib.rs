//! slidescript_llms: provider-agnostic chat completions for the slidescript pipeline.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  ProviderRegistry                    │
//! │  ┌──────────────────────────────────────────────┐   │
//! │  │  HashMap<String, Arc<dyn Provider>>           │   │
//! │  └──────────────────────────────────────────────┘   │
//! │                       │                              │
//! │          ┌────────────┴────────────┐                │
//! │          ▼                         ▼                │
//! │   ┌─────────────┐          ┌─────────────┐         │
//! │   │   OpenAI    │          │    Groq     │         │
//! │   │ (chat wire) │          │ (chat wire) │         │
//! │   └─────────────┘          └─────────────┘         │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Both backends speak the OpenAI-compatible chat-completions wire format and
//! share one implementation, [`OpenAIProvider`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slidescript_llms::{GenerateRequest, Message, OpenAIProvider, Provider};
//!
//! # async fn run() -> slidescript_llms::Result<()> {
//! let provider = OpenAIProvider::groq("gsk-...")?;
//! let request = GenerateRequest::new(
//!     "llama-3.3-70b-versatile",
//!     vec![Message::system("Be brief."), Message::user("Hello")],
//! );
//! let response = provider.generate(request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export core abstractions
pub use error::{Error, Result};
pub use provider::{Provider, ProviderRegistry};

// Re-export provider implementations
pub use providers::OpenAIProvider;
pub use providers::openai::OpenAIConfig;

// Re-export commonly used types
pub use types::{
    FinishReason, FinishReasonKind, GenerateOptions, GenerateRequest, GenerateResponse, Headers,
    Message, Role, Usage,
};
