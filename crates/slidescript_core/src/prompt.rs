//! The fixed grounding prompt.
//!
//! Two messages: a verbatim system instruction and one human message that embeds the
//! whole context document, the task question and an answer cue. Assembly is plain
//! string concatenation, so braces or `{context}`-like tokens inside slide text are
//! never interpreted.

use slidescript_llms::Message;

use crate::context::ContextDocument;

pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful AI assistant who answers user questions based on the provided context.";

pub const SPEAKER_SCRIPT_QUESTION: &str = "For each PowerPoint slide provided above, write a 2-minute script that effectively conveys the key points.\nEnsure a smooth flow between slides, maintaining a clear and engaging narrative.";

/// The answer the backend is told to give when the context does not cover the question.
pub const FALLBACK_ANSWER: &str = "I don't know";

const GROUNDING_DIRECTIVE: &str = "Answer user question based on the provided context ONLY! If you do not know the answer, just say \"I don't know\".";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub system_instruction: String,
    pub grounding_context: ContextDocument,
    pub question: String,
}

impl PromptRequest {
    pub fn new(
        system_instruction: impl Into<String>,
        grounding_context: ContextDocument,
        question: impl Into<String>,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            grounding_context,
            question: question.into(),
        }
    }

    /// The speaker-script request: fixed instruction and question around `context`.
    pub fn speaker_script(context: ContextDocument) -> Self {
        Self::new(SYSTEM_INSTRUCTION, context, SPEAKER_SCRIPT_QUESTION)
    }

    pub fn human_message(&self) -> String {
        let context = self.grounding_context.as_str();
        let mut out = String::with_capacity(
            GROUNDING_DIRECTIVE.len() + context.len() + self.question.len() + 64,
        );
        out.push_str(GROUNDING_DIRECTIVE);
        out.push_str("\n### Context:\n");
        out.push_str(context);
        out.push_str("\n\n### Question:\n");
        out.push_str(&self.question);
        out.push_str("\n\n### Answer:");
        out
    }

    /// `[system, user]`, in that order.
    pub fn to_messages(&self) -> Vec<Message> {
        vec![
            Message::system(self.system_instruction.clone()),
            Message::user(self.human_message()),
        ]
    }
}
