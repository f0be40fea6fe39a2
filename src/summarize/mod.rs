//! Summarization backends.
//!
//! Three interchangeable strategies behind one trait: a hosted
//! chat-completion call, a local seq2seq model, and a deterministic
//! extractive fallback.

pub mod chat;
pub mod extractive;
pub mod prompt;
pub mod seq2seq;
pub mod summarizer;

pub use chat::ChatSummarizer;
pub use extractive::ExtractiveSummarizer;
pub use seq2seq::Seq2SeqSummarizer;
pub use summarizer::{MockSummarizer, Summarizer, truncate_to_chars};
