//! Vidquiz Core Library
//!
//! Core functionality for fetching YouTube captions, extracting keywords via
//! syntax analysis, and generating multiple-choice quiz questions with an AI
//! provider.

pub mod captions;
pub mod config;
pub mod error;
pub mod format;
pub mod generate;
pub mod language;
pub mod pipeline;
pub mod provider;
pub mod types;

// Re-export commonly used items at crate root
pub use captions::{CaptionSource, YouTubeCaptionSource, sanitize_video_id};
pub use config::{PipelineConfig, RetryPolicy};
pub use error::{Result, VidquizError};
pub use format::format_quiz_readable;
pub use generate::{ChatCompletionGenerator, QuestionGenerator, parse_question};
pub use language::{KeywordExtractor, SyntaxApiExtractor};
pub use pipeline::{QuizPipeline, split_sentences};
pub use provider::{Provider, ProviderConfig};
pub use types::{OPTION_COUNT, QuizQuestion};
