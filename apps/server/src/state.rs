//! Shared application state for the vidquiz server

use std::sync::Arc;

use vidquiz_core::{CaptionSource, QuizPipeline};

/// Shared state accessible by all handlers. Clients are constructed once at
/// startup and injected here; handlers never build their own.
#[derive(Clone)]
pub struct AppState {
    /// Caption provider for the requested video
    pub captions: Arc<dyn CaptionSource>,
    /// Keyword-extraction + question-generation pipeline
    pub pipeline: Arc<QuizPipeline>,
}

impl AppState {
    pub fn new(captions: Arc<dyn CaptionSource>, pipeline: Arc<QuizPipeline>) -> Self {
        Self { captions, pipeline }
    }
}
