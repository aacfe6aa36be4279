//! Quiz-generation endpoint

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;
use vidquiz_core::QuizQuestion;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    pub video_id: String,
}

/// POST /api/quiz/generate
///
/// Fetches captions for the requested video and runs the quiz pipeline over
/// them. Responds 400 when no captions exist, 200 with the (possibly empty)
/// ordered question list otherwise.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateQuizRequest>,
) -> Result<Json<Vec<QuizQuestion>>, ApiError> {
    let captions = state.captions.fetch_captions(&request.video_id).await?;
    let Some(captions) = captions else {
        tracing::info!(video_id = %request.video_id, "no captions found");
        return Err(ApiError::NoCaptions);
    };

    let quiz = state.pipeline.build_quiz(&captions).await;
    Ok(Json(quiz))
}
