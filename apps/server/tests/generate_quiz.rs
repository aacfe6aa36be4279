//! Integration tests for the quiz-generation endpoint, driven through the
//! router with fake external services.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use vidquiz_core::{
    CaptionSource, KeywordExtractor, OPTION_COUNT, PipelineConfig, QuestionGenerator, QuizPipeline,
    QuizQuestion, Result, VidquizError,
};
use vidquiz_server::{AppState, create_router};

/// Caption source with a scripted outcome per test.
enum FakeCaptions {
    Text(&'static str),
    Missing,
    Failing,
}

#[async_trait]
impl CaptionSource for FakeCaptions {
    async fn fetch_captions(&self, _video_id: &str) -> Result<Option<String>> {
        match self {
            FakeCaptions::Text(text) => Ok(Some(text.to_string())),
            FakeCaptions::Missing => Ok(None),
            FakeCaptions::Failing => Err(VidquizError::CaptionClientInit {
                reason: "synthetic failure".to_string(),
            }),
        }
    }
}

/// Extractor that fails for sentences containing any listed marker and
/// otherwise yields the sentence's words.
struct FakeExtractor {
    broken: Vec<&'static str>,
}

#[async_trait]
impl KeywordExtractor for FakeExtractor {
    async fn extract_keywords(&self, sentence: &str) -> Result<Vec<String>> {
        if self.broken.iter().any(|b| sentence.contains(b)) {
            return Err(VidquizError::ExtractionFailed {
                reason: "synthetic failure".to_string(),
            });
        }
        Ok(sentence.split_whitespace().map(str::to_string).collect())
    }
}

struct FakeGenerator;

#[async_trait]
impl QuestionGenerator for FakeGenerator {
    async fn generate_question(&self, sentence: &str, keywords: &[String]) -> Result<QuizQuestion> {
        Ok(QuizQuestion {
            question: format!("About: {sentence}"),
            options: (0..OPTION_COUNT)
                .map(|i| format!("{} #{i}", keywords[0]))
                .collect(),
            correct_answer: 1,
        })
    }
}

fn test_server(captions: FakeCaptions, broken_sentences: Vec<&'static str>) -> TestServer {
    let pipeline = QuizPipeline::new(
        Arc::new(FakeExtractor {
            broken: broken_sentences,
        }),
        Arc::new(FakeGenerator),
        &PipelineConfig::default(),
    );
    let state = Arc::new(AppState::new(Arc::new(captions), Arc::new(pipeline)));
    TestServer::new(create_router(state)).expect("router should build")
}

#[tokio::test]
async fn health_endpoint_responds() {
    let server = test_server(FakeCaptions::Missing, vec![]);
    let response = server.get("/api/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn get_on_quiz_endpoint_is_method_not_allowed() {
    let server = test_server(FakeCaptions::Missing, vec![]);
    let response = server.get("/api/quiz/generate").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn missing_captions_give_bad_request() {
    let server = test_server(FakeCaptions::Missing, vec![]);
    let response = server
        .post("/api/quiz/generate")
        .json(&json!({ "videoId": "dQw4w9WgXcQ" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "No captions found." }));
}

#[tokio::test]
async fn caption_source_failure_gives_internal_error() {
    let server = test_server(FakeCaptions::Failing, vec![]);
    let response = server
        .post("/api/quiz/generate")
        .json(&json!({ "videoId": "dQw4w9WgXcQ" }))
        .await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "Failed to generate quiz." }));
}

#[tokio::test]
async fn two_sentences_give_two_questions() {
    let server = test_server(
        FakeCaptions::Text("Paris is the capital of France.\n\nMars is called the Red Planet."),
        vec![],
    );
    let response = server
        .post("/api/quiz/generate")
        .json(&json!({ "videoId": "dQw4w9WgXcQ" }))
        .await;
    response.assert_status_ok();

    let quiz: Vec<QuizQuestion> = response.json();
    assert_eq!(quiz.len(), 2);
    for question in &quiz {
        assert_eq!(question.options.len(), OPTION_COUNT);
        assert!(question.correct_answer < OPTION_COUNT);
    }
}

#[tokio::test]
async fn failing_sentence_is_excluded_but_others_survive() {
    let server = test_server(
        FakeCaptions::Text("first\n\nsecond\n\nthird"),
        vec!["second"],
    );
    let response = server
        .post("/api/quiz/generate")
        .json(&json!({ "videoId": "dQw4w9WgXcQ" }))
        .await;
    response.assert_status_ok();

    let quiz: Vec<QuizQuestion> = response.json();
    let questions: Vec<&str> = quiz.iter().map(|q| q.question.as_str()).collect();
    assert_eq!(questions, vec!["About: first", "About: third"]);
}

#[tokio::test]
async fn whitespace_captions_give_empty_quiz_not_error() {
    let server = test_server(FakeCaptions::Text("   \n\n  "), vec![]);
    let response = server
        .post("/api/quiz/generate")
        .json(&json!({ "videoId": "dQw4w9WgXcQ" }))
        .await;
    response.assert_status_ok();

    let quiz: Vec<QuizQuestion> = response.json();
    assert!(quiz.is_empty());
}
