use async_trait::async_trait;

use crate::{
    config::RetryPolicy,
    error::{Result, VidquizError},
    provider::Provider,
    types::QuizQuestion,
};

/// Produces one multiple-choice question from a sentence and its keywords.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate_question(&self, sentence: &str, keywords: &[String]) -> Result<QuizQuestion>;
}

const SYSTEM_PROMPT: &str = r#"You are a quiz author. You write one multiple-choice question at a time from a single source sentence.

You MUST output ONLY valid JSON matching this exact structure (no markdown, no explanation):
{"question": "Your question here", "options": ["Option 1", "Option 2", "Option 3", "Option 4"], "correct_answer": 0}

Rules:
- Exactly four answer options
- correct_answer is the zero-based index of the right option
- The question must be answerable from the source sentence alone
- Output ONLY the JSON, nothing else"#;

/// Question generator backed by an OpenAI-compatible chat-completions API.
pub struct ChatCompletionGenerator {
    client: reqwest::Client,
    provider: Provider,
    api_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl ChatCompletionGenerator {
    /// Read the provider's API key from the environment.
    pub fn from_env(client: reqwest::Client, provider: Provider, retry: RetryPolicy) -> Result<Self> {
        let api_key = provider.validate_api_key()?;
        let api_url = provider.config().api_url.to_string();
        Ok(Self {
            client,
            provider,
            api_url,
            api_key,
            retry,
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    async fn generate_once(&self, sentence: &str, keywords: &[String]) -> Result<QuizQuestion> {
        let config = self.provider.config();
        let user_prompt = build_prompt(sentence, keywords);

        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": config.model,
                "messages": [
                    {
                        "role": "system",
                        "content": SYSTEM_PROMPT,
                    },
                    {
                        "role": "user",
                        "content": user_prompt,
                    },
                ],
                "temperature": 0.7,
            }))
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| VidquizError::GenerationFailed {
                reason: format!("invalid API response: {response}"),
            })?;

        parse_question(content)
    }
}

#[async_trait]
impl QuestionGenerator for ChatCompletionGenerator {
    async fn generate_question(&self, sentence: &str, keywords: &[String]) -> Result<QuizQuestion> {
        let mut attempt = 0;
        loop {
            match self.generate_once(sentence, keywords).await {
                Ok(question) => return Ok(question),
                Err(e) if e.is_transient() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay(attempt);
                    tracing::debug!(error = %e, attempt, "question generation failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn build_prompt(sentence: &str, keywords: &[String]) -> String {
    format!(
        "Create a multiple-choice quiz question based on the following sentence: '{}'. \
         Include the following keywords in the question or answer options: {}. \
         Provide four answer options, one of which is the correct answer.",
        sentence,
        keywords.join(", ")
    )
}

/// Parse the model's raw text into a validated question. Models wrap JSON in
/// markdown fences often enough that we strip them before parsing; anything
/// that still fails to parse or validate is rejected.
pub fn parse_question(raw: &str) -> Result<QuizQuestion> {
    let stripped = strip_code_fences(raw);
    let question: QuizQuestion =
        serde_json::from_str(stripped).map_err(|e| VidquizError::MalformedQuestion {
            reason: format!("invalid JSON: {e}"),
        })?;
    question.validate()?;
    Ok(question)
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
