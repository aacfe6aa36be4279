use async_trait::async_trait;

use crate::{
    config::RetryPolicy,
    error::{Result, VidquizError},
};

/// Extracts the salient terms of one sentence. Called once per sentence, never
/// batched; a failure here is recovered at the per-sentence boundary by the
/// pipeline, so implementations just report it.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    async fn extract_keywords(&self, sentence: &str) -> Result<Vec<String>>;
}

const ANALYZE_SYNTAX_URL: &str = "https://language.googleapis.com/v1/documents:analyzeSyntax";
const API_KEY_ENV: &str = "GOOGLE_NL_API_KEY";

/// Keyword extractor backed by the Cloud Natural Language syntax-analysis
/// endpoint. Keeps the common nouns of the sentence, duplicates included.
pub struct SyntaxApiExtractor {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl SyntaxApiExtractor {
    /// Read the API key from the environment.
    pub fn from_env(client: reqwest::Client, retry: RetryPolicy) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| VidquizError::MissingApiKey {
            env_var: API_KEY_ENV.to_string(),
        })?;
        Ok(Self {
            client,
            api_url: ANALYZE_SYNTAX_URL.to_string(),
            api_key,
            retry,
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    async fn analyze_once(&self, sentence: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({
                "document": {
                    "type": "PLAIN_TEXT",
                    "content": sentence,
                },
                "encodingType": "UTF8",
            }))
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let tokens = response["tokens"]
            .as_array()
            .ok_or_else(|| VidquizError::ExtractionFailed {
                reason: format!("unexpected syntax-analysis response: {response}"),
            })?;

        let keywords = tokens
            .iter()
            .filter(|token| token["partOfSpeech"]["tag"].as_str() == Some("NOUN"))
            .filter_map(|token| token["text"]["content"].as_str())
            .map(str::to_string)
            .collect();

        Ok(keywords)
    }
}

#[async_trait]
impl KeywordExtractor for SyntaxApiExtractor {
    async fn extract_keywords(&self, sentence: &str) -> Result<Vec<String>> {
        let mut attempt = 0;
        loop {
            match self.analyze_once(sentence).await {
                Ok(keywords) => return Ok(keywords),
                Err(e) if e.is_transient() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay(attempt);
                    tracing::debug!(error = %e, attempt, "syntax analysis failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
