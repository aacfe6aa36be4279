use thiserror::Error;

#[derive(Error, Debug)]
pub enum VidquizError {
    #[error("Caption client initialization failed: {reason}")]
    CaptionClientInit { reason: String },

    #[error("Caption fetch failed for {video_id}: {reason}")]
    CaptionFetchFailed { video_id: String, reason: String },

    #[error("Keyword extraction failed: {reason}")]
    ExtractionFailed { reason: String },

    #[error("Question generation failed: {reason}")]
    GenerationFailed { reason: String },

    #[error("Malformed question from model: {reason}")]
    MalformedQuestion { reason: String },

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },
}

impl VidquizError {
    /// Whether retrying the same call has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            VidquizError::ApiError(e) => match e.status() {
                Some(status) => status.is_server_error() || status.as_u16() == 429,
                None => e.is_timeout() || e.is_connect(),
            },
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, VidquizError>;
