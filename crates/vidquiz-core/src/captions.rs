use async_trait::async_trait;
use yt_transcript_rs::api::YouTubeTranscriptApi;

use crate::error::{Result, VidquizError};

/// Source of caption text for a video. The pipeline treats every failure mode
/// here the same way: `Ok(None)` means "no captions", and the request stops
/// before any quiz work starts. Implementations must not surface "provider
/// call failed" separately from "video has no caption track".
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Fetch caption text for `video_id` as blank-line-separated blocks, or
    /// `None` when no usable captions exist.
    async fn fetch_captions(&self, video_id: &str) -> Result<Option<String>>;
}

/// Caption source backed by YouTube's caption tracks.
#[derive(Clone)]
pub struct YouTubeCaptionSource {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YouTubeCaptionSource {
    pub fn new() -> Result<Self> {
        Self::with_languages(vec!["en".to_string()])
    }

    pub fn with_languages(languages: Vec<String>) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            VidquizError::CaptionClientInit {
                reason: e.to_string(),
            }
        })?;
        Ok(Self { api, languages })
    }
}

#[async_trait]
impl CaptionSource for YouTubeCaptionSource {
    async fn fetch_captions(&self, video_id: &str) -> Result<Option<String>> {
        let video_id = match sanitize_video_id(video_id) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(video_id, error = %e, "rejecting video id");
                return Ok(None);
            }
        };

        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();
        let transcript = match self.api.fetch_transcript(&video_id, &languages, false).await {
            Ok(transcript) => transcript,
            Err(e) => {
                tracing::warn!(%video_id, error = %e, "caption fetch failed, treating as no captions");
                return Ok(None);
            }
        };

        let text = transcript
            .snippets
            .iter()
            .map(|snippet| snippet.text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }
}

const MAX_VIDEO_ID_LEN: usize = 128;

/// Ensure a video identifier is safe to pass downstream. Only ASCII
/// alphanumerics plus `_` and `-` are allowed.
pub fn sanitize_video_id(raw: &str) -> Result<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(VidquizError::CaptionFetchFailed {
            video_id: raw.to_string(),
            reason: "video id is empty".to_string(),
        });
    }

    if trimmed.len() > MAX_VIDEO_ID_LEN {
        return Err(VidquizError::CaptionFetchFailed {
            video_id: trimmed.to_string(),
            reason: "video id is unexpectedly long".to_string(),
        });
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err(VidquizError::CaptionFetchFailed {
            video_id: trimmed.to_string(),
            reason: "video id contains unsupported characters".to_string(),
        });
    }

    Ok(trimmed.to_string())
}
