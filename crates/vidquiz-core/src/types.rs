use serde::{Deserialize, Serialize};

use crate::error::{Result, VidquizError};

/// Every generated question carries exactly this many answer options.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl QuizQuestion {
    /// Check the structural contract: four options, in-bounds correct index,
    /// non-empty question text. Model output that fails this is discarded.
    pub fn validate(&self) -> Result<()> {
        if self.question.trim().is_empty() {
            return Err(VidquizError::MalformedQuestion {
                reason: "empty question text".to_string(),
            });
        }
        if self.options.len() != OPTION_COUNT {
            return Err(VidquizError::MalformedQuestion {
                reason: format!("expected {} options, got {}", OPTION_COUNT, self.options.len()),
            });
        }
        if self.correct_answer >= OPTION_COUNT {
            return Err(VidquizError::MalformedQuestion {
                reason: format!("correct_answer index {} out of bounds", self.correct_answer),
            });
        }
        Ok(())
    }
}
