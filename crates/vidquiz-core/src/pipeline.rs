use std::sync::Arc;

use futures::{StreamExt, stream};

use crate::{
    config::PipelineConfig,
    generate::QuestionGenerator,
    language::KeywordExtractor,
    types::QuizQuestion,
};

/// Split caption text on blank-line boundaries into trimmed, non-empty
/// sentences. The only pure step of the pipeline.
pub fn split_sentences(captions: &str) -> Vec<String> {
    captions
        .split("\n\n")
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(str::to_string)
        .collect()
}

/// Orchestrates keyword extraction and question generation across the
/// sentences of one transcript. Sentences are independent, so they fan out
/// with bounded concurrency, joined back in source order. One sentence's
/// failure never aborts the batch: it is logged and that sentence is skipped.
pub struct QuizPipeline {
    extractor: Arc<dyn KeywordExtractor>,
    generator: Arc<dyn QuestionGenerator>,
    concurrency: usize,
}

impl QuizPipeline {
    pub fn new(
        extractor: Arc<dyn KeywordExtractor>,
        generator: Arc<dyn QuestionGenerator>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            extractor,
            generator,
            concurrency: config.concurrency.max(1),
        }
    }

    /// Run one pipeline pass over `captions`. The returned list preserves
    /// sentence order and may be empty; an empty list is not an error.
    pub async fn build_quiz(&self, captions: &str) -> Vec<QuizQuestion> {
        let sentences = split_sentences(captions);
        let sentence_count = sentences.len();

        let questions: Vec<QuizQuestion> = stream::iter(sentences.into_iter().enumerate())
            .map(|(index, sentence)| {
                let extractor = Arc::clone(&self.extractor);
                let generator = Arc::clone(&self.generator);
                async move { question_for_sentence(index, &sentence, &*extractor, &*generator).await }
            })
            .buffered(self.concurrency)
            .filter_map(|question| async move { question })
            .collect()
            .await;

        tracing::info!(
            sentences = sentence_count,
            questions = questions.len(),
            "quiz assembled"
        );
        questions
    }
}

async fn question_for_sentence(
    index: usize,
    sentence: &str,
    extractor: &dyn KeywordExtractor,
    generator: &dyn QuestionGenerator,
) -> Option<QuizQuestion> {
    let keywords = match extractor.extract_keywords(sentence).await {
        Ok(keywords) => keywords,
        Err(e) => {
            tracing::warn!(sentence = index, error = %e, "keyword extraction failed, skipping sentence");
            return None;
        }
    };

    if keywords.is_empty() {
        tracing::debug!(sentence = index, "no keywords, skipping sentence");
        return None;
    }

    match generator.generate_question(sentence, &keywords).await {
        Ok(question) => Some(question),
        Err(e) => {
            tracing::warn!(sentence = index, error = %e, "question generation failed, skipping sentence");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::{Result, VidquizError};
    use crate::types::OPTION_COUNT;

    /// Yields each word of the sentence as a keyword, except for sentences
    /// listed as barren (no keywords) or broken (error).
    struct FakeExtractor {
        barren: Vec<&'static str>,
        broken: Vec<&'static str>,
    }

    impl FakeExtractor {
        fn plain() -> Self {
            Self {
                barren: vec![],
                broken: vec![],
            }
        }
    }

    #[async_trait]
    impl KeywordExtractor for FakeExtractor {
        async fn extract_keywords(&self, sentence: &str) -> Result<Vec<String>> {
            if self.broken.iter().any(|b| sentence.contains(b)) {
                return Err(VidquizError::ExtractionFailed {
                    reason: "synthetic failure".to_string(),
                });
            }
            if self.barren.iter().any(|b| sentence.contains(b)) {
                return Ok(vec![]);
            }
            Ok(sentence.split_whitespace().map(str::to_string).collect())
        }
    }

    /// Echoes the source sentence into the question text so ordering is
    /// observable in the output.
    struct FakeGenerator {
        broken: Vec<&'static str>,
    }

    impl FakeGenerator {
        fn plain() -> Self {
            Self { broken: vec![] }
        }
    }

    #[async_trait]
    impl QuestionGenerator for FakeGenerator {
        async fn generate_question(
            &self,
            sentence: &str,
            keywords: &[String],
        ) -> Result<QuizQuestion> {
            if self.broken.iter().any(|b| sentence.contains(b)) {
                return Err(VidquizError::GenerationFailed {
                    reason: "synthetic failure".to_string(),
                });
            }
            Ok(QuizQuestion {
                question: format!("About: {sentence}"),
                options: (0..OPTION_COUNT)
                    .map(|i| format!("{} #{i}", keywords[0]))
                    .collect(),
                correct_answer: 0,
            })
        }
    }

    fn pipeline(extractor: FakeExtractor, generator: FakeGenerator) -> QuizPipeline {
        QuizPipeline::new(
            Arc::new(extractor),
            Arc::new(generator),
            &PipelineConfig::default(),
        )
    }

    #[test]
    fn splits_on_blank_lines() {
        let captions = "Paris is the capital of France.\n\nMars is called the Red Planet.";
        let sentences = split_sentences(captions);
        assert_eq!(
            sentences,
            vec![
                "Paris is the capital of France.",
                "Mars is called the Red Planet.",
            ]
        );
    }

    #[test]
    fn split_drops_empty_segments() {
        let sentences = split_sentences("  first  \n\n\n\n  \n\nsecond\n\n");
        assert_eq!(sentences, vec!["first", "second"]);
    }

    #[test]
    fn split_of_whitespace_is_empty() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("  \n\n \t \n\n").is_empty());
    }

    #[tokio::test]
    async fn empty_captions_give_empty_quiz() {
        let pipeline = pipeline(FakeExtractor::plain(), FakeGenerator::plain());
        let quiz = pipeline.build_quiz("   \n\n  ").await;
        assert!(quiz.is_empty());
    }

    #[tokio::test]
    async fn one_question_per_sentence() {
        let pipeline = pipeline(FakeExtractor::plain(), FakeGenerator::plain());
        let quiz = pipeline
            .build_quiz("Paris is the capital of France.\n\nMars is called the Red Planet.")
            .await;
        assert_eq!(quiz.len(), 2);
        for question in &quiz {
            assert_eq!(question.options.len(), OPTION_COUNT);
            assert!(question.correct_answer < OPTION_COUNT);
        }
    }

    #[tokio::test]
    async fn keywordless_sentence_is_skipped_silently() {
        let extractor = FakeExtractor {
            barren: vec!["second"],
            broken: vec![],
        };
        let pipeline = pipeline(extractor, FakeGenerator::plain());
        let quiz = pipeline.build_quiz("first\n\nsecond\n\nthird").await;
        assert_eq!(quiz.len(), 2);
        assert!(quiz[0].question.contains("first"));
        assert!(quiz[1].question.contains("third"));
    }

    #[tokio::test]
    async fn extraction_failure_does_not_abort_batch() {
        let extractor = FakeExtractor {
            barren: vec![],
            broken: vec!["third"],
        };
        let pipeline = pipeline(extractor, FakeGenerator::plain());
        let quiz = pipeline
            .build_quiz("first\n\nsecond\n\nthird\n\nfourth")
            .await;
        assert_eq!(quiz.len(), 3);
        assert!(quiz[2].question.contains("fourth"));
    }

    #[tokio::test]
    async fn generation_failure_does_not_abort_batch() {
        let generator = FakeGenerator {
            broken: vec!["second"],
        };
        let pipeline = pipeline(FakeExtractor::plain(), generator);
        let quiz = pipeline.build_quiz("first\n\nsecond\n\nthird").await;
        assert_eq!(quiz.len(), 2);
        assert!(quiz[0].question.contains("first"));
        assert!(quiz[1].question.contains("third"));
    }

    #[tokio::test]
    async fn output_preserves_sentence_order_under_filtering() {
        let extractor = FakeExtractor {
            barren: vec!["s3", "s4"],
            broken: vec![],
        };
        let pipeline = pipeline(extractor, FakeGenerator::plain());
        let quiz = pipeline.build_quiz("s1\n\ns2\n\ns3\n\ns4\n\ns5").await;
        let order: Vec<&str> = quiz.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(order, vec!["About: s1", "About: s2", "About: s5"]);
    }
}
