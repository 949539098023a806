//! Extractive summarization.
//!
//! Sentences are scored by normalized term frequency with a positional
//! bonus, ranked deterministically, and the top K become key points. The
//! summary is the same selection re-joined in source order.

use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::instrument;

use crate::nlp::{Sentence, StopwordFilter, split_sentences, tokenize};

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("invalid key point count: {0}")]
    InvalidParameter(usize),
}

/// Tunable scoring weights.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Strength of the bonus for sentences near the start of the document.
    /// A sentence at position `i` of `n` is scaled by `1 + w * (n - i) / n`.
    pub positional_bonus_weight: f64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            positional_bonus_weight: 0.2,
        }
    }
}

/// The assembled summary plus the ranked key points. `key_points` is ordered
/// by score descending; `summary` preserves source order.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryResult {
    pub summary: String,
    pub key_points: Vec<String>,
}

pub struct Summarizer {
    config: SummarizerConfig,
    stopwords: StopwordFilter,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer {
    pub fn new() -> Self {
        Self::with_config(SummarizerConfig::default())
    }

    pub fn with_config(config: SummarizerConfig) -> Self {
        Self {
            config,
            stopwords: StopwordFilter::english(),
        }
    }

    /// Select up to `k` key points from `text` and assemble the summary.
    ///
    /// Identical input always yields identical output: exact score ties
    /// break toward the earlier sentence.
    #[instrument(skip_all, fields(chars = text.len(), k))]
    pub fn summarize(&self, text: &str, k: usize) -> Result<SummaryResult, SummarizeError> {
        if k == 0 {
            return Err(SummarizeError::InvalidParameter(k));
        }
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }

        let mut sentences = split_sentences(text);
        match sentences.len() {
            0 => return Err(SummarizeError::EmptyInput),
            1 => {
                let only = sentences.remove(0);
                return Ok(SummaryResult {
                    summary: only.text.clone(),
                    key_points: vec![only.text],
                });
            }
            _ => {}
        }

        let frequencies = self.term_frequencies(&sentences);
        self.score_sentences(&mut sentences, &frequencies);

        let mut ranked: Vec<&Sentence> = sentences.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.index.cmp(&b.index))
        });

        let selected = &ranked[..k.min(ranked.len())];
        let key_points: Vec<String> = selected.iter().map(|s| s.text.clone()).collect();

        let mut in_source_order: Vec<&Sentence> = selected.to_vec();
        in_source_order.sort_by_key(|s| s.index);
        let summary = in_source_order
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(SummaryResult {
            summary,
            key_points,
        })
    }

    /// Term-frequency table over normalized tokens. Stop-words carry no
    /// weight.
    fn term_frequencies(&self, sentences: &[Sentence]) -> FxHashMap<String, f64> {
        let mut frequencies = FxHashMap::default();
        for sentence in sentences {
            for token in tokenize(&sentence.text) {
                if !self.stopwords.is_stopword(&token) {
                    *frequencies.entry(token).or_insert(0.0) += 1.0;
                }
            }
        }
        frequencies
    }

    fn score_sentences(&self, sentences: &mut [Sentence], frequencies: &FxHashMap<String, f64>) {
        let n = sentences.len() as f64;
        for sentence in sentences.iter_mut() {
            let tokens = tokenize(&sentence.text);
            if tokens.is_empty() {
                sentence.score = 0.0;
                continue;
            }
            let weight: f64 = tokens
                .iter()
                .filter(|t| !self.stopwords.is_stopword(t))
                .map(|t| frequencies.get(t).copied().unwrap_or(0.0))
                .sum();
            // Length-normalized, so long sentences earn no free weight
            let base = weight / tokens.len() as f64;
            let position = 1.0 + self.config.positional_bonus_weight * (n - sentence.index as f64) / n;
            sentence.score = base * position;
        }
    }
}

/// One-shot convenience with default weights.
pub fn summarize(text: &str, k: usize) -> Result<SummaryResult, SummarizeError> {
    Summarizer::new().summarize(text, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETS: &str = "Cats are popular pets. Many cats sleep most of the day. \
                        Dogs are popular too. Dogs need daily walks. Fish require an aquarium.";

    #[test]
    fn rejects_zero_k() {
        let err = summarize("Some text here.", 0).unwrap_err();
        assert!(matches!(err, SummarizeError::InvalidParameter(0)));
    }

    #[test]
    fn rejects_blank_input() {
        assert!(matches!(
            summarize("", 3),
            Err(SummarizeError::EmptyInput)
        ));
        assert!(matches!(
            summarize("   \n\t ", 3),
            Err(SummarizeError::EmptyInput)
        ));
    }

    #[test]
    fn single_sentence_is_summary_and_sole_key_point() {
        let result = summarize("Just one sentence without much to rank", 5).unwrap();
        assert_eq!(result.summary, "Just one sentence without much to rank");
        assert_eq!(
            result.key_points,
            vec!["Just one sentence without much to rank"]
        );
    }

    #[test]
    fn k_larger_than_sentence_count_returns_all() {
        let result = summarize(PETS, 50).unwrap();
        assert_eq!(result.key_points.len(), 5);
        // every sentence exactly once
        let mut sorted = result.key_points.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 5);
    }

    #[test]
    fn k_smaller_than_sentence_count_returns_k() {
        let result = summarize(PETS, 2).unwrap();
        assert_eq!(result.key_points.len(), 2);
        for point in &result.key_points {
            assert!(PETS.contains(point.as_str()));
        }
    }

    #[test]
    fn summary_preserves_source_order() {
        // Key points are rank-ordered, but the summary must scan left to
        // right through the source regardless.
        let result = summarize(PETS, 3).unwrap();
        let mut last = 0;
        for sentence in result.summary.split(". ") {
            let needle = sentence.trim_end_matches('.');
            let pos = PETS.find(needle).unwrap();
            assert!(pos >= last);
            last = pos;
        }
    }

    #[test]
    fn summary_is_selected_sentences_joined_in_order() {
        let result = summarize(PETS, 2).unwrap();
        let mut expected: Vec<&str> = result.key_points.iter().map(String::as_str).collect();
        expected.sort_by_key(|p| PETS.find(p).unwrap());
        assert_eq!(result.summary, expected.join(" "));
    }

    #[test]
    fn summarization_is_deterministic() {
        let a = summarize(PETS, 3).unwrap();
        let b = summarize(PETS, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn exact_ties_break_toward_earlier_sentence() {
        // With the positional bonus disabled, identical sentences score
        // identically and the lower index must win.
        let summarizer = Summarizer::with_config(SummarizerConfig {
            positional_bonus_weight: 0.0,
        });
        let text = "Alpha beta gamma delta. Alpha beta gamma delta. Epsilon zeta eta theta.";
        let result = summarizer.summarize(text, 1).unwrap();
        assert_eq!(result.key_points, vec!["Alpha beta gamma delta."]);
    }

    #[test]
    fn positional_bonus_favors_the_lead() {
        // Same content words, so only position separates them.
        let text = "Storms battered the coast today. Storms battered the coast today.";
        let summarizer = Summarizer::new();
        let mut sentences = split_sentences(text);
        let frequencies = summarizer.term_frequencies(&sentences);
        summarizer.score_sentences(&mut sentences, &frequencies);
        assert!(sentences[0].score > sentences[1].score);
    }

    #[test]
    fn frequent_topic_outranks_singleton() {
        let result = summarize(PETS, 2).unwrap();
        // "cats" and "dogs" each appear twice; "fish"/"aquarium" once. The
        // aquarium sentence should not make the top two.
        assert!(
            !result
                .key_points
                .iter()
                .any(|p| p.contains("aquarium"))
        );
    }
}
