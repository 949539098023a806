//! Stop-word filtering backed by the `stop-words` crate's English list.

use rustc_hash::FxHashSet;
use stop_words::{LANGUAGE, get};

/// A set of words carrying no frequency weight. Stop-words are excluded from
/// scoring but always retained in sentence text.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    words: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    pub fn english() -> Self {
        let words = get(LANGUAGE::English)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();
        Self { words }
    }

    /// Build from an explicit list; used by tests and custom pipelines.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}
