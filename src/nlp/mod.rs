//! Tokenization, sentence splitting, and stop-word filtering.

pub mod sentences;
pub mod stopwords;
pub mod tokens;

pub use sentences::{Sentence, split_sentences};
pub use stopwords::StopwordFilter;
pub use tokens::tokenize;
