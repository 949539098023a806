//! Main-content extraction.
//!
//! Parses HTML into a scored block tree and recovers the article body as
//! plain text. See [`block`] for the scoring heuristics.

pub mod block;
pub mod language;
pub mod model;

#[cfg(test)]
mod tests;

pub use block::{Block, BlockTag, ExtractorConfig};
pub use model::ExtractedDocument;

use scraper::Html;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// Nothing on the page scored above threshold, or the result was too
    /// short to be meaningfully summarized.
    #[error("no extractable content found")]
    NoContentFound,
}

/// Extract with default heuristics.
pub fn extract(html: &str, base_url: &Url) -> Result<ExtractedDocument, ExtractError> {
    extract_with(&ExtractorConfig::default(), html, base_url)
}

#[instrument(skip_all, fields(url = %base_url))]
pub fn extract_with(
    config: &ExtractorConfig,
    html: &str,
    base_url: &Url,
) -> Result<ExtractedDocument, ExtractError> {
    let document = Html::parse_document(html);
    let blocks = block::collect_blocks(&document, config);

    let root_id = block::select_content_root(&document, &blocks, config)
        .ok_or(ExtractError::NoContentFound)?;

    let main_text = block::assemble_text(&document, &blocks, root_id, config);
    if main_text.chars().count() < config.min_content_chars {
        return Err(ExtractError::NoContentFound);
    }

    let title = block::title_candidate(&document, &blocks, root_id)
        .or_else(|| block::document_title(&document));
    let language = language::detect_language(&main_text);

    debug!(
        chars = main_text.len(),
        blocks = blocks.len(),
        title = title.as_deref().unwrap_or(""),
        "extracted main content"
    );

    Ok(ExtractedDocument {
        title,
        language,
        main_text,
    })
}
