/// The recovered main content of a page. Immutable once returned;
/// `main_text` is never blank on the success path.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub title: Option<String>,
    pub language: Option<String>,
    pub main_text: String,
}

/// Collapse every whitespace run to a single space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(
            normalize_whitespace("  Hello \t\n  world \n\n again  "),
            "Hello world again"
        );
    }

    #[test]
    fn blank_input_becomes_empty() {
        assert_eq!(normalize_whitespace(" \n\t "), "");
    }
}
