/// Lower-cased word tokens, punctuation stripped. Splits on any
/// non-alphanumeric character; simple by design.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            tokenize("Cats are POPULAR pets, aren't they?"),
            vec!["cats", "are", "popular", "pets", "aren", "t", "they"]
        );
    }

    #[test]
    fn keeps_numbers() {
        assert_eq!(tokenize("约 12 million dollars"), vec!["约", "12", "million", "dollars"]);
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("—!?—").is_empty());
    }
}
