//! Heuristic sentence splitting.
//!
//! Splits on `.`/`!`/`?` followed by whitespace and an uppercase letter or
//! digit (or end of text), with guards for initials and common
//! abbreviations. Best effort, not a grammar.

/// One sentence of the source text, in source order. `index` values are
/// strictly increasing; `score` is assigned later by the summarizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
    pub word_count: usize,
    pub score: f64,
}

/// Lower-cased abbreviations (without the trailing period) that do not end a
/// sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "rev", "gen", "sen", "rep", "gov", "sgt", "capt", "lt", "col",
    "sr", "jr", "st", "mt", "ft", "vs", "etc", "approx", "dept", "est", "fig", "inc", "ltd", "co",
    "corp", "e.g", "i.e", "cf", "al", "u.s", "u.k",
];

/// Characters that may trail the terminal punctuation and still belong to the
/// sentence (closing quotes and brackets).
const TRAILERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let mut raw: Vec<String> = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        if c != '.' && c != '!' && c != '?' {
            i += 1;
            continue;
        }

        // Absorb a run of terminal punctuation plus closing quotes/brackets.
        let mut end = i + 1;
        while end < chars.len()
            && (matches!(chars[end], '.' | '!' | '?') || TRAILERS.contains(&chars[end]))
        {
            end += 1;
        }

        if !boundary_follows(&chars, end) {
            i = end;
            continue;
        }
        if c == '.' && is_abbreviation(&chars, i) {
            i = end;
            continue;
        }

        push_sentence(&mut raw, &chars[start..end]);
        start = end;
        while start < chars.len() && chars[start].is_whitespace() {
            start += 1;
        }
        i = start;
    }

    if start < chars.len() {
        push_sentence(&mut raw, &chars[start..]);
    }

    raw.into_iter()
        .enumerate()
        .map(|(index, text)| {
            let word_count = text.split_whitespace().count();
            Sentence {
                index,
                text,
                word_count,
                score: 0.0,
            }
        })
        .collect()
}

fn push_sentence(out: &mut Vec<String>, chars: &[char]) {
    let text: String = chars.iter().collect();
    let text = text.trim().to_string();
    if !text.is_empty() {
        out.push(text);
    }
}

/// True when `pos` (just past the punctuation run) sits at end of text, or at
/// whitespace followed by an uppercase letter, digit, or opening quote.
fn boundary_follows(chars: &[char], pos: usize) -> bool {
    if pos >= chars.len() {
        return true;
    }
    if !chars[pos].is_whitespace() {
        return false;
    }
    let mut j = pos;
    while j < chars.len() && chars[j].is_whitespace() {
        j += 1;
    }
    if j >= chars.len() {
        return true;
    }
    let mut next = chars[j];
    if matches!(next, '"' | '\'' | '(' | '[' | '\u{201c}' | '\u{2018}') {
        let Some(&after) = chars.get(j + 1) else {
            return true;
        };
        next = after;
    }
    next.is_uppercase() || next.is_numeric()
}

/// Inspect the token immediately preceding the period at `period_idx`.
fn is_abbreviation(chars: &[char], period_idx: usize) -> bool {
    let mut start = period_idx;
    while start > 0 {
        let prev = chars[start - 1];
        if prev.is_alphanumeric() || prev == '.' {
            start -= 1;
        } else {
            break;
        }
    }
    if start == period_idx {
        return false;
    }

    let token: String = chars[start..period_idx].iter().collect::<String>();
    let token = token.trim_matches('.').to_lowercase();
    if token.is_empty() {
        return false;
    }

    // Single-letter initials: "J. Smith", "George W. Bush"
    if token.chars().count() == 1 && token.chars().all(|c| c.is_alphabetic()) {
        return true;
    }

    ABBREVIATIONS.contains(&token.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        split_sentences(input)
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn splits_simple_sentences() {
        let got = texts("Cats are popular pets. Many cats sleep most of the day. Dogs bark!");
        assert_eq!(
            got,
            vec![
                "Cats are popular pets.",
                "Many cats sleep most of the day.",
                "Dogs bark!"
            ]
        );
    }

    #[test]
    fn indexes_are_strictly_increasing() {
        let sentences = split_sentences("One. Two. Three. Four.");
        for (i, s) in sentences.iter().enumerate() {
            assert_eq!(s.index, i);
        }
    }

    #[test]
    fn counts_words() {
        let sentences = split_sentences("The quick brown fox jumps. Over the dog.");
        assert_eq!(sentences[0].word_count, 5);
        assert_eq!(sentences[1].word_count, 3);
    }

    #[test]
    fn degenerate_input_is_one_sentence() {
        let got = texts("no terminal punctuation here at all");
        assert_eq!(got, vec!["no terminal punctuation here at all"]);
    }

    #[test]
    fn keeps_initials_together() {
        let got = texts("The report was written by J. Smith. It was published yesterday.");
        assert_eq!(got.len(), 2);
        assert!(got[0].ends_with("J. Smith."));
    }

    #[test]
    fn keeps_title_abbreviations_together() {
        let got = texts("Dr. Jones arrived late. Mr. Brown had already left.");
        assert_eq!(
            got,
            vec!["Dr. Jones arrived late.", "Mr. Brown had already left."]
        );
    }

    #[test]
    fn keeps_latin_abbreviations_together() {
        let got = texts("Bring supplies, e.g. Water and rope. The trail is long.");
        assert_eq!(got.len(), 2);
        assert!(got[0].contains("e.g. Water"));
    }

    #[test]
    fn lowercase_continuation_does_not_split() {
        let got = texts("The file is named readme.txt and nothing else. That is all.");
        assert_eq!(got.len(), 2);
        assert!(got[0].contains("readme.txt and"));
    }

    #[test]
    fn question_and_exclamation_terminate() {
        let got = texts("Really? Yes! Good.");
        assert_eq!(got, vec!["Really?", "Yes!", "Good."]);
    }

    #[test]
    fn trailing_quote_stays_with_sentence() {
        let got = texts("She said \"stop.\" Then she left.");
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], "She said \"stop.\"");
    }

    #[test]
    fn ellipsis_is_absorbed() {
        let got = texts("He paused... Then he spoke.");
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], "He paused...");
    }

    #[test]
    fn blank_input_yields_nothing() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n ").is_empty());
    }
}
