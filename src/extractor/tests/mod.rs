use std::fs;
use url::Url;

use crate::extractor::{ExtractError, extract};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

fn test_url() -> Url {
    Url::parse("https://example.com/article").unwrap()
}

#[test]
fn extracts_article_body() {
    let html = fixture("article.html");
    let doc = extract(&html, &test_url()).unwrap();

    assert_eq!(
        doc.title.as_deref(),
        Some("City Council Approves Riverside Park Expansion")
    );
    assert!(doc.main_text.contains("seven to two"));
    assert!(doc.main_text.contains("forty acres"));
    assert!(doc.main_text.contains("Elena Morales"));

    // Boilerplate never leaks into the body
    assert!(!doc.main_text.contains("Subscribe"));
    assert!(!doc.main_text.contains("Flood study findings"));
    assert!(!doc.main_text.contains("All rights reserved"));

    assert_eq!(doc.language.as_deref(), Some("eng"));
}

#[test]
fn article_text_is_whitespace_normalized() {
    let html = fixture("article.html");
    let doc = extract(&html, &test_url()).unwrap();
    assert!(!doc.main_text.contains('\n'));
    assert!(!doc.main_text.contains("  "));
}

#[test]
fn rejects_links_only_page() {
    let html = fixture("links_only.html");
    let err = extract(&html, &test_url()).unwrap_err();
    assert!(matches!(err, ExtractError::NoContentFound));
}

#[test]
fn rejects_below_minimum_length() {
    let html = fixture("short.html");
    let err = extract(&html, &test_url()).unwrap_err();
    assert!(matches!(err, ExtractError::NoContentFound));
}

#[test]
fn accepts_minimal_valid_content() {
    let html = format!(
        "<!DOCTYPE html><html><head><title>Valid Article</title></head><body>\
         <article><h1>Valid Article</h1><p>{}</p></article></body></html>",
        "This is a valid article with enough content to pass the minimum requirements. "
            .repeat(10)
    );
    let doc = extract(&html, &test_url()).unwrap();
    assert_eq!(doc.title.as_deref(), Some("Valid Article"));
    assert!(doc.main_text.chars().count() >= 200);
}

#[test]
fn tolerates_malformed_html() {
    let body = "Unclosed tags but still a long enough run of article prose to extract. ";
    let html = format!(
        "<html><head><title>Broken</title><body><div><p>{}<div>{}",
        body.repeat(4),
        body.repeat(4)
    );
    // html5ever repairs the tree; extraction must not panic either way
    if let Ok(doc) = extract(&html, &test_url()) {
        assert!(doc.main_text.contains("Unclosed tags"));
    }
}

#[test]
fn empty_input_fails() {
    assert!(extract("", &test_url()).is_err());
    assert!(extract("   \n  ", &test_url()).is_err());
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extract_never_panics(html in ".*") {
            let _ = extract(&html, &test_url());
        }

        #[test]
        fn extracted_text_is_never_blank(html in ".*") {
            if let Ok(doc) = extract(&html, &test_url()) {
                prop_assert!(!doc.main_text.trim().is_empty());
            }
        }
    }
}
