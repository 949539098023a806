//! Charset detection and decoding of fetched bodies.
//!
//! Detection order: the Content-Type header parameter, a `<meta>` declaration
//! in the first few KB, then chardetng's statistical guess.

use crate::fetcher::{errors::FetchError, types::Charset};
use encoding_rs::Encoding;
use regex::Regex;
use std::sync::LazyLock;

/// How many leading bytes to scan for `<meta>` charset declarations.
const META_SCAN_BYTES: usize = 4096;

static HEADER_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

/// Decode a response body to UTF-8, returning the text and the charset it was
/// decoded from.
pub fn decode_body(content_type: &str, body: &[u8]) -> Result<(String, Charset), FetchError> {
    let encoding = detect_encoding(content_type, body);
    let (decoded, _, had_errors) = encoding.decode(body);
    if had_errors {
        return Err(FetchError::Charset(format!(
            "body is not valid {}",
            encoding.name()
        )));
    }
    Ok((decoded.into_owned(), Charset::from_encoding(encoding)))
}

fn detect_encoding(content_type: &str, body: &[u8]) -> &'static Encoding {
    if let Some(enc) = labeled_encoding(&HEADER_CHARSET, content_type) {
        return enc;
    }

    let head = &body[..body.len().min(META_SCAN_BYTES)];
    let head_str = String::from_utf8_lossy(head);
    if let Some(enc) = labeled_encoding(&META_CHARSET, &head_str) {
        return enc;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, false);
    detector.guess(None, true)
}

fn labeled_encoding(pattern: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = pattern.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_from_content_type_header() {
        let (text, charset) =
            decode_body("text/html; charset=utf-8", "Hello, 世界!".as_bytes()).unwrap();
        assert_eq!(text, "Hello, 世界!");
        assert_eq!(charset, Charset::Utf8);
    }

    #[test]
    fn charset_from_meta_tag() {
        let body = b"<html><head><meta charset=\"windows-1252\"></head><body>caf\xe9</body></html>";
        let (text, charset) = decode_body("text/html", body).unwrap();
        assert!(text.contains("café"));
        assert_eq!(charset, Charset::Windows1252);
    }

    #[test]
    fn charset_from_meta_http_equiv() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"></head></html>";
        let enc = detect_encoding("text/html", body);
        assert_eq!(Charset::from_encoding(enc), Charset::Windows1252);
    }

    #[test]
    fn decodes_unlabeled_ascii() {
        let (text, _) = decode_body("text/html", b"<html><body>plain</body></html>").unwrap();
        assert_eq!(text, "<html><body>plain</body></html>");
    }
}
