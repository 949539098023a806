#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use distill::extractor::extract;
use distill::nlp::split_sentences;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes, decoded leniently - extraction and splitting must
    // never panic regardless of input.
    let html = String::from_utf8_lossy(data);

    let url = Url::parse("https://example.com/article").unwrap();
    let _ = extract(&html, &url);
    let _ = split_sentences(&html);
});
