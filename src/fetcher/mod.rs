pub mod client;
pub mod decode;
pub mod errors;
pub mod types;

pub use client::{FetchConfig, build_client, fetch, fetch_with};
pub use errors::FetchError;
pub use types::{Charset, PageResponse};
