//! End-to-end orchestration: fetch, extract, summarize.
//!
//! The [`Engine`] owns the tuning knobs and the fetch admission semaphore.
//! Component failures propagate with their kind intact; the HTTP boundary
//! performs the final status mapping.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::extractor::{self, ExtractError, ExtractorConfig};
use crate::fetcher::{self, FetchConfig, FetchError, PageResponse};
use crate::summarizer::{SummarizeError, Summarizer, SummarizerConfig, SummaryResult};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Summarize(#[from] SummarizeError),

    /// The fetch admission limit is exhausted; the caller should retry
    /// shortly.
    #[error("too many concurrent fetches in flight")]
    Busy,
}

/// Seam between the orchestrator and the network, mockable in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<PageResponse, FetchError>;
}

/// Production fetcher: a reqwest client configured with the service's
/// timeout, size, and redirect limits.
pub struct HttpFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let client = fetcher::build_client(&config);
        Self { client, config }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<PageResponse, FetchError> {
        fetcher::fetch_with(&self.client, &self.config, url).await
    }
}

/// Everything the engine needs, bundled so tests can tighten limits.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub fetch: FetchConfig,
    pub extractor: ExtractorConfig,
    pub summarizer: SummarizerConfig,
    pub max_concurrent_fetches: Option<usize>,
}

const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 50;

pub struct Engine {
    fetcher: Arc<dyn PageFetcher>,
    extractor_config: ExtractorConfig,
    summarizer: Summarizer,
    fetch_permits: Semaphore,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(config.fetch.clone()));
        Self::with_fetcher(fetcher, config)
    }

    /// Build with an explicit fetcher; unit tests inject a mock here.
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, config: EngineConfig) -> Self {
        Self {
            fetcher,
            extractor_config: config.extractor,
            summarizer: Summarizer::with_config(config.summarizer),
            fetch_permits: Semaphore::new(
                config
                    .max_concurrent_fetches
                    .unwrap_or(DEFAULT_MAX_CONCURRENT_FETCHES),
            ),
        }
    }

    /// Build from the application-level configuration.
    pub fn from_app_config(config: &Config) -> Self {
        Self::new(EngineConfig {
            fetch: FetchConfig {
                connect_timeout: std::time::Duration::from_secs(
                    config.fetch_connect_timeout_secs(),
                ),
                request_timeout: std::time::Duration::from_secs(config.fetch_timeout_secs()),
                max_body_bytes: config.fetch_max_body_bytes(),
                max_redirects: config.fetch_max_redirects(),
            },
            extractor: ExtractorConfig::default(),
            summarizer: SummarizerConfig::default(),
            max_concurrent_fetches: Some(config.max_concurrent_fetches()),
        })
    }

    /// Run the whole pipeline for one URL.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn process(&self, url: &str, k: usize) -> Result<SummaryResult, PipelineError> {
        let page = {
            // Admission control applies to the fetch only; the CPU-bound
            // stages below run unguarded.
            let _permit = self
                .fetch_permits
                .try_acquire()
                .map_err(|_| PipelineError::Busy)?;
            self.fetcher.fetch_page(url).await?
        };

        let document = extractor::extract_with(
            &self.extractor_config,
            &page.body_utf8,
            &page.url_final,
        )
        .inspect_err(|_| warn!("extraction found no usable content"))?;

        let result = self.summarizer.summarize(&document.main_text, k)?;

        info!(
            key_points = result.key_points.len(),
            title = document.title.as_deref().unwrap_or(""),
            "pipeline complete"
        );
        Ok(result)
    }
}
