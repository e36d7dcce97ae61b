//! Crawler module for walking a diary backwards
//!
//! This module contains the core archive logic, including:
//! - HTTP fetching of pages and images
//! - HTML parsing of post pages
//! - The lazy predecessor chain
//! - Overall run coordination

mod chain;
mod coordinator;
mod fetcher;
mod parser;

pub use chain::{ChainOptions, ChainedPost, PostChain};
pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, HttpFetcher};
pub use parser::{normalize_date, BodyStrategy, PostDocument, PostRecord, PREVIOUS_ENTRY_LABEL};

use crate::config::Config;
use crate::output::CrawlSummary;
use crate::DiaryError;

/// Runs a complete archive operation
///
/// This is the main entry point for an archive run. It will:
/// 1. Build the HTTP client
/// 2. Walk from the start URL to the oldest post
/// 3. Save each post's images and text under the output root
/// 4. Print progress and a final summary
///
/// # Arguments
///
/// * `config` - The archiver configuration
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - The chain terminated normally
/// * `Err(DiaryError)` - A page, image or write failed; the run stopped there
pub async fn crawl(config: Config) -> Result<CrawlSummary, DiaryError> {
    Coordinator::new(config)?.run().await
}
