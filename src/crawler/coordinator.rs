//! Crawler coordinator - main archive orchestration logic
//!
//! This module drives the whole run:
//! - Building the HTTP fetcher and the output sink
//! - Walking the predecessor chain from the configured start URL
//! - Handing each post to the sink
//! - Reporting progress and the final summary
//!
//! Any fetch or persistence failure ends the run immediately.

use crate::config::Config;
use crate::crawler::chain::{ChainOptions, PostChain};
use crate::crawler::fetcher::HttpFetcher;
use crate::output::{print_progress, print_summary, ArtifactWriter, CrawlSummary, PostSink};
use crate::DiaryError;
use url::Url;

/// Main archive coordinator structure
pub struct Coordinator<S: PostSink = ArtifactWriter> {
    config: Config,
    fetcher: HttpFetcher,
    sink: S,
    show_progress: bool,
}

impl Coordinator<ArtifactWriter> {
    /// Creates a coordinator that writes posts under `[output] root-dir`
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(DiaryError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, DiaryError> {
        let fetcher = HttpFetcher::from_config(&config)?;
        let sink = ArtifactWriter::new(config.output.root_dir.clone(), fetcher.clone());
        Ok(Self::with_sink(config, fetcher, sink))
    }
}

impl<S: PostSink> Coordinator<S> {
    /// Creates a coordinator around a custom sink
    pub fn with_sink(config: Config, fetcher: HttpFetcher, sink: S) -> Self {
        Self {
            config,
            fetcher,
            sink,
            show_progress: true,
        }
    }

    /// Turns the console progress line and summary on or off
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs the archive loop until the chain terminates
    ///
    /// 1. Fetches the start page and resolves the author
    /// 2. Persists the post through the sink
    /// 3. Follows the "previous entry" link, pausing between pages
    /// 4. Prints the total once no predecessor remains
    pub async fn run(&mut self) -> Result<CrawlSummary, DiaryError> {
        let start_url = Url::parse(&self.config.site.start_url)?;
        tracing::info!("Starting archive run at {}", start_url);

        let options = ChainOptions::from(&self.config.crawler);
        let mut chain = PostChain::new(&self.fetcher, start_url, options);
        let mut summary = CrawlSummary::start();

        while let Some(post) = chain.next_post().await? {
            if summary.author.is_none() {
                summary.author = Some(post.author.to_string());
            }

            let persisted = self.sink.persist(&post.author, &post.record).await?;
            summary.record(&persisted);

            tracing::debug!(
                "Saved post {} ({} images) to {}",
                post.record.url,
                persisted.images_written,
                persisted.dir.display()
            );

            if self.show_progress {
                print_progress(chain.state().post_count(), &post.record.url);
            }
        }

        summary.finish();
        tracing::info!(
            "Archive completed: {} posts, {} images in {}s",
            summary.posts,
            summary.images,
            summary.duration_seconds().unwrap_or_default()
        );

        if self.show_progress {
            print_summary(&summary);
        }

        Ok(summary)
    }
}
