//! Lazy walk over a diary's predecessor chain
//!
//! Each call to [`PostChain::next_post`] fetches one page, parses it and
//! moves to the post it links to as "previous entry". The sequence is finite
//! for a well-formed chain and cannot be restarted.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::HttpFetcher;
use crate::crawler::parser::{PostDocument, PostRecord};
use crate::state::{AuthorIdentity, ChainPhase, TraversalState};
use crate::url::site_origin;
use crate::DiaryError;
use std::time::Duration;
use url::Url;

/// Traversal knobs taken from `[crawler]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainOptions {
    /// Pause before every fetch except the first
    pub delay: Duration,

    /// Fail instead of revisiting a post
    pub detect_cycles: bool,

    /// Stop after this many posts
    pub max_posts: Option<u64>,
}

impl From<&CrawlerConfig> for ChainOptions {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            delay: config.delay(),
            detect_cycles: config.detect_cycles,
            max_posts: config.max_posts,
        }
    }
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self::from(&CrawlerConfig::default())
    }
}

/// One post yielded by the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainedPost {
    pub record: PostRecord,

    /// Author resolved from the first page of the run
    pub author: AuthorIdentity,
}

/// Sequential walk from the newest post to the oldest
pub struct PostChain<'a> {
    fetcher: &'a HttpFetcher,
    origin: String,
    options: ChainOptions,
    state: TraversalState,
    author: Option<AuthorIdentity>,
    pending_error: Option<DiaryError>,
}

impl<'a> PostChain<'a> {
    /// Starts a chain at `start_url`; links resolve against its origin
    pub fn new(fetcher: &'a HttpFetcher, start_url: Url, options: ChainOptions) -> Self {
        Self {
            fetcher,
            origin: site_origin(&start_url),
            state: TraversalState::new(start_url, options.detect_cycles),
            options,
            author: None,
            pending_error: None,
        }
    }

    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    /// The author, once the first page has been parsed
    pub fn author(&self) -> Option<&AuthorIdentity> {
        self.author.as_ref()
    }

    /// Fetches and parses the next post
    ///
    /// Returns `Ok(None)` once the chain is exhausted. A fetch failure is
    /// returned immediately. A detected cycle is reported on the call after
    /// the post that closed the loop, so that post is still yielded.
    pub async fn next_post(&mut self) -> Result<Option<ChainedPost>, DiaryError> {
        if let Some(err) = self.pending_error.take() {
            return Err(err);
        }

        let Some(url) = self.state.next_url().cloned() else {
            return Ok(None);
        };

        if self.state.phase() == ChainPhase::Fetching && !self.options.delay.is_zero() {
            tokio::time::sleep(self.options.delay).await;
        }

        tracing::debug!("Fetching post {}: {}", self.state.post_count() + 1, url);
        let content = self.fetcher.fetch_page(&url).await?;

        let resolving_author = self.author.is_none();
        let (record, author_name) = {
            let document = PostDocument::parse(&content, &self.origin);
            let author_name = if resolving_author {
                document.author_name()
            } else {
                None
            };
            (document.to_record(url.clone()), author_name)
        };

        if resolving_author {
            let author = AuthorIdentity::resolve(author_name.as_deref());
            tracing::info!("Archiving diary of {}", author);
            self.author = Some(author);
        }
        let author = self.author.clone().unwrap_or_else(AuthorIdentity::unknown);

        if let Err(err) = self.state.advance(&url, record.predecessor_url.clone()) {
            tracing::warn!("{}", err);
            self.pending_error = Some(err);
        } else if let Some(limit) = self.options.max_posts {
            if self.state.post_count() >= limit && !self.state.phase().is_terminal() {
                tracing::info!("Reached max-posts limit of {}, stopping", limit);
                self.state.terminate();
            }
        }

        Ok(Some(ChainedPost { record, author }))
    }
}
