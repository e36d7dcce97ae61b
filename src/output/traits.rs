//! Output sink trait and types
//!
//! This module defines the seam between walking the diary and persisting
//! what was found, so the traversal can be driven into any sink.

use crate::crawler::PostRecord;
use crate::state::AuthorIdentity;
use crate::FetchError;
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to download image: {0}")]
    ImageFetch(#[source] FetchError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// What was written for one post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPost {
    /// Directory holding the post's artifacts
    pub dir: PathBuf,

    /// Number of image files written
    pub images_written: usize,

    /// Whether a text file was written (false when the body container was missing)
    pub text_written: bool,
}

/// Destination for parsed posts
pub trait PostSink {
    /// Persists one post on behalf of `author`
    ///
    /// Any error aborts the walk; there is no per-post recovery.
    fn persist(
        &mut self,
        author: &AuthorIdentity,
        post: &PostRecord,
    ) -> impl Future<Output = OutputResult<PersistedPost>>;
}
