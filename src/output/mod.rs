//! Output module for persisting posts and reporting progress
//!
//! This module handles:
//! - The `PostSink` seam between traversal and persistence
//! - Writing each post's images and text to disk
//! - Run totals, the progress line and the final summary

mod artifacts;
pub mod stats;
mod traits;

pub use artifacts::{post_dir, post_folder_name, ArtifactWriter, TEXT_FILE_NAME};
pub use stats::{format_summary, print_progress, print_summary, CrawlSummary};
pub use traits::{OutputError, OutputResult, PersistedPost, PostSink};
