//! Run statistics and console reporting
//!
//! Progress is a single line rewritten in place on stdout; the final summary
//! is printed once the chain terminates.

use crate::output::traits::PersistedPost;
use chrono::{DateTime, Utc};
use std::io::Write;
use url::Url;

/// Totals for one archive run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    /// Author whose diary was walked (set once the first page is parsed)
    pub author: Option<String>,

    /// Number of posts persisted
    pub posts: u64,

    /// Number of image files written
    pub images: u64,

    /// Number of text files written
    pub texts: u64,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlSummary {
    /// Starts an empty summary stamped with the current time
    pub fn start() -> Self {
        Self {
            author: None,
            posts: 0,
            images: 0,
            texts: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Adds one persisted post to the totals
    pub fn record(&mut self, persisted: &PersistedPost) {
        self.posts += 1;
        self.images += persisted.images_written as u64;
        if persisted.text_written {
            self.texts += 1;
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Run duration in whole seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Rewrites the progress line with the current count and URL
pub fn print_progress(count: u64, url: &Url) {
    let mut stdout = std::io::stdout().lock();
    // Progress output is best effort
    let _ = write!(stdout, "\rPosts saved: {} {}", count, url);
    let _ = stdout.flush();
}

/// Formats the one-line completion message
pub fn format_summary(summary: &CrawlSummary) -> String {
    let mut line = format!(
        "Done. Saved {} diary posts in total ({} images, {} texts)",
        summary.posts, summary.images, summary.texts
    );
    if let Some(author) = &summary.author {
        line.push_str(&format!(" for {}", author));
    }
    if let Some(seconds) = summary.duration_seconds() {
        line.push_str(&format!(" in {}s", seconds));
    }
    line
}

/// Ends the progress line and prints the summary
pub fn print_summary(summary: &CrawlSummary) {
    println!("\n{}", format_summary(summary));
}
