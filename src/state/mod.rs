//! State module for tracking traversal progress
//!
//! # Components
//!
//! - `ChainPhase`: Where the walk currently is (resolving the author, fetching posts, finished)
//! - `TraversalState`: The next URL to fetch, the post counter and the visited set
//! - `AuthorIdentity`: The diary author's display name, resolved once per run

mod author;
mod traversal;

// Re-export main types
pub use author::{AuthorIdentity, UNKNOWN_AUTHOR};
pub use traversal::{ChainPhase, TraversalState};
