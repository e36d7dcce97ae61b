//! Traversal state for the backward walk over a diary
//!
//! The walk is a singly linked list discovered one node at a time: a post's
//! predecessor is only known once that post has been fetched and parsed.

use crate::DiaryError;
use std::collections::HashSet;
use std::fmt;
use url::Url;

/// Phase of the backward walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainPhase {
    /// The first page has not been fetched; the author is still unknown
    ResolvingAuthor,

    /// Walking from post to predecessor
    Fetching,

    /// No predecessor remains (or the post limit was reached)
    Terminated,
}

impl ChainPhase {
    /// Returns true once the walk has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// Returns the phase name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResolvingAuthor => "resolving_author",
            Self::Fetching => "fetching",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for ChainPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mutable state of one walk: what to fetch next and how far we got
#[derive(Debug, Clone)]
pub struct TraversalState {
    phase: ChainPhase,
    next_url: Option<Url>,
    post_count: u64,
    visited: HashSet<String>,
    detect_cycles: bool,
}

impl TraversalState {
    /// Starts a walk at the newest post
    pub fn new(start_url: Url, detect_cycles: bool) -> Self {
        Self {
            phase: ChainPhase::ResolvingAuthor,
            next_url: Some(start_url),
            post_count: 0,
            visited: HashSet::new(),
            detect_cycles,
        }
    }

    pub fn phase(&self) -> ChainPhase {
        self.phase
    }

    /// URL of the next post to fetch, `None` once terminated
    pub fn next_url(&self) -> Option<&Url> {
        self.next_url.as_ref()
    }

    /// Number of posts processed so far
    pub fn post_count(&self) -> u64 {
        self.post_count
    }

    /// Records `current` as processed and moves on to its predecessor
    ///
    /// With cycle detection enabled, a predecessor that was already visited
    /// fails with [`DiaryError::CycleDetected`] and leaves the state terminated.
    pub fn advance(&mut self, current: &Url, predecessor: Option<Url>) -> Result<(), DiaryError> {
        self.post_count += 1;
        self.visited.insert(current.as_str().to_string());

        match predecessor {
            Some(next) if self.detect_cycles && self.visited.contains(next.as_str()) => {
                self.terminate();
                Err(DiaryError::CycleDetected {
                    url: next.to_string(),
                })
            }
            Some(next) => {
                self.phase = ChainPhase::Fetching;
                self.next_url = Some(next);
                Ok(())
            }
            None => {
                self.terminate();
                Ok(())
            }
        }
    }

    /// Ends the walk regardless of any pending predecessor
    pub fn terminate(&mut self) {
        self.phase = ChainPhase::Terminated;
        self.next_url = None;
    }
}
