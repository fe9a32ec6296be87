//! Walk state definitions for the pagination crawl
//!
//! This module defines the states the walker moves through on each page.

use crate::{CatechismError, Result};
use std::fmt;
use url::Url;

/// Represents the current state of the pagination walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkState {
    /// Waiting on the page at this URL (cache or network)
    Fetching(Url),

    /// Pulling numbered paragraphs out of the current page
    Extracting,

    /// Looking for the "Next" link on the current page
    LocatingNext,

    /// No further page; the index is complete
    Done,
}

impl WalkState {
    /// Returns true if the walk has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// The URL being fetched, if in the fetching state
    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Fetching(url) => Some(url),
            _ => None,
        }
    }

    /// Short name of the state, used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fetching(_) => "fetching",
            Self::Extracting => "extracting",
            Self::LocatingNext => "locating_next",
            Self::Done => "done",
        }
    }

    /// Returns true if the walk may move from this state to `next`
    ///
    /// Fetching → Extracting → LocatingNext → (Fetching | Done)
    pub fn can_transition_to(&self, next: &WalkState) -> bool {
        matches!(
            (self, next),
            (Self::Fetching(_), Self::Extracting)
                | (Self::Extracting, Self::LocatingNext)
                | (Self::LocatingNext, Self::Fetching(_))
                | (Self::LocatingNext, Self::Done)
        )
    }

    /// Moves to `next`, rejecting transitions the walk never makes
    pub fn transition(self, next: WalkState) -> Result<WalkState> {
        if !self.can_transition_to(&next) {
            return Err(CatechismError::InvalidTransition {
                from: self.name(),
                to: next.name(),
            });
        }

        tracing::trace!("Walk state {} -> {}", self, next);
        Ok(next)
    }
}

impl fmt::Display for WalkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetching(url) => write!(f, "fetching({})", url),
            other => write!(f, "{}", other.name()),
        }
    }
}
