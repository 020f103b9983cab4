//! Crawl orchestrator states
//!
//! Each listing page moves the orchestrator through the same cycle:
//! fetch, extract, dispatch detail tasks, collect them, persist, advance.
use std::fmt;

/// Phase of the page-processing cycle the orchestrator is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Loading the listing document for the cursor's current source
    Fetching,

    /// Pulling event rows and pagination links out of the document
    Extracting,

    /// Spawning one detail task per extracted event
    Dispatching,

    /// Waiting for every dispatched detail task to finish
    Collecting,

    /// Writing the page's completed events to the sink
    Persisting,

    /// Deciding between the next page and termination
    Advancing,

    /// Crawl finished successfully
    Done,
}

impl CrawlState {
    /// Returns true if the orchestrator can move from `self` to `next`
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Fetching, Self::Extracting)
                | (Self::Extracting, Self::Dispatching)
                | (Self::Dispatching, Self::Collecting)
                | (Self::Collecting, Self::Persisting)
                | (Self::Persisting, Self::Advancing)
                | (Self::Advancing, Self::Fetching)
                | (Self::Advancing, Self::Done)
        )
    }

    /// Returns true once the crawl has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Dispatching => "dispatching",
            Self::Collecting => "collecting",
            Self::Persisting => "persisting",
            Self::Advancing => "advancing",
            Self::Done => "done",
        }
    }

    /// Returns all possible crawl states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Fetching,
            Self::Extracting,
            Self::Dispatching,
            Self::Collecting,
            Self::Persisting,
            Self::Advancing,
            Self::Done,
        ]
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
