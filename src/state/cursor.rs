use crate::crawler::DocumentSource;
use crate::state::CrawlState;
use crate::CrawlError;

/// The orchestrator's traversal position
///
/// Holds the listing page being processed, its 1-based page number and the
/// page limit (0 = unbounded), together with the current [`CrawlState`].
#[derive(Debug, Clone)]
pub struct CrawlCursor {
    source: DocumentSource,
    page: u32,
    limit: u32,
    state: CrawlState,
}

impl CrawlCursor {
    /// Creates a cursor positioned on the first page, ready to fetch
    pub fn new(source: DocumentSource, limit: u32) -> Self {
        Self {
            source,
            page: 1,
            limit,
            state: CrawlState::Fetching,
        }
    }

    /// Listing page the cursor is positioned on
    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Moves to `next`, rejecting transitions outside the page cycle
    pub fn transition(&mut self, next: CrawlState) -> Result<(), CrawlError> {
        if !self.state.can_transition_to(next) {
            return Err(CrawlError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!("page {}: {} -> {}", self.page, self.state, next);
        self.state = next;
        Ok(())
    }

    /// Returns true once the current page is the last one the limit allows
    pub fn limit_reached(&self) -> bool {
        self.limit != 0 && self.page >= self.limit
    }

    /// Leaves the `Advancing` state
    ///
    /// Moves to the next page when one exists and the limit allows it,
    /// otherwise finishes the crawl. Returns true if there is another page
    /// to fetch.
    pub fn advance(&mut self, next: Option<DocumentSource>) -> Result<bool, CrawlError> {
        match next {
            Some(source) if !self.limit_reached() => {
                self.transition(CrawlState::Fetching)?;
                self.source = source;
                self.page += 1;
                Ok(true)
            }
            _ => {
                self.transition(CrawlState::Done)?;
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(s: &str) -> DocumentSource {
        DocumentSource::parse(s).unwrap()
    }

    fn run_to_advancing(cursor: &mut CrawlCursor) {
        for state in [
            CrawlState::Extracting,
            CrawlState::Dispatching,
            CrawlState::Collecting,
            CrawlState::Persisting,
            CrawlState::Advancing,
        ] {
            cursor.transition(state).unwrap();
        }
    }

    #[test]
    fn test_new_cursor() {
        let cursor = CrawlCursor::new(source("http://example.com/page/1"), 0);
        assert_eq!(cursor.page(), 1);
        assert_eq!(cursor.limit(), 0);
        assert_eq!(cursor.state(), CrawlState::Fetching);
        assert!(!cursor.limit_reached());
    }

    #[test]
    fn test_advance_to_next_page() {
        let mut cursor = CrawlCursor::new(source("http://example.com/page/1"), 0);
        run_to_advancing(&mut cursor);

        let more = cursor
            .advance(Some(source("http://example.com/page/2")))
            .unwrap();

        assert!(more);
        assert_eq!(cursor.page(), 2);
        assert_eq!(cursor.state(), CrawlState::Fetching);
        assert_eq!(cursor.source().to_string(), "http://example.com/page/2");
    }

    #[test]
    fn test_no_next_page_finishes() {
        let mut cursor = CrawlCursor::new(source("http://example.com/page/1"), 0);
        run_to_advancing(&mut cursor);

        assert!(!cursor.advance(None).unwrap());
        assert_eq!(cursor.state(), CrawlState::Done);
        assert_eq!(cursor.page(), 1);
    }

    #[test]
    fn test_limit_stops_despite_next_page() {
        let mut cursor = CrawlCursor::new(source("http://example.com/page/1"), 1);
        assert!(cursor.limit_reached());
        run_to_advancing(&mut cursor);

        let more = cursor
            .advance(Some(source("http://example.com/page/2")))
            .unwrap();

        assert!(!more);
        assert!(cursor.state().is_terminal());
    }

    #[test]
    fn test_invalid_transition() {
        let mut cursor = CrawlCursor::new(source("http://example.com/"), 0);
        let result = cursor.transition(CrawlState::Persisting);

        assert!(matches!(
            result,
            Err(CrawlError::InvalidTransition {
                from: CrawlState::Fetching,
                to: CrawlState::Persisting,
            })
        ));
        assert_eq!(cursor.state(), CrawlState::Fetching);
    }

    #[test]
    fn test_advance_outside_advancing_fails() {
        let mut cursor = CrawlCursor::new(source("http://example.com/"), 0);
        assert!(cursor.advance(None).is_err());
    }
}
