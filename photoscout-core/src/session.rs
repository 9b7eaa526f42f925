use crate::{error::FetchError, gateway::PhotoGateway, photo::PhotoRecord};
use std::fmt;

/// Tag identifying which search a request belongs to. Strictly increasing across
/// the lifetime of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Outcome of offering a response to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Records were appended; more pages may follow
    Appended(usize),
    /// The page was empty; pagination is over
    Exhausted,
    /// The fetch failed; pagination is over
    Failed,
    /// The response belonged to another generation or page and was dropped
    Stale,
}

/// Accumulated pages for one logical search.
///
/// `results` only ever grows, in fetch order. At most one page is in flight at a time.
#[derive(Debug, Clone)]
pub struct SearchSession {
    query: String,
    generation: Generation,
    page: u32,
    results: Vec<PhotoRecord>,
    has_more: bool,
    started: bool,
    in_flight: Option<u32>,
    error: Option<FetchError>,
}

impl SearchSession {
    pub fn new(query: impl Into<String>, generation: Generation) -> Self {
        Self {
            query: query.into(),
            generation,
            page: 1,
            results: Vec::new(),
            has_more: true,
            started: false,
            in_flight: None,
            error: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The highest page requested so far (1 before anything was requested).
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn results(&self) -> &[PhotoRecord] {
        &self.results
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Reserve the next page for fetching.
    ///
    /// Returns page 1 on the first call, then successive pages while `has_more` holds.
    /// Returns `None` while a page is already in flight.
    pub fn begin_fetch(&mut self) -> Option<u32> {
        if self.in_flight.is_some() {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if self.has_more {
            self.page += 1;
        } else {
            return None;
        }
        self.in_flight = Some(self.page);
        Some(self.page)
    }

    /// Offer a completed fetch. Responses for another generation, or for a page
    /// that is not the one in flight, leave the session untouched.
    pub fn apply(
        &mut self,
        generation: Generation,
        page: u32,
        result: Result<Vec<PhotoRecord>, FetchError>,
    ) -> Applied {
        if generation != self.generation || self.in_flight != Some(page) {
            return Applied::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(records) if records.is_empty() => {
                self.has_more = false;
                Applied::Exhausted
            }
            Ok(records) => {
                let count = records.len();
                self.results.extend(records);
                self.has_more = true;
                Applied::Appended(count)
            }
            Err(error) => {
                self.has_more = false;
                self.error = Some(error);
                Applied::Failed
            }
        }
    }

    /// Fetch and apply the next page on the calling thread.
    pub fn fetch_next_page(&mut self, gateway: &dyn PhotoGateway) -> Option<Applied> {
        let page = self.begin_fetch()?;
        let result = gateway.fetch_search(&self.query, page);
        Some(self.apply(self.generation, page, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::mock::{GatewayCall, MockGateway, sample_photos};

    fn ids(session: &SearchSession) -> Vec<&str> {
        session.results().iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_new_session_defaults() {
        let session = SearchSession::new("cats", Generation::default().next());
        assert_eq!(session.page(), 1);
        assert!(session.has_more());
        assert!(session.results().is_empty());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_pages_append_in_call_order() {
        let g = Generation::default().next();
        let mut session = SearchSession::new("cats", g);

        let counts = [3, 5, 2];
        for (i, count) in counts.iter().enumerate() {
            let page = session.begin_fetch().unwrap();
            assert_eq!(page as usize, i + 1);
            let applied = session.apply(g, page, Ok(sample_photos(&format!("p{page}"), *count)));
            assert_eq!(applied, Applied::Appended(*count));
        }

        assert_eq!(session.results().len(), 10);
        let ids = ids(&session);
        assert_eq!(ids[0], "p1-0");
        assert_eq!(ids[3], "p2-0");
        assert_eq!(ids[8], "p3-0");
        assert_eq!(ids[9], "p3-1");
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let old = Generation::default().next();
        let current = old.next();
        let mut session = SearchSession::new("ca", current);
        let page = session.begin_fetch().unwrap();

        assert_eq!(
            session.apply(old, page, Ok(sample_photos("c", 4))),
            Applied::Stale
        );
        assert!(session.results().is_empty());
        assert!(session.is_loading());

        assert_eq!(
            session.apply(current, page, Ok(sample_photos("ca", 2))),
            Applied::Appended(2)
        );
        assert_eq!(ids(&session), vec!["ca-0", "ca-1"]);
    }

    #[test]
    fn test_stale_failure_does_not_stop_pagination() {
        let old = Generation::default().next();
        let current = old.next();
        let mut session = SearchSession::new("dogs", current);
        let page = session.begin_fetch().unwrap();

        let applied = session.apply(old, page, Err(FetchError::transport("timeout")));
        assert_eq!(applied, Applied::Stale);
        assert!(session.has_more());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_empty_page_ends_pagination() {
        let g = Generation::default().next();
        let mut session = SearchSession::new("cats", g);
        let page = session.begin_fetch().unwrap();
        session.apply(g, page, Ok(sample_photos("cats", 20)));

        let page = session.begin_fetch().unwrap();
        assert_eq!(page, 2);
        assert_eq!(session.apply(g, page, Ok(Vec::new())), Applied::Exhausted);
        assert!(!session.has_more());
        assert!(session.error().is_none());
        assert_eq!(session.begin_fetch(), None);
        assert_eq!(session.results().len(), 20);
    }

    #[test]
    fn test_failure_keeps_results_and_stops() {
        let g = Generation::default().next();
        let mut session = SearchSession::new("cats", g);
        let page = session.begin_fetch().unwrap();
        session.apply(g, page, Ok(sample_photos("cats", 3)));

        let page = session.begin_fetch().unwrap();
        let applied = session.apply(g, page, Err(FetchError::malformed("missing photos")));
        assert_eq!(applied, Applied::Failed);
        assert_eq!(session.results().len(), 3);
        assert!(!session.has_more());
        assert!(!session.is_loading());
        assert!(matches!(
            session.error(),
            Some(FetchError::MalformedResponse(_))
        ));
        assert_eq!(session.begin_fetch(), None);
    }

    #[test]
    fn test_only_one_page_in_flight() {
        let g = Generation::default().next();
        let mut session = SearchSession::new("cats", g);
        assert_eq!(session.begin_fetch(), Some(1));
        assert_eq!(session.begin_fetch(), None);
        assert_eq!(session.page(), 1);
    }

    #[test]
    fn test_response_for_wrong_page_is_dropped() {
        let g = Generation::default().next();
        let mut session = SearchSession::new("cats", g);
        let page = session.begin_fetch().unwrap();
        assert_eq!(
            session.apply(g, page + 1, Ok(sample_photos("x", 1))),
            Applied::Stale
        );
        assert!(session.is_loading());
    }

    #[test]
    fn test_duplicates_across_pages_pass_through() {
        let g = Generation::default().next();
        let mut session = SearchSession::new("cats", g);
        let page = session.begin_fetch().unwrap();
        session.apply(g, page, Ok(sample_photos("dup", 2)));
        let page = session.begin_fetch().unwrap();
        session.apply(g, page, Ok(sample_photos("dup", 2)));
        assert_eq!(ids(&session), vec!["dup-0", "dup-1", "dup-0", "dup-1"]);
    }

    #[test]
    fn test_fetch_next_page_calls_gateway() {
        let gateway = MockGateway::default()
            .with_page("owls", 1, Ok(sample_photos("owls", 2)))
            .with_page("owls", 2, Ok(Vec::new()));
        let mut session = SearchSession::new("owls", Generation::default().next());

        assert_eq!(
            session.fetch_next_page(&gateway),
            Some(Applied::Appended(2))
        );
        assert_eq!(session.fetch_next_page(&gateway), Some(Applied::Exhausted));
        assert_eq!(session.fetch_next_page(&gateway), None);
        assert_eq!(
            gateway.calls(),
            vec![
                GatewayCall::Search {
                    query: "owls".into(),
                    page: 1
                },
                GatewayCall::Search {
                    query: "owls".into(),
                    page: 2
                },
            ]
        );
    }
}
