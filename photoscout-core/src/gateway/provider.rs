use crate::{error::FetchError, photo::PhotoRecord};

/// One outbound call per method, no retries.
pub trait PhotoGateway: Send + Sync {
    /// The default "recent photos" feed shown while no query is active.
    fn fetch_default(&self) -> Result<Vec<PhotoRecord>, FetchError>;
    /// One page (1-based) of search results for `query`.
    fn fetch_search(&self, query: &str, page: u32) -> Result<Vec<PhotoRecord>, FetchError>;
}
