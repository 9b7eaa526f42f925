use super::provider::PhotoGateway;
use crate::{error::FetchError, photo::PhotoRecord};
use std::{collections::HashMap, sync::Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Default,
    Search { query: String, page: u32 },
}

/// Scripted gateway. Unscripted calls answer with an empty page.
#[derive(Default)]
pub struct MockGateway {
    pub default_result: Mutex<Option<Result<Vec<PhotoRecord>, FetchError>>>,
    pub search_results: Mutex<HashMap<(String, u32), Result<Vec<PhotoRecord>, FetchError>>>,
    pub calls: Mutex<Vec<GatewayCall>>,
}

impl MockGateway {
    pub fn with_default(self, result: Result<Vec<PhotoRecord>, FetchError>) -> Self {
        *self.default_result.lock().unwrap() = Some(result);
        self
    }

    pub fn with_page(
        self,
        query: &str,
        page: u32,
        result: Result<Vec<PhotoRecord>, FetchError>,
    ) -> Self {
        self.search_results
            .lock()
            .unwrap()
            .insert((query.to_string(), page), result);
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl PhotoGateway for MockGateway {
    fn fetch_default(&self) -> Result<Vec<PhotoRecord>, FetchError> {
        self.calls.lock().unwrap().push(GatewayCall::Default);
        self.default_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Ok(Vec::new()))
    }

    fn fetch_search(&self, query: &str, page: u32) -> Result<Vec<PhotoRecord>, FetchError> {
        self.calls.lock().unwrap().push(GatewayCall::Search {
            query: query.to_string(),
            page,
        });
        self.search_results
            .lock()
            .unwrap()
            .remove(&(query.to_string(), page))
            .unwrap_or(Ok(Vec::new()))
    }
}

/// `count` distinct records whose ids start with `prefix`.
pub fn sample_photos(prefix: &str, count: usize) -> Vec<PhotoRecord> {
    (0..count)
        .map(|i| {
            PhotoRecord::new(
                format!("{prefix}-{i}"),
                "65535",
                format!("secret{i}"),
                format!("{prefix} photo {i}"),
            )
        })
        .collect()
}
