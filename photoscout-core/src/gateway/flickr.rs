use super::{parse_photos_payload, provider::PhotoGateway};
use crate::{config::ApiConfig, error::FetchError, photo::PhotoRecord};
use reqwest::blocking::Client;
use std::time::Duration;

const METHOD_RECENT: &str = "flickr.photos.getRecent";
const METHOD_SEARCH: &str = "flickr.photos.search";

/// Gateway backed by the Flickr REST endpoint.
pub struct FlickrGateway {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    per_page: Option<u32>,
}

impl FlickrGateway {
    pub fn new(api_key: Option<String>, api: &ApiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("photoscout/", env!("CARGO_PKG_VERSION")))
            .timeout(api.timeout_secs.map(Duration::from_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: api.endpoint.clone(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            per_page: api.per_page,
        })
    }

    fn get(&self, params: Vec<(&'static str, String)>) -> Result<Vec<PhotoRecord>, FetchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(FetchError::transport("no API key configured"));
        };

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("api_key", api_key)])
            .query(&params)
            .send()
            .map_err(|e| FetchError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::transport(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|e| FetchError::transport(e.to_string()))?;
        parse_photos_payload(&body)
    }
}

impl PhotoGateway for FlickrGateway {
    fn fetch_default(&self) -> Result<Vec<PhotoRecord>, FetchError> {
        log::debug!("GET {METHOD_RECENT}");
        self.get(recent_params(self.per_page))
    }

    fn fetch_search(&self, query: &str, page: u32) -> Result<Vec<PhotoRecord>, FetchError> {
        log::debug!("GET {METHOD_SEARCH} text={query:?} page={page}");
        self.get(search_params(query, page, self.per_page))
    }
}

fn common_params(method: &'static str, per_page: Option<u32>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("method", method.to_string()),
        ("safe_search", "1".to_string()),
        ("format", "json".to_string()),
        ("nojsoncallback", "1".to_string()),
    ];
    if let Some(per_page) = per_page {
        params.push(("per_page", per_page.to_string()));
    }
    params
}

fn recent_params(per_page: Option<u32>) -> Vec<(&'static str, String)> {
    common_params(METHOD_RECENT, per_page)
}

fn search_params(query: &str, page: u32, per_page: Option<u32>) -> Vec<(&'static str, String)> {
    let mut params = common_params(METHOD_SEARCH, per_page);
    params.push(("text", query.to_string()));
    params.push(("page", page.to_string()));
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_search_params() {
        let params = search_params("red fox", 3, None);
        assert_eq!(param(&params, "method"), Some(METHOD_SEARCH));
        assert_eq!(param(&params, "text"), Some("red fox"));
        assert_eq!(param(&params, "page"), Some("3"));
        assert_eq!(param(&params, "safe_search"), Some("1"));
        assert_eq!(param(&params, "format"), Some("json"));
        assert_eq!(param(&params, "nojsoncallback"), Some("1"));
        assert_eq!(param(&params, "per_page"), None);
    }

    #[test]
    fn test_recent_params_with_per_page() {
        let params = recent_params(Some(40));
        assert_eq!(param(&params, "method"), Some(METHOD_RECENT));
        assert_eq!(param(&params, "per_page"), Some("40"));
        assert_eq!(param(&params, "text"), None);
    }

    #[test]
    fn test_missing_api_key_is_transport_error() {
        let gateway = FlickrGateway::new(None, &ApiConfig::default()).unwrap();
        let err = gateway.fetch_search("cats", 1).unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn test_blank_api_key_treated_as_missing() {
        let gateway = FlickrGateway::new(Some("  ".into()), &ApiConfig::default()).unwrap();
        assert!(matches!(
            gateway.fetch_default(),
            Err(FetchError::Transport(_))
        ));
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        let api = ApiConfig {
            endpoint: "http://127.0.0.1:9/services/rest/".to_string(),
            timeout_secs: Some(2),
            ..ApiConfig::default()
        };
        let gateway = FlickrGateway::new(Some("key".into()), &api).unwrap();
        assert!(matches!(
            gateway.fetch_search("cats", 1),
            Err(FetchError::Transport(_))
        ));
    }
}
