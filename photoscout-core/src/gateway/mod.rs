pub mod flickr;
pub mod mock;
pub mod provider;

pub use flickr::FlickrGateway;
pub use provider::PhotoGateway;

use crate::{error::FetchError, photo::PhotoRecord};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Envelope {
    stat: Option<String>,
    message: Option<String>,
    photos: Option<PhotoPage>,
}

#[derive(Debug, Deserialize)]
struct PhotoPage {
    photo: Vec<PhotoRecord>,
}

/// Parse a `format=json&nojsoncallback=1` response body into records, preserving
/// the remote ordering.
pub fn parse_photos_payload(body: &str) -> Result<Vec<PhotoRecord>, FetchError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| FetchError::malformed(e.to_string()))?;

    if envelope.stat.as_deref() == Some("fail") {
        return Err(FetchError::malformed(
            envelope
                .message
                .unwrap_or_else(|| "endpoint reported failure".to_string()),
        ));
    }

    envelope
        .photos
        .map(|page| page.photo)
        .ok_or_else(|| FetchError::malformed("missing `photos.photo`"))
}
