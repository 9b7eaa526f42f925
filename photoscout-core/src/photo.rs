use serde::{Deserialize, Serialize};

const STATIC_HOST: &str = "https://live.staticflickr.com";

/// Size suffixes understood by the static image host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSize {
    /// 240px on the longest side, used for grid thumbnails
    Thumbnail,
    /// 800px on the longest side, used for the preview overlay
    Preview,
}

impl PhotoSize {
    fn suffix(self) -> &'static str {
        match self {
            PhotoSize::Thumbnail => "m",
            PhotoSize::Preview => "c",
        }
    }
}

/// The identifier triple (plus title) needed to build a display URL.
///
/// Records are never mutated after they arrive from the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: String,
    pub server: String,
    pub secret: String,
    #[serde(default)]
    pub title: String,
}

impl PhotoRecord {
    pub fn new(
        id: impl Into<String>,
        server: impl Into<String>,
        secret: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            server: server.into(),
            secret: secret.into(),
            title: title.into(),
        }
    }

    pub fn url(&self, size: PhotoSize) -> String {
        format!(
            "{STATIC_HOST}/{}/{}_{}_{}.jpg",
            self.server,
            self.id,
            self.secret,
            size.suffix()
        )
    }

    /// Title for display; untitled photos fall back to their id.
    pub fn display_title(&self) -> &str {
        let trimmed = self.title.trim();
        if trimmed.is_empty() { &self.id } else { trimmed }
    }
}
