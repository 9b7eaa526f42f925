use thiserror::Error;

/// Why a fetch produced no records.
///
/// An empty page is not an error: it arrives as `Ok(vec![])` and ends pagination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The endpoint could not be reached or answered with a non-success status.
    #[error("request failed: {0}")]
    Transport(String),

    /// The endpoint answered, but the payload was missing the expected fields
    /// or reported a failure of its own.
    #[error("unexpected response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}
