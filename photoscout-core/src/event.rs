use crate::{dispatch::FetchRequest, error::FetchError, photo::PhotoRecord};

/// Events that arrive asynchronously from background tasks.
/// These get merged into the main event loop alongside keyboard input.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A gateway call finished. `request` is echoed back unchanged so its
    /// generation can be checked against the active session.
    FetchCompleted {
        request: FetchRequest,
        result: Result<Vec<PhotoRecord>, FetchError>,
    },
}
