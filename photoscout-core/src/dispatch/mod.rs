pub mod mock;

use crate::session::Generation;

/// What a request asks the gateway for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    Default,
    Search { query: String, page: u32 },
}

/// A generation-tagged fetch. The tag travels back with the response so the
/// controller can tell current responses from superseded ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: Generation,
    pub target: FetchTarget,
}

/// Carries requests out of the controller. Implementations run the fetch
/// somewhere and hand the outcome back to
/// [`QueryController::on_fetch_completed`](crate::controller::QueryController::on_fetch_completed)
/// on the controller's own thread.
pub trait FetchDispatcher {
    fn dispatch(&self, request: FetchRequest);
}
