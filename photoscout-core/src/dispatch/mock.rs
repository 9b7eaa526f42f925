use super::{FetchDispatcher, FetchRequest};
use std::{cell::RefCell, rc::Rc};

/// Records requests instead of running them, so tests decide when (and in which
/// order) responses arrive.
#[derive(Debug, Clone, Default)]
pub struct RecordingDispatcher {
    requests: Rc<RefCell<Vec<FetchRequest>>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything dispatched so far.
    pub fn take(&self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.requests.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.borrow().is_empty()
    }
}

impl FetchDispatcher for RecordingDispatcher {
    fn dispatch(&self, request: FetchRequest) {
        self.requests.borrow_mut().push(request);
    }
}
