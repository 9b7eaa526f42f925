use super::EventSender;
use photoscout_core::{
    dispatch::{FetchDispatcher, FetchRequest, FetchTarget},
    event::AppEvent,
    gateway::PhotoGateway,
};
use std::{
    sync::{Arc, atomic::Ordering},
    thread,
};

/// Runs every request on its own short-lived thread and posts the outcome back
/// to the main loop.
pub struct ThreadDispatcher {
    gateway: Arc<dyn PhotoGateway>,
    sender: EventSender,
}

impl ThreadDispatcher {
    pub fn new(gateway: Arc<dyn PhotoGateway>, sender: EventSender) -> Self {
        Self { gateway, sender }
    }
}

impl FetchDispatcher for ThreadDispatcher {
    fn dispatch(&self, request: FetchRequest) {
        spawn_fetch(&self.gateway, &self.sender, request);
    }
}

pub(super) fn spawn_fetch(
    gateway: &Arc<dyn PhotoGateway>,
    sender: &EventSender,
    request: FetchRequest,
) {
    let gateway = Arc::clone(gateway);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.cancel.load(Ordering::Relaxed) {
            return;
        }
        let result = match &request.target {
            FetchTarget::Default => gateway.fetch_default(),
            FetchTarget::Search { query, page } => gateway.fetch_search(query, *page),
        };
        sender.send(AppEvent::FetchCompleted { request, result });
    });
}
