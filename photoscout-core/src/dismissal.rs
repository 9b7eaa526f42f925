//! Outside-interaction detection for the suggestion panel.
//!
//! A [`PointerHub`] fans pointer events out to listeners. Listeners are held
//! through [`Subscription`] handles and are removed when the handle is dropped,
//! so a watcher can never outlive the thing it was watching for.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

/// A rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Release,
    Move,
    Scroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub column: u16,
    pub row: u16,
}

impl PointerEvent {
    pub fn press(column: u16, row: u16) -> Self {
        Self {
            kind: PointerKind::Press,
            column,
            row,
        }
    }
}

type Listener = Box<dyn FnMut(&PointerEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    /// Ids unsubscribed while their listener was taken out for dispatch
    removed: Vec<u64>,
}

/// Single-threaded pointer listener registry.
#[derive(Clone, Default)]
pub struct PointerHub {
    registry: Rc<RefCell<Registry>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl FnMut(&PointerEvent) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn dispatch(&self, event: &PointerEvent) {
        // Listeners run without the registry borrowed, so they may subscribe or
        // drop subscriptions themselves.
        let mut active = std::mem::take(&mut self.registry.borrow_mut().listeners);
        for (_, listener) in &mut active {
            listener(event);
        }

        let mut registry = self.registry.borrow_mut();
        let added = std::mem::take(&mut registry.listeners);
        let removed = std::mem::take(&mut registry.removed);
        active.retain(|(id, _)| !removed.contains(id));
        active.extend(added);
        registry.listeners = active;
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Keeps a listener registered. Dropping it deregisters the listener.
#[must_use = "dropping a Subscription deregisters its listener immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        let before = registry.listeners.len();
        registry.listeners.retain(|(id, _)| *id != self.id);
        if registry.listeners.len() == before {
            registry.removed.push(self.id);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TrackedRegions {
    input: Option<Region>,
    panel: Option<Region>,
}

impl TrackedRegions {
    fn contains(&self, column: u16, row: u16) -> bool {
        [self.input, self.panel]
            .iter()
            .flatten()
            .any(|region| region.contains(column, row))
    }
}

/// Fires `on_dismiss` once per pointer press landing outside both the input box
/// and the suggestion panel.
pub struct DismissalWatcher {
    regions: Rc<Cell<TrackedRegions>>,
    _subscription: Subscription,
}

impl DismissalWatcher {
    pub fn attach(hub: &PointerHub, mut on_dismiss: impl FnMut() + 'static) -> Self {
        let regions = Rc::new(Cell::new(TrackedRegions::default()));
        let tracked = Rc::clone(&regions);
        let subscription = hub.subscribe(move |event| {
            if event.kind == PointerKind::Press && !tracked.get().contains(event.column, event.row)
            {
                on_dismiss();
            }
        });
        Self {
            regions,
            _subscription: subscription,
        }
    }

    /// Update where the two tracked regions are. `None` means the region is not on screen.
    pub fn track(&self, input: Option<Region>, panel: Option<Region>) {
        self.regions.set(TrackedRegions { input, panel });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_watcher(hub: &PointerHub) -> (DismissalWatcher, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let watcher = DismissalWatcher::attach(hub, move || counter.set(counter.get() + 1));
        watcher.track(
            Some(Region::new(0, 0, 40, 3)),
            Some(Region::new(0, 3, 40, 5)),
        );
        (watcher, count)
    }

    #[test]
    fn test_region_contains_edges() {
        let region = Region::new(2, 3, 4, 2);
        assert!(region.contains(2, 3));
        assert!(region.contains(5, 4));
        assert!(!region.contains(6, 4));
        assert!(!region.contains(5, 5));
        assert!(!region.contains(1, 3));
    }

    #[test]
    fn test_press_outside_both_fires_once() {
        let hub = PointerHub::new();
        let (_watcher, count) = counting_watcher(&hub);

        hub.dispatch(&PointerEvent::press(10, 20));
        assert_eq!(count.get(), 1);
        hub.dispatch(&PointerEvent::press(50, 1));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_press_inside_either_region_never_fires() {
        let hub = PointerHub::new();
        let (_watcher, count) = counting_watcher(&hub);

        hub.dispatch(&PointerEvent::press(5, 1));
        hub.dispatch(&PointerEvent::press(5, 6));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_non_press_events_ignored() {
        let hub = PointerHub::new();
        let (_watcher, count) = counting_watcher(&hub);

        for kind in [PointerKind::Move, PointerKind::Release, PointerKind::Scroll] {
            hub.dispatch(&PointerEvent {
                kind,
                column: 70,
                row: 30,
            });
        }
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_hidden_panel_region_counts_as_outside() {
        let hub = PointerHub::new();
        let (watcher, count) = counting_watcher(&hub);
        watcher.track(Some(Region::new(0, 0, 40, 3)), None);

        hub.dispatch(&PointerEvent::press(5, 6));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_drop_deregisters_listener() {
        let hub = PointerHub::new();
        let (watcher, count) = counting_watcher(&hub);
        assert_eq!(hub.listener_count(), 1);

        drop(watcher);
        assert_eq!(hub.listener_count(), 0);
        hub.dispatch(&PointerEvent::press(70, 30));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_unsubscribe_during_dispatch() {
        let hub = PointerHub::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));

        let inner_slot = Rc::clone(&slot);
        let inner_calls = Rc::clone(&calls);
        let subscription = hub.subscribe(move |_| {
            inner_calls.set(inner_calls.get() + 1);
            inner_slot.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(subscription);

        hub.dispatch(&PointerEvent::press(0, 0));
        hub.dispatch(&PointerEvent::press(0, 0));
        assert_eq!(calls.get(), 1);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_hub_is_harmless() {
        let hub = PointerHub::new();
        let subscription = hub.subscribe(|_| {});
        drop(hub);
        drop(subscription);
    }
}
