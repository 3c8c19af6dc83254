//! Resize observation.
//!
//! Containers learn element sizes through the [`ResizeObserver`] capability
//! rather than measuring anything themselves. [`ResizeHub`] is the in-crate
//! implementation: the host calls [`ResizeHub::notify`] after each layout
//! pass, and tests call it to fake resizes.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::layout::Size;

pub type ResizeCallback = Box<dyn FnMut(Size)>;

/// Capability for observing element size changes.
pub trait ResizeObserver {
    /// Call `callback` with the element's size whenever it changes. Observation
    /// ends when the returned subscription is dropped.
    fn observe(&self, element: &str, callback: ResizeCallback) -> ResizeSubscription;
}

/// Keeps a resize observation alive; dropping it disconnects.
#[must_use = "dropping a ResizeSubscription disconnects the observer immediately"]
pub struct ResizeSubscription {
    disconnect: Option<Box<dyn FnOnce()>>,
}

impl ResizeSubscription {
    pub fn new(disconnect: impl FnOnce() + 'static) -> Self {
        Self {
            disconnect: Some(Box::new(disconnect)),
        }
    }

    /// A subscription with nothing to disconnect.
    pub fn detached() -> Self {
        Self { disconnect: None }
    }
}

impl std::fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeSubscription")
            .field("connected", &self.disconnect.is_some())
            .finish()
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}

struct Observation {
    id: u64,
    element: String,
    last: Option<Size>,
    callback: Rc<RefCell<ResizeCallback>>,
}

#[derive(Default)]
struct HubState {
    next_id: u64,
    observations: Vec<Observation>,
}

/// Host-driven [`ResizeObserver`]. Cloning shares the hub.
#[derive(Clone, Default)]
pub struct ResizeHub {
    state: Rc<RefCell<HubState>>,
}

impl ResizeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report an element's current size. Observers run only when the size
    /// differs from the last one they were given. Returns how many ran.
    pub fn notify(&self, element: &str, size: Size) -> usize {
        let pending: Vec<Rc<RefCell<ResizeCallback>>> = {
            let mut state = self.state.borrow_mut();
            state
                .observations
                .iter_mut()
                .filter(|o| o.element == element && o.last != Some(size))
                .map(|o| {
                    o.last = Some(size);
                    o.callback.clone()
                })
                .collect()
        };

        let mut delivered = 0;
        for callback in pending {
            let Ok(mut callback) = callback.try_borrow_mut() else {
                log::warn!("[resize] skipping re-entrant notification for {}", element);
                continue;
            };
            callback(size);
            delivered += 1;
        }
        delivered
    }

    pub fn observer_count(&self) -> usize {
        self.state.borrow().observations.len()
    }

    fn disconnect(state: &Weak<RefCell<HubState>>, id: u64) {
        let Some(state) = state.upgrade() else {
            return;
        };
        let removed: Vec<Observation> = {
            let mut state = state.borrow_mut();
            let (removed, kept) = std::mem::take(&mut state.observations)
                .into_iter()
                .partition(|o| o.id == id);
            state.observations = kept;
            removed
        };
        drop(removed);
    }
}

impl ResizeObserver for ResizeHub {
    fn observe(&self, element: &str, callback: ResizeCallback) -> ResizeSubscription {
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let id = state.next_id;
            state.observations.push(Observation {
                id,
                element: element.to_string(),
                last: None,
                callback: Rc::new(RefCell::new(callback)),
            });
            id
        };
        let state = Rc::downgrade(&self.state);
        ResizeSubscription::new(move || ResizeHub::disconnect(&state, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_notify_only_on_change() {
        let hub = ResizeHub::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let _sub = hub.observe(
            "viewport",
            Box::new(move |_| counter.set(counter.get() + 1)),
        );

        assert_eq!(hub.notify("viewport", Size::new(10.0, 10.0)), 1);
        assert_eq!(hub.notify("viewport", Size::new(10.0, 10.0)), 0);
        assert_eq!(hub.notify("content", Size::new(10.0, 10.0)), 0);
        assert_eq!(hub.notify("viewport", Size::new(10.0, 20.0)), 1);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_dropping_subscription_disconnects() {
        let hub = ResizeHub::new();
        let sub = hub.observe("viewport", Box::new(|_| {}));
        assert_eq!(hub.observer_count(), 1);
        drop(sub);
        assert_eq!(hub.observer_count(), 0);
        assert_eq!(hub.notify("viewport", Size::new(1.0, 1.0)), 0);
    }
}
