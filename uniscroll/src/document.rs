//! Document-level pointer listeners.
//!
//! A drag has to keep following the pointer after it leaves the thumb, so
//! the container listens on the whole document for the duration of the
//! drag. The host dispatches every pointer event it sees into
//! [`DocumentEvents`]; listeners stay attached for as long as their
//! [`Subscription`] lives.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::event::{PointerEvent, PointerEventKind};

type Callback = Rc<RefCell<dyn FnMut(&PointerEvent)>>;

struct Listener {
    id: u64,
    kind: PointerEventKind,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }
}

/// Registry of document-wide pointer listeners. Cloning shares the registry.
#[derive(Clone, Default)]
pub struct DocumentEvents {
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for DocumentEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl DocumentEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener for one kind of pointer event. It is detached when
    /// the returned subscription is dropped.
    pub fn listen(
        &self,
        kind: PointerEventKind,
        callback: impl FnMut(&PointerEvent) + 'static,
    ) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.listeners.push(Listener {
            id,
            kind,
            callback: Rc::new(RefCell::new(callback)),
        });
        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Deliver an event to every listener of its kind, in attach order.
    /// Returns how many listeners ran.
    ///
    /// Listeners may attach or detach listeners while running. One detached
    /// earlier in the same dispatch does not run.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        let snapshot: Vec<(u64, Callback)> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == event.kind)
            .map(|l| (l.id, l.callback.clone()))
            .collect();

        let mut delivered = 0;
        for (id, callback) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            let Ok(mut callback) = callback.try_borrow_mut() else {
                log::warn!("[document] skipping re-entrant dispatch to listener {}", id);
                continue;
            };
            callback(event);
            delivered += 1;
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Keeps a document listener attached. Dropping it detaches the listener.
#[must_use = "dropping a Subscription detaches the listener immediately"]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Subscription {
    pub fn is_attached(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().contains(self.id))
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            // Drop the removed callback only after the registry borrow ends
            let removed: Vec<Listener> = {
                let mut registry = registry.borrow_mut();
                let (removed, kept) = std::mem::take(&mut registry.listeners)
                    .into_iter()
                    .partition(|l| l.id == self.id);
                registry.listeners = kept;
                removed
            };
            drop(removed);
        }
    }
}
