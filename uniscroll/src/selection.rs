//! Text-selection suppression shared by every container on a page.
//!
//! While a thumb is dragged the host must not start text selections. The
//! suppression flag is global to the host, so containers share one
//! [`SelectionSuppressor`] and hold a [`SuppressionGuard`] for as long as they
//! need it. The first guard saves the host's previous state, the last guard
//! to drop restores it. Guards may drop in any order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Host side of selection handling.
pub trait SelectionHost {
    fn is_selection_suppressed(&self) -> bool;

    fn set_selection_suppressed(&self, suppressed: bool);

    /// Drop whatever text is currently selected.
    fn clear_selection(&self);
}

/// In-memory [`SelectionHost`] for hosts without native selection.
#[derive(Debug, Default)]
pub struct SelectionFlag {
    suppressed: Cell<bool>,
    clears: Cell<usize>,
}

impl SelectionFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out with selection already suppressed by someone else.
    pub fn suppressed() -> Self {
        Self {
            suppressed: Cell::new(true),
            clears: Cell::new(0),
        }
    }

    /// How many times the selection was cleared.
    pub fn clears(&self) -> usize {
        self.clears.get()
    }
}

impl SelectionHost for SelectionFlag {
    fn is_selection_suppressed(&self) -> bool {
        self.suppressed.get()
    }

    fn set_selection_suppressed(&self, suppressed: bool) {
        self.suppressed.set(suppressed);
    }

    fn clear_selection(&self) {
        self.clears.set(self.clears.get() + 1);
    }
}

struct SuppressorState {
    depth: usize,
    saved: bool,
}

/// Reference-counted owner of the host's selection suppression.
#[derive(Clone)]
pub struct SelectionSuppressor {
    host: Rc<dyn SelectionHost>,
    state: Rc<RefCell<SuppressorState>>,
}

impl std::fmt::Debug for SelectionSuppressor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionSuppressor")
            .field("depth", &self.depth())
            .finish()
    }
}

impl SelectionSuppressor {
    pub fn new(host: Rc<dyn SelectionHost>) -> Self {
        Self {
            host,
            state: Rc::new(RefCell::new(SuppressorState {
                depth: 0,
                saved: false,
            })),
        }
    }

    /// Suppress selection until the guard drops.
    pub fn acquire(&self) -> SuppressionGuard {
        let first = {
            let mut state = self.state.borrow_mut();
            state.depth += 1;
            state.depth == 1
        };
        if first {
            let previous = self.host.is_selection_suppressed();
            self.state.borrow_mut().saved = previous;
            self.host.set_selection_suppressed(true);
        }
        SuppressionGuard {
            suppressor: self.clone(),
        }
    }

    /// Number of live guards.
    pub fn depth(&self) -> usize {
        self.state.borrow().depth
    }

    pub fn clear_selection(&self) {
        self.host.clear_selection();
    }

    fn release(&self) {
        let restore = {
            let mut state = self.state.borrow_mut();
            state.depth = state.depth.saturating_sub(1);
            (state.depth == 0).then_some(state.saved)
        };
        if let Some(previous) = restore {
            self.host.set_selection_suppressed(previous);
        }
    }
}

/// Holds selection suppressed. Dropping it releases its share.
#[must_use = "dropping a SuppressionGuard releases suppression immediately"]
pub struct SuppressionGuard {
    suppressor: SelectionSuppressor,
}

impl std::fmt::Debug for SuppressionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuppressionGuard").finish_non_exhaustive()
    }
}

impl Drop for SuppressionGuard {
    fn drop(&mut self) {
        self.suppressor.release();
    }
}
