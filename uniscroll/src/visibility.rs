use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::timer::{Scheduler, TimerHandle};

/// Default delay before idle thumbs hide.
pub const DEFAULT_HIDDEN_DELAY: Duration = Duration::from_millis(1000);

/// Shows thumbs on activity and hides them again after a quiet period.
///
/// One timer per container. Each activity cancels the pending hide and
/// schedules a fresh one; dropping the timer cancels whatever is pending.
pub struct VisibilityTimer {
    scheduler: Rc<dyn Scheduler>,
    hidden: Rc<Cell<bool>>,
    always_show: bool,
    delay: Duration,
    pending: Cell<Option<TimerHandle>>,
}

impl std::fmt::Debug for VisibilityTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityTimer")
            .field("hidden", &self.hidden.get())
            .field("always_show", &self.always_show)
            .field("delay", &self.delay)
            .field("pending", &self.pending.get())
            .finish()
    }
}

impl VisibilityTimer {
    pub fn new(scheduler: Rc<dyn Scheduler>, always_show: bool, delay: Duration) -> Self {
        Self {
            scheduler,
            hidden: Rc::new(Cell::new(!always_show)),
            always_show,
            delay,
            pending: Cell::new(None),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Show the thumbs and restart the hide countdown.
    pub fn activity(&self) {
        if self.always_show {
            return;
        }
        self.cancel();
        self.hidden.set(false);

        let hidden = self.hidden.clone();
        let handle = self.scheduler.schedule_once(
            self.delay,
            Box::new(move || {
                log::trace!("[visibility] hiding idle thumbs");
                hidden.set(true);
            }),
        );
        self.pending.set(Some(handle));
    }

    /// Cancel a pending hide, leaving visibility as it is.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl Drop for VisibilityTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
