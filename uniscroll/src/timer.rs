//! Cancellable one-shot scheduling.
//!
//! Two schedulers ship with the crate:
//!
//! - [`ManualScheduler`] keeps its own clock and runs due tasks when the
//!   host calls [`ManualScheduler::advance`], typically once per frame.
//! - [`TokioScheduler`] spawns a local tokio task per timer. It must be used
//!   from inside a [`tokio::task::LocalSet`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// Work to run when a timer fires.
pub type Task = Box<dyn FnOnce() + 'static>;

/// Identifies a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Capability for running a task once after a delay.
pub trait Scheduler {
    fn schedule_once(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Cancel a pending task. Cancelling a task that already ran, or was
    /// already cancelled, does nothing.
    fn cancel(&self, handle: TimerHandle);
}

struct Pending {
    handle: TimerHandle,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

/// Scheduler with a host-driven clock. Cloning shares the clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now())
            .field("pending", &self.pending_count())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on this clock.
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    pub fn pending_count(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Move the clock forward and run every task that came due, earliest
    /// first. Tasks scheduled by running tasks run too if they fall inside
    /// the window. Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.clock.borrow().now.saturating_add(by);
        let mut ran = 0;

        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let earliest = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.handle.0))
                    .map(|(index, _)| index);
                earliest.map(|index| {
                    let pending = clock.pending.remove(index);
                    clock.now = pending.due;
                    pending
                })
            };

            // Run outside the borrow so tasks can schedule or cancel
            let Some(pending) = next else { break };
            (pending.task)();
            ran += 1;
        }

        self.clock.borrow_mut().now = target;
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, task: Task) -> TimerHandle {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let handle = TimerHandle(clock.next_id);
        let due = clock.now.saturating_add(delay);
        clock.pending.push(Pending { handle, due, task });
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        // Removed tasks drop after the borrow ends; their captures may touch
        // this scheduler on drop
        let removed: Vec<Pending> = {
            let mut clock = self.clock.borrow_mut();
            let (removed, kept) = std::mem::take(&mut clock.pending)
                .into_iter()
                .partition(|p| p.handle == handle);
            clock.pending = kept;
            removed
        };
        drop(removed);
    }
}

/// Scheduler backed by tokio's timer.
///
/// Tasks are `!Send`, so they are spawned with [`tokio::task::spawn_local`];
/// scheduling outside a `LocalSet` panics.
#[derive(Clone, Default)]
pub struct TokioScheduler {
    tasks: Rc<RefCell<TokioTasks>>,
}

#[derive(Default)]
struct TokioTasks {
    next_id: u64,
    running: HashMap<TimerHandle, tokio::task::JoinHandle<()>>,
}

impl std::fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("pending", &self.pending_count())
            .finish()
    }
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timers that have neither fired nor been cancelled.
    pub fn pending_count(&self) -> usize {
        let mut tasks = self.tasks.borrow_mut();
        tasks.running.retain(|_, join| !join.is_finished());
        tasks.running.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_once(&self, delay: Duration, task: Task) -> TimerHandle {
        let join = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        });

        let mut tasks = self.tasks.borrow_mut();
        tasks.running.retain(|_, join| !join.is_finished());
        tasks.next_id += 1;
        let handle = TimerHandle(tasks.next_id);
        tasks.running.insert(handle, join);
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        let join = self.tasks.borrow_mut().running.remove(&handle);
        if let Some(join) = join {
            join.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<usize>>, impl Fn() -> Task) {
        let count = Rc::new(Cell::new(0));
        let shared = count.clone();
        let make = move || -> Task {
            let shared = shared.clone();
            Box::new(move || shared.set(shared.get() + 1))
        };
        (count, make)
    }

    #[test]
    fn test_manual_runs_when_due() {
        let scheduler = ManualScheduler::new();
        let (count, task) = counter();
        scheduler.schedule_once(Duration::from_millis(100), task());

        assert_eq!(scheduler.advance(Duration::from_millis(99)), 0);
        assert_eq!(count.get(), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_manual_cancel() {
        let scheduler = ManualScheduler::new();
        let (count, task) = counter();
        let handle = scheduler.schedule_once(Duration::from_millis(10), task());
        scheduler.cancel(handle);
        scheduler.cancel(handle);

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_manual_runs_tasks_in_due_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(30, "c"), (10, "a"), (20, "b")] {
            let order = order.clone();
            scheduler.schedule_once(
                Duration::from_millis(delay),
                Box::new(move || order.borrow_mut().push(label)),
            );
        }

        assert_eq!(scheduler.advance(Duration::from_millis(30)), 3);
        assert_eq!(*order.borrow(), vec!["a", "b", "c"]);
        assert_eq!(scheduler.now(), Duration::from_millis(30));
    }

    #[test]
    fn test_manual_saturates_far_deadlines() {
        let scheduler = ManualScheduler::new();
        let (count, task) = counter();
        scheduler.advance(Duration::from_secs(5));
        scheduler.schedule_once(Duration::MAX, task());

        assert_eq!(scheduler.advance(Duration::MAX), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.now(), Duration::MAX);
    }
}
