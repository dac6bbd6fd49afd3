use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::platform::TickScheduler;
use crate::tick_clock::TickClock;

/// Identifies a registered tick callback so it can be cancelled.
pub type TickCallbackId = u64;

struct TickEntry {
    id: TickCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    scheduler: Arc<dyn TickScheduler>,
    /// True while at least one callback is queued and a drain is wanted.
    needs_tick: Cell<bool>,
    ticks: RefCell<VecDeque<TickEntry>>,
    next_tick_id: Cell<u64>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn TickScheduler>) -> Self {
        Self {
            scheduler,
            needs_tick: Cell::new(false),
            ticks: RefCell::new(VecDeque::new()),
            next_tick_id: Cell::new(1),
        }
    }

    fn schedule(&self) {
        self.needs_tick.set(true);
        self.scheduler.schedule_tick();
    }

    fn register_tick_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> TickCallbackId {
        let id = self.next_tick_id.get();
        self.next_tick_id.set(id + 1);
        self.ticks.borrow_mut().push_back(TickEntry {
            id,
            callback: Some(callback),
        });
        self.schedule();
        id
    }

    /// Removes the entry synchronously: once this returns, the callback can
    /// no longer fire from any future drain.
    fn cancel_tick_callback(&self, id: TickCallbackId) {
        let mut ticks = self.ticks.borrow_mut();
        if let Some(index) = ticks.iter().position(|entry| entry.id == id) {
            ticks.remove(index);
        }
        if ticks.is_empty() {
            self.needs_tick.set(false);
        }
    }

    fn drain_ticks(&self, now_nanos: u64) {
        let mut ticks = self.ticks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(ticks.len());
        while let Some(mut entry) = ticks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(ticks);

        // Callbacks may re-register during this loop; those run on the next
        // drain, not this one, because the queue was swapped out above.
        for callback in pending {
            callback(now_nanos);
        }

        if self.ticks.borrow().is_empty() {
            self.needs_tick.set(false);
        }
    }

    fn has_pending_ticks(&self) -> bool {
        !self.ticks.borrow().is_empty()
    }
}

/// Owner of the tick queue. Single-threaded; all registration and draining
/// happens on the thread that created it.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn TickScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    /// Returns a weak handle. Handles outliving the runtime degrade to
    /// no-ops rather than keeping the queue alive.
    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether a drain is wanted (at least one callback queued).
    pub fn needs_tick(&self) -> bool {
        self.inner.needs_tick.get()
    }

    pub fn tick_clock(&self) -> TickClock {
        TickClock::new(self.handle())
    }
}

/// No-op scheduler for hosts that poll [`Runtime::needs_tick`] themselves
/// (tests, fixed-rate loops).
#[derive(Default)]
pub struct DefaultScheduler;

impl TickScheduler for DefaultScheduler {
    fn schedule_tick(&self) {}
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    /// Queues a one-shot callback for the next drain. Returns `None` if the
    /// runtime has been dropped.
    pub fn register_tick_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<TickCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_tick_callback(Box::new(callback)))
    }

    pub fn cancel_tick_callback(&self, id: TickCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_tick_callback(id);
        }
    }

    /// Runs every callback queued before this call, in registration order,
    /// passing `now_nanos` as the tick timestamp.
    pub fn drain_ticks(&self, now_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_ticks(now_nanos);
        }
    }

    pub fn has_pending_ticks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_pending_ticks())
            .unwrap_or(false)
    }

    pub fn tick_clock(&self) -> TickClock {
        TickClock::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn runtime() -> Runtime {
        Runtime::new(Arc::new(DefaultScheduler))
    }

    #[test]
    fn drain_runs_callback_with_time() {
        let rt = runtime();
        let handle = rt.handle();
        let seen = Rc::new(Cell::new(0u64));
        let seen_in = Rc::clone(&seen);

        handle.register_tick_callback(move |now| seen_in.set(now));
        assert!(rt.needs_tick());

        handle.drain_ticks(16_000_000);
        assert_eq!(seen.get(), 16_000_000);
        assert!(!rt.needs_tick());
    }

    #[test]
    fn cancelled_callback_never_fires() {
        let rt = runtime();
        let handle = rt.handle();
        let fired = Rc::new(Cell::new(false));
        let fired_in = Rc::clone(&fired);

        let id = handle
            .register_tick_callback(move |_| fired_in.set(true))
            .unwrap();
        handle.cancel_tick_callback(id);
        handle.drain_ticks(0);

        assert!(!fired.get());
        assert!(!rt.needs_tick());
    }

    #[test]
    fn callbacks_run_in_registration_order() {
        let rt = runtime();
        let handle = rt.handle();
        let order = Rc::new(RefCell::new(Vec::new()));

        for n in 0..3 {
            let order = Rc::clone(&order);
            handle.register_tick_callback(move |_| order.borrow_mut().push(n));
        }
        handle.drain_ticks(0);

        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn reregistration_during_drain_waits_for_next_drain() {
        let rt = runtime();
        let handle = rt.handle();
        let runs = Rc::new(Cell::new(0u32));

        let runs_in = Rc::clone(&runs);
        let handle_in = handle.clone();
        handle.register_tick_callback(move |_| {
            runs_in.set(runs_in.get() + 1);
            let runs_again = Rc::clone(&runs_in);
            handle_in.register_tick_callback(move |_| {
                runs_again.set(runs_again.get() + 1);
            });
        });

        handle.drain_ticks(0);
        assert_eq!(runs.get(), 1);
        assert!(handle.has_pending_ticks());

        handle.drain_ticks(16_000_000);
        assert_eq!(runs.get(), 2);
        assert!(!handle.has_pending_ticks());
    }

    #[test]
    fn handle_outliving_runtime_is_inert() {
        let rt = runtime();
        let handle = rt.handle();
        drop(rt);

        assert!(handle.register_tick_callback(|_| {}).is_none());
        assert!(!handle.has_pending_ticks());
        handle.drain_ticks(0); // must not panic
    }
}
