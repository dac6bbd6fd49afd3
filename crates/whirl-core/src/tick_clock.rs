use crate::runtime::{RuntimeHandle, TickCallbackId};

/// Hands out cancellable registrations on the runtime's tick queue.
///
/// This is the unit of deferred work the animation layer builds on: a
/// callback registered here runs exactly once, on the next drain, unless
/// its [`TickRegistration`] is cancelled (or dropped) first.
#[derive(Clone)]
pub struct TickClock {
    runtime: RuntimeHandle,
}

impl TickClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    /// Registers `callback` to run on the next drain with the drain's
    /// timestamp in nanoseconds.
    pub fn with_tick_nanos(&self, callback: impl FnOnce(u64) + 'static) -> TickRegistration {
        match self.runtime.register_tick_callback(callback) {
            Some(id) => TickRegistration::new(self.runtime.clone(), id),
            None => TickRegistration::inactive(self.runtime.clone()),
        }
    }

    /// Like [`TickClock::with_tick_nanos`] but reporting milliseconds.
    pub fn with_tick_millis(&self, callback: impl FnOnce(u64) + 'static) -> TickRegistration {
        self.with_tick_nanos(move |nanos| {
            let millis = nanos / 1_000_000;
            callback(millis);
        })
    }
}

/// RAII handle for one queued tick callback. Dropping it cancels the
/// callback; cancellation is synchronous, so after `cancel` (or drop)
/// returns, the callback is guaranteed never to fire.
pub struct TickRegistration {
    runtime: RuntimeHandle,
    id: Option<TickCallbackId>,
}

impl TickRegistration {
    fn new(runtime: RuntimeHandle, id: TickCallbackId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_tick_callback(id);
        }
    }
}

impl Drop for TickRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_tick_callback(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{DefaultScheduler, Runtime};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    #[test]
    fn dropping_registration_cancels_callback() {
        let rt = Runtime::new(Arc::new(DefaultScheduler));
        let handle = rt.handle();
        let fired = Rc::new(Cell::new(false));

        let fired_in = Rc::clone(&fired);
        let registration = rt.tick_clock().with_tick_nanos(move |_| fired_in.set(true));
        drop(registration);

        handle.drain_ticks(0);
        assert!(!fired.get());
    }

    #[test]
    fn explicit_cancel_is_equivalent_to_drop() {
        let rt = Runtime::new(Arc::new(DefaultScheduler));
        let handle = rt.handle();
        let fired = Rc::new(Cell::new(false));

        let fired_in = Rc::clone(&fired);
        let registration = rt.tick_clock().with_tick_nanos(move |_| fired_in.set(true));
        registration.cancel();

        handle.drain_ticks(0);
        assert!(!fired.get());
    }

    #[test]
    fn millis_variant_converts_from_nanos() {
        let rt = Runtime::new(Arc::new(DefaultScheduler));
        let handle = rt.handle();
        let seen = Rc::new(Cell::new(0u64));

        let seen_in = Rc::clone(&seen);
        let registration = rt.tick_clock().with_tick_millis(move |ms| seen_in.set(ms));
        handle.drain_ticks(33_000_000);
        drop(registration);

        assert_eq!(seen.get(), 33);
    }
}
