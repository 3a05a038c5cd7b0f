//! Leading-edge rate limiting for event handlers.
//!
//! Map interaction handlers (pan, zoom, hover) can fire far faster than the
//! work they trigger is worth repeating. The throttle here is leading-edge
//! only: the first call in a burst runs immediately and starts a window of
//! `limit`; calls arriving inside the window are dropped, never queued or
//! replayed. Once the window has elapsed the next call runs and starts a
//! new window.
//!
//! There is no timer thread. Window expiry is evaluated lazily against the
//! stored window start on each call, which is observationally identical for
//! the caller (a call either executes immediately or is discarded) and
//! keeps the gate `Send + Sync`.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// A leading-edge rate limiting gate.
///
/// `try_acquire` returns `true` at most once per rolling window of `limit`.
/// The gate itself carries no callback; see [`throttle`] and [`Throttled`]
/// for the wrapped-callback forms.
///
/// A zero `limit` never throttles.
#[derive(Debug)]
pub struct RateLimiter {
    limit: Duration,
    window_start: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a gate with the given minimum interval between passes.
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            window_start: Mutex::new(None),
        }
    }

    /// Attempt to pass the gate.
    ///
    /// Returns `true` if no window is active (and starts one), `false` if a
    /// window is still open.
    pub fn try_acquire(&self) -> bool {
        let mut window = self.window_start.lock();
        match *window {
            Some(start) if start.elapsed() < self.limit => false,
            _ => {
                *window = Some(Instant::now());
                true
            }
        }
    }

    /// The configured window length.
    pub fn limit(&self) -> Duration {
        self.limit
    }
}

/// A callback wrapped with a leading-edge rate limit, callable through
/// shared references.
///
/// Unlike the closure returned by [`throttle`], this form is `Sync` when
/// the callback is, so one instance can serve handlers invoked from
/// multiple threads.
pub struct Throttled<F> {
    gate: RateLimiter,
    func: Mutex<F>,
}

impl<F> Throttled<F> {
    pub fn new(func: F, limit: Duration) -> Self {
        Self {
            gate: RateLimiter::new(limit),
            func: Mutex::new(func),
        }
    }

    /// Invoke the wrapped callback if the window allows it; otherwise the
    /// call is dropped. The triggering call's argument is passed through
    /// verbatim.
    pub fn call<A>(&self, arg: A)
    where
        F: FnMut(A),
    {
        if self.gate.try_acquire() {
            (self.func.lock())(arg);
        }
    }
}

/// Wrap a callback so that at most one invocation passes through per
/// rolling window of `limit`.
///
/// The first call in a burst executes synchronously with its own argument;
/// calls inside the window are silently dropped. Use `()` as the argument
/// type for zero-argument callbacks.
///
/// # Examples
///
/// ```rust
/// use stationflow::throttle;
/// use std::cell::Cell;
/// use std::time::Duration;
///
/// let renders = Cell::new(0);
/// let mut on_pan = throttle(|_: ()| renders.set(renders.get() + 1), Duration::from_millis(100));
///
/// on_pan(());
/// on_pan(());
/// on_pan(());
/// assert_eq!(renders.get(), 1);
/// ```
pub fn throttle<A, F>(mut func: F, limit: Duration) -> impl FnMut(A)
where
    F: FnMut(A),
{
    let gate = RateLimiter::new(limit);
    move |arg| {
        if gate.try_acquire() {
            func(arg);
        }
    }
}
