//! Frame timing primitives
//!
//! - [`Clock`]: a millisecond time source ([`SystemClock`], [`ManualClock`])
//! - [`FrameScheduler`]: "call me on the next display frame" with cancellation
//! - [`FrameLoop`]: a task that re-submits itself every frame until cancelled

use slotmap::{new_key_type, SlotMap};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

/// A source of monotonic time in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock measured from the moment it was created
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to. Useful for tests and offline rendering.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, dt_ms: f64) {
        self.now.set(self.now.get() + dt_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

new_key_type! {
    /// Handle to a pending frame callback
    pub struct FrameHandle;
}

/// Callback run on the next frame, receiving the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Host frame clock: schedules one-shot callbacks for the next display frame
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a pending callback. Cancelling a handle that already ran or was
    /// already cancelled does nothing.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Frame scheduler driven explicitly through [`ManualFrameScheduler::run_frame`]
#[derive(Default)]
pub struct ManualFrameScheduler {
    pending: RefCell<SlotMap<FrameHandle, FrameCallback>>,
    order: RefCell<Vec<FrameHandle>>,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback requested before this call.
    ///
    /// Callbacks requested while the frame runs are deferred to the next frame.
    /// Returns the number of callbacks invoked.
    pub fn run_frame(&self, now_ms: f64) -> usize {
        let order = std::mem::take(&mut *self.order.borrow_mut());
        let mut ran = 0;
        for handle in order {
            // Release the borrow before invoking: callbacks may request frames.
            let callback = self.pending.borrow_mut().remove(handle);
            if let Some(callback) = callback {
                callback(now_ms);
                ran += 1;
            }
        }
        tracing::trace!(now_ms, ran, "frame");
        ran
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = self.pending.borrow_mut().insert(callback);
        self.order.borrow_mut().push(handle);
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.pending.borrow_mut().remove(handle);
    }
}

/// Handle to a self-rescheduling per-frame task.
///
/// The tick closure runs once per frame and the task re-submits itself while
/// it returns `true`. [`FrameLoop::cancel`] may be called any number of times.
#[derive(Clone)]
pub struct FrameLoop {
    frames: Rc<dyn FrameScheduler>,
    pending: Rc<Cell<Option<FrameHandle>>>,
    cancelled: Rc<Cell<bool>>,
}

impl FrameLoop {
    /// Start a loop on `frames`; the first tick runs on the next frame
    pub fn run<F>(frames: Rc<dyn FrameScheduler>, tick: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let frame_loop = Self {
            frames,
            pending: Rc::new(Cell::new(None)),
            cancelled: Rc::new(Cell::new(false)),
        };
        let tick: Rc<RefCell<dyn FnMut(f64) -> bool>> = Rc::new(RefCell::new(tick));
        frame_loop.submit(tick);
        frame_loop
    }

    fn submit(&self, tick: Rc<RefCell<dyn FnMut(f64) -> bool>>) {
        let next = self.clone();
        let handle = self.frames.request_frame(Box::new(move |now_ms| {
            next.pending.set(None);
            if next.cancelled.get() {
                return;
            }
            let keep_going = (&mut *tick.borrow_mut())(now_ms);
            if keep_going && !next.cancelled.get() {
                next.submit(tick);
            }
        }));
        self.pending.set(Some(handle));
    }

    /// Whether another tick is scheduled
    pub fn is_active(&self) -> bool {
        !self.cancelled.get() && self.pending.get().is_some()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let Some(handle) = self.pending.take() {
            self.frames.cancel_frame(handle);
        }
    }
}
