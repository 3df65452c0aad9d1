//! Blinc Core Runtime
//!
//! Foundational primitives shared by the Blinc animation crates:
//!
//! - **Event Dispatch**: named-topic, synchronous, ordered notification
//! - **Frame Timing**: clocks, a host frame-callback abstraction and a
//!   self-rescheduling frame loop
//!
//! # Example
//!
//! ```rust
//! use blinc_core::events::EventEmitter;
//!
//! let mut emitter: EventEmitter<&'static str, f64> = EventEmitter::new();
//! emitter.on("update", |time| println!("t = {time}"));
//! assert_eq!(emitter.emit("update", &16.0), 1);
//! ```

pub mod events;
pub mod frame;

pub use events::{EventEmitter, Listener, ListenerId};
pub use frame::{
    Clock, FrameCallback, FrameHandle, FrameLoop, FrameScheduler, ManualClock,
    ManualFrameScheduler, SystemClock,
};
