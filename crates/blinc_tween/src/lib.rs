//! Blinc Tween Engine
//!
//! Property tweens and timeline orchestration over plain value trees.
//!
//! # Features
//!
//! - **Tweens**: Interpolate every leaf of a value tree between start and end
//!   values, with easing, repeat and yoyo cycling
//! - **Timelines**: Place tweens (or other timelines) on a shared clock with
//!   absolute positions or relative offsets
//! - **Deterministic Skips**: A frame that jumps past an entry's window still
//!   lands its subject on the end values
//! - **Notifications**: Start, stop, pause, resume, update, repeat and complete
//!   topics on every tween and timeline
//!
//! # Example
//!
//! ```rust
//! use blinc_tween::{subject, AddOptions, Timeline, Tween, Value};
//!
//! let ball = subject(Value::record([("x", 0.0)]));
//! let slide = Tween::builder(ball.clone())
//!     .to(Value::record([("x", 100.0)]))
//!     .duration(10.0)
//!     .build()
//!     .unwrap();
//!
//! let mut timeline = Timeline::new();
//! timeline.add(slide, AddOptions::at(10.0));
//! timeline.start(Some(0.0));
//! timeline.update(Some(25.0));
//!
//! assert_eq!(ball.borrow().scalar("x"), Some(100.0));
//! ```

pub mod animator;
pub mod easing;
pub mod error;
pub mod events;
pub mod group;
pub mod interpolation;
pub mod path;
pub mod playback;
pub mod property;
pub mod timeline;
pub mod tween;
pub mod value;

pub use animator::{Animator, FnAnimator};
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use events::{AnimationEvent, Notifier, Topic};
pub use group::{AnimationGroup, AnimationId};
pub use interpolation::{bezier, catmull_rom, lerp, linear, InterpolationFn};
pub use path::{leaf_paths, visit_leaves, PropertyPath};
pub use playback::{PlayState, Playable};
pub use property::{interpolate, subject, PropertyAnimator, Subject};
pub use timeline::{AddOptions, Timeline, TimelineEntry, TimelineEntryId};
pub use tween::{Tween, TweenBuilder};
pub use value::{NumericBuffer, Value};

pub use blinc_core::{
    Clock, FrameLoop, FrameScheduler, ListenerId, ManualClock, ManualFrameScheduler, SystemClock,
};
