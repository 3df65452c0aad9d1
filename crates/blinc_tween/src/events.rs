//! Lifecycle notifications
//!
//! Tweens and timelines announce lifecycle changes on named topics through a
//! [`blinc_core::EventEmitter`]. Listeners run synchronously, in subscription
//! order, while the emitting animation is mid-call.

use blinc_core::EventEmitter;

/// Notification topic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    Start,
    Stop,
    Pause,
    Resume,
    Update,
    Repeat,
    Complete,
}

impl Topic {
    pub fn name(&self) -> &'static str {
        match self {
            Topic::Start => "start",
            Topic::Stop => "stop",
            Topic::Pause => "pause",
            Topic::Resume => "resume",
            Topic::Update => "update",
            Topic::Repeat => "repeat",
            Topic::Complete => "complete",
        }
    }
}

/// Payload delivered to listeners
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationEvent {
    Start,
    Stop,
    Pause,
    Resume,
    /// `time` is the tween's elapsed time in its current cycle, or the
    /// timeline's current time. `progress` is in `[0, 1]`.
    Update { time: f64, progress: f64 },
    /// A new cycle began; `remaining` repeats are left after it
    Repeat { remaining: u32 },
    Complete,
}

impl AnimationEvent {
    pub fn topic(&self) -> Topic {
        match self {
            AnimationEvent::Start => Topic::Start,
            AnimationEvent::Stop => Topic::Stop,
            AnimationEvent::Pause => Topic::Pause,
            AnimationEvent::Resume => Topic::Resume,
            AnimationEvent::Update { .. } => Topic::Update,
            AnimationEvent::Repeat { .. } => Topic::Repeat,
            AnimationEvent::Complete => Topic::Complete,
        }
    }
}

/// Emitter type shared by tweens and timelines
pub type Notifier = EventEmitter<Topic, AnimationEvent>;

/// Send `event` on its own topic
pub(crate) fn notify(notifier: &mut Notifier, event: AnimationEvent) {
    notifier.emit(event.topic(), &event);
}
