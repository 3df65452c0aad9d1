//! Tween state machine
//!
//! A [`Tween`] advances an [`Animator`] through one or more cycles of
//! `duration` milliseconds:
//!
//! ```text
//!   Idle ──start──▶ Playing ──(last cycle ends)──▶ Completed
//!    ▲                │  ▲                            │
//!    │              pause resume                      │
//!    │                ▼  │                            │
//!    └─────stop───── Paused                           │
//!    └─────────────────────────stop───────────────────┘
//! ```
//!
//! At the end of a cycle with repeats left, a yoyo tween swaps its bounds
//! and runs backwards; any other tween restores its declared start values
//! and runs the same ramp again.

use crate::animator::Animator;
use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::events::{notify, AnimationEvent, Notifier, Topic};
use crate::interpolation::InterpolationFn;
use crate::path::PropertyPath;
use crate::playback::{PlayState, Playable};
use crate::property::{PropertyAnimator, Subject};
use crate::value::Value;
use blinc_core::{Clock, ListenerId, SystemClock};
use std::rc::Rc;

/// A time-bounded animation of a subject's properties
pub struct Tween<A = PropertyAnimator> {
    animator: A,
    duration: f64,
    repeat_count: u32,
    repeats_remaining: u32,
    yoyo: bool,
    /// True while a yoyo tween runs its backward leg
    reversed: bool,
    time_scale: f64,
    easing: Easing,
    state: PlayState,
    /// Scaled time spent in the current cycle
    elapsed: f64,
    /// Time reference of the previous start/resume/update call
    last_time: f64,
    clock: Rc<dyn Clock>,
    events: Notifier,
}

impl Tween {
    /// Start building a property tween for `subject`
    pub fn builder(subject: Subject) -> TweenBuilder {
        TweenBuilder::new(subject)
    }
}

impl<A: Animator> Tween<A> {
    /// Wrap a custom animator
    pub fn with_animator(animator: A, duration: f64) -> Result<Self> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(AnimationError::InvalidDuration(duration));
        }
        Ok(Self {
            animator,
            duration,
            repeat_count: 0,
            repeats_remaining: 0,
            yoyo: false,
            reversed: false,
            time_scale: 1.0,
            easing: Easing::Linear,
            state: PlayState::Idle,
            elapsed: 0.0,
            last_time: 0.0,
            clock: Rc::new(SystemClock::new()),
            events: Notifier::new(),
        })
    }

    /// Builder: number of extra cycles after the first
    pub fn with_repeat(mut self, count: u32) -> Self {
        self.repeat_count = count;
        self.repeats_remaining = count;
        self
    }

    /// Builder: alternate direction on every repeat
    pub fn with_yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Builder: easing applied to progress
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Builder: clock read when lifecycle calls pass no time
    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builder: time scale
    pub fn with_time_scale(mut self, scale: f64) -> Result<Self> {
        self.set_time_scale(scale)?;
        Ok(self)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Begin playing from the first cycle. No-op while playing or paused.
    pub fn start(&mut self, time: Option<f64>) {
        if matches!(self.state, PlayState::Playing | PlayState::Paused) {
            return;
        }
        if self.reversed {
            self.animator.swap_bounds();
            self.reversed = false;
        }
        self.elapsed = 0.0;
        self.repeats_remaining = self.repeat_count;
        self.last_time = self.now(time);
        self.state = PlayState::Playing;
        notify(&mut self.events, AnimationEvent::Start);
    }

    /// Return to idle and reset the playback position. No-op while idle.
    pub fn stop(&mut self) {
        if self.state == PlayState::Idle {
            return;
        }
        self.state = PlayState::Idle;
        self.elapsed = 0.0;
        notify(&mut self.events, AnimationEvent::Stop);
    }

    pub fn pause(&mut self, _time: Option<f64>) {
        if self.state != PlayState::Playing {
            return;
        }
        self.state = PlayState::Paused;
        notify(&mut self.events, AnimationEvent::Pause);
    }

    /// Continue from where the tween was paused.
    ///
    /// The time reference moves to `time`, so the paused interval does not
    /// count as elapsed.
    pub fn resume(&mut self, time: Option<f64>) {
        if self.state != PlayState::Paused {
            return;
        }
        self.last_time = self.now(time);
        self.state = PlayState::Playing;
        notify(&mut self.events, AnimationEvent::Resume);
    }

    /// Advance to `time` and write the frame.
    ///
    /// Time left over past the end of a cycle carries into the next one, so a
    /// single large step can run several cycles. A zero-length tween finishes
    /// on its first update. Returns whether the tween is still playing.
    pub fn update(&mut self, time: Option<f64>) -> bool {
        if self.state != PlayState::Playing {
            return false;
        }
        let now = self.now(time);
        self.elapsed = (self.elapsed + (now - self.last_time) * self.time_scale).max(0.0);
        self.last_time = now;

        if self.duration <= 0.0 {
            self.finish();
            return false;
        }

        loop {
            let progress = self.progress();
            self.animator.apply(self.easing.apply(progress));
            notify(
                &mut self.events,
                AnimationEvent::Update {
                    time: self.elapsed,
                    progress,
                },
            );
            if progress < 1.0 {
                return true;
            }

            if self.repeats_remaining == 0 {
                self.state = PlayState::Completed;
                notify(&mut self.events, AnimationEvent::Complete);
                return false;
            }

            self.repeats_remaining -= 1;
            self.next_cycle();
            self.elapsed -= self.duration;
            notify(
                &mut self.events,
                AnimationEvent::Repeat {
                    remaining: self.repeats_remaining,
                },
            );
        }
    }

    /// Jump to the end of the last cycle and complete.
    ///
    /// Independent of time and time scale. Skipped cycles are not replayed:
    /// the bounds end up where an uninterrupted run would leave them and a
    /// single `Repeat` is sent for all of them. No-op unless playing or paused.
    pub fn finish(&mut self) {
        if !matches!(self.state, PlayState::Playing | PlayState::Paused) {
            return;
        }
        let skipped = self.repeats_remaining;
        if skipped > 0 {
            if !self.yoyo {
                self.animator.restore_start();
            } else if skipped % 2 == 1 {
                self.animator.swap_bounds();
                self.reversed = !self.reversed;
            }
            self.repeats_remaining = 0;
            notify(&mut self.events, AnimationEvent::Repeat { remaining: 0 });
        }

        self.elapsed = self.duration;
        self.animator.apply(self.easing.apply(1.0));
        notify(
            &mut self.events,
            AnimationEvent::Update {
                time: self.elapsed,
                progress: 1.0,
            },
        );
        self.state = PlayState::Completed;
        notify(&mut self.events, AnimationEvent::Complete);
    }

    fn next_cycle(&mut self) {
        if self.yoyo {
            self.animator.swap_bounds();
            self.reversed = !self.reversed;
        } else {
            self.animator.restore_start();
        }
    }

    fn now(&self, time: Option<f64>) -> f64 {
        time.unwrap_or_else(|| self.clock.now_ms())
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Listen for a lifecycle topic
    pub fn on<F>(&mut self, topic: Topic, listener: F) -> ListenerId
    where
        F: FnMut(&AnimationEvent) + 'static,
    {
        self.events.on(topic, listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlayState::Paused
    }

    /// Progress through the current cycle, before easing
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Scaled time spent in the current cycle
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn repeats_remaining(&self) -> u32 {
        self.repeats_remaining
    }

    pub fn is_yoyo(&self) -> bool {
        self.yoyo
    }

    /// Whether the current cycle runs from the declared end back to the start
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Set the multiplier applied to elapsed time.
    ///
    /// A negative scale runs the current cycle backwards; progress stops at 0
    /// and never moves into a previous cycle.
    pub fn set_time_scale(&mut self, scale: f64) -> Result<()> {
        if !scale.is_finite() {
            return Err(AnimationError::InvalidTimeScale(scale));
        }
        self.time_scale = scale;
        Ok(())
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }
}

impl Tween<PropertyAnimator> {
    pub fn subject(&self) -> &Subject {
        self.animator.subject()
    }

    pub fn paths(&self) -> &[PropertyPath] {
        self.animator.paths()
    }
}

impl<A: Animator> Playable for Tween<A> {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    fn state(&self) -> PlayState {
        self.state
    }

    fn start(&mut self, time: Option<f64>) {
        Tween::start(self, time);
    }

    fn stop(&mut self) {
        Tween::stop(self);
    }

    fn pause(&mut self, time: Option<f64>) {
        Tween::pause(self, time);
    }

    fn resume(&mut self, time: Option<f64>) {
        Tween::resume(self, time);
    }

    fn update(&mut self, time: Option<f64>) -> bool {
        Tween::update(self, time)
    }

    fn finish(&mut self) {
        Tween::finish(self);
    }
}

/// Builder for property tweens
pub struct TweenBuilder {
    subject: Subject,
    from: Option<Value>,
    to: Option<Value>,
    duration: Option<f64>,
    repeat: u32,
    yoyo: bool,
    time_scale: f64,
    easing: Easing,
    interpolation: Option<InterpolationFn>,
    clock: Option<Rc<dyn Clock>>,
}

impl TweenBuilder {
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            from: None,
            to: None,
            duration: None,
            repeat: 0,
            yoyo: false,
            time_scale: 1.0,
            easing: Easing::Linear,
            interpolation: None,
            clock: None,
        }
    }

    /// Explicit start values. Missing properties come from the subject.
    pub fn from(mut self, values: Value) -> Self {
        self.from = Some(values);
        self
    }

    /// End values
    pub fn to(mut self, values: Value) -> Self {
        self.to = Some(values);
        self
    }

    /// Length of one cycle in milliseconds
    pub fn duration(mut self, duration_ms: f64) -> Self {
        self.duration = Some(duration_ms);
        self
    }

    pub fn repeat(mut self, count: u32) -> Self {
        self.repeat = count;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Interpolation for sequence and buffer leaves
    pub fn interpolation<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64], f64) -> f64 + 'static,
    {
        self.interpolation = Some(Rc::new(f));
        self
    }

    pub fn clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the configuration, resolve property paths and build the tween
    pub fn build(self) -> Result<Tween> {
        let duration = self.duration.ok_or(AnimationError::MissingDuration)?;
        if !duration.is_finite() || duration < 0.0 {
            return Err(AnimationError::InvalidDuration(duration));
        }
        let to = self.to.ok_or(AnimationError::MissingTarget)?;
        let animator = PropertyAnimator::new(self.subject, self.from, to, self.interpolation)?;

        let mut tween = Tween::with_animator(animator, duration)?
            .with_repeat(self.repeat)
            .with_yoyo(self.yoyo)
            .with_easing(self.easing)
            .with_time_scale(self.time_scale)?;
        if let Some(clock) = self.clock {
            tween = tween.with_clock(clock);
        }
        Ok(tween)
    }
}
