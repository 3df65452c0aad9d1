//! Timeline orchestration for multiple animations
//!
//! A [`Timeline`] places [`Playable`]s on a shared clock. Each entry owns a
//! window `[start, end]` where `end = start + duration * (repeat_count + 1)`.
//! On every update the timeline visits all entries in ascending `start`
//! order and applies the window policy:
//!
//! - before the window: a started target is stopped
//! - inside the window: an idle target is started, then updated with the
//!   window-relative time. A target that already completed is left alone.
//! - at or past the end: the target is started if idle, finished so it lands
//!   on its end values, and stopped
//!
//! The last rule holds even when the playhead jumps over a window in a
//! single step, and whatever the target's own time scale, so the subjects
//! never depend on frame timing.

use crate::error::{AnimationError, Result};
use crate::events::{notify, AnimationEvent, Notifier, Topic};
use crate::playback::{PlayState, Playable};
use blinc_core::{Clock, FrameLoop, FrameScheduler, ListenerId, SystemClock};
use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

new_key_type! {
    pub struct TimelineEntryId;
}

/// Placement of a new entry
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AddOptions {
    /// Absolute start time. Takes priority over `offset`.
    pub position: Option<f64>,
    /// Start relative to the current end of the timeline
    pub offset: f64,
}

impl AddOptions {
    /// Place the entry at an absolute time
    pub fn at(position: f64) -> Self {
        Self {
            position: Some(position),
            offset: 0.0,
        }
    }

    /// Place the entry `offset` ms after the current end (negative overlaps)
    pub fn offset(offset: f64) -> Self {
        Self {
            position: None,
            offset,
        }
    }
}

/// An entry in a timeline
pub struct TimelineEntry {
    target: Box<dyn Playable>,
    start: f64,
    end: f64,
    /// Duration of every cycle of the target
    original_duration: f64,
}

impl TimelineEntry {
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn original_duration(&self) -> f64 {
        self.original_duration
    }

    pub fn target(&self) -> &dyn Playable {
        &*self.target
    }

    pub fn target_mut(&mut self) -> &mut dyn Playable {
        &mut *self.target
    }

    /// Time relative to the start of the window
    fn local_time(&self, time: f64) -> f64 {
        time - self.start
    }

    /// Apply the window policy for timeline time `time`
    fn drive(&mut self, time: f64) {
        let idle = self.target.state() == PlayState::Idle;
        if time < self.start {
            if !idle {
                tracing::trace!(start = self.start, "rewound before window, stopping entry");
                self.target.stop();
            }
        } else if time < self.end {
            if idle {
                self.target.start(Some(0.0));
            }
            self.target.update(Some(self.local_time(time)));
        } else {
            if idle {
                self.target.start(Some(0.0));
            }
            self.target.finish();
            self.target.stop();
        }
    }
}

/// Self-driving state of a shared timeline
struct Driver {
    frames: Rc<dyn FrameScheduler>,
    this: Weak<RefCell<Timeline>>,
    frame_loop: Option<FrameLoop>,
}

/// A timeline that orchestrates multiple animations
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    /// Entry ids in ascending start order, ties in insertion order
    order: Vec<TimelineEntryId>,
    total_duration: f64,
    current_time: f64,
    /// Wall-clock reference of the previous start/resume/update call
    last_time: f64,
    state: PlayState,
    time_scale: f64,
    clock: Rc<dyn Clock>,
    events: Notifier,
    driver: Option<Driver>,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
            total_duration: 0.0,
            current_time: 0.0,
            last_time: 0.0,
            state: PlayState::Idle,
            time_scale: 1.0,
            clock: Rc::new(SystemClock::new()),
            events: Notifier::new(),
            driver: None,
        }
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

    /// Share the timeline and let it drive itself from `frames`.
    ///
    /// `start(None)` and `resume(None)` then schedule a per-frame update. Frame
    /// timestamps must use the same time base as the timeline's clock.
    pub fn into_shared(self, frames: Rc<dyn FrameScheduler>) -> Rc<RefCell<Timeline>> {
        Rc::new_cyclic(move |this| {
            let mut timeline = self;
            timeline.driver = Some(Driver {
                frames,
                this: this.clone(),
                frame_loop: None,
            });
            RefCell::new(timeline)
        })
    }

    /// Add an animation to the timeline
    pub fn add<P>(&mut self, target: P, options: AddOptions) -> TimelineEntryId
    where
        P: Playable + 'static,
    {
        let start = options
            .position
            .unwrap_or(self.total_duration + options.offset);
        let original_duration = target.total_duration();
        let end = start + original_duration;

        let id = self.entries.insert(TimelineEntry {
            target: Box::new(target),
            start,
            end,
            original_duration,
        });
        self.order.push(id);

        let entries = &self.entries;
        self.order
            .sort_by(|a, b| entries[*a].start.total_cmp(&entries[*b].start));

        // Update total duration
        self.total_duration = self.total_duration.max(end);
        tracing::debug!(start, end, total = self.total_duration, "timeline entry added");

        id
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Rewind to 0, stop every entry and start playing.
    ///
    /// A playing or paused timeline restarts from 0. Without an explicit time,
    /// a shared timeline also starts driving itself.
    pub fn start(&mut self, time: Option<f64>) {
        self.current_time = 0.0;
        for entry in self.entries.values_mut() {
            entry.target.stop();
        }
        self.last_time = self.now(time);
        self.state = PlayState::Playing;
        tracing::debug!(entries = self.entries.len(), total = self.total_duration, "timeline started");
        notify(&mut self.events, AnimationEvent::Start);

        if time.is_none() {
            self.schedule_frames();
        }
    }

    /// Stop playing, rewind, and stop every entry
    pub fn stop(&mut self) {
        if self.state == PlayState::Idle {
            return;
        }
        self.cancel_frames();
        self.state = PlayState::Idle;
        self.current_time = 0.0;
        for entry in self.entries.values_mut() {
            entry.target.stop();
        }
        tracing::debug!("timeline stopped");
        notify(&mut self.events, AnimationEvent::Stop);
    }

    /// Pause the timeline and every entry that is playing
    pub fn pause(&mut self, _time: Option<f64>) {
        if self.state != PlayState::Playing {
            return;
        }
        self.cancel_frames();
        self.state = PlayState::Paused;
        let now = self.current_time;
        for entry in self.entries.values_mut() {
            if entry.target.is_playing() {
                let local = entry.local_time(now);
                entry.target.pause(Some(local));
            }
        }
        notify(&mut self.events, AnimationEvent::Pause);
    }

    /// Resume the timeline and every entry paused with it
    pub fn resume(&mut self, time: Option<f64>) {
        if self.state != PlayState::Paused {
            return;
        }
        self.last_time = self.now(time);
        self.state = PlayState::Playing;
        let now = self.current_time;
        for entry in self.entries.values_mut() {
            if entry.target.state() == PlayState::Paused {
                let local = entry.local_time(now);
                entry.target.resume(Some(local));
            }
        }
        notify(&mut self.events, AnimationEvent::Resume);

        if time.is_none() {
            self.schedule_frames();
        }
    }

    /// Advance the timeline.
    ///
    /// `Some(time)` seeks to `time * time_scale`; `None` advances by the scaled
    /// wall-clock delta since the previous call. Returns whether the timeline
    /// is still playing.
    pub fn update(&mut self, time: Option<f64>) -> bool {
        if self.state != PlayState::Playing {
            return false;
        }
        match time {
            Some(time) => self.current_time = time * self.time_scale,
            None => {
                let now = self.clock.now_ms();
                self.advance_wall_clock(now);
            }
        }
        self.drive_entries()
    }

    /// Jump to the end: every entry lands on its end values and the timeline
    /// completes. No-op unless playing or paused.
    pub fn finish(&mut self) {
        if !matches!(self.state, PlayState::Playing | PlayState::Paused) {
            return;
        }
        self.state = PlayState::Playing;
        self.current_time = self.total_duration;
        self.drive_entries();
    }

    /// One tick of the self-driving loop
    fn tick(&mut self, now: f64) -> bool {
        if self.state != PlayState::Playing {
            return false;
        }
        self.advance_wall_clock(now);
        self.drive_entries()
    }

    fn advance_wall_clock(&mut self, now: f64) {
        self.current_time += (now - self.last_time) * self.time_scale;
        self.last_time = now;
    }

    fn drive_entries(&mut self) -> bool {
        let time = self.current_time;
        let progress = self.progress();
        notify(&mut self.events, AnimationEvent::Update { time, progress });

        for id in &self.order {
            self.entries[*id].drive(time);
        }

        if time >= self.total_duration {
            self.cancel_frames();
            self.state = PlayState::Completed;
            tracing::debug!(time, "timeline complete");
            notify(&mut self.events, AnimationEvent::Complete);
            return false;
        }
        true
    }

    fn now(&self, time: Option<f64>) -> f64 {
        time.unwrap_or_else(|| self.clock.now_ms())
    }

    fn schedule_frames(&mut self) {
        let Some(driver) = self.driver.as_mut() else {
            return;
        };
        if driver.frame_loop.as_ref().is_some_and(FrameLoop::is_active) {
            return;
        }
        let this = driver.this.clone();
        driver.frame_loop = Some(FrameLoop::run(driver.frames.clone(), move |now| {
            let Some(timeline) = this.upgrade() else {
                return false;
            };
            // Skip the frame if the host is holding the timeline right now.
            let Ok(mut timeline) = timeline.try_borrow_mut() else {
                return true;
            };
            timeline.tick(now)
        }));
    }

    fn cancel_frames(&mut self) {
        if let Some(frame_loop) = self.driver.as_mut().and_then(|d| d.frame_loop.take()) {
            frame_loop.cancel();
        }
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

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Current time as a fraction of the total duration
    pub fn progress(&self) -> f64 {
        if self.total_duration <= 0.0 {
            return 1.0;
        }
        (self.current_time / self.total_duration).clamp(0.0, 1.0)
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Set the multiplier applied to seeks and wall-clock deltas
    pub fn set_time_scale(&mut self, scale: f64) -> Result<()> {
        if !scale.is_finite() {
            return Err(AnimationError::InvalidTimeScale(scale));
        }
        self.time_scale = scale;
        Ok(())
    }

    /// Whether a self-driving frame loop is scheduled
    pub fn is_driving(&self) -> bool {
        self.driver
            .as_ref()
            .and_then(|d| d.frame_loop.as_ref())
            .is_some_and(FrameLoop::is_active)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: TimelineEntryId) -> Option<&TimelineEntry> {
        self.entries.get(id)
    }

    pub fn entry_mut(&mut self, id: TimelineEntryId) -> Option<&mut TimelineEntry> {
        self.entries.get_mut(id)
    }

    /// Entries in visiting order
    pub fn entries(&self) -> impl Iterator<Item = (TimelineEntryId, &TimelineEntry)> {
        self.order.iter().map(|id| (*id, &self.entries[*id]))
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Timeline {
    fn drop(&mut self) {
        self.cancel_frames();
    }
}

impl Playable for Timeline {
    fn duration(&self) -> f64 {
        self.total_duration
    }

    fn state(&self) -> PlayState {
        self.state
    }

    fn start(&mut self, time: Option<f64>) {
        Timeline::start(self, time);
    }

    fn stop(&mut self) {
        Timeline::stop(self);
    }

    fn pause(&mut self, time: Option<f64>) {
        Timeline::pause(self, time);
    }

    fn resume(&mut self, time: Option<f64>) {
        Timeline::resume(self, time);
    }

    fn update(&mut self, time: Option<f64>) -> bool {
        Timeline::update(self, time)
    }

    fn finish(&mut self) {
        Timeline::finish(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{subject, Subject};
    use crate::tween::Tween;
    use crate::value::Value;

    fn ramp(target: &Subject, to: f64, duration: f64) -> Tween {
        Tween::builder(target.clone())
            .from(Value::record([("x", 0.0)]))
            .to(Value::record([("x", to)]))
            .duration(duration)
            .build()
            .unwrap()
    }

    fn x(target: &Subject) -> f64 {
        target.borrow().scalar("x").unwrap_or(f64::NAN)
    }

    #[test]
    fn test_add_appends_by_default() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new();

        let a = timeline.add(ramp(&target, 1.0, 100.0), AddOptions::default());
        let b = timeline.add(ramp(&target, 1.0, 50.0), AddOptions::default());
        let c = timeline.add(ramp(&target, 1.0, 10.0), AddOptions::offset(-20.0));

        assert_eq!(timeline.entry(a).map(|e| (e.start(), e.end())), Some((0.0, 100.0)));
        assert_eq!(timeline.entry(b).map(|e| (e.start(), e.end())), Some((100.0, 150.0)));
        assert_eq!(timeline.entry(c).map(|e| (e.start(), e.end())), Some((130.0, 140.0)));
        assert_eq!(timeline.total_duration(), 150.0);
    }

    #[test]
    fn test_position_beats_offset() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new();
        timeline.add(ramp(&target, 1.0, 100.0), AddOptions::default());

        let id = timeline.add(
            ramp(&target, 1.0, 10.0),
            AddOptions {
                position: Some(5.0),
                offset: 1000.0,
            },
        );
        assert_eq!(timeline.entry(id).map(TimelineEntry::start), Some(5.0));
        assert_eq!(timeline.total_duration(), 100.0);
    }

    #[test]
    fn test_original_duration_includes_repeats() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new();
        let tween = Tween::builder(target)
            .to(Value::record([("x", 1.0)]))
            .duration(10.0)
            .repeat(2)
            .build()
            .unwrap();

        let id = timeline.add(tween, AddOptions::at(5.0));
        let entry = timeline.entry(id).unwrap();
        assert_eq!(entry.original_duration(), 30.0);
        assert_eq!(entry.end(), 35.0);
    }

    #[test]
    fn test_entries_sorted_by_start_stable() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new();
        let late = timeline.add(ramp(&target, 1.0, 10.0), AddOptions::at(50.0));
        let first_tie = timeline.add(ramp(&target, 1.0, 10.0), AddOptions::at(20.0));
        let second_tie = timeline.add(ramp(&target, 1.0, 10.0), AddOptions::at(20.0));
        let early = timeline.add(ramp(&target, 1.0, 10.0), AddOptions::at(0.0));

        let order: Vec<_> = timeline.entries().map(|(id, _)| id).collect();
        assert_eq!(order, vec![early, first_tie, second_tie, late]);
    }

    #[test]
    fn test_total_duration_never_shrinks() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new();
        let mut previous = timeline.total_duration();

        for (position, duration) in [(0.0, 100.0), (10.0, 5.0), (-50.0, 20.0), (90.0, 40.0)] {
            timeline.add(ramp(&target, 1.0, duration), AddOptions::at(position));
            assert!(timeline.total_duration() >= previous);
            previous = timeline.total_duration();
        }
        assert_eq!(previous, 130.0);
    }

    #[test]
    fn test_window_policy() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new();
        timeline.add(ramp(&target, 100.0, 10.0), AddOptions::at(10.0));

        timeline.start(Some(0.0));
        timeline.update(Some(5.0));
        assert_eq!(x(&target), 0.0);

        timeline.update(Some(15.0));
        assert_eq!(x(&target), 50.0);

        timeline.update(Some(20.0));
        assert_eq!(x(&target), 100.0);
        assert!(!timeline.is_playing());
    }

    #[test]
    fn test_skipping_a_window_lands_on_end_value() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new();
        timeline.add(ramp(&target, 100.0, 10.0), AddOptions::at(10.0));
        timeline.add(ramp(&subject(Value::object()), 1.0, 100.0), AddOptions::at(0.0));

        timeline.start(Some(0.0));
        timeline.update(Some(0.0));
        assert_eq!(x(&target), 0.0);

        timeline.update(Some(25.0));
        assert_eq!(x(&target), 100.0);
        assert!(timeline.is_playing());

        let (_, entry) = timeline
            .entries()
            .find(|(_, e)| e.start() == 10.0)
            .unwrap();
        assert_eq!(entry.target().state(), PlayState::Idle);
    }

    #[test]
    fn test_rewinding_stops_active_entry() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new();
        let id = timeline.add(ramp(&target, 100.0, 10.0), AddOptions::at(10.0));

        timeline.start(Some(0.0));
        timeline.update(Some(12.0));
        assert!(timeline.entry(id).unwrap().target().is_playing());

        timeline.update(Some(4.0));
        assert_eq!(timeline.entry(id).unwrap().target().state(), PlayState::Idle);
        assert_eq!(x(&target), 20.0);
    }

    #[test]
    fn test_time_scale_applies_to_seek() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new().with_time_scale(2.0).unwrap();
        timeline.add(ramp(&target, 100.0, 100.0), AddOptions::default());

        timeline.start(Some(0.0));
        timeline.update(Some(25.0));
        assert_eq!(timeline.current_time(), 50.0);
        assert_eq!(x(&target), 50.0);
    }

    #[test]
    fn test_pause_forwards_to_playing_entries_only() {
        let running = subject(Value::object());
        let pending = subject(Value::object());
        let mut timeline = Timeline::new();
        let a = timeline.add(ramp(&running, 100.0, 100.0), AddOptions::at(0.0));
        let b = timeline.add(ramp(&pending, 100.0, 100.0), AddOptions::at(50.0));

        timeline.start(Some(0.0));
        timeline.update(Some(20.0));
        timeline.pause(None);

        assert_eq!(timeline.state(), PlayState::Paused);
        assert_eq!(timeline.entry(a).unwrap().target().state(), PlayState::Paused);
        assert_eq!(timeline.entry(b).unwrap().target().state(), PlayState::Idle);
        assert!(!timeline.update(Some(90.0)));

        timeline.resume(Some(0.0));
        assert_eq!(timeline.entry(a).unwrap().target().state(), PlayState::Playing);
        timeline.update(Some(30.0));
        assert_eq!(x(&running), 30.0);
    }

    #[test]
    fn test_stop_resets_entries() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new();
        let id = timeline.add(ramp(&target, 100.0, 100.0), AddOptions::default());

        timeline.start(Some(0.0));
        timeline.update(Some(50.0));
        timeline.stop();
        timeline.stop();

        assert_eq!(timeline.state(), PlayState::Idle);
        assert_eq!(timeline.current_time(), 0.0);
        assert_eq!(timeline.entry(id).unwrap().target().state(), PlayState::Idle);
    }

    #[test]
    fn test_nested_timeline() {
        let target = subject(Value::object());
        let mut inner = Timeline::new();
        inner.add(ramp(&target, 100.0, 10.0), AddOptions::at(0.0));

        let mut outer = Timeline::new();
        outer.add(inner, AddOptions::at(10.0));
        assert_eq!(outer.total_duration(), 20.0);

        outer.start(Some(0.0));
        outer.update(Some(15.0));
        assert_eq!(x(&target), 50.0);
        outer.update(Some(40.0));
        assert_eq!(x(&target), 100.0);
    }

    #[test]
    fn test_events() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new();
        timeline.add(ramp(&target, 1.0, 10.0), AddOptions::default());

        let log = Rc::new(RefCell::new(Vec::new()));
        for topic in [Topic::Start, Topic::Update, Topic::Complete] {
            let log = log.clone();
            timeline.on(topic, move |event| log.borrow_mut().push(*event));
        }

        timeline.start(Some(0.0));
        timeline.update(Some(10.0));

        assert_eq!(
            *log.borrow(),
            vec![
                AnimationEvent::Start,
                AnimationEvent::Update {
                    time: 10.0,
                    progress: 1.0
                },
                AnimationEvent::Complete,
            ]
        );
    }

    fn scaled_ramp(target: &Subject, to: f64, duration: f64, scale: f64) -> Tween {
        Tween::builder(target.clone())
            .from(Value::record([("x", 0.0)]))
            .to(Value::record([("x", to)]))
            .duration(duration)
            .time_scale(scale)
            .build()
            .unwrap()
    }

    #[test]
    fn test_skipping_a_slowed_entry_lands_on_end_value() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new();
        timeline.add(scaled_ramp(&target, 100.0, 10.0, 0.5), AddOptions::at(10.0));
        timeline.add(ramp(&subject(Value::object()), 1.0, 100.0), AddOptions::at(0.0));

        timeline.start(Some(0.0));
        timeline.update(Some(15.0));
        assert_eq!(x(&target), 25.0);

        timeline.update(Some(25.0));
        assert_eq!(x(&target), 100.0);

        timeline.update(Some(60.0));
        assert_eq!(x(&target), 100.0);
    }

    #[test]
    fn test_completed_entry_is_not_replayed_inside_window() {
        let target = subject(Value::object());
        let mut fast = scaled_ramp(&target, 100.0, 10.0, 2.0);
        let starts = Rc::new(RefCell::new(0));
        {
            let starts = starts.clone();
            fast.on(Topic::Start, move |_| *starts.borrow_mut() += 1);
        }

        let mut timeline = Timeline::new();
        let id = timeline.add(fast, AddOptions::at(0.0));
        timeline.add(ramp(&subject(Value::object()), 1.0, 100.0), AddOptions::at(0.0));

        timeline.start(Some(0.0));
        timeline.update(Some(6.0));
        assert_eq!(x(&target), 100.0);
        assert_eq!(timeline.entry(id).unwrap().target().state(), PlayState::Completed);

        timeline.update(Some(8.0));
        assert_eq!(x(&target), 100.0);
        assert_eq!(*starts.borrow(), 1);

        timeline.update(Some(20.0));
        assert_eq!(x(&target), 100.0);
        assert_eq!(*starts.borrow(), 1);
        assert_eq!(timeline.entry(id).unwrap().target().state(), PlayState::Idle);
    }

    #[test]
    fn test_start_restarts_a_running_timeline() {
        let target = subject(Value::object());
        let mut timeline = Timeline::new();
        let id = timeline.add(ramp(&target, 100.0, 100.0), AddOptions::default());

        let starts = Rc::new(RefCell::new(0));
        {
            let starts = starts.clone();
            timeline.on(Topic::Start, move |_| *starts.borrow_mut() += 1);
        }

        timeline.start(Some(0.0));
        timeline.update(Some(50.0));
        timeline.start(Some(0.0));

        assert_eq!(*starts.borrow(), 2);
        assert_eq!(timeline.state(), PlayState::Playing);
        assert_eq!(timeline.current_time(), 0.0);
        assert_eq!(timeline.entry(id).unwrap().target().state(), PlayState::Idle);

        timeline.update(Some(10.0));
        assert_eq!(x(&target), 10.0);

        timeline.pause(None);
        timeline.start(Some(0.0));
        assert_eq!(timeline.state(), PlayState::Playing);
        assert_eq!(timeline.current_time(), 0.0);
    }

    #[test]
    fn test_finish_completes_every_entry() {
        let a = subject(Value::object());
        let b = subject(Value::object());
        let mut timeline = Timeline::new();
        timeline.add(scaled_ramp(&a, 10.0, 50.0, 0.25), AddOptions::default());
        timeline.add(ramp(&b, 20.0, 50.0), AddOptions::default());

        timeline.start(Some(0.0));
        timeline.update(Some(10.0));
        timeline.finish();

        assert_eq!(x(&a), 10.0);
        assert_eq!(x(&b), 20.0);
        assert_eq!(timeline.state(), PlayState::Completed);
        assert_eq!(timeline.current_time(), 100.0);
    }

    #[test]
    fn test_time_scale_must_be_finite() {
        assert!(matches!(
            Timeline::new().with_time_scale(f64::NAN),
            Err(AnimationError::InvalidTimeScale(_))
        ));

        let mut timeline = Timeline::new();
        assert!(timeline.set_time_scale(f64::INFINITY).is_err());
        assert_eq!(timeline.time_scale(), 1.0);
        assert!(timeline.set_time_scale(-0.5).is_ok());
    }
}
