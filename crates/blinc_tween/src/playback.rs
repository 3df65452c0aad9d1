//! Playback lifecycle shared by tweens and timelines

/// Playback state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayState {
    #[default]
    Idle,
    Playing,
    Paused,
    /// Finished every cycle. Terminal until started again.
    Completed,
}

/// Anything a [`crate::Timeline`] or [`crate::AnimationGroup`] can drive.
///
/// Lifecycle calls made in the wrong state are no-ops. `time` arguments are
/// absolute times in milliseconds on the animation's own clock; `None` reads
/// the animation's wall clock.
pub trait Playable {
    /// Length of one cycle in milliseconds
    fn duration(&self) -> f64;

    /// Number of extra cycles after the first
    fn repeat_count(&self) -> u32 {
        0
    }

    /// Length of every cycle together
    fn total_duration(&self) -> f64 {
        self.duration() * (self.repeat_count() as f64 + 1.0)
    }

    fn state(&self) -> PlayState;

    fn is_playing(&self) -> bool {
        self.state() == PlayState::Playing
    }

    fn start(&mut self, time: Option<f64>);

    fn stop(&mut self);

    fn pause(&mut self, time: Option<f64>);

    fn resume(&mut self, time: Option<f64>);

    /// Advance to `time`. Returns whether the animation is still playing.
    fn update(&mut self, time: Option<f64>) -> bool;

    /// Run every remaining cycle to its end and complete, whatever the time
    /// scale. No-op unless playing or paused.
    fn finish(&mut self);
}
