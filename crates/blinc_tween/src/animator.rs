//! Per-frame value writers driven by a [`crate::Tween`]

/// Writes one frame of an animation for a given progress.
///
/// The tween calls [`Animator::swap_bounds`] at the end of a yoyo cycle and
/// [`Animator::restore_start`] at the end of a plain repeat cycle.
pub trait Animator {
    /// Write the frame for `progress` in `[0, 1]`
    fn apply(&mut self, progress: f64);

    /// Exchange start and end so the next cycle runs backwards
    fn swap_bounds(&mut self);

    /// Reset the animated state to the declared start values
    fn restore_start(&mut self) {}
}

/// Animator backed by a closure receiving the effective progress.
///
/// Swapping bounds mirrors the progress handed to the closure.
pub struct FnAnimator<F> {
    apply: F,
    reversed: bool,
}

impl<F: FnMut(f64)> FnAnimator<F> {
    pub fn new(apply: F) -> Self {
        Self {
            apply,
            reversed: false,
        }
    }
}

impl<F: FnMut(f64)> Animator for FnAnimator<F> {
    fn apply(&mut self, progress: f64) {
        let progress = if self.reversed { 1.0 - progress } else { progress };
        (self.apply)(progress);
    }

    fn swap_bounds(&mut self) {
        self.reversed = !self.reversed;
    }
}
