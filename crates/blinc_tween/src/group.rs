//! Animation group
//!
//! Holds independent animations and updates them together each frame.

use crate::playback::Playable;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct AnimationId;
}

/// A set of animations ticked together
#[derive(Default)]
pub struct AnimationGroup {
    animations: SlotMap<AnimationId, Box<dyn Playable>>,
}

impl AnimationGroup {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
        }
    }

    pub fn add<P>(&mut self, animation: P) -> AnimationId
    where
        P: Playable + 'static,
    {
        self.animations.insert(Box::new(animation))
    }

    pub fn remove(&mut self, id: AnimationId) -> Option<Box<dyn Playable>> {
        self.animations.remove(id)
    }

    pub fn get(&self, id: AnimationId) -> Option<&dyn Playable> {
        self.animations.get(id).map(|a| &**a)
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut (dyn Playable + 'static)> {
        self.animations.get_mut(id).map(|a| &mut **a)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Update every animation.
    ///
    /// Animations that are not playing after the update are removed unless
    /// `preserve` is set. Returns whether any animation is still playing.
    pub fn update(&mut self, time: Option<f64>, preserve: bool) -> bool {
        for (_, animation) in self.animations.iter_mut() {
            animation.update(time);
        }

        if !preserve {
            let before = self.animations.len();
            self.animations.retain(|_, animation| animation.is_playing());
            let removed = before - self.animations.len();
            if removed > 0 {
                tracing::trace!(removed, remaining = self.animations.len(), "finished animations removed");
            }
        }

        self.has_active_animations()
    }

    /// Check if any animations are still playing
    pub fn has_active_animations(&self) -> bool {
        self.animations.values().any(|a| a.is_playing())
    }

    pub fn stop_all(&mut self) {
        for animation in self.animations.values_mut() {
            animation.stop();
        }
    }

    pub fn pause_all(&mut self, time: Option<f64>) {
        for animation in self.animations.values_mut() {
            animation.pause(time);
        }
    }

    pub fn resume_all(&mut self, time: Option<f64>) {
        for animation in self.animations.values_mut() {
            animation.resume(time);
        }
    }

    /// Iterate over all animations
    pub fn iter(&self) -> impl Iterator<Item = (AnimationId, &dyn Playable)> {
        self.animations.iter().map(|(id, a)| (id, &**a))
    }
}
