//! Property interpolation
//!
//! [`PropertyAnimator`] resolves the leaf paths of a tween's start and end
//! trees once, completes missing bounds from the live subject, and then
//! writes one interpolated frame per [`Animator::apply`] call.
//!
//! Scalar leaves always use linear interpolation. Sequence and buffer leaves
//! use the configured [`InterpolationFn`] when they have more than one
//! element, and linear interpolation otherwise.

use crate::animator::Animator;
use crate::error::{AnimationError, Result};
use crate::interpolation::{lerp, InterpolationFn};
use crate::path::{leaf_paths, PropertyPath};
use crate::value::Value;
use indexmap::IndexSet;
use std::cell::RefCell;
use std::rc::Rc;

/// A live value tree mutated by tweens and read by the host
pub type Subject = Rc<RefCell<Value>>;

/// Wrap a value tree as a [`Subject`]
pub fn subject(value: Value) -> Subject {
    Rc::new(RefCell::new(value))
}

/// Interpolates every resolved path of a subject between two value trees
pub struct PropertyAnimator {
    subject: Subject,
    start: Value,
    end: Value,
    /// Completed start values as declared; never mutated
    snapshot: Value,
    paths: Vec<PropertyPath>,
    interpolation: Option<InterpolationFn>,
}

impl PropertyAnimator {
    /// Resolve paths and complete both bounds.
    ///
    /// For every leaf path of `end` and `start`:
    /// - a missing start value comes from the subject, or else is a zero value
    ///   shaped like the end value
    /// - a missing end value comes from the subject; without one the path is
    ///   dropped
    /// - a subject lacking the property receives the start value
    ///
    /// The end tree decides each property's shape. A path that resolves to an
    /// object there, or that runs through one of its leaves, is dropped; start
    /// and subject values that are objects are ignored.
    pub fn new(
        subject: Subject,
        start: Option<Value>,
        end: Value,
        interpolation: Option<InterpolationFn>,
    ) -> Result<Self> {
        if end.is_leaf() {
            return Err(AnimationError::NotAnObject("end"));
        }
        let mut start = start.unwrap_or_else(Value::object);
        if start.is_leaf() {
            return Err(AnimationError::NotAnObject("start"));
        }
        let mut end = end;

        let mut discovered: IndexSet<PropertyPath> = leaf_paths(&end).into_iter().collect();
        discovered.extend(leaf_paths(&start));

        let mut paths = Vec::with_capacity(discovered.len());
        {
            let mut target = subject
                .try_borrow_mut()
                .map_err(|_| AnimationError::SubjectBorrowed)?;
            for path in discovered {
                if passes_through_leaf(&end, &path) {
                    tracing::trace!(%path, "end value is a leaf above this property, skipping");
                    continue;
                }
                let current = leaf_at(&target, &path).cloned();
                let Some(end_value) = end.get_path(&path).or(current.as_ref()).cloned() else {
                    tracing::trace!(%path, "no end value, skipping property");
                    continue;
                };
                if !end_value.is_leaf() {
                    tracing::trace!(%path, "end value is an object, skipping property");
                    continue;
                }
                let start_value = leaf_at(&start, &path)
                    .or(current.as_ref())
                    .cloned()
                    .unwrap_or_else(|| end_value.zeroed_like());

                if target.get_path(&path).is_none() {
                    target.set_path(&path, start_value.clone());
                }
                start.set_path(&path, start_value);
                end.set_path(&path, end_value);
                paths.push(path);
            }
        }

        Ok(Self {
            subject,
            snapshot: start.clone(),
            start,
            end,
            paths,
            interpolation,
        })
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Resolved leaf paths, in discovery order
    pub fn paths(&self) -> &[PropertyPath] {
        &self.paths
    }

    /// Start bound of the current cycle
    pub fn start_values(&self) -> &Value {
        &self.start
    }

    /// End bound of the current cycle
    pub fn end_values(&self) -> &Value {
        &self.end
    }

    /// Start values as completed at construction
    pub fn declared_start(&self) -> &Value {
        &self.snapshot
    }
}

impl Animator for PropertyAnimator {
    fn apply(&mut self, progress: f64) {
        let Ok(mut target) = self.subject.try_borrow_mut() else {
            tracing::warn!("subject is borrowed elsewhere, skipping frame");
            return;
        };
        let custom = self.interpolation.as_deref();
        for path in &self.paths {
            let (Some(start), Some(end)) = (self.start.get_path(path), self.end.get_path(path))
            else {
                tracing::trace!(%path, "unresolved property");
                continue;
            };
            if let Some(value) = interpolate(start, end, progress, custom) {
                target.set_path(path, value);
            }
        }
    }

    fn swap_bounds(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    fn restore_start(&mut self) {
        self.start = self.snapshot.clone();
        let Ok(mut target) = self.subject.try_borrow_mut() else {
            tracing::warn!("subject is borrowed elsewhere, start values not restored");
            return;
        };
        for path in &self.paths {
            if let Some(value) = self.start.get_path(path) {
                target.set_path(path, value.clone());
            }
        }
    }
}

/// Interpolate one leaf.
///
/// The result has the end leaf's shape: a scalar, a sequence, or a buffer
/// with the end buffer's element type. Missing start elements count as `0`.
/// Returns `None` when `end` is an object.
pub fn interpolate(
    start: &Value,
    end: &Value,
    progress: f64,
    custom: Option<&dyn Fn(&[f64], f64) -> f64>,
) -> Option<Value> {
    let value = match end {
        Value::Scalar(to) => Value::Scalar(lerp(start.as_scalar().unwrap_or(0.0), *to, progress)),
        Value::Sequence(to) => Value::Sequence(blend(start, to, progress, custom)),
        Value::Buffer(to) => Value::Buffer(to.rebuild(&blend(start, &to.to_vec(), progress, custom))),
        Value::Object(_) => return None,
    };
    Some(value)
}

/// Leaf node at `path`; objects do not count
fn leaf_at<'a>(tree: &'a Value, path: &PropertyPath) -> Option<&'a Value> {
    tree.get_path(path).filter(|node| node.is_leaf())
}

/// Whether walking `path` in `tree` meets a leaf before the last segment
fn passes_through_leaf(tree: &Value, path: &PropertyPath) -> bool {
    let mut node = tree;
    for segment in path.segments() {
        let Value::Object(fields) = node else {
            return true;
        };
        match fields.get(segment) {
            Some(child) => node = child,
            None => return false,
        }
    }
    false
}

fn blend(
    start: &Value,
    end: &[f64],
    progress: f64,
    custom: Option<&dyn Fn(&[f64], f64) -> f64>,
) -> Vec<f64> {
    let custom = custom.filter(|_| end.len() > 1);
    end.iter()
        .enumerate()
        .map(|(i, &to)| {
            let from = start.element(i).unwrap_or(0.0);
            match custom {
                Some(f) => f(&[from, to], progress),
                None => lerp(from, to, progress),
            }
        })
        .collect()
}
