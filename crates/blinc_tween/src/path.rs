//! Property paths
//!
//! Flattens a value tree into dotted paths (`"transform.position.x"`) whose
//! targets are leaves, and reads/writes nodes by path.

use crate::value::Value;
use smallvec::SmallVec;
use std::fmt;

/// A dotted path into a value tree. The empty path addresses the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: SmallVec<[String; 4]>,
}

impl PropertyPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted path. Empty segments are ignored.
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// A copy of this path extended by one segment
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_owned());
        Self { segments }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for PropertyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Visit every leaf of `value` in field order.
///
/// Objects are traversed; scalars, sequences and buffers are reported as
/// leaves. A leaf root is reported under the root path.
pub fn visit_leaves<F>(value: &Value, mut visit: F)
where
    F: FnMut(&PropertyPath, &Value),
{
    fn walk<F: FnMut(&PropertyPath, &Value)>(path: &PropertyPath, value: &Value, visit: &mut F) {
        match value {
            Value::Object(fields) => {
                for (name, child) in fields {
                    walk(&path.child(name), child, visit);
                }
            }
            leaf => visit(path, leaf),
        }
    }

    walk(&PropertyPath::root(), value, &mut visit);
}

/// Paths of every leaf in `value`
pub fn leaf_paths(value: &Value) -> Vec<PropertyPath> {
    let mut paths = Vec::new();
    visit_leaves(value, |path, _| paths.push(path.clone()));
    paths
}

impl Value {
    /// Node at `path`, if every segment resolves
    pub fn get_path(&self, path: &PropertyPath) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.as_object()?.get(segment))
    }

    /// Write `value` at `path`, creating missing intermediate objects.
    ///
    /// An intermediate node that is a leaf is replaced by an object.
    pub fn set_path(&mut self, path: &PropertyPath, value: Value) {
        let mut node = self;
        for segment in path.segments() {
            if node.is_leaf() {
                *node = Value::object();
            }
            let Value::Object(fields) = node else {
                unreachable!("leaf nodes were replaced by objects above");
            };
            node = fields.entry(segment.clone()).or_insert_with(Value::object);
        }
        *node = value;
    }

    /// [`Value::get_path`] with a dotted string
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.get_path(&PropertyPath::parse(path))
    }

    /// [`Value::set_path`] with a dotted string
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        self.set_path(&PropertyPath::parse(path), value.into());
    }

    /// Scalar at a dotted path
    pub fn scalar(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(Value::as_scalar)
    }
}
