//! Value trees
//!
//! Animated state is described by a closed set of node kinds:
//!
//! - [`Value::Scalar`]: a single number
//! - [`Value::Sequence`]: a numeric list, interpolated elementwise
//! - [`Value::Buffer`]: a fixed-width numeric buffer, interpolated elementwise
//!   and rebuilt with the same element type
//! - [`Value::Object`]: named fields, traversed by the path resolver
//!
//! Sequences and buffers are atomic leaves: the resolver never descends into
//! them. Vector-like records (`{x, y}`, `{x, y, z}`, ...) are plain objects.
//!
//! `Clone` is a deep, value-only copy. Tweens use it to snapshot their start
//! values; a clone carries no identity of the tree it came from.

use indexmap::IndexMap;

macro_rules! numeric_buffer {
    ($($variant:ident($elem:ty)),+ $(,)?) => {
        /// A fixed-width numeric buffer
        #[derive(Clone, Debug, PartialEq)]
        pub enum NumericBuffer {
            $($variant(Vec<$elem>),)+
        }

        impl NumericBuffer {
            pub fn len(&self) -> usize {
                match self {
                    $(NumericBuffer::$variant(items) => items.len(),)+
                }
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Element `index` widened to `f64`
            pub fn get(&self, index: usize) -> Option<f64> {
                match self {
                    $(NumericBuffer::$variant(items) => items.get(index).map(|v| *v as f64),)+
                }
            }

            /// Build a buffer with the same element type as `self` from `values`.
            ///
            /// Values are narrowed with `as`, so integer buffers truncate toward
            /// zero and saturate at the type bounds.
            pub fn rebuild(&self, values: &[f64]) -> NumericBuffer {
                match self {
                    $(NumericBuffer::$variant(_) => {
                        NumericBuffer::$variant(values.iter().map(|v| *v as $elem).collect())
                    })+
                }
            }

            /// Short element type name, e.g. `"f32"`
            pub fn element_type(&self) -> &'static str {
                match self {
                    $(NumericBuffer::$variant(_) => stringify!($elem),)+
                }
            }
        }

        $(
            impl From<Vec<$elem>> for NumericBuffer {
                fn from(items: Vec<$elem>) -> Self {
                    NumericBuffer::$variant(items)
                }
            }
        )+
    };
}

numeric_buffer! {
    F32(f32),
    F64(f64),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
}

impl NumericBuffer {
    /// A zero-filled buffer with the same element type and length
    pub fn zeroed_like(&self) -> NumericBuffer {
        self.rebuild(&vec![0.0; self.len()])
    }

    pub fn to_vec(&self) -> Vec<f64> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }
}

/// A node in a value tree
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Scalar(f64),
    Sequence(Vec<f64>),
    Buffer(NumericBuffer),
    Object(IndexMap<String, Value>),
}

impl Value {
    /// An empty object
    pub fn object() -> Self {
        Value::Object(IndexMap::new())
    }

    /// An object built from `(name, value)` pairs, in order
    pub fn record<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// `{x, y}` record
    pub fn vec2(x: f64, y: f64) -> Self {
        Self::record([("x", x), ("y", y)])
    }

    /// `{x, y, z}` record
    pub fn vec3(x: f64, y: f64, z: f64) -> Self {
        Self::record([("x", x), ("y", y), ("z", z)])
    }

    /// `{x, y, z, w}` record
    pub fn vec4(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::record([("x", x), ("y", y), ("z", z), ("w", w)])
    }

    /// Whether the path resolver treats this node as a leaf
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Value::Object(_))
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut IndexMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Element `index` of a sequence or buffer
    pub fn element(&self, index: usize) -> Option<f64> {
        match self {
            Value::Sequence(items) => items.get(index).copied(),
            Value::Buffer(buffer) => buffer.get(index),
            _ => None,
        }
    }

    /// Zero value with the same shape: `0` for scalars, a zero-filled
    /// sequence or buffer of the same length and element type, and an empty
    /// object for objects.
    pub fn zeroed_like(&self) -> Value {
        match self {
            Value::Scalar(_) => Value::Scalar(0.0),
            Value::Sequence(items) => Value::Sequence(vec![0.0; items.len()]),
            Value::Buffer(buffer) => Value::Buffer(buffer.zeroed_like()),
            Value::Object(_) => Value::object(),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::object()
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Scalar(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Scalar(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Scalar(v as f64)
    }
}

impl From<Vec<f64>> for Value {
    fn from(items: Vec<f64>) -> Self {
        Value::Sequence(items)
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(items: [f64; N]) -> Self {
        Value::Sequence(items.to_vec())
    }
}

impl From<NumericBuffer> for Value {
    fn from(buffer: NumericBuffer) -> Self {
        Value::Buffer(buffer)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(fields: IndexMap<String, Value>) -> Self {
        Value::Object(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_rebuild_keeps_element_type() {
        let buffer = NumericBuffer::from(vec![1.0f32, 2.0, 3.0, 4.0]);
        let rebuilt = buffer.rebuild(&[0.5, 1.5, 2.5, 3.5]);

        assert_eq!(rebuilt, NumericBuffer::F32(vec![0.5, 1.5, 2.5, 3.5]));
        assert_eq!(rebuilt.element_type(), "f32");
    }

    #[test]
    fn test_integer_buffer_narrowing() {
        let buffer = NumericBuffer::from(vec![0u8; 3]);
        let rebuilt = buffer.rebuild(&[1.9, -4.0, 300.0]);
        assert_eq!(rebuilt, NumericBuffer::U8(vec![1, 0, 255]));
    }

    #[test]
    fn test_zeroed_like() {
        assert_eq!(Value::Scalar(7.0).zeroed_like(), Value::Scalar(0.0));
        assert_eq!(
            Value::from([1.0, 2.0]).zeroed_like(),
            Value::Sequence(vec![0.0, 0.0])
        );
        assert_eq!(
            Value::from(NumericBuffer::from(vec![3i16, 4])).zeroed_like(),
            Value::Buffer(NumericBuffer::I16(vec![0, 0]))
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Value::record([("pos", Value::vec2(1.0, 2.0))]);
        let mut copy = original.clone();

        if let Some(Value::Object(pos)) = copy.as_object_mut().and_then(|o| o.get_mut("pos")) {
            pos.insert("x".into(), Value::Scalar(99.0));
        }

        assert_ne!(original, copy);
        assert_eq!(original, Value::record([("pos", Value::vec2(1.0, 2.0))]));
    }

    #[test]
    fn test_vector_records_are_objects() {
        let v = Value::vec3(1.0, 2.0, 3.0);
        assert!(!v.is_leaf());
        assert_eq!(v.as_object().map(|o| o.len()), Some(3));
        assert!(Value::from(vec![1.0]).is_leaf());
    }
}
