use crate::error::MapError;
use crate::float_trait::Float;
use crate::types::CowArray1;
use crate::value::{Value, ValueShape};

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// A [`Geometry`](crate::Geometry) component: a single value or a time-ordered sequence
///
/// Occultor trajectories and rotation phases are supplied either as scalars (one evaluation)
/// or as equal-length sequences (one evaluation per time sample). `Sample` keeps track of
/// which form the caller used so that gradients can be repacked to exactly the same form:
/// scalars in, scalars out; sequences in, same-length sequences out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub enum Sample<T>
where
    T: Float,
{
    Scalar(T),
    Series(Array1<T>),
}

impl<T> Sample<T>
where
    T: Float,
{
    /// Leading length after at-least-1-D coercion
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Series(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// At-least-1-D view: scalars become length-one arrays, sequences are borrowed as-is
    pub fn values(&self) -> CowArray1<'_, T> {
        match self {
            Self::Scalar(x) => Array1::from_elem(1, *x).into(),
            Self::Series(a) => a.view().into(),
        }
    }

    /// Repack a raw gradient array into the shape of `self`
    ///
    /// A scalar sample takes the single element back out of the length-one array the
    /// evaluator returned for it.
    pub fn repack(&self, raw: Array1<T>) -> Self {
        match self {
            Self::Scalar(_) => Self::Scalar(raw[0]),
            Self::Series(_) => Self::Series(raw),
        }
    }

    /// All-zero sample of the same shape
    pub fn zeros_like(&self) -> Self {
        match self {
            Self::Scalar(_) => Self::Scalar(T::zero()),
            Self::Series(a) => Self::Series(Array1::zeros(a.len())),
        }
    }

    pub fn shape(&self) -> ValueShape {
        match self {
            Self::Scalar(_) => ValueShape::Scalar,
            Self::Series(a) => ValueShape::Vector(a.len()),
        }
    }

    pub(crate) fn from_value(value: &Value<T>, name: &'static str) -> Result<Self, MapError> {
        match value {
            Value::Scalar(x) => Ok(Self::Scalar(*x)),
            Value::Vector(a) => Ok(Self::Series(a.clone())),
            Value::Matrix(_) => Err(MapError::ValueKind {
                name,
                expected: "scalar or vector",
            }),
        }
    }
}

impl<T: Float> From<T> for Sample<T> {
    fn from(x: T) -> Self {
        Self::Scalar(x)
    }
}

impl<T: Float> From<Array1<T>> for Sample<T> {
    fn from(a: Array1<T>) -> Self {
        Self::Series(a)
    }
}

impl<T: Float> From<Vec<T>> for Sample<T> {
    fn from(v: Vec<T>) -> Self {
        Self::Series(v.into())
    }
}

impl<T: Float> From<&[T]> for Sample<T> {
    fn from(s: &[T]) -> Self {
        Self::Series(s.to_owned().into())
    }
}

impl<T: Float> From<Sample<T>> for Value<T> {
    fn from(sample: Sample<T>) -> Self {
        match sample {
            Sample::Scalar(x) => Value::Scalar(x),
            Sample::Series(a) => Value::Vector(a),
        }
    }
}
