use crate::error::MapError;
use crate::float_trait::Float;

use ndarray::{Array1, Array2};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Packed value exchanged with a host graph engine
///
/// Operators receive their inputs and return their outputs as flat slices of these, in a
/// fixed per-operator order, so a host framework only has to know how to box scalars and
/// one- or two-dimensional arrays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub enum Value<T>
where
    T: Float,
{
    Scalar(T),
    Vector(Array1<T>),
    Matrix(Array2<T>),
}

impl<T> Value<T>
where
    T: Float,
{
    pub fn shape(&self) -> ValueShape {
        match self {
            Self::Scalar(_) => ValueShape::Scalar,
            Self::Vector(a) => ValueShape::Vector(a.len()),
            Self::Matrix(a) => ValueShape::Matrix(a.nrows(), a.ncols()),
        }
    }

    pub(crate) fn scalar(&self, name: &'static str) -> Result<T, MapError> {
        match self {
            Self::Scalar(x) => Ok(*x),
            _ => Err(MapError::ValueKind {
                name,
                expected: "scalar",
            }),
        }
    }

    pub(crate) fn vector(&self, name: &'static str) -> Result<&Array1<T>, MapError> {
        match self {
            Self::Vector(a) => Ok(a),
            _ => Err(MapError::ValueKind {
                name,
                expected: "vector",
            }),
        }
    }

    pub(crate) fn matrix(&self, name: &'static str) -> Result<&Array2<T>, MapError> {
        match self {
            Self::Matrix(a) => Ok(a),
            _ => Err(MapError::ValueKind {
                name,
                expected: "matrix",
            }),
        }
    }
}

impl<T: Float> From<T> for Value<T> {
    fn from(x: T) -> Self {
        Self::Scalar(x)
    }
}

impl<T: Float> From<Array1<T>> for Value<T> {
    fn from(a: Array1<T>) -> Self {
        Self::Vector(a)
    }
}

impl<T: Float> From<Array2<T>> for Value<T> {
    fn from(a: Array2<T>) -> Self {
        Self::Matrix(a)
    }
}

/// Shape of a packed [Value], known without evaluating anything
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ValueShape {
    Scalar,
    Vector(usize),
    Matrix(usize, usize),
}

impl ValueShape {
    /// Leading dimension after at-least-1-D coercion
    pub fn leading_dim(&self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vector(n) => *n,
            Self::Matrix(n, _) => *n,
        }
    }
}
