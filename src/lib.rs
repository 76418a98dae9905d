#![doc = include_str!("../README.md")]

#[cfg(test)]
mod tests;

#[macro_use]
mod macros;

mod data;
pub use data::{Geometry, GeometryArrays, ParameterSet, Sample};

mod error;
pub use error::MapError;

mod float_trait;
pub use float_trait::Float;

mod map;
pub use map::{AdjointGradients, MapState, SurfaceMap};

mod ops;
pub use ops::{CotangentBundle, DiffOp, FluxDesignOp, FluxGradientOp, OpInfo, Operator};

pub mod prelude;

mod types;
pub use types::CowArray1;

mod value;
pub use value::{Value, ValueShape};

pub use ndarray;
