//! Convenience re-export of the whole public API

pub use crate::{
    AdjointGradients, CotangentBundle, CowArray1, DiffOp, Float, FluxDesignOp, FluxGradientOp,
    Geometry, GeometryArrays, MapError, MapState, OpInfo, Operator, ParameterSet, Sample,
    SurfaceMap, Value, ValueShape,
};
