use crate::data::{Geometry, ParameterSet, Sample};
use crate::error::MapError;
use crate::float_trait::Float;
use crate::map::SurfaceMap;
use crate::value::{Value, ValueShape};

use enum_dispatch::enum_dispatch;
use schemars::JsonSchema;
use serde::Serialize;
use std::fmt;

mod flux_design;
pub use flux_design::FluxDesignOp;

mod flux_gradient;
pub use flux_gradient::{CotangentBundle, FluxGradientOp};

/// Capabilities a host graph engine needs from an operator
///
/// Evaluation, shape inference and reverse-mode gradients, plus the forward-mode hook. All
/// of them work on packed [Value] slices in a fixed per-operator input order; for both
/// operators defined here that order starts with `(u, f, inc, obl, theta, xo, yo, zo, ro)`.
#[enum_dispatch]
pub trait DiffOp<T: Float> {
    /// Static registration metadata
    fn info(&self) -> &'static OpInfo;

    /// Evaluate packed inputs into packed outputs
    fn compute(&self, inputs: &[Value<T>]) -> Result<Vec<Value<T>>, MapError>;

    /// Output shapes from input shapes, without evaluating anything
    fn infer_output_shapes(
        &self,
        input_shapes: &[ValueShape],
    ) -> Result<Vec<ValueShape>, MapError>;

    /// Reverse-mode hook: cotangents on the outputs to cotangents on the inputs
    fn gradient(
        &self,
        inputs: &[Value<T>],
        cotangents: &[Value<T>],
    ) -> Result<Vec<Value<T>>, MapError>;

    /// Forward-mode hook (R-op)
    ///
    /// Structurally reuses the reverse-mode path with tangents in place of cotangents. An
    /// undefined leading tangent is propagated unchanged without touching the evaluators.
    fn push_forward(
        &self,
        inputs: &[Value<T>],
        tangents: &[Option<Value<T>>],
    ) -> Result<Vec<Option<Value<T>>>, MapError> {
        match tangents.first() {
            None | Some(None) => Ok(tangents.to_vec()),
            Some(Some(_)) => {
                let cotangents: Vec<_> = tangents.iter().flatten().cloned().collect();
                Ok(self
                    .gradient(inputs, &cotangents)?
                    .into_iter()
                    .map(Some)
                    .collect())
            }
        }
    }
}

/// Every operator is a variant of this enum
///
/// Consider to import [crate::DiffOp] as well
#[enum_dispatch(DiffOp<T>)]
pub enum Operator<T: Float, M: SurfaceMap<T>> {
    FluxDesign(FluxDesignOp<T, M>),
    FluxGradient(FluxGradientOp<T, M>),
}

impl<T, M> Clone for Operator<T, M>
where
    T: Float,
    M: SurfaceMap<T>,
{
    fn clone(&self) -> Self {
        match self {
            Self::FluxDesign(op) => Self::FluxDesign(op.clone()),
            Self::FluxGradient(op) => Self::FluxGradient(op.clone()),
        }
    }
}

impl<T, M> fmt::Debug for Operator<T, M>
where
    T: Float,
    M: SurfaceMap<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FluxDesign(op) => fmt::Debug::fmt(op, f),
            Self::FluxGradient(op) => fmt::Debug::fmt(op, f),
        }
    }
}

/// Static operator metadata for host-graph registration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, JsonSchema)]
pub struct OpInfo {
    pub name: &'static str,
    pub n_inputs: usize,
    pub n_outputs: usize,
    pub differentiable: bool,
}

pub(crate) fn check_arity(actual: usize, expected: usize) -> Result<(), MapError> {
    if actual == expected {
        Ok(())
    } else {
        Err(MapError::InputArity { expected, actual })
    }
}

/// Unpack the nine leading values shared by both operators, in the fixed input order
pub(crate) fn unpack_inputs<T>(
    inputs: &[Value<T>],
) -> Result<(ParameterSet<T>, Geometry<T>), MapError>
where
    T: Float,
{
    let params = ParameterSet::new(
        inputs[0].vector("u")?.clone(),
        inputs[1].matrix("f")?.clone(),
        inputs[2].scalar("inc")?,
        inputs[3].scalar("obl")?,
    );
    let geometry = Geometry::new(
        Sample::from_value(&inputs[4], "theta")?,
        Sample::from_value(&inputs[5], "xo")?,
        Sample::from_value(&inputs[6], "yo")?,
        Sample::from_value(&inputs[7], "zo")?,
        Sample::from_value(&inputs[8], "ro")?,
    );
    Ok((params, geometry))
}
