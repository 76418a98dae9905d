/// Error returned from [crate::DiffOp] operators and [crate::SurfaceMap] evaluators
///
/// The adapter layer itself produces only the packing variants
/// ([`MapError::InputArity`], [`MapError::ValueKind`], [`MapError::Unsupported`]); everything
/// else originates inside a [crate::SurfaceMap] implementation and propagates unchanged.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapError {
    #[error("operator takes {expected} packed inputs, {actual} were given")]
    InputArity { expected: usize, actual: usize },

    #[error("packed input '{name}' must be a {expected}")]
    ValueKind {
        name: &'static str,
        expected: &'static str,
    },

    #[error("{0} is not supported by this operator")]
    Unsupported(&'static str),

    #[error("coefficient vector length {actual} does not match expansion degree {degree}")]
    CoefficientLength { degree: usize, actual: usize },

    #[error("angle '{name}' is outside the model domain")]
    InvalidAngle { name: &'static str },

    #[error("flux model evaluation failed: {0}")]
    Model(String),
}
