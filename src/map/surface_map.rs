use crate::data::GeometryArrays;
use crate::error::MapError;
use crate::float_trait::Float;
use crate::map::state::MapState;

use ndarray::{Array1, Array2, ArrayView2};

/// External flux model contract
///
/// Implementations own the actual spherical-harmonic machinery: basis rotation, occultation
/// solid-angle integrals and the adjoint derivation. The operator adapters never look inside;
/// they bind a [MapState] snapshot, coerce geometry to at-least-1-D arrays and pack the
/// results. Methods take `&mut self` so implementations may cache intermediate products
/// between the forward and the reverse pass.
///
/// All failure modes are defined here: coefficient-length mismatches, angles outside the
/// model domain and numerical domain errors are reported by the implementation and propagate
/// through the adapters unchanged.
pub trait SurfaceMap<T>
where
    T: Float,
{
    /// Limb-darkening expansion degree
    fn udeg(&self) -> usize;

    /// Filter expansion degree
    fn fdeg(&self) -> usize;

    /// Spherical-harmonic basis size `Ny`
    fn n_basis(&self) -> usize;

    /// Flux design matrix of shape `(n_samples, Ny)`
    fn design_matrix(
        &mut self,
        state: &MapState<T>,
        geometry: &GeometryArrays<'_, T>,
    ) -> Result<Array2<T>, MapError>;

    /// Adjoint of [SurfaceMap::design_matrix]
    ///
    /// Given a cotangent on the design matrix, returns the gradients with respect to every
    /// differentiable input. The occultor z position carries no gradient by model contract.
    fn adjoint(
        &mut self,
        state: &MapState<T>,
        geometry: &GeometryArrays<'_, T>,
        cotangent: ArrayView2<'_, T>,
    ) -> Result<AdjointGradients<T>, MapError>;
}

/// Raw adjoint output, in the model's fixed order
///
/// Geometry gradients are at-least-1-D arrays matching the coerced geometry the evaluator
/// received; the adapters repack them to the caller's original scalar/sequence forms.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjointGradients<T>
where
    T: Float,
{
    pub theta: Array1<T>,
    pub xo: Array1<T>,
    pub yo: Array1<T>,
    pub ro: Array1<T>,
    pub limb_darkening: Array1<T>,
    pub filter: Array2<T>,
    pub inclination: T,
    pub obliquity: T,
}
