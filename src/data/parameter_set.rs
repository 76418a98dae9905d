use crate::float_trait::Float;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Transient per-call bundle of differentiable map parameters
///
/// Only the components whose corresponding expansion degree is nonzero are bound into the
/// [`MapState`](crate::MapState) snapshot; supplying coefficients to a zero-degree map is a
/// no-op by convention, not an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct ParameterSet<T>
where
    T: Float,
{
    /// Limb-darkening coefficients, length equal to `udeg` (possibly zero)
    pub limb_darkening: Array1<T>,
    /// Spherical-harmonic filter coefficients, empty when `fdeg` is zero
    pub filter: Array2<T>,
    /// Inclination angle
    pub inclination: T,
    /// Obliquity angle
    pub obliquity: T,
}

impl<T> ParameterSet<T>
where
    T: Float,
{
    pub fn new(limb_darkening: Array1<T>, filter: Array2<T>, inclination: T, obliquity: T) -> Self {
        Self {
            limb_darkening,
            filter,
            inclination,
            obliquity,
        }
    }

    /// Parameter set with orientation angles only, for maps with `udeg == fdeg == 0`
    pub fn orientation_only(inclination: T, obliquity: T) -> Self {
        Self {
            limb_darkening: Array1::zeros(0),
            filter: Array2::zeros((0, 0)),
            inclination,
            obliquity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_only_has_empty_coefficients() {
        let params = ParameterSet::orientation_only(60.0_f64, 0.0);
        assert!(params.limb_darkening.is_empty());
        assert!(params.filter.is_empty());
        assert_eq!(params.inclination, 60.0);
        assert_eq!(params.obliquity, 0.0);
    }
}
