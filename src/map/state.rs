use crate::data::ParameterSet;
use crate::float_trait::Float;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of map coefficients and orientation for one evaluation
///
/// Bound once per call from a [ParameterSet] and passed by reference into both the forward
/// and the adjoint evaluator, so the reverse pass always sees exactly the state the forward
/// pass used. Components are bound in a fixed order: limb darkening, then filter, then the
/// orientation angles. A component whose expansion degree is zero is skipped, never rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct MapState<T>
where
    T: Float,
{
    limb_darkening: Array1<T>,
    filter: Array2<T>,
    inclination: T,
    obliquity: T,
}

impl<T> MapState<T>
where
    T: Float,
{
    /// Bind a parameter set against the map degrees
    pub fn bind(udeg: usize, fdeg: usize, params: &ParameterSet<T>) -> Self {
        let limb_darkening = if udeg > 0 {
            params.limb_darkening.clone()
        } else {
            Array1::zeros(0)
        };
        let filter = if fdeg > 0 {
            params.filter.clone()
        } else {
            Array2::zeros((0, 0))
        };
        Self {
            limb_darkening,
            filter,
            inclination: params.inclination,
            obliquity: params.obliquity,
        }
    }

    pub fn limb_darkening(&self) -> &Array1<T> {
        &self.limb_darkening
    }

    pub fn filter(&self) -> &Array2<T> {
        &self.filter
    }

    pub fn inclination(&self) -> T {
        self.inclination
    }

    pub fn obliquity(&self) -> T {
        self.obliquity
    }
}
