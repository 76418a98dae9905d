use crate::data::sample::Sample;
use crate::float_trait::Float;
use crate::types::CowArray1;

use serde::{Deserialize, Serialize};

/// Occultor trajectory and rotation phase for one evaluation
///
/// Each component is a [Sample]: a scalar or a sequence of length `T`, one entry per time
/// sample. All sequence components must have the same length; the flux model enforces this,
/// the adapters do not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct Geometry<T>
where
    T: Float,
{
    /// Rotation phase
    pub theta: Sample<T>,
    /// Occultor x position
    pub xo: Sample<T>,
    /// Occultor y position
    pub yo: Sample<T>,
    /// Occultor z position, non-differentiable
    pub zo: Sample<T>,
    /// Occultor radius
    pub ro: Sample<T>,
}

impl<T> Geometry<T>
where
    T: Float,
{
    pub fn new(
        theta: impl Into<Sample<T>>,
        xo: impl Into<Sample<T>>,
        yo: impl Into<Sample<T>>,
        zo: impl Into<Sample<T>>,
        ro: impl Into<Sample<T>>,
    ) -> Self {
        Self {
            theta: theta.into(),
            xo: xo.into(),
            yo: yo.into(),
            zo: zo.into(),
            ro: ro.into(),
        }
    }

    /// Number of time samples, anchored on the leading dimension of `theta`
    pub fn n_samples(&self) -> usize {
        self.theta.len()
    }

    /// Every component coerced to an at-least-1-D array, as the flux model contract requires
    pub fn to_arrays(&self) -> GeometryArrays<'_, T> {
        GeometryArrays {
            theta: self.theta.values(),
            xo: self.xo.values(),
            yo: self.yo.values(),
            zo: self.zo.values(),
            ro: self.ro.values(),
        }
    }
}

/// At-least-1-D view of a [Geometry], handed to [SurfaceMap](crate::SurfaceMap) evaluators
pub struct GeometryArrays<'a, T>
where
    T: Float,
{
    pub theta: CowArray1<'a, T>,
    pub xo: CowArray1<'a, T>,
    pub yo: CowArray1<'a, T>,
    pub zo: CowArray1<'a, T>,
    pub ro: CowArray1<'a, T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn n_samples_anchors_on_theta() {
        let geometry = Geometry::new(array![0.0_f64, 1.0, 2.0], 0.0, 0.0, 1.0, 0.1);
        assert_eq!(geometry.n_samples(), 3);

        let scalar_geometry = Geometry::<f64>::new(0.5, 0.0, 0.0, 1.0, 0.1);
        assert_eq!(scalar_geometry.n_samples(), 1);
    }

    #[test]
    fn to_arrays_coerces_scalars() {
        let geometry = Geometry::<f64>::new(0.5, array![0.0, 0.1], 0.0, 1.0, 0.1);
        let arrays = geometry.to_arrays();
        assert_eq!(arrays.theta.to_vec(), vec![0.5]);
        assert_eq!(arrays.xo.to_vec(), vec![0.0, 0.1]);
        assert_eq!(arrays.ro.to_vec(), vec![0.1]);
    }
}
