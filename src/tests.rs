pub use crate::data::{Geometry, ParameterSet, Sample};
pub use crate::error::MapError;
pub use crate::float_trait::Float;
pub use crate::map::{AdjointGradients, MapState, SurfaceMap};
pub use crate::value::Value;

pub use ndarray::{Array1, Array2, ArrayView2, array};
pub use std::cell::RefCell;
pub use std::rc::Rc;

use crate::data::GeometryArrays;

use itertools::izip;

pub fn all_close(desired: &[f64], actual: &[f64], tol: f64) {
    assert_eq!(desired.len(), actual.len());
    for (&d, &a) in desired.iter().zip(actual) {
        approx::assert_abs_diff_eq!(d, a, epsilon = tol);
    }
}

/// The occultation scenario used across operator tests: two time samples
pub fn occultation_geometry() -> Geometry<f64> {
    Geometry::new(
        array![0.0, 1.0],
        array![0.0, 0.1],
        array![0.0, 0.0],
        array![1.0, 1.0],
        array![0.1, 0.1],
    )
}

/// The nine packed forward inputs, in the fixed order
#[allow(clippy::too_many_arguments)]
pub fn packed_inputs(
    u: Array1<f64>,
    f: Array2<f64>,
    inc: f64,
    obl: f64,
    theta: Array1<f64>,
    xo: Array1<f64>,
    yo: Array1<f64>,
    zo: Array1<f64>,
    ro: Array1<f64>,
) -> Vec<Value<f64>> {
    vec![
        Value::Vector(u),
        Value::Matrix(f),
        Value::Scalar(inc),
        Value::Scalar(obl),
        Value::Vector(theta),
        Value::Vector(xo),
        Value::Vector(yo),
        Value::Vector(zo),
        Value::Vector(ro),
    ]
}

/// Instrumented map recording every state snapshot it is handed
///
/// Outputs are all-zero, only shapes matter to the tests using it.
pub struct RecordingMap {
    udeg: usize,
    fdeg: usize,
    ny: usize,
    pub forward_calls: usize,
    pub adjoint_calls: usize,
    pub forward_states: Vec<MapState<f64>>,
    pub adjoint_states: Vec<MapState<f64>>,
    pub forward_theta_lens: Vec<usize>,
}

impl RecordingMap {
    pub fn new(udeg: usize, fdeg: usize, ny: usize) -> Self {
        Self {
            udeg,
            fdeg,
            ny,
            forward_calls: 0,
            adjoint_calls: 0,
            forward_states: vec![],
            adjoint_states: vec![],
            forward_theta_lens: vec![],
        }
    }
}

impl SurfaceMap<f64> for RecordingMap {
    fn udeg(&self) -> usize {
        self.udeg
    }

    fn fdeg(&self) -> usize {
        self.fdeg
    }

    fn n_basis(&self) -> usize {
        self.ny
    }

    fn design_matrix(
        &mut self,
        state: &MapState<f64>,
        geometry: &GeometryArrays<'_, f64>,
    ) -> Result<Array2<f64>, MapError> {
        self.forward_calls += 1;
        self.forward_states.push(state.clone());
        self.forward_theta_lens.push(geometry.theta.len());
        Ok(Array2::zeros((geometry.theta.len(), self.ny)))
    }

    fn adjoint(
        &mut self,
        state: &MapState<f64>,
        geometry: &GeometryArrays<'_, f64>,
        cotangent: ArrayView2<'_, f64>,
    ) -> Result<AdjointGradients<f64>, MapError> {
        self.adjoint_calls += 1;
        self.adjoint_states.push(state.clone());
        let t = geometry.theta.len();
        Ok(AdjointGradients {
            theta: Array1::zeros(t),
            xo: Array1::zeros(t),
            yo: Array1::zeros(t),
            ro: Array1::zeros(t),
            limb_darkening: Array1::zeros(state.limb_darkening().len()),
            filter: Array2::zeros(state.filter().raw_dim()),
            inclination: cotangent.sum(),
            obliquity: 0.0,
        })
    }
}

/// Analytic toy map with a hand-derived adjoint
///
/// X[i, n] = cos(a_n theta_i + inc) + obl sin(a_n) + xo_i yo_i / a_n + ro_i (sum u + sum f),
/// a_n = n + 1. Flux is constant in zo, like the real model.
pub struct CosineMap {
    udeg: usize,
    fdeg: usize,
    ny: usize,
}

impl CosineMap {
    pub fn new(udeg: usize, fdeg: usize, ny: usize) -> Self {
        Self { udeg, fdeg, ny }
    }
}

impl SurfaceMap<f64> for CosineMap {
    fn udeg(&self) -> usize {
        self.udeg
    }

    fn fdeg(&self) -> usize {
        self.fdeg
    }

    fn n_basis(&self) -> usize {
        self.ny
    }

    fn design_matrix(
        &mut self,
        state: &MapState<f64>,
        geometry: &GeometryArrays<'_, f64>,
    ) -> Result<Array2<f64>, MapError> {
        let coeff_sum = state.limb_darkening().sum() + state.filter().sum();
        let inc = state.inclination();
        let obl = state.obliquity();
        let mut x = Array2::zeros((geometry.theta.len(), self.ny));
        for (i, (&th, &xo, &yo, &ro)) in izip!(
            geometry.theta.iter(),
            geometry.xo.iter(),
            geometry.yo.iter(),
            geometry.ro.iter()
        )
        .enumerate()
        {
            for n in 0..self.ny {
                let a = f64::approx_usize(n + 1);
                x[[i, n]] = (a * th + inc).cos() + obl * a.sin() + xo * yo / a + ro * coeff_sum;
            }
        }
        Ok(x)
    }

    fn adjoint(
        &mut self,
        state: &MapState<f64>,
        geometry: &GeometryArrays<'_, f64>,
        cotangent: ArrayView2<'_, f64>,
    ) -> Result<AdjointGradients<f64>, MapError> {
        let coeff_sum = state.limb_darkening().sum() + state.filter().sum();
        let inc = state.inclination();
        let t = geometry.theta.len();

        let mut theta = Array1::zeros(t);
        let mut xo = Array1::zeros(t);
        let mut yo = Array1::zeros(t);
        let mut ro = Array1::zeros(t);
        let mut inclination = 0.0;
        let mut obliquity = 0.0;
        // d(loss)/d(coeff) is the same for every coefficient entering through the sum
        let mut coeff_grad = 0.0;

        for (i, (&th_i, &xo_i, &yo_i, &ro_i)) in izip!(
            geometry.theta.iter(),
            geometry.xo.iter(),
            geometry.yo.iter(),
            geometry.ro.iter()
        )
        .enumerate()
        {
            let row_sum = cotangent.row(i).sum();
            for n in 0..self.ny {
                let a = f64::approx_usize(n + 1);
                let b = cotangent[[i, n]];
                theta[i] -= a * (a * th_i + inc).sin() * b;
                inclination -= (a * th_i + inc).sin() * b;
                obliquity += a.sin() * b;
                xo[i] += yo_i / a * b;
                yo[i] += xo_i / a * b;
            }
            ro[i] = coeff_sum * row_sum;
            coeff_grad += ro_i * row_sum;
        }

        Ok(AdjointGradients {
            theta,
            xo,
            yo,
            ro,
            limb_darkening: Array1::from_elem(state.limb_darkening().len(), coeff_grad),
            filter: Array2::from_elem(state.filter().raw_dim(), coeff_grad),
            inclination,
            obliquity,
        })
    }
}
