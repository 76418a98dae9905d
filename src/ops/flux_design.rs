use crate::data::{Geometry, ParameterSet};
use crate::error::MapError;
use crate::float_trait::Float;
use crate::map::{MapState, SurfaceMap};
use crate::ops::flux_gradient::FluxGradientOp;
use crate::ops::{DiffOp, OpInfo, check_arity, unpack_inputs};
use crate::value::{Value, ValueShape};

use macro_const::macro_const;
use ndarray::Array2;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

macro_const! {
    const DOC: &str = r"
Forward flux-design-matrix operator

Binds map parameters and an occultor trajectory into one evaluation of the surface map's
flux design matrix $X$: the $(T, N_y)$ matrix mapping spherical-harmonic coefficients to
observed flux at each time sample.

- Packed inputs, in order: limb-darkening coefficients $u$, filter coefficients $f$,
  inclination, obliquity, rotation phase $\theta$, occultor $x_o$, $y_o$, $z_o$, $r_o$
- Packed output: the design matrix, shape (len($\theta$), $N_y$)

The operator holds a shared handle to the flux model and eagerly constructs one
[FluxGradientOp] over a clone of that handle; the same gradient operator instance serves
every reverse-mode call.
";
}

op_info!(
    FLUX_DESIGN_INFO,
    name: "flux_design_matrix",
    n_inputs: 9,
    n_outputs: 1,
    differentiable: true,
);

#[doc = DOC!()]
pub struct FluxDesignOp<T, M>
where
    T: Float,
    M: SurfaceMap<T>,
{
    map: Rc<RefCell<M>>,
    gradient_op: FluxGradientOp<T, M>,
}

impl<T, M> FluxDesignOp<T, M>
where
    T: Float,
    M: SurfaceMap<T>,
{
    pub fn new(map: Rc<RefCell<M>>) -> Self {
        let gradient_op = FluxGradientOp::new(Rc::clone(&map));
        Self { map, gradient_op }
    }

    /// The gradient operator built at construction time
    pub fn gradient_op(&self) -> &FluxGradientOp<T, M> {
        &self.gradient_op
    }

    /// Evaluate the design matrix for a parameter set and a trajectory
    pub fn evaluate(
        &self,
        params: &ParameterSet<T>,
        geometry: &Geometry<T>,
    ) -> Result<Array2<T>, MapError> {
        let state = {
            let map = self.map.borrow();
            MapState::bind(map.udeg(), map.fdeg(), params)
        };
        let arrays = geometry.to_arrays();
        self.map.borrow_mut().design_matrix(&state, &arrays)
    }

    /// Output shape without evaluating: `(n_samples, Ny)`
    pub fn output_shape(&self, geometry: &Geometry<T>) -> ValueShape {
        ValueShape::Matrix(geometry.n_samples(), self.map.borrow().n_basis())
    }
}

impl<T, M> DiffOp<T> for FluxDesignOp<T, M>
where
    T: Float,
    M: SurfaceMap<T>,
{
    fn info(&self) -> &'static OpInfo {
        &FLUX_DESIGN_INFO
    }

    fn compute(&self, inputs: &[Value<T>]) -> Result<Vec<Value<T>>, MapError> {
        check_arity(inputs.len(), self.info().n_inputs)?;
        let (params, geometry) = unpack_inputs(inputs)?;
        Ok(vec![Value::Matrix(self.evaluate(&params, &geometry)?)])
    }

    fn infer_output_shapes(
        &self,
        input_shapes: &[ValueShape],
    ) -> Result<Vec<ValueShape>, MapError> {
        check_arity(input_shapes.len(), self.info().n_inputs)?;
        // theta is the fifth packed input and anchors the time dimension
        Ok(vec![ValueShape::Matrix(
            input_shapes[4].leading_dim(),
            self.map.borrow().n_basis(),
        )])
    }

    fn gradient(
        &self,
        inputs: &[Value<T>],
        cotangents: &[Value<T>],
    ) -> Result<Vec<Value<T>>, MapError> {
        // delegate entirely: all nine original inputs plus the output cotangent
        let grad_inputs: Vec<_> = inputs
            .iter()
            .chain(cotangents.iter().take(1))
            .cloned()
            .collect();
        self.gradient_op.compute(&grad_inputs)
    }
}

impl<T, M> Clone for FluxDesignOp<T, M>
where
    T: Float,
    M: SurfaceMap<T>,
{
    fn clone(&self) -> Self {
        Self {
            map: Rc::clone(&self.map),
            gradient_op: self.gradient_op.clone(),
        }
    }
}

impl<T, M> fmt::Debug for FluxDesignOp<T, M>
where
    T: Float,
    M: SurfaceMap<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluxDesignOp").finish_non_exhaustive()
    }
}
