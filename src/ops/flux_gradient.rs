use crate::data::{Geometry, ParameterSet, Sample};
use crate::error::MapError;
use crate::float_trait::Float;
use crate::map::{MapState, SurfaceMap};
use crate::ops::{DiffOp, OpInfo, check_arity, unpack_inputs};
use crate::value::{Value, ValueShape};

use macro_const::macro_const;
use ndarray::{Array1, Array2, ArrayView2};
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

macro_const! {
    const DOC: &str = r"
Adjoint flux-design-matrix operator

Given the same nine inputs as [FluxDesignOp](crate::FluxDesignOp) plus a cotangent on the
design matrix, invokes the surface map's adjoint evaluator and repacks the raw gradients to
exactly the shapes of the original inputs: scalars in, scalars out; sequences in,
same-length sequences out.

- Packed inputs, in order: $u$, $f$, inclination, obliquity, $\theta$, $x_o$, $y_o$,
  $z_o$, $r_o$, output cotangent $\bar X$
- Packed outputs: nine cotangents in the input order

The occultor $z_o$ cotangent is always an all-zero value shaped like $z_o$: the model treats
the occultor depth coordinate as fixed, so flux is constant in $z_o$ away from the transit
boundary.
";
}

op_info!(
    FLUX_GRADIENT_INFO,
    name: "flux_design_matrix_gradient",
    n_inputs: 10,
    n_outputs: 9,
    differentiable: false,
);

#[doc = DOC!()]
pub struct FluxGradientOp<T, M>
where
    T: Float,
    M: SurfaceMap<T>,
{
    map: Rc<RefCell<M>>,
    _phantom: PhantomData<T>,
}

impl<T, M> FluxGradientOp<T, M>
where
    T: Float,
    M: SurfaceMap<T>,
{
    pub fn new(map: Rc<RefCell<M>>) -> Self {
        Self {
            map,
            _phantom: PhantomData,
        }
    }

    /// Evaluate per-input cotangents for a cotangent on the design matrix
    pub fn evaluate(
        &self,
        params: &ParameterSet<T>,
        geometry: &Geometry<T>,
        cotangent: ArrayView2<'_, T>,
    ) -> Result<CotangentBundle<T>, MapError> {
        let state = {
            let map = self.map.borrow();
            MapState::bind(map.udeg(), map.fdeg(), params)
        };
        let arrays = geometry.to_arrays();
        let grads = self.map.borrow_mut().adjoint(&state, &arrays, cotangent)?;
        Ok(CotangentBundle {
            limb_darkening: grads.limb_darkening,
            filter: grads.filter,
            inclination: grads.inclination,
            obliquity: grads.obliquity,
            theta: geometry.theta.repack(grads.theta),
            xo: geometry.xo.repack(grads.xo),
            yo: geometry.yo.repack(grads.yo),
            zo: geometry.zo.zeros_like(),
            ro: geometry.ro.repack(grads.ro),
        })
    }
}

impl<T, M> DiffOp<T> for FluxGradientOp<T, M>
where
    T: Float,
    M: SurfaceMap<T>,
{
    fn info(&self) -> &'static OpInfo {
        &FLUX_GRADIENT_INFO
    }

    fn compute(&self, inputs: &[Value<T>]) -> Result<Vec<Value<T>>, MapError> {
        check_arity(inputs.len(), self.info().n_inputs)?;
        let (params, geometry) = unpack_inputs(inputs)?;
        let cotangent = inputs[9].matrix("cotangent")?;
        let bundle = self.evaluate(&params, &geometry, cotangent.view())?;
        Ok(bundle.into_values())
    }

    fn infer_output_shapes(
        &self,
        input_shapes: &[ValueShape],
    ) -> Result<Vec<ValueShape>, MapError> {
        check_arity(input_shapes.len(), self.info().n_inputs)?;
        // cotangents are shaped exactly like the nine differentiated inputs
        Ok(input_shapes[..9].to_vec())
    }

    fn gradient(
        &self,
        _inputs: &[Value<T>],
        _cotangents: &[Value<T>],
    ) -> Result<Vec<Value<T>>, MapError> {
        Err(MapError::Unsupported("second-order gradient"))
    }
}

impl<T, M> Clone for FluxGradientOp<T, M>
where
    T: Float,
    M: SurfaceMap<T>,
{
    fn clone(&self) -> Self {
        Self {
            map: Rc::clone(&self.map),
            _phantom: PhantomData,
        }
    }
}

impl<T, M> fmt::Debug for FluxGradientOp<T, M>
where
    T: Float,
    M: SurfaceMap<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluxGradientOp").finish_non_exhaustive()
    }
}

/// Per-input cotangents, repacked to the exact input shapes
///
/// Fields are listed in the packed input order.
#[derive(Clone, Debug, PartialEq)]
pub struct CotangentBundle<T>
where
    T: Float,
{
    pub limb_darkening: Array1<T>,
    pub filter: Array2<T>,
    pub inclination: T,
    pub obliquity: T,
    pub theta: Sample<T>,
    pub xo: Sample<T>,
    pub yo: Sample<T>,
    /// Always all-zero: the occultor depth coordinate is non-differentiable
    pub zo: Sample<T>,
    pub ro: Sample<T>,
}

impl<T> CotangentBundle<T>
where
    T: Float,
{
    /// Pack into values, in the input order
    pub fn into_values(self) -> Vec<Value<T>> {
        vec![
            Value::Vector(self.limb_darkening),
            Value::Matrix(self.filter),
            Value::Scalar(self.inclination),
            Value::Scalar(self.obliquity),
            self.theta.into(),
            self.xo.into(),
            self.yo.into(),
            self.zo.into(),
            self.ro.into(),
        ]
    }
}
