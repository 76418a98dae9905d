use conv::prelude::*;
use ndarray::NdFloat;
use num_traits::FloatConst;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Floating-point number trait, it is implemented for [f32] and [f64] only
pub trait Float:
    'static
    + NdFloat
    + FloatConst
    + ApproxFrom<usize>
    + ApproxInto<f64>
    + Serialize
    + DeserializeOwned
{
    /// Approximate conversion from [usize]
    fn approx_usize(n: usize) -> Self;
}

impl Float for f32 {
    fn approx_usize(n: usize) -> Self {
        n.approx().unwrap()
    }
}

impl Float for f64 {
    fn approx_usize(n: usize) -> Self {
        n.approx().unwrap()
    }
}
