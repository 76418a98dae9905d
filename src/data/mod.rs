mod geometry;
pub use geometry::{Geometry, GeometryArrays};

mod parameter_set;
pub use parameter_set::ParameterSet;

mod sample;
pub use sample::Sample;
