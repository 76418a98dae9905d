mod state;
pub use state::MapState;

mod surface_map;
pub use surface_map::{AdjointGradients, SurfaceMap};
