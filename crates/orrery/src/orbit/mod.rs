pub mod placement;
pub mod registry;
pub mod solver;

pub use placement::{Placement, PlacementResolver};
pub use registry::{Attachment, Body, BodyDesc, BodyRegistry, Ring, Satellite, SatelliteDesc, TRACE_SAMPLES};
pub use solver::{orbit_trace, Orbit};
