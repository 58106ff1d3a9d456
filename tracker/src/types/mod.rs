//! Types shared between the sampler, the sinks and the renderers.

pub mod fix;
pub mod region;

pub use fix::{InvalidFixError, PositionFix, RoutePoint};
pub use region::MapRegion;
