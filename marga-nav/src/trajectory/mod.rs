//! Trajectory segments and the path built from them.

mod path;
mod step;

pub use path::Trajectory;
pub use step::{polyline_length, PathStep, WAYPOINT_COUNT};
