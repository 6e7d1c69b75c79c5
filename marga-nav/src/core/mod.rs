//! Core geometric types.
//!
//! - [`Point2D`]: position or vector in the playground frame
//! - [`Segment2D`]: straight line segment
//! - [`Polygon`]: closed polygon used for obstacle outlines
//! - [`Bounds`]: axis-aligned box for quick rejection

mod bounds;
mod point;
mod polygon;
mod segment;

pub use bounds::Bounds;
pub use point::Point2D;
pub use polygon::Polygon;
pub use segment::Segment2D;
