//! Visibility-graph route planning.
//!
//! A query builds a fresh graph whose vertices are the start, the goal and
//! the corners of every obstacle's avoidance polygon. Two vertices are
//! connected when the straight segment between them, buffered by the
//! robot half-width, stays clear of every obstacle footprint. The search
//! then returns the shortest chain of straight legs.
//!
//! # Example
//!
//! ```rust
//! use marga_nav::collision::CollisionChecker;
//! use marga_nav::core::Point2D;
//! use marga_nav::obstacle::make_obstacle;
//! use marga_nav::visibility::plan_route;
//!
//! let obstacles = vec![make_obstacle(Point2D::new(50.0, 0.0), 20.0, 10.0, None)];
//! let checker = CollisionChecker::new(10.0);
//!
//! let route = plan_route(Point2D::zero(), Point2D::new(100.0, 0.0), &obstacles, &checker)
//!     .expect("detour exists");
//! assert!(route.length > 100.0);
//! ```

mod graph;
mod search;
mod vertex;

pub use graph::VisibilityGraph;
pub use search::{shortest_route, Route};
pub use vertex::{Vertex, VertexId, VertexKind};

use log::debug;

use crate::collision::CollisionChecker;
use crate::core::Point2D;
use crate::obstacle::Obstacle;

/// Plan a route from `start` to `goal` around `obstacles`.
///
/// A start equal to the goal yields a single zero-length leg. `None` means
/// no collision-free route exists for this snapshot.
pub fn plan_route(
    start: Point2D,
    goal: Point2D,
    obstacles: &[Obstacle],
    checker: &CollisionChecker,
) -> Option<Route> {
    if start == goal {
        return Some(Route::direct(start, goal));
    }

    let mut graph = VisibilityGraph::build(start, goal, obstacles, checker);
    let route = shortest_route(&mut graph);

    match &route {
        Some(r) => debug!(
            "[Visibility] Route {} -> {}: {} legs, length {:.3}",
            start,
            goal,
            r.legs.len(),
            r.length
        ),
        None => debug!(
            "[Visibility] No route {} -> {} ({} vertices, {} edges)",
            start,
            goal,
            graph.len(),
            graph.edge_count()
        ),
    }

    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_equals_goal() {
        let p = Point2D::new(1.0, 1.0);
        let route = plan_route(p, p, &[], &CollisionChecker::default()).unwrap();
        assert_eq!(route.legs, vec![(p, p)]);
        assert_eq!(route.length, 0.0);
    }
}
