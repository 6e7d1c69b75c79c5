//! Shortest route search over a visibility graph.
//!
//! Label-setting search with a full sweep: the loop runs exactly once per
//! vertex instead of stopping when the goal is first reached. Every time a
//! neighbor at the goal position is met during relaxation it becomes a
//! "rewinder" candidate, and the candidate with the smallest distance at
//! comparison time is the one the route is backtracked from.
//!
//! Neighbor iteration of an expanded vertex stops at the first neighbor
//! lying on the goal position. Ties between equally near vertices resolve
//! to the lowest index, which fixes the route chosen around symmetric
//! obstacle layouts.

use log::trace;

use crate::core::Point2D;

use super::graph::VisibilityGraph;
use super::vertex::VertexId;

/// Ordered chain of straight legs from start to goal.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// `(from, to)` pairs; each `to` is the next `from`.
    pub legs: Vec<(Point2D, Point2D)>,
    /// Sum of leg lengths.
    pub length: f32,
}

impl Route {
    /// Single direct leg.
    pub fn direct(start: Point2D, goal: Point2D) -> Self {
        Self {
            legs: vec![(start, goal)],
            length: start.distance(&goal),
        }
    }

    /// Visited positions, start and goal included.
    pub fn points(&self) -> Vec<Point2D> {
        let mut points = Vec::with_capacity(self.legs.len() + 1);
        if let Some((first, _)) = self.legs.first() {
            points.push(*first);
        }
        points.extend(self.legs.iter().map(|(_, to)| *to));
        points
    }
}

/// Run the search and backtrack the winning route.
///
/// Returns `None` when the goal was never reached. The graph's labels
/// are left in their final state for inspection.
pub fn shortest_route(graph: &mut VisibilityGraph) -> Option<Route> {
    if graph.is_empty() {
        return None;
    }

    let goal_position = graph.goal_position();
    let mut rewinder: Option<VertexId> = None;

    for _ in 0..graph.len() {
        let Some(current) = nearest_unvisited(graph) else {
            continue;
        };

        graph.vertex_mut(current).visited = true;
        let current_distance = graph.vertex(current).distance;
        let current_position = graph.vertex(current).position;

        let mut goal_candidate = None;
        for k in 0..graph.vertex(current).neighbors.len() {
            let neighbor_id = graph.vertex(current).neighbors[k];
            let neighbor = graph.vertex_mut(neighbor_id);

            let total = current_distance + current_position.distance(&neighbor.position);
            if total < neighbor.distance && !neighbor.visited {
                neighbor.distance = total;
                neighbor.previous = Some(current);
            }

            if neighbor.position == goal_position {
                goal_candidate = Some(neighbor_id);
                break;
            }
        }

        if let Some(candidate) = goal_candidate {
            let better = match rewinder {
                None => true,
                Some(best) => graph.vertex(candidate).distance < graph.vertex(best).distance,
            };
            if better {
                rewinder = Some(candidate);
            }
        }
    }

    let winner = rewinder?;
    let legs = backtrack(graph, winner);
    if legs.is_empty() {
        trace!("[Visibility] Goal touched but never relaxed");
        return None;
    }

    let length = legs.iter().map(|(a, b)| a.distance(b)).sum();
    Some(Route { legs, length })
}

/// First vertex (lowest index) with the smallest distance among the
/// unvisited ones.
fn nearest_unvisited(graph: &VisibilityGraph) -> Option<VertexId> {
    let mut best: Option<VertexId> = None;
    for (id, vertex) in graph.vertices().iter().enumerate() {
        if vertex.visited {
            continue;
        }
        match best {
            Some(b) if graph.vertex(b).distance <= vertex.distance => {}
            _ => best = Some(id),
        }
    }
    best
}

/// Walk predecessors from `winner` back to the start.
fn backtrack(graph: &VisibilityGraph, winner: VertexId) -> Vec<(Point2D, Point2D)> {
    let mut legs = Vec::new();
    let mut current = winner;
    // A predecessor chain can never be longer than the vertex count
    for _ in 0..graph.len() {
        let Some(previous) = graph.vertex(current).previous else {
            break;
        };
        legs.push((graph.vertex(previous).position, graph.vertex(current).position));
        current = previous;
    }
    legs.reverse();
    legs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionChecker;
    use crate::core::Polygon;
    use crate::obstacle::{make_obstacle, Obstacle};
    use approx::assert_relative_eq;

    fn search(start: Point2D, goal: Point2D, obstacles: &[Obstacle], clearance: f32) -> Option<Route> {
        let mut graph =
            VisibilityGraph::build(start, goal, obstacles, &CollisionChecker::new(clearance));
        shortest_route(&mut graph)
    }

    #[test]
    fn test_direct_route() {
        let route = search(Point2D::zero(), Point2D::new(100.0, 0.0), &[], 10.0).unwrap();
        assert_eq!(route.legs, vec![(Point2D::zero(), Point2D::new(100.0, 0.0))]);
        assert_relative_eq!(route.length, 100.0);
    }

    #[test]
    fn test_detour_around_obstacle() {
        let obstacles = vec![make_obstacle(Point2D::new(50.0, 0.0), 20.0, 10.0, None)];
        let route = search(Point2D::zero(), Point2D::new(100.0, 0.0), &obstacles, 10.0).unwrap();
        assert!(route.legs.len() >= 2);
        assert!(route.length > 100.0);
        assert_eq!(route.legs.first().unwrap().0, Point2D::zero());
        assert_eq!(route.legs.last().unwrap().1, Point2D::new(100.0, 0.0));
        for pair in route.legs.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn test_symmetric_detour_is_deterministic() {
        let obstacles = vec![make_obstacle(Point2D::new(50.0, 0.0), 20.0, 10.0, None)];
        let a = search(Point2D::zero(), Point2D::new(100.0, 0.0), &obstacles, 10.0).unwrap();
        let b = search(Point2D::zero(), Point2D::new(100.0, 0.0), &obstacles, 10.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unreachable_goal() {
        // Goal sealed inside a large square footprint
        let wall = Polygon::new(vec![
            Point2D::new(80.0, -20.0),
            Point2D::new(120.0, -20.0),
            Point2D::new(120.0, 20.0),
            Point2D::new(80.0, 20.0),
        ]);
        let obstacles = vec![Obstacle::from_polygons(wall, Polygon::default())];
        assert!(search(Point2D::zero(), Point2D::new(100.0, 0.0), &obstacles, 1.0).is_none());
    }

    #[test]
    fn test_start_equals_goal_has_no_route() {
        // The search itself never connects coincident vertices
        let p = Point2D::new(5.0, 5.0);
        assert!(search(p, p, &[], 1.0).is_none());
    }

    #[test]
    fn test_every_vertex_visited_at_most_once() {
        let obstacles = vec![
            make_obstacle(Point2D::new(50.0, 0.0), 20.0, 10.0, None),
            make_obstacle(Point2D::new(120.0, 40.0), 15.0, 10.0, None),
        ];
        let mut graph = VisibilityGraph::build(
            Point2D::zero(),
            Point2D::new(200.0, 0.0),
            &obstacles,
            &CollisionChecker::new(10.0),
        );
        let route = shortest_route(&mut graph).unwrap();
        assert!(graph.vertices().iter().all(|v| v.visited));
        assert!(graph.vertices().iter().all(|v| v.distance >= 0.0));
        assert_relative_eq!(route.length, graph.vertex(graph.goal_id()).distance, epsilon = 1e-3);
    }

    #[test]
    fn test_route_points() {
        let route = Route::direct(Point2D::zero(), Point2D::new(3.0, 4.0));
        assert_eq!(route.points(), vec![Point2D::zero(), Point2D::new(3.0, 4.0)]);
        assert_relative_eq!(route.length, 5.0);
    }
}
