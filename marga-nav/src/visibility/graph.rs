//! Visibility graph construction for one planning query.

use log::trace;

use crate::collision::CollisionChecker;
use crate::core::Point2D;
use crate::obstacle::Obstacle;

use super::vertex::{Vertex, VertexId, VertexKind};

/// Arena of vertices for a single planning query.
///
/// Vertex order is fixed: the start, then every avoidance corner in
/// obstacle order, then the goal. The graph is rebuilt from scratch for
/// every query and dropped once the route is extracted.
#[derive(Clone, Debug)]
pub struct VisibilityGraph {
    vertices: Vec<Vertex>,
}

impl VisibilityGraph {
    /// Gather vertices and connect every mutually visible pair.
    pub fn build(
        start: Point2D,
        goal: Point2D,
        obstacles: &[Obstacle],
        checker: &CollisionChecker,
    ) -> Self {
        let mut graph = Self {
            vertices: gather_vertices(start, goal, obstacles),
        };
        graph.connect(obstacles, checker);
        trace!(
            "[Visibility] Built graph: {} vertices, {} edges, {} obstacles",
            graph.len(),
            graph.edge_count(),
            obstacles.len()
        );
        graph
    }

    /// Add an undirected edge between every pair of distinct positions
    /// whose connecting segment is collision free.
    fn connect(&mut self, obstacles: &[Obstacle], checker: &CollisionChecker) {
        let n = self.vertices.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let a = self.vertices[i].position;
                let b = self.vertices[j].position;

                if a == b {
                    continue;
                }

                if !checker.segment_collides(a, b, obstacles) {
                    self.vertices[i].neighbors.push(j);
                    self.vertices[j].neighbors.push(i);
                }
            }
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }

    #[inline]
    pub(crate) fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.neighbors.len()).sum::<usize>() / 2
    }

    #[inline]
    pub fn start_id(&self) -> VertexId {
        0
    }

    #[inline]
    pub fn goal_id(&self) -> VertexId {
        self.vertices.len() - 1
    }

    /// Goal position of this query.
    #[inline]
    pub fn goal_position(&self) -> Point2D {
        self.vertices[self.goal_id()].position
    }

    /// True if `a` and `b` are connected.
    pub fn are_neighbors(&self, a: VertexId, b: VertexId) -> bool {
        self.vertices[a].neighbors.contains(&b)
    }
}

fn gather_vertices(start: Point2D, goal: Point2D, obstacles: &[Obstacle]) -> Vec<Vertex> {
    let corner_count: usize = obstacles.iter().map(|o| o.avoidance().len()).sum();
    let mut vertices = Vec::with_capacity(corner_count + 2);

    vertices.push(Vertex::start(start));
    for (index, obstacle) in obstacles.iter().enumerate() {
        vertices.extend(
            obstacle
                .avoidance()
                .vertices()
                .iter()
                .map(|corner| Vertex::new(*corner, VertexKind::Corner { obstacle: index })),
        );
    }
    vertices.push(Vertex::new(goal, VertexKind::Goal));

    vertices
}
