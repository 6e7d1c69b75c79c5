//! Graph vertex stored in the per-query arena.

use crate::core::Point2D;

/// Index of a vertex inside a [`VisibilityGraph`](super::VisibilityGraph).
pub type VertexId = usize;

/// Where a vertex came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexKind {
    /// Query start (robot position).
    Start,
    /// Corner of an obstacle's avoidance polygon.
    Corner {
        /// Index of the obstacle in the query's obstacle slice.
        obstacle: usize,
    },
    /// Query goal.
    Goal,
}

/// Visibility graph vertex.
#[derive(Clone, Debug)]
pub struct Vertex {
    /// Position in the playground frame.
    pub position: Point2D,
    /// Origin of this vertex.
    pub kind: VertexKind,
    /// Tentative distance from the start (infinite until relaxed).
    pub distance: f32,
    /// Set once the vertex has been expanded.
    pub visited: bool,
    /// Mutually visible vertices, in ascending index order.
    pub neighbors: Vec<VertexId>,
    /// Predecessor on the best known route.
    pub previous: Option<VertexId>,
}

impl Vertex {
    /// Unreached vertex.
    #[inline]
    pub fn new(position: Point2D, kind: VertexKind) -> Self {
        Self {
            position,
            kind,
            distance: f32::INFINITY,
            visited: false,
            neighbors: Vec::new(),
            previous: None,
        }
    }

    /// Start vertex (distance 0).
    #[inline]
    pub fn start(position: Point2D) -> Self {
        Self {
            distance: 0.0,
            ..Self::new(position, VertexKind::Start)
        }
    }

    /// True once a finite distance is known.
    #[inline]
    pub fn is_reached(&self) -> bool {
        self.distance.is_finite()
    }
}
