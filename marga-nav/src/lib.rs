//! # Marga-Nav: Visibility-Graph Motion Planner
//!
//! Motion planning and obstacle avoidance for a competition robot moving on
//! a flat playground among moving and static obstacles.
//!
//! ## Pipeline
//!
//! 1. Obstacles arrive as footprint polygons, each with a larger avoidance
//!    polygon ([`obstacle`])
//! 2. A visibility graph is built over the start, the goal and every
//!    avoidance corner, keeping only collision-free edges ([`visibility`])
//! 3. A shortest-route search turns the graph into a chain of legs
//! 4. Each leg becomes a sampled [`trajectory::PathStep`]
//! 5. The control loop ([`planner`]) re-validates the remaining path every
//!    tick and emits `NewPath`, `MoveTo`, `Blocked` and `EmergencyStop`
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Instant;
//! use marga_nav::{make_obstacle, PathFinder, PlannerConfig, PlannerEvent, Point2D};
//!
//! let config = PlannerConfig::default().with_hitbox_width(20.0);
//! let mut finder = PathFinder::new(config).unwrap();
//!
//! finder.set_obstacles(vec![make_obstacle(Point2D::new(50.0, 0.0), 20.0, 10.0, None)]);
//! finder.set_new_goal(Point2D::new(100.0, 0.0), 0.0);
//!
//! let events = finder.find_new_path(Instant::now());
//! assert!(matches!(events[0], PlannerEvent::NewPath { .. }));
//! ```
//!
//! ## Units
//!
//! Positions and widths share whatever unit the caller uses; configuration
//! defaults assume metres. Headings are radians, counter-clockwise.

pub mod collision;
pub mod config;
pub mod core;
pub mod error;
pub mod obstacle;
pub mod planner;
pub mod trajectory;
pub mod visibility;

pub use collision::CollisionChecker;
pub use config::PlannerConfig;
pub use crate::core::{Point2D, Polygon, Segment2D};
pub use error::{ConfigError, MargaError, Result};
pub use obstacle::{make_obstacle, Hitbox, Obstacle};
pub use planner::{DrivePolicy, PathFinder, PlannerEvent, PlannerState, PlannerThread};
pub use trajectory::{PathStep, Trajectory};
pub use visibility::{plan_route, Route};
