//! Planner control loop.
//!
//! [`PathFinder`] holds the planner state and reacts to a fixed-period tick:
//! it drops completed steps, lets the configured [`DrivePolicy`] re-plan
//! and re-validate the active path, and debounces planning failures into a
//! single `Blocked` event. [`runtime::PlannerThread`] runs it on its own
//! thread behind a command channel.
//!
//! # State summary
//!
//! ```text
//! Idle ──new goal──► Following ──collision──► Colliding ──N ticks──► EmergencyStopped
//!                        ▲                        │                        │
//!                        └──────clear tick────────┴────────────────────────┘
//! Following/Colliding ──no route for blocked_delay──► Blocked ──route found──► Following
//! ```

mod finder;
mod policy;
pub mod runtime;
mod state;
mod timer;

pub use finder::PathFinder;
pub use policy::DrivePolicy;
pub use runtime::{PlannerCommand, PlannerHandle, PlannerStatus, PlannerThread};
pub use state::{PlannerEvent, PlannerState};
pub use timer::OneShot;
