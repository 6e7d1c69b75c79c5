//! Drive policies: how the control loop reacts each tick.

use log::trace;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::finder::{CollisionOutcome, PathFinder};

/// Reaction strategy, chosen from the robot's kinematics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrivePolicy {
    /// Omnidirectional base: re-plan every tick, then validate.
    Holonomic,
    /// Two-wheel base: re-plan only after a confirmed collision (debounced),
    /// while an external emergency stop is asserted, or when the path is
    /// clear again during a planning failure.
    #[default]
    Differential,
}

impl DrivePolicy {
    /// Policy name for logging
    pub fn name(&self) -> &'static str {
        match self {
            DrivePolicy::Holonomic => "Holonomic",
            DrivePolicy::Differential => "Differential",
        }
    }

    /// Run this policy's per-tick actions on a non-empty path.
    pub(crate) fn react_to_tick(&self, finder: &mut PathFinder, now: Instant) {
        match self {
            DrivePolicy::Holonomic => {
                finder.replan(now);
                finder.validate_path();
            }
            DrivePolicy::Differential => {
                if finder.is_emergency_stop_asserted() {
                    trace!("[PathFinder] Emergency stop asserted, recovery re-plan");
                    finder.replan(now);
                    return;
                }

                if finder.replan_timer_mut().fire(now) {
                    trace!("[PathFinder] Re-plan delay elapsed");
                    finder.replan(now);
                }

                match finder.validate_path() {
                    CollisionOutcome::Clear => {
                        finder.replan_timer_mut().stop();
                        // Close an open failure episode
                        if finder.has_open_blocked_episode() {
                            trace!("[PathFinder] Path clear while blocked, re-planning");
                            finder.replan(now);
                        }
                    }
                    CollisionOutcome::Suspected => {}
                    CollisionOutcome::Confirmed => finder.replan_timer_mut().start(now),
                }
            }
        }
    }
}
