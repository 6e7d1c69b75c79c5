//! Planner states and outbound events.

use crate::trajectory::PathStep;

/// Summary of what the control loop is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlannerState {
    /// No path to follow.
    Idle,
    /// Following a valid path.
    Following,
    /// Active path collides, counter still below the hysteresis threshold.
    Colliding {
        /// Consecutive colliding ticks so far.
        count: u32,
    },
    /// Collision confirmed; an emergency stop was emitted.
    EmergencyStopped,
    /// Planning kept failing for the whole debounce interval.
    Blocked,
}

impl PlannerState {
    /// Is the robot expected to be moving?
    pub fn is_moving(&self) -> bool {
        matches!(self, PlannerState::Following | PlannerState::Colliding { .. })
    }

    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            PlannerState::Idle => "Idle",
            PlannerState::Following => "Following",
            PlannerState::Colliding { .. } => "Colliding",
            PlannerState::EmergencyStopped => "EmergencyStopped",
            PlannerState::Blocked => "Blocked",
        }
    }
}

/// Event emitted to the strategy layer.
#[derive(Clone, Debug, PartialEq)]
pub enum PlannerEvent {
    /// A (re)plan succeeded; drive these steps in order.
    NewPath {
        /// Steps from the current pose to the goal.
        steps: Vec<PathStep>,
        /// Heading to hold once the goal is reached (radians).
        final_heading: f32,
    },

    /// The previous step was completed; drive this one next.
    MoveTo {
        /// Newly active step.
        step: PathStep,
        /// Heading to hold once the goal is reached (radians).
        final_heading: f32,
    },

    /// No route has existed for the whole debounce interval.
    Blocked,

    /// The active path has been colliding for too many ticks.
    EmergencyStop,
}

impl PlannerEvent {
    /// Event name for logging
    pub fn name(&self) -> &'static str {
        match self {
            PlannerEvent::NewPath { .. } => "NewPath",
            PlannerEvent::MoveTo { .. } => "MoveTo",
            PlannerEvent::Blocked => "Blocked",
            PlannerEvent::EmergencyStop => "EmergencyStop",
        }
    }
}

/// Progress of a planning failure episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum BlockedEpisode {
    /// Last planning attempt succeeded (or none failed yet).
    #[default]
    Clear,
    /// Planning is failing; `Blocked` fires when the timer expires.
    Pending,
    /// `Blocked` was emitted for this episode.
    Reported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names() {
        assert_eq!(PlannerState::Idle.name(), "Idle");
        assert_eq!(PlannerState::Colliding { count: 1 }.name(), "Colliding");
        assert!(PlannerState::Following.is_moving());
        assert!(!PlannerState::EmergencyStopped.is_moving());
        assert!(!PlannerState::Blocked.is_moving());
    }
}
