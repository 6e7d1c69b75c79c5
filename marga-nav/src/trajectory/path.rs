//! Ordered sequence of path steps from the robot to the goal.

use std::collections::VecDeque;

use crate::core::Point2D;
use crate::visibility::Route;

use super::step::PathStep;

/// Active path: completed steps are dropped from the front, the whole
/// sequence is replaced on every successful re-plan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    steps: VecDeque<PathStep>,
}

impl Trajectory {
    /// Empty trajectory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trajectory made of a single step.
    pub fn single(step: PathStep) -> Self {
        Self {
            steps: VecDeque::from([step]),
        }
    }

    /// Trajectory from already built steps.
    pub fn from_steps(steps: impl IntoIterator<Item = PathStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// One straight step per route leg.
    pub fn from_route(route: &Route, width: f32) -> Self {
        Self::from_steps(
            route
                .legs
                .iter()
                .map(|(from, to)| PathStep::straight(*from, *to, width)),
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Active step.
    #[inline]
    pub fn front(&self) -> Option<&PathStep> {
        self.steps.front()
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut PathStep> {
        self.steps.front_mut()
    }

    /// Drop the active step.
    pub fn pop_front(&mut self) -> Option<PathStep> {
        self.steps.pop_front()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Where the path starts.
    pub fn start(&self) -> Option<Point2D> {
        self.steps.front().map(PathStep::start)
    }

    /// Where the path ends.
    pub fn goal(&self) -> Option<Point2D> {
        self.steps.back().map(PathStep::goal)
    }

    pub fn steps(&self) -> impl Iterator<Item = &PathStep> {
        self.steps.iter()
    }

    /// Sum of full step lengths.
    pub fn total_length(&self) -> f32 {
        self.steps.iter().map(PathStep::length).sum()
    }

    /// Length still to drive, honoring progress on each step.
    pub fn remaining_length(&self) -> f32 {
        self.steps.iter().map(PathStep::remaining_length).sum()
    }

    /// Owned copy of the steps, in order.
    pub fn to_vec(&self) -> Vec<PathStep> {
        self.steps.iter().cloned().collect()
    }
}
