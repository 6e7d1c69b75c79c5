//! Path finder: the periodic planning and collision control loop.
//!
//! The path finder owns the planner state (pose, obstacle snapshots,
//! active path, timers, collision counter) and is driven by two kinds of
//! calls:
//!
//! - inputs from collaborators (`set_obstacles`, `set_current_pose`,
//!   `set_new_goal`, ...) that only mutate state
//! - [`PathFinder::tick`] and [`PathFinder::find_new_path`], which take the
//!   current monotonic time and return the events produced, in order
//!
//! Time is always passed in, never read, so the loop is deterministic
//! under test.

use log::{debug, info, trace, warn};
use std::time::Instant;

use crate::collision::CollisionChecker;
use crate::config::{check_collision_hysteresis, check_hitbox_width, PlannerConfig};
use crate::core::Point2D;
use crate::error::ConfigError;
use crate::obstacle::{Hitbox, Obstacle};
use crate::trajectory::{PathStep, Trajectory};
use crate::visibility::plan_route;

use super::policy::DrivePolicy;
use super::state::{BlockedEpisode, PlannerEvent, PlannerState};
use super::timer::OneShot;

/// Result of validating the active path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CollisionOutcome {
    /// No collision; the counter was reset.
    Clear,
    /// Colliding, but not for enough consecutive ticks yet.
    Suspected,
    /// Colliding for at least the hysteresis threshold.
    Confirmed,
}

/// Planning control loop.
pub struct PathFinder {
    config: PlannerConfig,
    hitbox: Hitbox,
    policy: DrivePolicy,

    obstacles: Vec<Obstacle>,
    static_obstacles: Vec<Obstacle>,
    /// Merged planning set, rebuilt whenever an input set changes.
    working: Vec<Obstacle>,
    ignore_static_obstacles: bool,

    current_pose: Point2D,
    final_heading: f32,
    path: Trajectory,

    collision_count: u32,
    emergency_latched: bool,
    emergency_stop_asserted: bool,

    replan_timer: OneShot,
    blocked_timer: OneShot,
    blocked: BlockedEpisode,

    outbox: Vec<PlannerEvent>,
}

impl PathFinder {
    /// Create a path finder from a validated configuration.
    pub fn new(config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        info!(
            "[PathFinder] Created: policy={}, hitbox={:.3}, hysteresis={}, tick={}ms",
            config.drive_policy.name(),
            config.hitbox_width,
            config.collision_hysteresis,
            config.tick_period_ms
        );

        Ok(Self {
            hitbox: config.hitbox(),
            policy: config.drive_policy,
            obstacles: Vec::new(),
            static_obstacles: Vec::new(),
            working: Vec::new(),
            ignore_static_obstacles: config.ignore_static_obstacles,
            current_pose: Point2D::zero(),
            final_heading: 0.0,
            path: Trajectory::new(),
            collision_count: 0,
            emergency_latched: false,
            emergency_stop_asserted: false,
            replan_timer: OneShot::new(config.replan_delay()),
            blocked_timer: OneShot::new(config.blocked_delay()),
            blocked: BlockedEpisode::Clear,
            outbox: Vec::new(),
            config,
        })
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Replace the dynamic obstacle snapshot.
    pub fn set_obstacles(&mut self, obstacles: Vec<Obstacle>) {
        self.obstacles = obstacles;
        self.refresh_working_set();
    }

    /// Replace the static (map) obstacle set.
    pub fn set_static_obstacles(&mut self, obstacles: Vec<Obstacle>) {
        self.static_obstacles = obstacles;
        self.refresh_working_set();
    }

    pub fn set_ignore_static_obstacles(&mut self, ignore: bool) {
        self.ignore_static_obstacles = ignore;
        self.refresh_working_set();
    }

    /// Update the robot position and record progress on the active step.
    pub fn set_current_pose(&mut self, pose: Point2D) {
        self.current_pose = pose;
        if let Some(step) = self.path.front_mut() {
            step.advance(pose);
        }
    }

    /// Install a new goal.
    ///
    /// The path becomes a single straight step from the current pose;
    /// planning around obstacles happens on the next re-plan. Collision
    /// and blocked state start over for the new goal.
    pub fn set_new_goal(&mut self, goal: Point2D, final_heading: f32) {
        let step = PathStep::straight(self.current_pose, goal, self.hitbox.width);
        self.set_new_goal_step(step, final_heading);
    }

    /// Install a caller-built step, possibly curved, as the new goal.
    ///
    /// The step is followed as given until the next re-plan, which plans
    /// from the current pose to the step's goal.
    pub fn set_new_goal_step(&mut self, step: PathStep, final_heading: f32) {
        info!(
            "[PathFinder] New goal {} (heading {:.1}°)",
            step.goal(),
            final_heading.to_degrees()
        );

        self.path = Trajectory::single(step);
        self.final_heading = final_heading;
        self.reset_episode();
    }

    /// Replace the active path without planning or emitting events.
    ///
    /// Collision and blocked state carry over; the next validation judges
    /// the new path.
    pub fn set_path(&mut self, steps: Vec<PathStep>) {
        debug!("[PathFinder] Path set externally: {} steps", steps.len());
        self.path = Trajectory::from_steps(steps);
    }

    /// Drop the active path and go idle.
    pub fn reset(&mut self) {
        debug!("[PathFinder] Reset");
        self.path.clear();
        self.reset_episode();
    }

    /// Change the robot hitbox used for planning and new goals.
    pub fn set_hitbox(&mut self, hitbox: Hitbox) -> Result<(), ConfigError> {
        check_hitbox_width(hitbox.width)?;
        debug!("[PathFinder] Hitbox width {:.3}", hitbox.width);
        self.hitbox = hitbox;
        self.config.hitbox_width = hitbox.width;
        Ok(())
    }

    /// Change how many consecutive colliding ticks trigger an emergency stop.
    pub fn set_collision_hysteresis(&mut self, ticks: u32) -> Result<(), ConfigError> {
        check_collision_hysteresis(ticks)?;
        debug!("[PathFinder] Collision hysteresis {}", ticks);
        self.config.collision_hysteresis = ticks;
        Ok(())
    }

    /// External emergency stop override, consumed by the differential policy.
    pub fn set_emergency_stop_status(&mut self, asserted: bool) {
        if asserted != self.emergency_stop_asserted {
            debug!("[PathFinder] External emergency stop: {}", asserted);
        }
        self.emergency_stop_asserted = asserted;
    }

    // =========================================================================
    // Driving the loop
    // =========================================================================

    /// Re-plan from the current pose to the final goal of the active path.
    pub fn find_new_path(&mut self, now: Instant) -> Vec<PlannerEvent> {
        self.replan(now);
        self.check_blocked(now);
        self.take_events()
    }

    /// One control loop iteration.
    pub fn tick(&mut self, now: Instant) -> Vec<PlannerEvent> {
        self.complete_front_step();

        if self.path.is_empty() {
            self.reset_episode();
            return self.take_events();
        }

        let policy = self.policy;
        policy.react_to_tick(self, now);

        self.check_blocked(now);
        self.take_events()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current control loop state.
    pub fn state(&self) -> PlannerState {
        if self.path.is_empty() {
            PlannerState::Idle
        } else if self.emergency_latched {
            PlannerState::EmergencyStopped
        } else if self.blocked == BlockedEpisode::Reported {
            PlannerState::Blocked
        } else if self.collision_count > 0 {
            PlannerState::Colliding {
                count: self.collision_count,
            }
        } else {
            PlannerState::Following
        }
    }

    pub fn path(&self) -> &Trajectory {
        &self.path
    }

    pub fn current_pose(&self) -> Point2D {
        self.current_pose
    }

    pub fn final_heading(&self) -> f32 {
        self.final_heading
    }

    pub fn collision_count(&self) -> u32 {
        self.collision_count
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn policy(&self) -> DrivePolicy {
        self.policy
    }

    /// Obstacles currently planned against.
    pub fn working_obstacles(&self) -> &[Obstacle] {
        &self.working
    }

    pub fn is_emergency_stop_asserted(&self) -> bool {
        self.emergency_stop_asserted
    }

    // =========================================================================
    // Internals used by the drive policies
    // =========================================================================

    /// Plan and, on success, replace the active path.
    pub(crate) fn replan(&mut self, now: Instant) -> bool {
        let Some(goal) = self.path.goal() else {
            return false;
        };

        let checker = CollisionChecker::for_hitbox(&self.hitbox);
        match plan_route(self.current_pose, goal, &self.working, &checker) {
            Some(route) => {
                if self.blocked != BlockedEpisode::Clear {
                    info!("[PathFinder] Route to {} found again", goal);
                }
                self.blocked_timer.stop();
                self.blocked = BlockedEpisode::Clear;

                self.path = Trajectory::from_route(&route, self.hitbox.width);
                trace!(
                    "[PathFinder] New path: {} steps, {:.3} long",
                    self.path.len(),
                    route.length
                );
                self.outbox.push(PlannerEvent::NewPath {
                    steps: self.path.to_vec(),
                    final_heading: self.final_heading,
                });
                true
            }
            None => {
                if self.blocked == BlockedEpisode::Clear {
                    debug!(
                        "[PathFinder] No route {} -> {}, blocked in {}ms unless cleared",
                        self.current_pose,
                        goal,
                        self.blocked_timer.interval().as_millis()
                    );
                    self.blocked = BlockedEpisode::Pending;
                    self.blocked_timer.start(now);
                }
                false
            }
        }
    }

    /// Re-validate the remaining path against the bare footprints.
    pub(crate) fn validate_path(&mut self) -> CollisionOutcome {
        let checker = CollisionChecker::footprint_only();

        if !checker.path_collides(self.path.steps(), &self.working) {
            if self.collision_count > 0 {
                debug!(
                    "[PathFinder] Path clear again after {} colliding ticks",
                    self.collision_count
                );
            }
            self.collision_count = 0;
            self.emergency_latched = false;
            return CollisionOutcome::Clear;
        }

        self.collision_count = self.collision_count.saturating_add(1);
        if self.collision_count < self.config.collision_hysteresis {
            trace!(
                "[PathFinder] Collision suspected ({}/{})",
                self.collision_count,
                self.config.collision_hysteresis
            );
            return CollisionOutcome::Suspected;
        }

        if !self.emergency_latched {
            warn!(
                "[PathFinder] Collision confirmed after {} ticks, emergency stop",
                self.collision_count
            );
            self.emergency_latched = true;
            self.outbox.push(PlannerEvent::EmergencyStop);
        }
        CollisionOutcome::Confirmed
    }

    /// True while planning failures are pending or reported.
    pub(crate) fn has_open_blocked_episode(&self) -> bool {
        self.blocked != BlockedEpisode::Clear
    }

    pub(crate) fn replan_timer_mut(&mut self) -> &mut OneShot {
        &mut self.replan_timer
    }

    /// Pop the active step once it is driven and hand over to the next.
    fn complete_front_step(&mut self) {
        let threshold = self.config.segment_complete_threshold;
        let done = self
            .path
            .front()
            .is_some_and(|step| step.is_complete(threshold));
        if !done {
            return;
        }

        if let Some(step) = self.path.pop_front() {
            debug!("[PathFinder] Step done: {}", step);
        }

        let pose = self.current_pose;
        if let Some(next) = self.path.front_mut() {
            next.advance(pose);
            let step = next.clone();
            self.outbox.push(PlannerEvent::MoveTo {
                step,
                final_heading: self.final_heading,
            });
        } else {
            info!("[PathFinder] Goal reached at {}", pose);
        }
    }

    fn check_blocked(&mut self, now: Instant) {
        if self.blocked == BlockedEpisode::Pending && self.blocked_timer.fire(now) {
            warn!(
                "[PathFinder] No route for {}ms, blocked",
                self.blocked_timer.interval().as_millis()
            );
            self.blocked = BlockedEpisode::Reported;
            self.outbox.push(PlannerEvent::Blocked);
        }
    }

    fn reset_episode(&mut self) {
        self.collision_count = 0;
        self.emergency_latched = false;
        self.replan_timer.stop();
        self.blocked_timer.stop();
        self.blocked = BlockedEpisode::Clear;
    }

    fn refresh_working_set(&mut self) {
        self.working.clear();
        self.working.extend(self.obstacles.iter().cloned());
        if !self.ignore_static_obstacles {
            self.working.extend(self.static_obstacles.iter().cloned());
        }
    }

    fn take_events(&mut self) -> Vec<PlannerEvent> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::make_obstacle;
    use std::time::Duration;

    fn config(policy: DrivePolicy) -> PlannerConfig {
        PlannerConfig::default()
            .with_hitbox_width(20.0)
            .with_segment_complete_threshold(5.0)
            .with_drive_policy(policy)
    }

    fn finder(policy: DrivePolicy) -> PathFinder {
        PathFinder::new(config(policy)).unwrap()
    }

    fn blocker() -> Obstacle {
        make_obstacle(Point2D::new(50.0, 0.0), 20.0, 10.0, None)
    }

    /// Obstacle sealing off a goal at (100, 0).
    fn cage() -> Obstacle {
        make_obstacle(Point2D::new(100.0, 0.0), 40.0, 10.0, None)
    }

    fn ms(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    fn count(events: &[PlannerEvent], name: &str) -> usize {
        events.iter().filter(|e| e.name() == name).count()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = PathFinder::new(PlannerConfig::default().with_collision_hysteresis(0));
        assert!(matches!(err, Err(ConfigError::ZeroHysteresis)));
    }

    #[test]
    fn test_idle_without_goal() {
        let mut pf = finder(DrivePolicy::Differential);
        assert_eq!(pf.state(), PlannerState::Idle);
        assert!(pf.tick(Instant::now()).is_empty());
        assert_eq!(pf.state(), PlannerState::Idle);
    }

    #[test]
    fn test_new_goal_installs_straight_step() {
        let mut pf = finder(DrivePolicy::Differential);
        pf.set_current_pose(Point2D::new(1.0, 1.0));
        pf.set_new_goal(Point2D::new(100.0, 1.0), 0.5);
        assert_eq!(pf.state(), PlannerState::Following);
        assert_eq!(pf.path().len(), 1);
        assert_eq!(pf.path().start(), Some(Point2D::new(1.0, 1.0)));
        assert_eq!(pf.path().goal(), Some(Point2D::new(100.0, 1.0)));
        assert_eq!(pf.final_heading(), 0.5);
    }

    #[test]
    fn test_find_new_path_emits_new_path() {
        let mut pf = finder(DrivePolicy::Differential);
        pf.set_obstacles(vec![blocker()]);
        pf.set_new_goal(Point2D::new(100.0, 0.0), 1.0);

        let events = pf.find_new_path(Instant::now());
        assert_eq!(events.len(), 1);
        match &events[0] {
            PlannerEvent::NewPath {
                steps,
                final_heading,
            } => {
                assert!(steps.len() >= 2);
                assert_eq!(*final_heading, 1.0);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(pf.path().len() >= 2);
    }

    #[test]
    fn test_hysteresis_and_edge_triggered_stop() {
        let t0 = Instant::now();
        let mut pf = finder(DrivePolicy::Differential);
        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);
        pf.set_obstacles(vec![blocker()]);

        assert!(pf.tick(ms(t0, 0)).is_empty());
        assert_eq!(pf.state(), PlannerState::Colliding { count: 1 });

        let events = pf.tick(ms(t0, 100));
        assert_eq!(events, vec![PlannerEvent::EmergencyStop]);
        assert_eq!(pf.state(), PlannerState::EmergencyStopped);

        // Still colliding: no repeat
        pf.set_emergency_stop_status(false);
        let events = pf.tick(ms(t0, 150));
        assert_eq!(count(&events, "EmergencyStop"), 0);
    }

    #[test]
    fn test_new_goal_step_keeps_curve() {
        let mut pf = finder(DrivePolicy::Differential);
        let step = PathStep::curved(
            Point2D::zero(),
            Point2D::new(0.0, 60.0),
            Point2D::new(100.0, 60.0),
            Point2D::new(100.0, 0.0),
            20.0,
        );
        pf.set_new_goal_step(step.clone(), 0.7);

        assert_eq!(pf.path().front(), Some(&step));
        assert_eq!(pf.path().goal(), Some(Point2D::new(100.0, 0.0)));
        assert_eq!(pf.final_heading(), 0.7);
        assert_eq!(pf.state(), PlannerState::Following);

        // The next re-plan targets the step's goal
        let events = pf.find_new_path(Instant::now());
        assert_eq!(count(&events, "NewPath"), 1);
        assert_eq!(pf.path().goal(), Some(Point2D::new(100.0, 0.0)));
    }

    #[test]
    fn test_set_path_and_reset() {
        let mut pf = finder(DrivePolicy::Differential);
        let steps = vec![
            PathStep::straight(Point2D::zero(), Point2D::new(0.0, 50.0), 20.0),
            PathStep::straight(Point2D::new(0.0, 50.0), Point2D::new(50.0, 50.0), 20.0),
        ];
        pf.set_path(steps.clone());
        assert_eq!(pf.path().to_vec(), steps);
        assert_eq!(pf.state(), PlannerState::Following);

        pf.reset();
        assert!(pf.path().is_empty());
        assert_eq!(pf.state(), PlannerState::Idle);
        assert!(pf.tick(Instant::now()).is_empty());
    }

    #[test]
    fn test_runtime_hysteresis_change() {
        let t0 = Instant::now();
        let mut pf = finder(DrivePolicy::Differential);
        assert_eq!(
            pf.set_collision_hysteresis(0),
            Err(ConfigError::ZeroHysteresis)
        );
        pf.set_collision_hysteresis(4).unwrap();
        assert_eq!(pf.config().collision_hysteresis, 4);

        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);
        pf.set_obstacles(vec![blocker()]);
        let mut fired_at = Vec::new();
        for i in 0..6 {
            if count(&pf.tick(ms(t0, i * 10)), "EmergencyStop") > 0 {
                fired_at.push(i);
            }
        }
        assert_eq!(fired_at, vec![3]);
    }

    #[test]
    fn test_runtime_hitbox_change() {
        let mut pf = finder(DrivePolicy::Differential);
        assert!(matches!(
            pf.set_hitbox(Hitbox::new(-1.0)),
            Err(ConfigError::InvalidHitboxWidth(_))
        ));
        assert_eq!(pf.config().hitbox_width, 20.0);

        pf.set_hitbox(Hitbox::new(8.0)).unwrap();
        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);
        assert_eq!(pf.path().front().map(PathStep::width), Some(8.0));
        assert_eq!(pf.config().hitbox_width, 8.0);
    }

    #[test]
    fn test_clear_tick_resets_counter() {
        let t0 = Instant::now();
        let mut pf = finder(DrivePolicy::Differential);
        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);

        for i in 0..5 {
            pf.set_obstacles(vec![blocker()]);
            let events = pf.tick(ms(t0, i * 200));
            assert_eq!(pf.collision_count(), 1);
            assert_eq!(count(&events, "EmergencyStop"), 0);

            pf.set_obstacles(Vec::new());
            pf.tick(ms(t0, i * 200 + 100));
            assert_eq!(pf.collision_count(), 0);
            assert_eq!(pf.state(), PlannerState::Following);
        }
    }

    #[test]
    fn test_differential_replans_after_delay() {
        let t0 = Instant::now();
        let mut pf = finder(DrivePolicy::Differential);
        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);
        pf.set_obstacles(vec![blocker()]);

        pf.tick(ms(t0, 0));
        assert_eq!(pf.tick(ms(t0, 100)), vec![PlannerEvent::EmergencyStop]);

        // Delay (200ms) not yet elapsed
        assert!(pf.tick(ms(t0, 200)).is_empty());

        let events = pf.tick(ms(t0, 300));
        assert_eq!(count(&events, "NewPath"), 1);
        assert_eq!(pf.state(), PlannerState::Following);
        assert!(pf.path().len() >= 2);
    }

    #[test]
    fn test_differential_does_not_replan_without_collision() {
        let t0 = Instant::now();
        let mut pf = finder(DrivePolicy::Differential);
        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);
        for i in 0..10 {
            assert!(pf.tick(ms(t0, i * 100)).is_empty());
        }
    }

    #[test]
    fn test_differential_recovers_while_estop_asserted() {
        let t0 = Instant::now();
        let mut pf = finder(DrivePolicy::Differential);
        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);
        pf.set_emergency_stop_status(true);

        let events = pf.tick(ms(t0, 0));
        assert_eq!(count(&events, "NewPath"), 1);
        let events = pf.tick(ms(t0, 100));
        assert_eq!(count(&events, "NewPath"), 1);
    }

    #[test]
    fn test_holonomic_replans_every_tick() {
        let t0 = Instant::now();
        let mut pf = finder(DrivePolicy::Holonomic);
        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);
        pf.set_obstacles(vec![blocker()]);

        for i in 0..3 {
            let events = pf.tick(ms(t0, i * 100));
            assert_eq!(count(&events, "NewPath"), 1);
            assert_eq!(count(&events, "EmergencyStop"), 0);
        }
    }

    #[test]
    fn test_blocked_fires_once_after_debounce() {
        let t0 = Instant::now();
        let mut pf = finder(DrivePolicy::Holonomic);
        pf.set_obstacles(vec![cage()]);
        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);

        let mut blocked_at = Vec::new();
        let mut stops = 0;
        for i in 0..=60 {
            let events = pf.tick(ms(t0, i * 100));
            if count(&events, "Blocked") > 0 {
                blocked_at.push(i * 100);
            }
            stops += count(&events, "EmergencyStop");
        }
        assert_eq!(blocked_at, vec![3000]);
        // Stuck for 6 s: one stop, not one per tick
        assert_eq!(stops, 1);
        assert_eq!(pf.state(), PlannerState::EmergencyStopped);
    }

    #[test]
    fn test_successful_replan_cancels_blocked() {
        let t0 = Instant::now();
        let mut pf = finder(DrivePolicy::Holonomic);
        pf.set_obstacles(vec![cage()]);
        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);

        for i in 0..20 {
            pf.tick(ms(t0, i * 100));
        }
        pf.set_obstacles(Vec::new());
        let events = pf.tick(ms(t0, 2000));
        assert_eq!(count(&events, "NewPath"), 1);

        for i in 21..=60 {
            let events = pf.tick(ms(t0, i * 100));
            assert_eq!(count(&events, "Blocked"), 0);
        }
    }

    #[test]
    fn test_new_goal_rearms_blocked_debounce() {
        let t0 = Instant::now();
        let mut pf = finder(DrivePolicy::Holonomic);
        pf.set_obstacles(vec![cage()]);
        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);
        pf.tick(ms(t0, 0));

        pf.set_new_goal(Point2D::new(101.0, 0.0), 0.0);
        let mut blocked_at = Vec::new();
        for i in 25..=60 {
            if count(&pf.tick(ms(t0, i * 100)), "Blocked") > 0 {
                blocked_at.push(i * 100);
            }
        }
        assert_eq!(blocked_at, vec![5500]);
    }

    #[test]
    fn test_segment_completion_moves_to_next() {
        let t0 = Instant::now();
        let mut pf = finder(DrivePolicy::Differential);
        pf.set_obstacles(vec![blocker()]);
        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);
        pf.find_new_path(t0);

        let steps = pf.path().to_vec();
        pf.set_current_pose(steps[0].goal());
        let events = pf.tick(ms(t0, 100));
        assert_eq!(
            events,
            vec![PlannerEvent::MoveTo {
                step: steps[1].clone(),
                final_heading: 0.0,
            }]
        );
        assert_eq!(pf.path().len(), steps.len() - 1);
    }

    #[test]
    fn test_last_step_completion_goes_idle() {
        let t0 = Instant::now();
        let mut pf = finder(DrivePolicy::Differential);
        pf.set_new_goal(Point2D::new(100.0, 0.0), 0.0);
        pf.set_current_pose(Point2D::new(99.0, 0.0));
        assert!(pf.tick(t0).is_empty());
        assert_eq!(pf.state(), PlannerState::Idle);
        assert!(pf.path().is_empty());
    }

    #[test]
    fn test_ignore_static_obstacles() {
        let mut pf = finder(DrivePolicy::Differential);
        pf.set_static_obstacles(vec![blocker()]);
        assert_eq!(pf.working_obstacles().len(), 1);

        pf.set_ignore_static_obstacles(true);
        assert!(pf.working_obstacles().is_empty());

        pf.set_obstacles(vec![blocker()]);
        assert_eq!(pf.working_obstacles().len(), 1);
    }
}
