//! Planner thread: runs a [`PathFinder`] on its own periodic loop.
//!
//! Collaborators (perception, localization, strategy) talk to the thread
//! through a cloneable [`PlannerHandle`]:
//!
//! - commands go in over a crossbeam channel and are applied by the
//!   planner thread only, so state has a single writer
//! - before every tick all queued commands are drained, so the tick sees a
//!   consistent pose + obstacle snapshot
//! - events come out on a crossbeam receiver in emission order
//! - the latest [`PlannerStatus`] is mirrored behind a mutex for cheap polling

use crossbeam_channel::{select, tick, unbounded, Receiver, Sender};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::{check_collision_hysteresis, check_hitbox_width, PlannerConfig};
use crate::core::Point2D;
use crate::error::{MargaError, Result};
use crate::obstacle::{Hitbox, Obstacle};
use crate::trajectory::PathStep;

use super::finder::PathFinder;
use super::state::{PlannerEvent, PlannerState};

/// Command posted to the planner thread.
#[derive(Clone, Debug)]
pub enum PlannerCommand {
    SetObstacles(Vec<Obstacle>),
    SetStaticObstacles(Vec<Obstacle>),
    SetIgnoreStaticObstacles(bool),
    SetCurrentPose(Point2D),
    SetNewGoal { goal: Point2D, final_heading: f32 },
    SetNewGoalStep { step: PathStep, final_heading: f32 },
    SetPath(Vec<PathStep>),
    /// Drop the active path.
    Reset,
    SetHitbox(Hitbox),
    SetCollisionHysteresis(u32),
    SetEmergencyStopStatus(bool),
    /// Re-plan immediately instead of waiting for the policy.
    FindNewPath,
    Shutdown,
}

/// Snapshot of the planner published after every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannerStatus {
    pub state: PlannerState,
    pub pose: Point2D,
    /// Length still to drive on the active path.
    pub remaining_length: f32,
    /// Ticks run since start.
    pub ticks: u64,
}

impl Default for PlannerStatus {
    fn default() -> Self {
        Self {
            state: PlannerState::Idle,
            pose: Point2D::zero(),
            remaining_length: 0.0,
            ticks: 0,
        }
    }
}

/// Cloneable sender side of the planner thread.
#[derive(Clone)]
pub struct PlannerHandle {
    commands: Sender<PlannerCommand>,
    status: Arc<Mutex<PlannerStatus>>,
}

impl PlannerHandle {
    /// Post a raw command.
    pub fn send(&self, command: PlannerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| MargaError::ChannelClosed)
    }

    pub fn set_obstacles(&self, obstacles: Vec<Obstacle>) -> Result<()> {
        self.send(PlannerCommand::SetObstacles(obstacles))
    }

    pub fn set_static_obstacles(&self, obstacles: Vec<Obstacle>) -> Result<()> {
        self.send(PlannerCommand::SetStaticObstacles(obstacles))
    }

    pub fn set_ignore_static_obstacles(&self, ignore: bool) -> Result<()> {
        self.send(PlannerCommand::SetIgnoreStaticObstacles(ignore))
    }

    pub fn set_current_pose(&self, pose: Point2D) -> Result<()> {
        self.send(PlannerCommand::SetCurrentPose(pose))
    }

    pub fn set_new_goal(&self, goal: Point2D, final_heading: f32) -> Result<()> {
        self.send(PlannerCommand::SetNewGoal {
            goal,
            final_heading,
        })
    }

    pub fn set_new_goal_step(&self, step: PathStep, final_heading: f32) -> Result<()> {
        self.send(PlannerCommand::SetNewGoalStep {
            step,
            final_heading,
        })
    }

    pub fn set_path(&self, steps: Vec<PathStep>) -> Result<()> {
        self.send(PlannerCommand::SetPath(steps))
    }

    pub fn reset(&self) -> Result<()> {
        self.send(PlannerCommand::Reset)
    }

    /// Change the hitbox; invalid widths are rejected before sending.
    pub fn set_hitbox(&self, hitbox: Hitbox) -> Result<()> {
        check_hitbox_width(hitbox.width)?;
        self.send(PlannerCommand::SetHitbox(hitbox))
    }

    /// Change the collision hysteresis; zero is rejected before sending.
    pub fn set_collision_hysteresis(&self, ticks: u32) -> Result<()> {
        check_collision_hysteresis(ticks)?;
        self.send(PlannerCommand::SetCollisionHysteresis(ticks))
    }

    pub fn set_emergency_stop_status(&self, asserted: bool) -> Result<()> {
        self.send(PlannerCommand::SetEmergencyStopStatus(asserted))
    }

    pub fn find_new_path(&self) -> Result<()> {
        self.send(PlannerCommand::FindNewPath)
    }

    /// Latest published status.
    pub fn status(&self) -> PlannerStatus {
        *self.status.lock()
    }
}

/// Planner thread handle.
pub struct PlannerThread {
    handle: JoinHandle<()>,
    control: PlannerHandle,
}

impl PlannerThread {
    /// Validate `config` and spawn the planner thread.
    ///
    /// Returns the thread and the receiver for its events.
    pub fn spawn(config: PlannerConfig) -> Result<(Self, Receiver<PlannerEvent>)> {
        let finder = PathFinder::new(config)?;
        let period = finder.config().tick_period();

        let (command_tx, command_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();
        let status = Arc::new(Mutex::new(PlannerStatus::default()));

        let thread_status = Arc::clone(&status);
        let handle = thread::Builder::new()
            .name("marga-planner".into())
            .spawn(move || run_loop(finder, period, command_rx, event_tx, thread_status))?;

        let control = PlannerHandle {
            commands: command_tx,
            status,
        };

        Ok((Self { handle, control }, event_rx))
    }

    /// New handle for posting commands.
    pub fn handle(&self) -> PlannerHandle {
        self.control.clone()
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(self) -> Result<()> {
        // The thread may already be gone; joining reports how it ended
        let _ = self.control.send(PlannerCommand::Shutdown);
        self.handle.join().map_err(|_| MargaError::ThreadPanicked)
    }
}

fn run_loop(
    mut finder: PathFinder,
    period: Duration,
    command_rx: Receiver<PlannerCommand>,
    event_tx: Sender<PlannerEvent>,
    status: Arc<Mutex<PlannerStatus>>,
) {
    info!("[Planner] Thread started, tick every {}ms", period.as_millis());

    let ticker = tick(period);
    let mut ticks: u64 = 0;

    loop {
        let running = select! {
            recv(command_rx) -> msg => match msg {
                Ok(command) => apply(&mut finder, command, &event_tx),
                // Every handle dropped
                Err(_) => false,
            },
            recv(ticker) -> _ => {
                let mut running = true;
                for command in command_rx.try_iter() {
                    if !apply(&mut finder, command, &event_tx) {
                        running = false;
                        break;
                    }
                }
                if running {
                    publish(&event_tx, finder.tick(Instant::now()));
                    ticks += 1;
                    *status.lock() = PlannerStatus {
                        state: finder.state(),
                        pose: finder.current_pose(),
                        remaining_length: finder.path().remaining_length(),
                        ticks,
                    };
                }
                running
            },
        };

        if !running {
            break;
        }
    }

    info!("[Planner] Thread exited after {} ticks", ticks);
}

/// Apply one command. Returns false when the loop should stop.
fn apply(finder: &mut PathFinder, command: PlannerCommand, event_tx: &Sender<PlannerEvent>) -> bool {
    match command {
        PlannerCommand::SetObstacles(obstacles) => finder.set_obstacles(obstacles),
        PlannerCommand::SetStaticObstacles(obstacles) => finder.set_static_obstacles(obstacles),
        PlannerCommand::SetIgnoreStaticObstacles(ignore) => {
            finder.set_ignore_static_obstacles(ignore)
        }
        PlannerCommand::SetCurrentPose(pose) => finder.set_current_pose(pose),
        PlannerCommand::SetNewGoal {
            goal,
            final_heading,
        } => finder.set_new_goal(goal, final_heading),
        PlannerCommand::SetNewGoalStep {
            step,
            final_heading,
        } => finder.set_new_goal_step(step, final_heading),
        PlannerCommand::SetPath(steps) => finder.set_path(steps),
        PlannerCommand::Reset => finder.reset(),
        PlannerCommand::SetHitbox(hitbox) => {
            if let Err(e) = finder.set_hitbox(hitbox) {
                warn!("[Planner] Hitbox rejected: {}", e);
            }
        }
        PlannerCommand::SetCollisionHysteresis(ticks) => {
            if let Err(e) = finder.set_collision_hysteresis(ticks) {
                warn!("[Planner] Hysteresis rejected: {}", e);
            }
        }
        PlannerCommand::SetEmergencyStopStatus(asserted) => {
            finder.set_emergency_stop_status(asserted)
        }
        PlannerCommand::FindNewPath => publish(event_tx, finder.find_new_path(Instant::now())),
        PlannerCommand::Shutdown => {
            debug!("[Planner] Shutdown requested");
            return false;
        }
    }
    true
}

fn publish(event_tx: &Sender<PlannerEvent>, events: Vec<PlannerEvent>) {
    for event in events {
        debug!("[Planner] Event: {}", event.name());
        if event_tx.send(event).is_err() {
            debug!("[Planner] Event receiver dropped");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obstacle::make_obstacle;
    use crate::error::ConfigError;
    use crate::planner::DrivePolicy;

    fn config() -> PlannerConfig {
        PlannerConfig::default()
            .with_hitbox_width(20.0)
            .with_segment_complete_threshold(5.0)
            .with_tick_period_ms(10)
            .with_drive_policy(DrivePolicy::Differential)
    }

    #[test]
    fn test_find_new_path_round_trip() {
        let (planner, events) = PlannerThread::spawn(config()).unwrap();
        let handle = planner.handle();

        handle
            .set_obstacles(vec![make_obstacle(Point2D::new(50.0, 0.0), 20.0, 10.0, None)])
            .unwrap();
        handle.set_new_goal(Point2D::new(100.0, 0.0), 0.25).unwrap();
        handle.find_new_path().unwrap();

        // Ticks may slip in between commands; skip anything before the path
        let (steps, final_heading) = loop {
            match events.recv_timeout(Duration::from_secs(2)).unwrap() {
                PlannerEvent::NewPath {
                    steps,
                    final_heading,
                } => break (steps, final_heading),
                _ => continue,
            }
        };
        assert!(steps.len() >= 2);
        assert_eq!(final_heading, 0.25);

        planner.shutdown().unwrap();
    }

    #[test]
    fn test_status_mirrors_state() {
        let (planner, _events) = PlannerThread::spawn(config()).unwrap();
        let handle = planner.handle();
        handle.set_new_goal(Point2D::new(100.0, 0.0), 0.0).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while handle.status().ticks == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        while handle.status().state != PlannerState::Following && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(handle.status().state, PlannerState::Following);

        planner.shutdown().unwrap();
    }

    #[test]
    fn test_invalid_config_fails_spawn() {
        let result = PlannerThread::spawn(config().with_collision_hysteresis(0));
        assert!(matches!(result, Err(MargaError::Config(_))));
    }

    #[test]
    fn test_reset_goes_idle() {
        let (planner, _events) = PlannerThread::spawn(config()).unwrap();
        let handle = planner.handle();
        handle.set_ignore_static_obstacles(true).unwrap();
        handle.set_new_goal(Point2D::new(100.0, 0.0), 0.0).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while handle.status().state != PlannerState::Following && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        handle.reset().unwrap();
        while handle.status().state != PlannerState::Idle && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(handle.status().state, PlannerState::Idle);

        planner.shutdown().unwrap();
    }

    #[test]
    fn test_handle_rejects_invalid_runtime_settings() {
        let (planner, _events) = PlannerThread::spawn(config()).unwrap();
        let handle = planner.handle();
        assert!(matches!(
            handle.set_collision_hysteresis(0),
            Err(MargaError::Config(ConfigError::ZeroHysteresis))
        ));
        assert!(matches!(
            handle.set_hitbox(Hitbox::new(f32::NAN)),
            Err(MargaError::Config(ConfigError::InvalidHitboxWidth(_)))
        ));
        handle.set_collision_hysteresis(3).unwrap();
        handle.set_hitbox(Hitbox::new(10.0)).unwrap();
        planner.shutdown().unwrap();
    }

    #[test]
    fn test_handle_errors_after_shutdown() {
        let (planner, _events) = PlannerThread::spawn(config()).unwrap();
        let handle = planner.handle();
        planner.shutdown().unwrap();
        assert!(matches!(
            handle.set_emergency_stop_status(true),
            Err(MargaError::ChannelClosed)
        ));
    }
}
