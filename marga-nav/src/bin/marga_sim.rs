//! Marga-Sim: drive a simulated robot through the planner thread.
//!
//! A point robot starts on the left of a 3 m x 2 m playground and is sent to
//! the right side. A static pillar sits in the middle and a second robot
//! crosses the route. Every planner event is logged.
//!
//! Usage:
//!   marga-sim                          # default config, differential policy
//!   marga-sim --config configs/planner.toml
//!   marga-sim --holonomic --speed 0.8

use clap::Parser;
use crossbeam_channel::Receiver;
use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use marga_nav::planner::PlannerHandle;
use marga_nav::{
    make_obstacle, DrivePolicy, Obstacle, PlannerConfig, PlannerEvent, PlannerState,
    PlannerThread, Point2D, Result,
};

/// Simulation step
const SIM_STEP: Duration = Duration::from_millis(20);

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Planner configuration file (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Use the holonomic drive policy
    #[arg(long)]
    holonomic: bool,

    /// Robot speed in m/s
    #[arg(short, long, default_value_t = 0.5)]
    speed: f32,

    /// Give up after this many seconds
    #[arg(short, long, default_value_t = 30.0)]
    timeout: f32,
}

/// Second robot crossing the playground.
struct Crosser {
    start: Point2D,
    velocity: Point2D,
    radius: f32,
}

impl Crosser {
    fn position(&self, elapsed: Duration) -> Point2D {
        self.start + self.velocity * elapsed.as_secs_f32()
    }
}

/// Point robot following the latest planned polyline.
struct SimRobot {
    pose: Point2D,
    speed: f32,
    route: VecDeque<Point2D>,
    halted: bool,
}

impl SimRobot {
    fn follow(&mut self, steps: &[marga_nav::PathStep]) {
        self.route = steps
            .iter()
            .flat_map(|step| step.waypoints().iter().copied())
            .collect();
        self.halted = false;
    }

    fn step(&mut self, dt: Duration) {
        if self.halted {
            return;
        }
        let mut travel = self.speed * dt.as_secs_f32();
        while let Some(target) = self.route.front().copied() {
            let to_target = target - self.pose;
            let dist = to_target.length();
            if dist <= travel {
                self.pose = target;
                travel -= dist;
                self.route.pop_front();
            } else {
                self.pose = self.pose + to_target.normalized() * travel;
                break;
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlannerConfig::load(path)?,
        None => PlannerConfig::default(),
    };
    if args.holonomic {
        config = config.with_drive_policy(DrivePolicy::Holonomic);
    }
    let half_width = config.hitbox().half_width();

    log::info!(
        "Marga-Sim starting: policy={}, speed={:.2} m/s",
        config.drive_policy.name(),
        args.speed
    );

    let (planner, events) = PlannerThread::spawn(config)?;
    let handle = planner.handle();

    let start = Point2D::new(0.2, 1.0);
    let goal = Point2D::new(2.8, 1.0);
    let pillar = make_obstacle(Point2D::new(1.5, 1.0), 0.2, half_width, None);
    let crosser = Crosser {
        start: Point2D::new(2.2, 0.0),
        velocity: Point2D::new(0.0, 0.15),
        radius: 0.15,
    };

    let mut robot = SimRobot {
        pose: start,
        speed: args.speed,
        route: VecDeque::new(),
        halted: true,
    };

    handle.set_static_obstacles(vec![pillar])?;
    handle.set_current_pose(start)?;
    handle.set_new_goal(goal, 0.0)?;
    handle.find_new_path()?;

    let began = Instant::now();
    let timeout = Duration::from_secs_f32(args.timeout.max(0.0));
    let mut moved = false;

    while began.elapsed() < timeout {
        let elapsed = began.elapsed();
        let other = crosser.position(elapsed);
        handle.set_obstacles(vec![crossing_obstacle(&crosser, other, half_width)])?;

        drain_events(&events, &handle, &mut robot)?;

        robot.step(SIM_STEP);
        handle.set_current_pose(robot.pose)?;
        moved |= !robot.route.is_empty();

        if moved && robot.route.is_empty() && handle.status().state == PlannerState::Idle {
            log::info!(
                "Goal reached at {} after {:.1}s",
                robot.pose,
                began.elapsed().as_secs_f32()
            );
            break;
        }

        thread::sleep(SIM_STEP);
    }

    if began.elapsed() >= timeout {
        log::warn!("Timed out at {}", robot.pose);
    }

    planner.shutdown()
}

fn crossing_obstacle(crosser: &Crosser, position: Point2D, half_width: f32) -> Obstacle {
    make_obstacle(position, crosser.radius, half_width, None)
}

fn drain_events(
    events: &Receiver<PlannerEvent>,
    handle: &PlannerHandle,
    robot: &mut SimRobot,
) -> Result<()> {
    for event in events.try_iter() {
        match event {
            PlannerEvent::NewPath {
                steps,
                final_heading,
            } => {
                log::info!(
                    "New path: {} steps, final heading {:.1}°",
                    steps.len(),
                    final_heading.to_degrees()
                );
                robot.follow(&steps);
                handle.set_emergency_stop_status(false)?;
            }
            PlannerEvent::MoveTo { step, .. } => {
                log::info!("Next step: {}", step);
            }
            PlannerEvent::EmergencyStop => {
                log::warn!("Emergency stop at {}", robot.pose);
                robot.halted = true;
                handle.set_emergency_stop_status(true)?;
            }
            PlannerEvent::Blocked => {
                log::warn!("Blocked at {}, waiting for the way to clear", robot.pose);
                robot.halted = true;
            }
        }
    }
    Ok(())
}
