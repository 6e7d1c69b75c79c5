//! Planner configuration.
//!
//! All values have defaults, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! hitbox_width = 0.30
//! replan_delay_ms = 200
//! blocked_delay_ms = 3000
//! tick_period_ms = 100
//! collision_hysteresis = 2
//! ignore_static_obstacles = false
//! segment_complete_threshold = 0.005
//! drive_policy = "differential"
//! ```

use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{ConfigError, Result};
use crate::obstacle::Hitbox;
use crate::planner::DrivePolicy;

/// Control loop configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Robot width used to buffer trajectories (default: 0.30)
    #[serde(default = "default_hitbox_width")]
    pub hitbox_width: f32,

    /// Delay before re-planning after a confirmed collision, ms (default: 200)
    #[serde(default = "default_replan_delay_ms")]
    pub replan_delay_ms: u64,

    /// How long planning must keep failing before `Blocked`, ms (default: 3000)
    #[serde(default = "default_blocked_delay_ms")]
    pub blocked_delay_ms: u64,

    /// Control loop period, ms (default: 100)
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u64,

    /// Consecutive colliding ticks before an emergency stop (default: 2)
    #[serde(default = "default_collision_hysteresis")]
    pub collision_hysteresis: u32,

    /// Plan against dynamic obstacles only (default: false)
    #[serde(default)]
    pub ignore_static_obstacles: bool,

    /// Remaining length below which a segment counts as driven (default: 0.005)
    #[serde(default = "default_segment_complete_threshold")]
    pub segment_complete_threshold: f32,

    /// Reaction to collisions (default: differential)
    #[serde(default)]
    pub drive_policy: DrivePolicy,
}

fn default_hitbox_width() -> f32 {
    0.30
}

fn default_replan_delay_ms() -> u64 {
    200
}

fn default_blocked_delay_ms() -> u64 {
    3000
}

fn default_tick_period_ms() -> u64 {
    100
}

fn default_collision_hysteresis() -> u32 {
    2
}

fn default_segment_complete_threshold() -> f32 {
    0.005
}

pub(crate) fn check_collision_hysteresis(ticks: u32) -> std::result::Result<(), ConfigError> {
    if ticks == 0 {
        return Err(ConfigError::ZeroHysteresis);
    }
    Ok(())
}

pub(crate) fn check_hitbox_width(width: f32) -> std::result::Result<(), ConfigError> {
    if !width.is_finite() || width < 0.0 {
        return Err(ConfigError::InvalidHitboxWidth(width));
    }
    Ok(())
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            hitbox_width: default_hitbox_width(),
            replan_delay_ms: default_replan_delay_ms(),
            blocked_delay_ms: default_blocked_delay_ms(),
            tick_period_ms: default_tick_period_ms(),
            collision_hysteresis: default_collision_hysteresis(),
            ignore_static_obstacles: false,
            segment_complete_threshold: default_segment_complete_threshold(),
            drive_policy: DrivePolicy::default(),
        }
    }
}

impl PlannerConfig {
    /// Parse from a TOML string and validate.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PlannerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file and validate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        info!("[Config] Loaded planner config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject values the control loop cannot work with.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        check_collision_hysteresis(self.collision_hysteresis)?;
        check_hitbox_width(self.hitbox_width)?;
        if !self.segment_complete_threshold.is_finite() || self.segment_complete_threshold <= 0.0 {
            return Err(ConfigError::InvalidCompletionThreshold(
                self.segment_complete_threshold,
            ));
        }
        Ok(())
    }

    pub fn with_hitbox_width(mut self, width: f32) -> Self {
        self.hitbox_width = width;
        self
    }

    pub fn with_replan_delay_ms(mut self, ms: u64) -> Self {
        self.replan_delay_ms = ms;
        self
    }

    pub fn with_blocked_delay_ms(mut self, ms: u64) -> Self {
        self.blocked_delay_ms = ms;
        self
    }

    pub fn with_tick_period_ms(mut self, ms: u64) -> Self {
        self.tick_period_ms = ms;
        self
    }

    pub fn with_collision_hysteresis(mut self, ticks: u32) -> Self {
        self.collision_hysteresis = ticks;
        self
    }

    pub fn with_ignore_static_obstacles(mut self, ignore: bool) -> Self {
        self.ignore_static_obstacles = ignore;
        self
    }

    pub fn with_segment_complete_threshold(mut self, threshold: f32) -> Self {
        self.segment_complete_threshold = threshold;
        self
    }

    pub fn with_drive_policy(mut self, policy: DrivePolicy) -> Self {
        self.drive_policy = policy;
        self
    }

    /// Robot hitbox.
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.hitbox_width)
    }

    pub fn replan_delay(&self) -> Duration {
        Duration::from_millis(self.replan_delay_ms)
    }

    pub fn blocked_delay(&self) -> Duration {
        Duration::from_millis(self.blocked_delay_ms)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }
}
