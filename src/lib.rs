//! Light Cycle - a Tron-style arena simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, trails, collisions, elimination)
//! - `config`: Data-driven arena rules and spawn layout
//! - `scoreboard`: Round win tallies across a match

pub mod config;
pub mod scoreboard;
pub mod sim;

pub use config::{ArenaConfig, ConfigError, SpawnPoint};
pub use scoreboard::Scoreboard;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions (world units, centered on the origin)
    pub const ARENA_WIDTH: f32 = 160.0;
    pub const ARENA_HEIGHT: f32 = 100.0;

    /// Light cycle defaults
    pub const BASE_SPEED: f32 = 12.0;
    /// Speed gained per second of play
    pub const SPEED_RAMP: f32 = 0.4;
    /// Side length of a cycle's square hit box
    pub const CYCLE_SIZE: f32 = 1.0;

    /// Minimum time between two accepted turns (seconds)
    pub const TURN_INTERVAL: f32 = 0.15;
    /// Time a retired segment stays harmless to its owner (seconds)
    pub const SELF_GRACE: f32 = 2.0 * TURN_INTERVAL;
    /// Trail wall thickness
    pub const TRAIL_WIDTH: f32 = 0.5;

    /// Axis input below this magnitude is ignored
    pub const INPUT_DEAD_ZONE: f32 = 0.1;
}

/// Player identifier (1-based, matches config spawn order)
pub type PlayerId = u8;

/// Sign of a float as -1, 0 or 1, with a dead zone around zero
#[inline]
pub fn axis_sign(value: f32, dead_zone: f32) -> i8 {
    if value > dead_zone {
        1
    } else if value < -dead_zone {
        -1
    } else {
        0
    }
}
