//! Arena rules and spawn layout
//!
//! Loaded from JSON or built in code. Validated when a round starts, never
//! mid-round.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::PlayerId;
use crate::consts::*;
use crate::sim::{Heading, Rect};

/// Errors that prevent a round from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arena needs at least one player")]
    NoPlayers,
    #[error("player id {id} is outside 1..={count}")]
    PlayerIdOutOfRange { id: PlayerId, count: usize },
    #[error("player id {0} is configured more than once")]
    DuplicatePlayerId(PlayerId),
    #[error("player {0} spawns outside the arena or inside an obstacle")]
    SpawnOutsideArena(PlayerId),
    #[error("invalid {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where and how a player enters the arena
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub id: PlayerId,
    pub position: Vec2,
    pub heading: Heading,
}

impl SpawnPoint {
    pub fn new(id: PlayerId, position: Vec2, heading: Heading) -> Self {
        Self {
            id,
            position,
            heading,
        }
    }
}

/// Complete rule set for one arena
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Arena width (x extent, centered on origin)
    pub width: f32,
    /// Arena height (y extent, centered on origin)
    pub height: f32,

    // === Movement ===
    pub base_speed: f32,
    /// Speed gained per second
    pub speed_ramp: f32,
    /// Optional speed cap (None = keep accelerating)
    pub max_speed: Option<f32>,
    pub cycle_size: f32,
    /// Minimum seconds between accepted turns
    pub turn_interval: f32,
    pub input_dead_zone: f32,

    // === Trails ===
    pub trail_width: f32,
    /// Seconds a retired segment stays harmless to its owner
    pub self_grace: f32,

    // === Layout ===
    pub players: Vec<SpawnPoint>,
    /// Static walls inside the arena
    pub obstacles: Vec<Rect>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,

            base_speed: BASE_SPEED,
            speed_ramp: SPEED_RAMP,
            max_speed: None,
            cycle_size: CYCLE_SIZE,
            turn_interval: TURN_INTERVAL,
            input_dead_zone: INPUT_DEAD_ZONE,

            trail_width: TRAIL_WIDTH,
            self_grace: SELF_GRACE,

            players: vec![
                SpawnPoint::new(1, Vec2::new(-ARENA_WIDTH / 4.0, 0.0), Heading::Up),
                SpawnPoint::new(2, Vec2::new(ARENA_WIDTH / 4.0, 0.0), Heading::Down),
            ],
            obstacles: Vec::new(),
        }
    }
}

impl ArenaConfig {
    /// Default rules with a custom spawn layout
    pub fn with_players(players: Vec<SpawnPoint>) -> Self {
        Self {
            players,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "Loaded arena config: {}x{}, {} players, {} obstacles",
            config.width,
            config.height,
            config.players.len(),
            config.obstacles.len()
        );
        Ok(config)
    }

    /// Arena bounds as a rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(self.width, self.height) / 2.0)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Check everything a round needs before it can begin
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("base_speed", self.base_speed)?;
        positive("cycle_size", self.cycle_size)?;
        positive("trail_width", self.trail_width)?;
        positive("self_grace", self.self_grace)?;
        non_negative("speed_ramp", self.speed_ramp)?;
        non_negative("turn_interval", self.turn_interval)?;
        non_negative("input_dead_zone", self.input_dead_zone)?;
        if let Some(max) = self.max_speed {
            if !(max >= self.base_speed) {
                return Err(ConfigError::InvalidValue {
                    field: "max_speed",
                    reason: "must be at least base_speed",
                });
            }
        }
        for obstacle in &self.obstacles {
            if !(obstacle.half.x > 0.0 && obstacle.half.y > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field: "obstacles",
                    reason: "obstacle extents must be positive",
                });
            }
        }

        if self.players.is_empty() {
            return Err(ConfigError::NoPlayers);
        }

        let count = self.players.len();
        let bounds = self.bounds();
        let half = Vec2::splat(self.cycle_size / 2.0);
        let mut seen = vec![false; count];
        for spawn in &self.players {
            let index = usize::from(spawn.id);
            if index == 0 || index > count {
                return Err(ConfigError::PlayerIdOutOfRange {
                    id: spawn.id,
                    count,
                });
            }
            if std::mem::replace(&mut seen[index - 1], true) {
                return Err(ConfigError::DuplicatePlayerId(spawn.id));
            }

            let body = Rect::new(spawn.position, half);
            if !bounds.contains_rect(&body) || self.obstacles.iter().any(|o| o.intersects(&body)) {
                return Err(ConfigError::SpawnOutsideArena(spawn.id));
            }
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: "must be positive",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: "must not be negative",
        })
    }
}
