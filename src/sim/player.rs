//! Light cycle entity and its per-tick movement state machine

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::heading::Heading;
use super::rect::Rect;
use crate::PlayerId;
use crate::config::{ArenaConfig, SpawnPoint};

/// A light cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub position: Vec2,
    pub heading: Heading,
    pub speed: f32,
    /// `heading.unit() * speed`
    pub movement_direction: Vec2,
    /// Seconds since the last accepted turn
    pub turn_debounce: f32,
    pub alive: bool,
    /// Accepts input and moves (false before the round starts and after death)
    pub controllable: bool,
    /// Where this cycle starts every round
    pub spawn: SpawnPoint,
}

/// What a single movement step did
#[derive(Debug, Clone, Copy, Default)]
pub struct StepOutcome {
    /// New heading if a turn was accepted this tick
    pub turned: Option<Heading>,
    /// Displacement applied to the position
    pub displacement: Vec2,
}

impl Player {
    pub fn new(spawn: SpawnPoint, base_speed: f32) -> Self {
        Self {
            id: spawn.id,
            position: spawn.position,
            heading: spawn.heading,
            speed: base_speed,
            movement_direction: spawn.heading.unit() * base_speed,
            turn_debounce: 0.0,
            alive: true,
            controllable: false,
            spawn,
        }
    }

    /// Back to the spawn configuration (alive, base speed, not yet moving)
    pub fn reset(&mut self, base_speed: f32) {
        *self = Self::new(self.spawn, base_speed);
    }

    /// Square hit box around the current position
    pub fn hit_box(&self, size: f32) -> Rect {
        Rect::new(self.position, Vec2::splat(size / 2.0))
    }

    /// Hit box swept from `from` to the current position
    pub fn swept_box(&self, from: Vec2, size: f32) -> Rect {
        let half = Vec2::splat(size / 2.0);
        Rect::new(from, half).union(&Rect::new(self.position, half))
    }

    /// Accept a turn if debounce allows and the input asks for one.
    ///
    /// The input's component along the current travel axis is ignored, so a
    /// reversal can never be requested.
    pub fn try_turn(&mut self, input: Vec2, config: &ArenaConfig) -> Option<Heading> {
        if self.turn_debounce <= config.turn_interval {
            return None;
        }
        let heading = Heading::from_axis_input(self.heading, input, config.input_dead_zone)?;
        debug_assert!(heading.is_orthogonal(self.heading));
        self.heading = heading;
        self.movement_direction = heading.unit() * self.speed;
        self.turn_debounce = 0.0;
        Some(heading)
    }

    /// Apply the speed ramp and rescale the velocity
    pub fn accelerate(&mut self, dt: f32, config: &ArenaConfig) {
        let mut speed = self.speed + config.speed_ramp * dt;
        if let Some(max) = config.max_speed {
            speed = speed.min(max).max(self.speed);
        }
        self.speed = speed;
        self.movement_direction = self.heading.unit() * self.speed;
    }

    /// Debounce, turn and speed update for one tick. Position is not touched;
    /// the caller grows the trail and then calls [`Player::advance`].
    pub fn steer(&mut self, input: Vec2, dt: f32, config: &ArenaConfig) -> StepOutcome {
        if !self.controllable {
            return StepOutcome::default();
        }
        self.turn_debounce += dt;
        let turned = self.try_turn(input, config);
        self.accelerate(dt, config);
        StepOutcome {
            turned,
            displacement: self.movement_direction * dt,
        }
    }

    /// Move by a displacement computed in [`Player::steer`]
    pub fn advance(&mut self, displacement: Vec2) {
        self.position += displacement;
    }

    /// Stop accepting input (elimination or round end)
    pub fn eliminate(&mut self) {
        self.alive = false;
        self.controllable = false;
    }
}
