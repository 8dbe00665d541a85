//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only (autopilot)
//! - Stable iteration order (by player id, then segment id)
//! - No rendering or platform dependencies

pub mod arbiter;
pub mod autopilot;
pub mod collision;
pub mod grid;
pub mod heading;
pub mod player;
pub mod rect;
pub mod state;
pub mod tick;
pub mod timer;
pub mod trail;

pub use arbiter::{Arbiter, ArbiterState, RoundOutcome};
pub use autopilot::Autopilot;
pub use collision::{CollisionWorld, DeathCause};
pub use grid::Grid;
pub use heading::{Axis, Heading};
pub use player::Player;
pub use rect::Rect;
pub use state::{GameEvent, GameState, RoundPhase};
pub use tick::{TickInput, tick};
pub use timer::RetagQueue;
pub use trail::{SegmentId, TrailManager, TrailSegment};
