//! Idle/demo mode - bots that drive light cycles
//!
//! Each tick the arena is rasterized onto a coarse grid. A bot probes a few
//! cells ahead in each heading it could take and steers toward the longest
//! free run. Ties and the occasional wander turn come from a seeded RNG, so a
//! bot match replays exactly for the same seed.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::Grid;
use super::heading::Heading;
use super::state::GameState;
use super::tick::TickInput;
use crate::PlayerId;

/// Cells probed ahead of each candidate heading
pub const LOOKAHEAD_CELLS: u32 = 12;
/// Chance per decision of a random turn when the way ahead is clear
pub const WANDER_CHANCE: f64 = 0.02;

/// Drives a set of players
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    pub players: Vec<PlayerId>,
    pub lookahead: u32,
    pub wander: f64,
}

impl Autopilot {
    pub fn new(seed: u64, players: Vec<PlayerId>) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            players,
            lookahead: LOOKAHEAD_CELLS,
            wander: WANDER_CHANCE,
        }
    }

    /// Rasterize walls, obstacles and cycles into a grid
    pub fn occupancy(state: &GameState) -> Grid {
        let config = &state.config;
        let cell = config.cycle_size.max(config.trail_width);
        let mut grid = Grid::covering(&config.bounds(), cell);
        for obstacle in &config.obstacles {
            grid.block_rect(obstacle);
        }
        for segment in state.trails.iter() {
            grid.block_rect(&segment.rect());
        }
        grid
    }

    /// Write an axis input for every controllable bot
    pub fn fill_input(&mut self, state: &GameState, input: &mut TickInput) {
        let grid = Self::occupancy(state);
        for index in 0..self.players.len() {
            let id = self.players[index];
            let axis = match state.player(id) {
                Some(player) if player.controllable => {
                    let cell = grid.cell_of(player.position);
                    self.choose(&grid, cell, player.heading)
                        .map(Heading::as_input)
                        .unwrap_or(Vec2::ZERO)
                }
                _ => Vec2::ZERO,
            };
            input.set(id, axis);
        }
    }

    /// Heading to turn to from `cell`, or None to keep going straight
    pub fn choose(&mut self, grid: &Grid, cell: IVec2, heading: Heading) -> Option<Heading> {
        let limit = self.lookahead;
        let ahead = grid.free_run(cell, heading, limit);

        let (first, second) = if self.rng.random::<bool>() {
            (heading.turned_left(), heading.turned_right())
        } else {
            (heading.turned_right(), heading.turned_left())
        };
        let first_run = grid.free_run(cell, first, limit);
        let second_run = grid.free_run(cell, second, limit);

        if ahead >= limit {
            // Open road; wander now and then to keep matches varied
            if self.rng.random_bool(self.wander) && first_run >= limit / 2 {
                return Some(first);
            }
            return None;
        }

        let best_side = if second_run > first_run {
            (second, second_run)
        } else {
            (first, first_run)
        };
        (best_side.1 > ahead).then_some(best_side.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArenaConfig, SpawnPoint};
    use crate::consts::SIM_DT;
    use crate::sim::rect::Rect;
    use crate::sim::state::RoundPhase;
    use crate::sim::tick::tick;

    fn open_grid() -> Grid {
        Grid::covering(&Rect::new(Vec2::ZERO, Vec2::splat(20.0)), 1.0)
    }

    #[test]
    fn test_keeps_straight_on_open_road() {
        let mut bot = Autopilot::new(7, vec![1]);
        bot.wander = 0.0;
        assert_eq!(bot.choose(&open_grid(), IVec2::new(20, 5), Heading::Up), None);
    }

    #[test]
    fn test_turns_away_from_wall() {
        let mut bot = Autopilot::new(7, vec![1]);
        let mut grid = open_grid();
        // Wall three cells ahead, arena edge two cells to the left
        grid.block_rect(&Rect::new(Vec2::new(-15.0, -16.5), Vec2::new(5.0, 0.25)));
        let cell = grid.cell_of(Vec2::new(-17.5, -19.5));
        assert_eq!(cell, IVec2::new(2, 0));
        assert_eq!(bot.choose(&grid, cell, Heading::Up), Some(Heading::Right));
    }

    #[test]
    fn test_never_reverses() {
        let mut bot = Autopilot::new(3, vec![1]);
        let grid = open_grid();
        for heading in Heading::ALL {
            for _ in 0..50 {
                if let Some(turn) = bot.choose(&grid, IVec2::new(3, 3), heading) {
                    assert!(turn.is_orthogonal(heading));
                }
            }
        }
    }

    #[test]
    fn test_bot_match_is_reproducible() {
        fn play(seed: u64) -> (u64, Option<crate::sim::RoundOutcome>) {
            let config = ArenaConfig::with_players(vec![
                SpawnPoint::new(1, Vec2::new(-20.0, 0.0), Heading::Up),
                SpawnPoint::new(2, Vec2::new(20.0, 0.0), Heading::Down),
            ]);
            let mut state = GameState::new(config);
            state.start_round().unwrap();
            let mut bot = Autopilot::new(seed, vec![1, 2]);
            let mut input = TickInput::new(2);
            while state.phase == RoundPhase::Active && state.time_ticks < 20_000 {
                bot.fill_input(&state, &mut input);
                tick(&mut state, &input, SIM_DT);
            }
            (state.time_ticks, state.arbiter.outcome())
        }

        assert_eq!(play(42), play(42));
    }
}
