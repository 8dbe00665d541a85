//! Simulation tick
//!
//! Advances the arena by one step. Order within a tick:
//! 1. simulation clock advances and due grace-period retags fire
//! 2. trail colliders are snapshotted
//! 3. each cycle (by id) steers, grows its active segment, then moves
//! 4. every cycle is collision-checked against the snapshot and the
//!    post-move positions of the others
//! 5. all deaths from this tick go to the arbiter as one batch

use glam::Vec2;

use super::collision::CollisionWorld;
use super::state::{GameEvent, GameState};
use crate::PlayerId;

/// Logical input for one tick: a 2-axis vector per player
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Indexed by `id - 1`; missing entries read as zero
    pub axes: Vec<Vec2>,
}

impl TickInput {
    pub fn new(player_count: usize) -> Self {
        Self {
            axes: vec![Vec2::ZERO; player_count],
        }
    }

    pub fn axis(&self, id: PlayerId) -> Vec2 {
        usize::from(id)
            .checked_sub(1)
            .and_then(|i| self.axes.get(i))
            .copied()
            .unwrap_or(Vec2::ZERO)
    }

    pub fn set(&mut self, id: PlayerId, axis: Vec2) {
        let Some(index) = usize::from(id).checked_sub(1) else {
            return;
        };
        if index >= self.axes.len() {
            self.axes.resize(index + 1, Vec2::ZERO);
        }
        self.axes[index] = axis;
    }

    pub fn clear(&mut self) {
        self.axes.fill(Vec2::ZERO);
    }
}

/// Advance the game state by `dt` seconds of real time.
///
/// Returns the events raised since the previous call, lifecycle events first.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = state.drain_events();

    if !state.is_running() {
        return events;
    }
    let dt = dt * state.time_scale;
    if dt <= 0.0 {
        return events;
    }

    state.time_ticks += 1;
    state.sim_time += dt;

    // Grace periods that ran out
    for segment in state.retags.pop_due(state.sim_time) {
        if state.trails.retag_after_grace(segment) {
            if let Some(owner) = state.trails.get(segment).map(|s| s.owner) {
                events.push(GameEvent::SegmentSolidified { segment, owner });
            }
        }
    }

    let mut world = CollisionWorld::snapshot(
        state.config.bounds(),
        &state.config.obstacles,
        &state.trails,
    );

    // --- MOVEMENT ---
    let config = &state.config;
    let mut starts: Vec<(PlayerId, Vec2)> = Vec::with_capacity(state.players.len());
    for player in state.players.iter_mut() {
        if !player.controllable {
            continue;
        }
        let start = player.position;

        // First tick of the round: lay the spawn segment
        if state.trails.active_for(player.id).is_none() {
            let (segment, _) = state.trails.create_segment(
                player.id,
                player.position,
                player.heading,
                config.trail_width,
            );
            if let Some(s) = state.trails.get(segment) {
                events.push(GameEvent::SegmentCreated {
                    segment,
                    owner: player.id,
                    heading: player.heading,
                    rect: s.rect(),
                });
            }
        }

        let step = player.steer(input.axis(player.id), dt, config);

        if let Some(heading) = step.turned {
            let (segment, frozen) = state.trails.create_segment(
                player.id,
                player.position,
                heading,
                config.trail_width,
            );
            if let Some(frozen) = frozen {
                state.retags.schedule(frozen, state.sim_time + config.self_grace);
            }
            log::debug!("Player {} turned {:?}", player.id, heading);
            events.push(GameEvent::PlayerTurned {
                player: player.id,
                heading,
            });
            if let Some(s) = state.trails.get(segment) {
                events.push(GameEvent::SegmentCreated {
                    segment,
                    owner: player.id,
                    heading,
                    rect: s.rect(),
                });
            }
        }

        if let Some(segment) = state.trails.active_for(player.id).map(|s| s.id) {
            if let Some(rect) = state.trails.grow_segment(segment, step.displacement) {
                events.push(GameEvent::SegmentGrown { segment, rect });
            }
        }

        player.advance(step.displacement);
        starts.push((player.id, start));
    }

    // --- COLLISION ---
    let size = state.config.cycle_size;
    world.heads = state
        .players
        .iter()
        .filter(|p| p.controllable)
        .map(|p| (p.id, p.hit_box(size)))
        .collect();

    let mut deaths = Vec::new();
    for (id, start) in starts {
        let Some(player) = state.player(id) else {
            continue;
        };
        let swept = player.swept_box(start, size);
        let head = player.hit_box(size);
        if let Some(cause) = world.check(id, &swept, &head) {
            deaths.push((id, cause));
        }
    }

    if deaths.is_empty() {
        return events;
    }

    for &(id, cause) in &deaths {
        if let Some(player) = state.player_mut(id) {
            player.eliminate();
        }
        log::info!("Player {} eliminated: {:?}", id, cause);
        events.push(GameEvent::PlayerEliminated { player: id, cause });
    }

    let ids: Vec<PlayerId> = deaths.iter().map(|(id, _)| *id).collect();
    if let Some(outcome) = state.arbiter.report_deaths(&ids) {
        state.finish_round(outcome);
        events.push(GameEvent::RoundEnded { outcome });
    }

    events
}
