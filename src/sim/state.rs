//! Game state and round lifecycle
//!
//! `GameState` is the single simulation context: players, trails, pending
//! retags, the elimination arbiter and the clock. The host loop owns it and
//! passes it to [`tick`](super::tick::tick) every step.

use serde::{Deserialize, Serialize};

use super::arbiter::{Arbiter, RoundOutcome};
use super::collision::DeathCause;
use super::heading::Heading;
use super::player::Player;
use super::rect::Rect;
use super::timer::RetagQueue;
use super::trail::{SegmentId, TrailManager};
use crate::config::{ArenaConfig, ConfigError};
use crate::scoreboard::Scoreboard;
use crate::PlayerId;

/// Where the round lifecycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Start screen; nothing is simulated
    Idle,
    /// Round in progress (may be paused via the time scale)
    Active,
    /// Winner decided, clock frozen
    RoundOver,
}

/// Everything presentation collaborators need to hear about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted {
        round: u32,
    },
    RoundReset {
        round: u32,
    },
    SegmentCreated {
        segment: SegmentId,
        owner: PlayerId,
        heading: Heading,
        rect: Rect,
    },
    SegmentGrown {
        segment: SegmentId,
        rect: Rect,
    },
    /// Grace period over; the segment now blocks its owner too
    SegmentSolidified {
        segment: SegmentId,
        owner: PlayerId,
    },
    PlayerTurned {
        player: PlayerId,
        heading: Heading,
    },
    PlayerEliminated {
        player: PlayerId,
        cause: DeathCause,
    },
    RoundEnded {
        outcome: RoundOutcome,
    },
    Paused,
    Resumed,
    ReturnedToLobby,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: ArenaConfig,
    pub phase: RoundPhase,
    /// Rounds started so far (1-based once a round begins)
    pub round: u32,
    /// 0 = paused or over, 1 = running
    pub time_scale: f32,
    /// Simulated seconds since the round began
    pub sim_time: f32,
    /// Ticks simulated this round
    pub time_ticks: u64,
    /// Sorted by id
    pub players: Vec<Player>,
    pub trails: TrailManager,
    pub retags: RetagQueue,
    pub arbiter: Arbiter,
    pub scoreboard: Scoreboard,
    /// Events raised outside `tick`, delivered by the next `tick`
    pending: Vec<GameEvent>,
}

impl GameState {
    /// Build the context on the start screen. Nothing moves until
    /// [`GameState::start_round`] succeeds.
    pub fn new(config: ArenaConfig) -> Self {
        let players = Self::spawn_players(&config);
        let count = players.len();

        Self {
            phase: RoundPhase::Idle,
            round: 0,
            time_scale: 0.0,
            sim_time: 0.0,
            time_ticks: 0,
            players,
            trails: TrailManager::new(),
            retags: RetagQueue::new(),
            arbiter: Arbiter::new(count),
            scoreboard: Scoreboard::new(count),
            pending: Vec::new(),
            config,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Active && self.time_scale > 0.0
    }

    /// Begin a round from any phase. Fails, leaving the state untouched, if
    /// the configuration cannot support a round.
    ///
    /// The roster is rebuilt from the validated config, so edits made to
    /// `config` since construction take effect here.
    pub fn start_round(&mut self) -> Result<(), ConfigError> {
        if let Err(err) = self.config.validate() {
            log::warn!("Round rejected: {}", err);
            return Err(err);
        }
        self.rebuild_roster();
        self.begin_round();
        log::info!(
            "Round {} started with {} players",
            self.round,
            self.players.len()
        );
        self.pending.push(GameEvent::RoundStarted { round: self.round });
        Ok(())
    }

    /// Retry: wipe trails, respawn everyone and resume. Ignored on the start
    /// screen since no validated round exists yet.
    pub fn reset_round(&mut self) {
        if self.phase == RoundPhase::Idle {
            log::warn!("Reset requested before any round started");
            return;
        }
        self.begin_round();
        log::info!("Round {} (retry)", self.round);
        self.pending.push(GameEvent::RoundReset { round: self.round });
    }

    pub fn pause_round(&mut self) {
        if self.phase != RoundPhase::Active || self.time_scale == 0.0 {
            log::debug!("Pause ignored in {:?}", self.phase);
            return;
        }
        self.time_scale = 0.0;
        log::info!("Paused");
        self.pending.push(GameEvent::Paused);
    }

    pub fn resume_round(&mut self) {
        if self.phase != RoundPhase::Active || self.time_scale > 0.0 {
            log::debug!("Resume ignored in {:?}", self.phase);
            return;
        }
        self.time_scale = 1.0;
        log::info!("Resumed");
        self.pending.push(GameEvent::Resumed);
    }

    /// Back to the start screen: everyone respawned, no trails, clock stopped
    pub fn return_to_lobby(&mut self) {
        self.clear_round();
        self.phase = RoundPhase::Idle;
        self.time_scale = 0.0;
        log::info!("Returned to lobby");
        self.pending.push(GameEvent::ReturnedToLobby);
    }

    /// Take events raised by lifecycle commands
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Called by the tick once the arbiter decides the round
    pub(crate) fn finish_round(&mut self, outcome: RoundOutcome) {
        self.phase = RoundPhase::RoundOver;
        self.time_scale = 0.0;
        for player in &mut self.players {
            player.controllable = false;
        }
        self.scoreboard.record(self.round, outcome);
        match outcome.winner() {
            Some(id) => log::info!("Round {}: player {} wins", self.round, id),
            None => log::info!("Round {}: draw", self.round),
        }
    }

    /// Players sorted by id, standing at their spawn points
    fn spawn_players(config: &ArenaConfig) -> Vec<Player> {
        let mut players: Vec<Player> = config
            .players
            .iter()
            .map(|spawn| Player::new(*spawn, config.base_speed))
            .collect();
        players.sort_by_key(|p| p.id);
        players
    }

    /// Players and arbiter slots from the current config. Tallies survive
    /// unless the player count changed.
    fn rebuild_roster(&mut self) {
        self.players = Self::spawn_players(&self.config);
        let count = self.players.len();
        self.arbiter = Arbiter::new(count);
        if self.scoreboard.wins.len() != count {
            log::info!("Roster now has {} players, scoreboard cleared", count);
            self.scoreboard = Scoreboard::new(count);
        }
    }

    fn begin_round(&mut self) {
        self.clear_round();
        self.round += 1;
        for player in &mut self.players {
            player.controllable = true;
        }
        self.phase = RoundPhase::Active;
        self.time_scale = 1.0;
    }

    fn clear_round(&mut self) {
        self.retags.cancel_all();
        self.trails.clear();
        self.arbiter.reset_round();
        let base_speed = self.config.base_speed;
        for player in &mut self.players {
            player.reset(base_speed);
        }
        self.sim_time = 0.0;
        self.time_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpawnPoint;
    use glam::Vec2;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(ArenaConfig::default());
        assert_eq!(state.phase, RoundPhase::Idle);
        assert_eq!(state.time_scale, 0.0);
        assert!(state.players.iter().all(|p| !p.controllable));
    }

    #[test]
    fn test_start_round_rejects_bad_config() {
        let mut state = GameState::new(ArenaConfig::with_players(Vec::new()));
        assert!(matches!(state.start_round(), Err(ConfigError::NoPlayers)));
        assert_eq!(state.phase, RoundPhase::Idle);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_start_round_rejects_id_out_of_range() {
        let config = ArenaConfig::with_players(vec![SpawnPoint::new(
            4,
            Vec2::ZERO,
            Heading::Up,
        )]);
        let mut state = GameState::new(config);
        assert!(state.start_round().is_err());
        assert_eq!(state.round, 0);
    }

    #[test]
    fn test_start_round_uses_corrected_roster() {
        let mut config = ArenaConfig::default();
        config.players[1].id = 1;
        let mut state = GameState::new(config);
        assert!(matches!(
            state.start_round(),
            Err(ConfigError::DuplicatePlayerId(1))
        ));

        state.config.players[1].id = 2;
        state.start_round().unwrap();
        let ids: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(state.arbiter.alive_count(), 2);
        assert_eq!(state.scoreboard.wins.len(), 2);
    }

    #[test]
    fn test_start_round_picks_up_new_spawns() {
        let mut state = GameState::new(ArenaConfig::default());
        state.start_round().unwrap();
        state.scoreboard.record(1, RoundOutcome::Winner(1));

        state.config.players.push(SpawnPoint::new(3, Vec2::new(0.0, 30.0), Heading::Left));
        state.start_round().unwrap();
        assert_eq!(state.players.len(), 3);
        assert_eq!(state.player(3).unwrap().heading, Heading::Left);
        assert_eq!(state.arbiter.alive_count(), 3);
        assert_eq!(state.scoreboard.rounds_played(), 0);

        // Same count again: tallies are kept
        state.scoreboard.record(2, RoundOutcome::Winner(3));
        state.config.players[2].position = Vec2::new(0.0, -30.0);
        state.start_round().unwrap();
        assert_eq!(state.player(3).unwrap().position, Vec2::new(0.0, -30.0));
        assert_eq!(state.scoreboard.wins(3), 1);
    }

    #[test]
    fn test_lifecycle_events() {
        let mut state = GameState::new(ArenaConfig::default());
        state.reset_round();
        assert!(state.drain_events().is_empty());

        state.start_round().unwrap();
        state.pause_round();
        state.pause_round();
        state.resume_round();
        state.reset_round();
        state.return_to_lobby();
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::RoundStarted { round: 1 },
                GameEvent::Paused,
                GameEvent::Resumed,
                GameEvent::RoundReset { round: 2 },
                GameEvent::ReturnedToLobby,
            ]
        );
        assert_eq!(state.phase, RoundPhase::Idle);
        assert!(!state.is_running());
    }
}
