//! Elimination bookkeeping and the win decision
//!
//! Deaths that happen in the same tick are reported as one batch and
//! evaluated once, so the last two cycles colliding head-on is a draw rather
//! than a win for whichever report happened to run first.

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Winner(PlayerId),
    /// Everybody left died in the same evaluation
    Draw,
}

impl RoundOutcome {
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            RoundOutcome::Winner(id) => Some(*id),
            RoundOutcome::Draw => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArbiterState {
    Active,
    RoundOver(RoundOutcome),
}

/// Tracks which players are still in the round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arbiter {
    /// Indexed by `id - 1`
    players_alive: Vec<bool>,
    state: ArbiterState,
}

impl Arbiter {
    pub fn new(player_count: usize) -> Self {
        Self {
            players_alive: vec![true; player_count],
            state: ArbiterState::Active,
        }
    }

    pub fn state(&self) -> ArbiterState {
        self.state
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.state {
            ArbiterState::RoundOver(outcome) => Some(outcome),
            ArbiterState::Active => None,
        }
    }

    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.slot(id).is_some_and(|i| self.players_alive[i])
    }

    pub fn alive_count(&self) -> usize {
        self.players_alive.iter().filter(|&&alive| alive).count()
    }

    /// The only remaining player, if exactly one is left
    pub fn sole_survivor(&self) -> Option<PlayerId> {
        let mut alive = self
            .players_alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive);
        match (alive.next(), alive.next()) {
            (Some((index, _)), None) => Some(index as PlayerId + 1),
            _ => None,
        }
    }

    /// Mark one player dead. Returns the outcome if this ended the round.
    pub fn report_death(&mut self, id: PlayerId) -> Option<RoundOutcome> {
        self.report_deaths(&[id])
    }

    /// Mark several players dead and evaluate the round once.
    ///
    /// Repeated or unknown ids are ignored. Returns the outcome only on the
    /// `Active -> RoundOver` transition.
    pub fn report_deaths(&mut self, ids: &[PlayerId]) -> Option<RoundOutcome> {
        let mut changed = false;
        for &id in ids {
            match self.slot(id) {
                Some(i) if self.players_alive[i] => {
                    self.players_alive[i] = false;
                    changed = true;
                }
                Some(_) => log::debug!("Player {} already eliminated", id),
                None => log::warn!("Death reported for unknown player {}", id),
            }
        }

        if !changed || self.state != ArbiterState::Active {
            return None;
        }

        let outcome = match (self.alive_count(), self.sole_survivor()) {
            (0, _) => RoundOutcome::Draw,
            (1, Some(winner)) if self.players_alive.len() > 1 => RoundOutcome::Winner(winner),
            _ => return None,
        };
        self.state = ArbiterState::RoundOver(outcome);
        Some(outcome)
    }

    /// Everyone alive again, round active
    pub fn reset_round(&mut self) {
        self.players_alive.fill(true);
        self.state = ArbiterState::Active;
    }

    fn slot(&self, id: PlayerId) -> Option<usize> {
        let index = usize::from(id).checked_sub(1)?;
        (index < self.players_alive.len()).then_some(index)
    }
}
