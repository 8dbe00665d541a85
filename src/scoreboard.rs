//! Match scoreboard
//!
//! Tallies round wins per player across retries and keeps the most recent
//! results.

use serde::{Deserialize, Serialize};

use crate::PlayerId;
use crate::sim::RoundOutcome;

/// Maximum number of round results to keep
pub const MAX_HISTORY: usize = 10;

/// A single finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub outcome: RoundOutcome,
}

/// Win tallies for one match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Indexed by `id - 1`
    pub wins: Vec<u32>,
    pub draws: u32,
    /// Newest first
    pub history: Vec<RoundResult>,
}

impl Scoreboard {
    pub fn new(player_count: usize) -> Self {
        Self {
            wins: vec![0; player_count],
            draws: 0,
            history: Vec::with_capacity(MAX_HISTORY),
        }
    }

    /// Count a finished round
    pub fn record(&mut self, round: u32, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Winner(id) => {
                match usize::from(id).checked_sub(1).and_then(|i| self.wins.get_mut(i)) {
                    Some(wins) => *wins += 1,
                    None => log::warn!("Scoreboard has no slot for player {}", id),
                }
            }
            RoundOutcome::Draw => self.draws += 1,
        }

        self.history.insert(0, RoundResult { round, outcome });
        self.history.truncate(MAX_HISTORY);
    }

    pub fn wins(&self, id: PlayerId) -> u32 {
        usize::from(id)
            .checked_sub(1)
            .and_then(|i| self.wins.get(i))
            .copied()
            .unwrap_or(0)
    }

    pub fn rounds_played(&self) -> u32 {
        self.wins.iter().sum::<u32>() + self.draws
    }

    /// Player with the most wins; None on a tie or before any win
    pub fn leader(&self) -> Option<PlayerId> {
        let best = *self.wins.iter().max()?;
        if best == 0 {
            return None;
        }
        let mut leaders = self.wins.iter().enumerate().filter(|(_, w)| **w == best);
        match (leaders.next(), leaders.next()) {
            (Some((index, _)), None) => Some(index as PlayerId + 1),
            _ => None,
        }
    }

    pub fn last_result(&self) -> Option<RoundResult> {
        self.history.first().copied()
    }
}
