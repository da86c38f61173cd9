//! Score keeping and the Playing / MatchOver state machine.

use crate::types::*;

/// Scores plus the current phase
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub score: Score,
    pub phase: Phase,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    pub fn new() -> Self {
        MatchState {
            score: Score::default(),
            phase: Phase::Playing,
        }
    }

    /// Award a point and move to `MatchOver` once either side reaches
    /// `winning_score`. Returns the winner when this point ended the match.
    pub fn record_point(&mut self, scorer: Side, winning_score: u32) -> Option<Side> {
        self.score.increment(scorer);

        if self.is_over() {
            return None;
        }

        let winner = if self.score.player >= winning_score {
            Some(Side::Player)
        } else if self.score.opponent >= winning_score {
            Some(Side::Opponent)
        } else {
            None
        };

        if let Some(winner) = winner {
            self.phase = Phase::MatchOver(winner);
        }
        winner
    }

    /// Leave `MatchOver` with a fresh score. Does nothing while playing.
    /// Returns whether a restart happened.
    pub fn restart(&mut self) -> bool {
        match self.phase {
            Phase::MatchOver(_) => {
                *self = MatchState::new();
                true
            }
            Phase::Playing => false,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::MatchOver(_))
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::MatchOver(winner) => Some(winner),
            Phase::Playing => None,
        }
    }
}
