//! Scoring systems: points per game outcome

use serde::{Deserialize, Serialize};

use crate::result::IndividualResult;

/// Point values per outcome kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSystem {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
    pub bye: f64,
}

impl Default for ScoringSystem {
    fn default() -> Self {
        Self {
            win: 1.0,
            draw: 0.5,
            loss: 0.0,
            bye: 0.0,
        }
    }
}

impl ScoringSystem {
    pub fn new(win: f64, draw: f64, loss: f64, bye: f64) -> Self {
        Self {
            win,
            draw,
            loss,
            bye,
        }
    }

    /// Match points (2 / 1 / 0), the usual team-tournament scoring.
    pub fn match_points() -> Self {
        Self::new(2.0, 1.0, 0.0, 0.0)
    }

    /// Points awarded for an outcome. Forfeit wins and pairing-allocated
    /// byes count as wins, voluntary byes earn the bye value.
    pub fn points(&self, result: IndividualResult) -> f64 {
        match result {
            IndividualResult::Win
            | IndividualResult::ForfeitWin
            | IndividualResult::PairingAllocatedBye => self.win,
            IndividualResult::Draw => self.draw,
            IndividualResult::Loss | IndividualResult::ForfeitLoss => self.loss,
            IndividualResult::VoluntaryBye => self.bye,
            IndividualResult::Undefined => 0.0,
        }
    }
}
