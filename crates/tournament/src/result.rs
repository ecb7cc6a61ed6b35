//! Game and round results, and the append-only result history

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::ResultError;
use crate::pairing::{FinalizedGamePairing, FinalizedPairings, RoundIndex};
use crate::participant::ParticipantId;
use crate::slot::FinalizedSlot;

/// Outcome of one game for one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndividualResult {
    Win,
    Draw,
    Loss,
    ForfeitWin,
    ForfeitLoss,
    VoluntaryBye,
    PairingAllocatedBye,
    Undefined,
}

impl IndividualResult {
    /// Anything but a game actually played over the board.
    pub fn unplayed(self) -> bool {
        !matches!(
            self,
            IndividualResult::Win | IndividualResult::Draw | IndividualResult::Loss
        )
    }

    /// The side chose not to play.
    pub fn voluntarily_unplayed(self) -> bool {
        matches!(
            self,
            IndividualResult::ForfeitLoss | IndividualResult::VoluntaryBye
        )
    }

    /// Whether a side facing nobody may carry this result.
    fn is_bye_like(self) -> bool {
        matches!(
            self,
            IndividualResult::VoluntaryBye
                | IndividualResult::PairingAllocatedBye
                | IndividualResult::Undefined
        )
    }
}

/// Checks the pair of outcomes of a game between two present sides.
fn is_symmetric(result_1: IndividualResult, result_2: IndividualResult) -> bool {
    use IndividualResult::*;
    matches!(
        (result_1, result_2),
        (Win, Loss)
            | (Loss, Win)
            | (Draw, Draw)
            | (ForfeitWin, ForfeitLoss)
            | (ForfeitLoss, ForfeitWin)
            | (ForfeitLoss, ForfeitLoss)
    )
}

/// Outcome implied for a side by its opponent's settled slot.
fn result_against(opponent: &FinalizedSlot) -> Option<IndividualResult> {
    if opponent.bye() {
        Some(IndividualResult::PairingAllocatedBye)
    } else if opponent.is_empty() {
        Some(IndividualResult::VoluntaryBye)
    } else {
        None
    }
}

/// Slot re-derived from a result side: absent sides are empty, carrying a
/// bye when the opponent was awarded one by the pairing.
fn slot_for(participant: Option<ParticipantId>, opponent_result: Option<IndividualResult>) -> FinalizedSlot {
    let bye = opponent_result == Some(IndividualResult::PairingAllocatedBye);
    FinalizedSlot::from_participant(participant, bye)
}

/// Result of a single game, possibly still missing outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub participant_1: Option<ParticipantId>,
    pub participant_2: Option<ParticipantId>,
    #[serde(default)]
    pub result_1: Option<IndividualResult>,
    #[serde(default)]
    pub result_2: Option<IndividualResult>,
}

impl GameResult {
    /// The result shape implied by a settled pairing. Outcomes of games with
    /// two present sides are left open for the caller.
    pub fn from_pairing(pairing: &FinalizedGamePairing) -> Self {
        let side_1 = &pairing.side_1;
        let side_2 = &pairing.side_2;

        let mut result_1 = result_against(side_2);
        let mut result_2 = result_against(side_1);
        if side_1.is_empty() {
            result_1 = Some(IndividualResult::Undefined);
        }
        if side_2.is_empty() {
            result_2 = Some(IndividualResult::Undefined);
        }

        Self {
            participant_1: side_1.participant(),
            participant_2: side_2.participant(),
            result_1,
            result_2,
        }
    }

    /// Sets both outcomes.
    pub fn record(&mut self, result_1: IndividualResult, result_2: IndividualResult) {
        self.result_1 = Some(result_1);
        self.result_2 = Some(result_2);
    }

    pub fn with_results(mut self, result_1: IndividualResult, result_2: IndividualResult) -> Self {
        self.record(result_1, result_2);
        self
    }

    pub fn is_valid(&self) -> bool {
        if self.participant_1.is_none() {
            return self.result_2.map_or(false, IndividualResult::is_bye_like);
        }
        if self.participant_2.is_none() {
            return self.result_1.map_or(false, IndividualResult::is_bye_like);
        }
        match (self.result_1, self.result_2) {
            (Some(result_1), Some(result_2)) => is_symmetric(result_1, result_2),
            _ => true,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.result_1.is_some() && self.result_2.is_some()
    }

    /// The pairing this result implies.
    pub fn pairing(&self) -> FinalizedGamePairing {
        FinalizedGamePairing {
            side_1: slot_for(self.participant_1, self.result_2),
            side_2: slot_for(self.participant_2, self.result_1),
        }
    }

    pub fn participant_ids(&self) -> BTreeSet<ParticipantId> {
        self.participant_1.into_iter().chain(self.participant_2).collect()
    }

    pub fn finalize(&self) -> Result<FinalizedGameResult, ResultError> {
        if !self.is_valid() {
            return Err(ResultError::Invalid);
        }
        match (self.result_1, self.result_2) {
            (Some(result_1), Some(result_2)) => Ok(FinalizedGameResult {
                participant_1: self.participant_1,
                participant_2: self.participant_2,
                result_1,
                result_2,
            }),
            _ => Err(ResultError::NotFinalized),
        }
    }
}

/// One side of a settled game as seen by that side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSide {
    pub participant: ParticipantId,
    pub opponent: Option<ParticipantId>,
    pub result: IndividualResult,
}

/// Result of a single game with both outcomes known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedGameResult {
    pub participant_1: Option<ParticipantId>,
    pub participant_2: Option<ParticipantId>,
    pub result_1: IndividualResult,
    pub result_2: IndividualResult,
}

impl FinalizedGameResult {
    pub fn pairing(&self) -> FinalizedGamePairing {
        GameResult::from(self.clone()).pairing()
    }

    pub fn participant_ids(&self) -> BTreeSet<ParticipantId> {
        self.participant_1.into_iter().chain(self.participant_2).collect()
    }

    /// The present sides of this game.
    pub fn sides(&self) -> impl Iterator<Item = GameSide> {
        let side_1 = self.participant_1.map(|participant| GameSide {
            participant,
            opponent: self.participant_2,
            result: self.result_1,
        });
        let side_2 = self.participant_2.map(|participant| GameSide {
            participant,
            opponent: self.participant_1,
            result: self.result_2,
        });
        side_1.into_iter().chain(side_2)
    }
}

impl From<FinalizedGameResult> for GameResult {
    fn from(result: FinalizedGameResult) -> Self {
        Self {
            participant_1: result.participant_1,
            participant_2: result.participant_2,
            result_1: Some(result.result_1),
            result_2: Some(result.result_2),
        }
    }
}

/// Results of every game of one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub index: RoundIndex,
    pub games: Vec<GameResult>,
}

impl RoundResult {
    pub fn from_pairings(pairings: &FinalizedPairings) -> Self {
        Self {
            index: pairings.index,
            games: pairings.games.iter().map(GameResult::from_pairing).collect(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.games.iter().all(GameResult::is_valid)
    }

    pub fn is_finalized(&self) -> bool {
        self.games.iter().all(GameResult::is_finalized)
    }

    pub fn pairings(&self) -> FinalizedPairings {
        FinalizedPairings {
            index: self.index,
            games: self.games.iter().map(GameResult::pairing).collect(),
        }
    }

    pub fn participant_ids(&self) -> BTreeSet<ParticipantId> {
        self.games.iter().flat_map(GameResult::participant_ids).collect()
    }

    pub fn finalize(&self) -> Result<FinalizedRoundResult, ResultError> {
        if !self.is_valid() {
            return Err(ResultError::Invalid);
        }
        let games = self
            .games
            .iter()
            .map(GameResult::finalize)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FinalizedRoundResult {
            index: self.index,
            games,
        })
    }
}

/// A round whose every game has both outcomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedRoundResult {
    pub index: RoundIndex,
    pub games: Vec<FinalizedGameResult>,
}

impl FinalizedRoundResult {
    pub fn pairings(&self) -> FinalizedPairings {
        FinalizedPairings {
            index: self.index,
            games: self.games.iter().map(FinalizedGameResult::pairing).collect(),
        }
    }

    pub fn participant_ids(&self) -> BTreeSet<ParticipantId> {
        self.games
            .iter()
            .flat_map(FinalizedGameResult::participant_ids)
            .collect()
    }
}

/// Append-only history of recorded rounds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Results {
    pub rounds: Vec<FinalizedRoundResult>,
}

impl Results {
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn push(&mut self, round: FinalizedRoundResult) {
        self.rounds.push(round);
    }

    /// Everyone who appears in at least one recorded game.
    pub fn participant_ids(&self) -> BTreeSet<ParticipantId> {
        self.rounds
            .iter()
            .flat_map(FinalizedRoundResult::participant_ids)
            .collect()
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod result_tests;
