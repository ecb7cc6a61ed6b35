//! Team matches: board-level pairings and results folded into team results
//!
//! A team match between two teams is played on a fixed number of boards.
//! Once the team-level pairing is settled, each board starts out free and is
//! narrowed to concrete players; once every board has a result, the match
//! folds into one team-level game result.

use serde::{Deserialize, Serialize};

use crate::error::{PairingError, ResultError};
use crate::pairing::{FinalizedGamePairing, FinalizedPairings, GamePairing, RoundIndex};
use crate::participant::ParticipantId;
use crate::result::{FinalizedGameResult, FinalizedRoundResult, GameResult, IndividualResult};
use crate::scoring::ScoringSystem;
use crate::slot::{FinalizedSlot, PairingSlot};

/// Board pairings of one team match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPairing {
    pub team_1: Option<ParticipantId>,
    pub team_2: Option<ParticipantId>,
    pub boards: Vec<GamePairing>,
}

impl TeamPairing {
    /// Board template for a settled team-level pairing.
    ///
    /// Boards of a present team start out free; boards of an absent team are
    /// empty and carry that side's bye flag.
    pub fn from_game_pairing(pairing: &FinalizedGamePairing, boards: usize) -> Self {
        let side = |slot: &FinalizedSlot| {
            if slot.is_empty() {
                PairingSlot::empty(slot.bye())
            } else {
                PairingSlot::unknown()
            }
        };
        let template = GamePairing::new(side(&pairing.side_1), side(&pairing.side_2));

        Self {
            team_1: pairing.side_1.participant(),
            team_2: pairing.side_2.participant(),
            boards: vec![template; boards],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.boards.iter().all(GamePairing::is_valid)
    }

    pub fn is_playable(&self) -> bool {
        self.team_1.is_some() && self.team_2.is_some()
    }

    pub fn is_finalized(&self) -> bool {
        self.boards.iter().all(GamePairing::is_finalized)
    }

    pub fn stricter_than(&self, other: &TeamPairing) -> bool {
        self.team_1 == other.team_1
            && self.team_2 == other.team_2
            && self.boards.len() == other.boards.len()
            && self
                .boards
                .iter()
                .zip(&other.boards)
                .all(|(mine, theirs)| mine.stricter_than(theirs))
    }

    pub fn finalize(&self) -> Result<FinalizedTeamPairing, PairingError> {
        let boards = self
            .boards
            .iter()
            .map(GamePairing::finalize)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FinalizedTeamPairing {
            team_1: self.team_1,
            team_2: self.team_2,
            boards,
        })
    }
}

/// A team match whose every board is settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedTeamPairing {
    pub team_1: Option<ParticipantId>,
    pub team_2: Option<ParticipantId>,
    pub boards: Vec<FinalizedGamePairing>,
}

impl From<FinalizedTeamPairing> for TeamPairing {
    fn from(pairing: FinalizedTeamPairing) -> Self {
        Self {
            team_1: pairing.team_1,
            team_2: pairing.team_2,
            boards: pairing.boards.into_iter().map(GamePairing::from).collect(),
        }
    }
}

/// Team matches of one round, in the order of the team-level pairings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPairings {
    pub index: RoundIndex,
    pub matches: Vec<TeamPairing>,
}

impl TeamPairings {
    pub fn from_pairings(pairings: &FinalizedPairings, boards: usize) -> Self {
        Self {
            index: pairings.index,
            matches: pairings
                .games
                .iter()
                .map(|game| TeamPairing::from_game_pairing(game, boards))
                .collect(),
        }
    }
}

/// Board results of one team match, possibly incomplete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGameResult {
    pub team_1: Option<ParticipantId>,
    pub team_2: Option<ParticipantId>,
    pub boards: Vec<GameResult>,
}

impl TeamGameResult {
    pub fn from_team_pairing(pairing: &FinalizedTeamPairing) -> Self {
        Self {
            team_1: pairing.team_1,
            team_2: pairing.team_2,
            boards: pairing.boards.iter().map(GameResult::from_pairing).collect(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.boards.iter().all(GameResult::is_valid)
    }

    pub fn is_finalized(&self) -> bool {
        self.boards.iter().all(GameResult::is_finalized)
    }

    /// The board pairings these results imply.
    pub fn team_pairing(&self) -> FinalizedTeamPairing {
        FinalizedTeamPairing {
            team_1: self.team_1,
            team_2: self.team_2,
            boards: self.boards.iter().map(GameResult::pairing).collect(),
        }
    }

    pub fn finalize(&self) -> Result<FinalizedTeamGameResult, ResultError> {
        if !self.is_valid() {
            return Err(ResultError::Invalid);
        }
        let boards = self
            .boards
            .iter()
            .map(GameResult::finalize)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FinalizedTeamGameResult {
            team_1: self.team_1,
            team_2: self.team_2,
            boards,
        })
    }
}

/// A team match with every board result known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedTeamGameResult {
    pub team_1: Option<ParticipantId>,
    pub team_2: Option<ParticipantId>,
    pub boards: Vec<FinalizedGameResult>,
}

impl FinalizedTeamGameResult {
    /// Summed board points of each side.
    pub fn board_points(&self, scoring: &ScoringSystem) -> (f64, f64) {
        sum_board_points(&self.boards, scoring)
    }

    /// Team-level outcome of the match.
    ///
    /// A team facing no opponent takes a bye whatever its boards settled to;
    /// only matches between two present teams fold their board results.
    pub fn outcome(&self, board_scoring: &ScoringSystem) -> (IndividualResult, IndividualResult) {
        use IndividualResult::*;

        match (self.team_1, self.team_2) {
            (Some(_), None) => (self.absent_opponent_bye(|board| board.result_1), Undefined),
            (None, Some(_)) => (Undefined, self.absent_opponent_bye(|board| board.result_2)),
            (None, None) => (Undefined, Undefined),
            (Some(_), Some(_)) => fold_board_results(&self.boards, board_scoring),
        }
    }

    /// Bye of the present side: allocated when any of its boards was awarded
    /// one by the pairing, voluntary otherwise.
    fn absent_opponent_bye<F>(&self, present: F) -> IndividualResult
    where
        F: Fn(&FinalizedGameResult) -> IndividualResult,
    {
        if self
            .boards
            .iter()
            .any(|board| present(board) == IndividualResult::PairingAllocatedBye)
        {
            IndividualResult::PairingAllocatedBye
        } else {
            IndividualResult::VoluntaryBye
        }
    }

    /// The match as a single team-level game.
    pub fn game_result(&self, board_scoring: &ScoringSystem) -> FinalizedGameResult {
        let (result_1, result_2) = self.outcome(board_scoring);
        FinalizedGameResult {
            participant_1: self.team_1,
            participant_2: self.team_2,
            result_1,
            result_2,
        }
    }
}

fn sum_board_points(boards: &[FinalizedGameResult], scoring: &ScoringSystem) -> (f64, f64) {
    boards.iter().fold((0.0, 0.0), |(sum_1, sum_2), board| {
        (
            sum_1 + scoring.points(board.result_1),
            sum_2 + scoring.points(board.result_2),
        )
    })
}

/// Folds settled board results into one team-level outcome.
///
/// Assumes both teams are present; see [`FinalizedTeamGameResult::outcome`].
///
/// 1. A side with a voluntary bye on every board takes a voluntary bye for
///    the match; the other side's result is undefined.
/// 2. A side that received a pairing-allocated bye on more than half of the
///    boards forfeits the match (both sides may forfeit).
/// 3. Otherwise the side with more board points wins; equal sums draw.
pub fn fold_board_results(
    boards: &[FinalizedGameResult],
    board_scoring: &ScoringSystem,
) -> (IndividualResult, IndividualResult) {
    use IndividualResult::*;

    if boards.iter().all(|board| board.result_1 == VoluntaryBye) {
        return (VoluntaryBye, Undefined);
    }
    if boards.iter().all(|board| board.result_2 == VoluntaryBye) {
        return (Undefined, VoluntaryBye);
    }

    let byes_1 = boards.iter().filter(|board| board.result_1 == PairingAllocatedBye).count();
    let byes_2 = boards.iter().filter(|board| board.result_2 == PairingAllocatedBye).count();
    let majority = boards.len() / 2;

    match (byes_1 > majority, byes_2 > majority) {
        (true, true) => (ForfeitLoss, ForfeitLoss),
        (true, false) => (ForfeitLoss, ForfeitWin),
        (false, true) => (ForfeitWin, ForfeitLoss),
        (false, false) => {
            let (score_1, score_2) = sum_board_points(boards, board_scoring);
            if score_1 > score_2 {
                (Win, Loss)
            } else if score_1 < score_2 {
                (Loss, Win)
            } else {
                (Draw, Draw)
            }
        }
    }
}

/// All team matches of a completed round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoundResult {
    pub index: RoundIndex,
    pub matches: Vec<FinalizedTeamGameResult>,
}

impl TeamRoundResult {
    /// The round as team-level games, ready for the shared history.
    pub fn round_result(&self, board_scoring: &ScoringSystem) -> FinalizedRoundResult {
        FinalizedRoundResult {
            index: self.index,
            games: self
                .matches
                .iter()
                .map(|team_match| team_match.game_result(board_scoring))
                .collect(),
        }
    }
}

/// Board-level history of completed team rounds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamResults {
    pub rounds: Vec<TeamRoundResult>,
}

impl TeamResults {
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

/// Collects team match results of the round in progress.
///
/// The round only completes once every match has a result, regardless of
/// submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoundAccumulator {
    pub index: RoundIndex,
    pub matches: Vec<Option<FinalizedTeamGameResult>>,
}

impl TeamRoundAccumulator {
    pub fn new(pairings: &TeamPairings) -> Self {
        Self {
            index: pairings.index,
            matches: vec![None; pairings.matches.len()],
        }
    }

    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(Option::is_some)
    }

    pub fn pending(&self) -> usize {
        self.matches.iter().filter(|slot| slot.is_none()).count()
    }

    /// The completed round, or `None` while some match is still open.
    pub fn complete(&self) -> Option<TeamRoundResult> {
        let matches = self.matches.iter().cloned().collect::<Option<Vec<_>>>()?;
        Some(TeamRoundResult {
            index: self.index,
            matches,
        })
    }
}

#[cfg(test)]
#[path = "team_tests.rs"]
mod team_tests;
