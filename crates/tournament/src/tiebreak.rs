//! Tiebreak criteria
//!
//! Every criterion maps each participant to an auxiliary score computed from
//! the recorded history. Games a participant did not actually play (byes,
//! forfeits) count the participant's own score in place of an opponent's.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::participant::ParticipantId;
use crate::result::IndividualResult;
use crate::standings::StandingsContext;

/// A tiebreak rule, applied in configured order after the primary score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TiebreakCriterion {
    /// Sum of opponents' scores
    Buchholz,
    /// Sum of opponents' scores weighted by the result against them
    SonnebornBerger,
    /// Sum of board points over all team matches (team tournaments only)
    BoardPoints,
}

impl TiebreakCriterion {
    pub fn is_team_only(self) -> bool {
        matches!(self, TiebreakCriterion::BoardPoints)
    }

    /// Short column label
    pub fn label(self) -> &'static str {
        match self {
            TiebreakCriterion::Buchholz => "Buch",
            TiebreakCriterion::SonnebornBerger => "SB",
            TiebreakCriterion::BoardPoints => "BoPo",
        }
    }

    pub fn compute(self, context: &StandingsContext<'_>) -> HashMap<ParticipantId, f64> {
        match self {
            TiebreakCriterion::Buchholz => opponent_sum(context, |_| 1.0),
            TiebreakCriterion::SonnebornBerger => opponent_sum(context, sonneborn_berger_weight),
            TiebreakCriterion::BoardPoints => board_points(context),
        }
    }
}

impl fmt::Display for TiebreakCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TiebreakCriterion::Buchholz => "Buchholz",
            TiebreakCriterion::SonnebornBerger => "Sonneborn-Berger",
            TiebreakCriterion::BoardPoints => "Board points",
        };
        f.write_str(name)
    }
}

fn sonneborn_berger_weight(result: IndividualResult) -> f64 {
    match result {
        IndividualResult::Win
        | IndividualResult::ForfeitWin
        | IndividualResult::PairingAllocatedBye => 1.0,
        IndividualResult::Draw => 0.5,
        _ => 0.0,
    }
}

/// Weighted sum of opponent scores; unplayed games count the participant's
/// own score.
fn opponent_sum<W>(context: &StandingsContext<'_>, weight: W) -> HashMap<ParticipantId, f64>
where
    W: Fn(IndividualResult) -> f64,
{
    let primary = context.primary_scores();
    let mut scores = context.zeroed();

    for round in context.rounds {
        for game in &round.games {
            for side in game.sides() {
                let own = primary.get(&side.participant).copied().unwrap_or(0.0);
                let base = match side.opponent {
                    Some(opponent) if !side.result.unplayed() => {
                        primary.get(&opponent).copied().unwrap_or(0.0)
                    }
                    _ => own,
                };
                if let Some(score) = scores.get_mut(&side.participant) {
                    *score += weight(side.result) * base;
                }
            }
        }
    }

    scores
}

fn board_points(context: &StandingsContext<'_>) -> HashMap<ParticipantId, f64> {
    let mut scores = context.zeroed();
    let Some(team) = &context.team else {
        return scores;
    };

    for round in team.rounds {
        for team_match in &round.matches {
            let (points_1, points_2) = team_match.board_points(team.board_scoring_system);
            for (team_id, points) in [(team_match.team_1, points_1), (team_match.team_2, points_2)] {
                if let Some(score) = team_id.and_then(|id| scores.get_mut(&id)) {
                    *score += points;
                }
            }
        }
    }

    scores
}

#[cfg(test)]
#[path = "tiebreak_tests.rs"]
mod tiebreak_tests;
