//! Standings: primary score plus tiebreaks, sorted best first

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::participant::{Participant, ParticipantId};
use crate::result::FinalizedRoundResult;
use crate::scoring::ScoringSystem;
use crate::team::TeamRoundResult;
use crate::tiebreak::TiebreakCriterion;

/// Board-level history available to team tournaments
#[derive(Debug, Clone, Copy)]
pub struct TeamContext<'a> {
    pub rounds: &'a [TeamRoundResult],
    pub board_scoring_system: &'a ScoringSystem,
}

/// Everything standings are computed from: the roster in join order, the
/// scoring configuration, and the recorded rounds to consider.
#[derive(Debug, Clone)]
pub struct StandingsContext<'a> {
    pub participants: Vec<ParticipantId>,
    pub scoring_system: &'a ScoringSystem,
    pub tiebreaks: &'a [TiebreakCriterion],
    pub rounds: &'a [FinalizedRoundResult],
    pub team: Option<TeamContext<'a>>,
}

impl StandingsContext<'_> {
    /// A zero score for every participant.
    pub(crate) fn zeroed(&self) -> HashMap<ParticipantId, f64> {
        self.participants.iter().map(|id| (*id, 0.0)).collect()
    }

    /// Sum of scoring-system points over every recorded game.
    pub fn primary_scores(&self) -> HashMap<ParticipantId, f64> {
        let mut scores = self.zeroed();
        for round in self.rounds {
            for game in &round.games {
                for side in game.sides() {
                    if let Some(score) = scores.get_mut(&side.participant) {
                        *score += self.scoring_system.points(side.result);
                    }
                }
            }
        }
        scores
    }
}

/// One row of the standings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsItem<P> {
    pub participant: P,
    /// Primary score first, then each tiebreak in configured order
    pub scores: Vec<f64>,
}

/// Participants ranked by score tuple, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standings<P> {
    pub items: Vec<StandingsItem<P>>,
}

impl<P: Participant + Clone> Standings<P> {
    /// Ranks `participants` descending by their score tuples. Equal tuples
    /// keep roster order.
    pub fn compute(participants: &[P], context: &StandingsContext<'_>) -> Self {
        let primary = context.primary_scores();
        let tiebreaks: Vec<_> = context
            .tiebreaks
            .iter()
            .map(|criterion| criterion.compute(context))
            .collect();

        let mut items: Vec<_> = participants
            .iter()
            .map(|participant| {
                let id = participant.id();
                let scores = std::iter::once(&primary)
                    .chain(&tiebreaks)
                    .map(|table| table.get(&id).copied().unwrap_or(0.0))
                    .collect();
                StandingsItem {
                    participant: participant.clone(),
                    scores,
                }
            })
            .collect();

        items.sort_by(|a, b| compare_scores(&b.scores, &a.scores));
        Self { items }
    }

    /// 1-based rank of a participant
    pub fn position_of(&self, id: ParticipantId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.participant.id() == id)
            .map(|index| index + 1)
    }

    pub fn scores_of(&self, id: ParticipantId) -> Option<&[f64]> {
        self.items
            .iter()
            .find(|item| item.participant.id() == id)
            .map(|item| item.scores.as_slice())
    }
}

impl<P> Standings<P> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Lexicographic comparison of score tuples
fn compare_scores(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
#[path = "standings_tests.rs"]
mod standings_tests;
