//! Team round-robin tournaments
//!
//! Teams are paired exactly like individual players. Once a round's team
//! pairings are settled, every team match is expanded into boards which are
//! filled with team members and played out one match at a time. The round
//! only enters the shared history after its last team match is in.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::config::TeamTournamentConfig;
use crate::error::{PairingError, ResultError, StoreError, TournamentError};
use crate::pairing::{GamePairing, Pairings};
use crate::participant::{Participant, ParticipantId, Team};
use crate::result::{GameResult, Results};
use crate::round_robin::{PairingEngine, RoundRobinEngine};
use crate::slot::PairingSlot;
use crate::standings::{Standings, StandingsContext, TeamContext};
use crate::store;
use crate::team::{TeamGameResult, TeamPairing, TeamPairings, TeamResults, TeamRoundAccumulator};
use crate::tournament::{check_unique_ids, TournamentPolicy, TournamentState};

/// Team round robin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRobinTeamTournament {
    /// Roster in join order
    pub participants: Vec<Team>,
    pub config: TeamTournamentConfig,
    pub state: TournamentState,
    /// Board pairings of the round in progress
    pub team_pairings: Option<TeamPairings>,
    /// Team match results of the round in progress
    pub accumulator: Option<TeamRoundAccumulator>,
    /// Board-level history of completed rounds
    pub team_results: TeamResults,
    #[serde(skip)]
    engine: RoundRobinEngine,
}

impl TournamentPolicy for RoundRobinTeamTournament {
    fn is_drop_in_allowed(&self) -> bool {
        self.state.results.is_empty()
    }
}

impl RoundRobinTeamTournament {
    pub fn new(participants: Vec<Team>, config: TeamTournamentConfig) -> Result<Self, TournamentError> {
        config.validate()?;
        check_unique_ids(&participants)?;
        Ok(Self {
            participants,
            config,
            state: TournamentState::default(),
            team_pairings: None,
            accumulator: None,
            team_results: TeamResults::default(),
            engine: RoundRobinEngine::new(),
        })
    }

    pub fn participant_ids(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(Participant::id).collect()
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Team> {
        self.participants.iter().find(|team| team.id == id)
    }

    pub fn results(&self) -> &Results {
        &self.state.results
    }

    pub fn total_rounds(&self) -> usize {
        self.engine.total_rounds(self.participants.len(), self.config.cycles)
    }

    pub fn is_finished(&self) -> bool {
        self.state
            .is_finished(&self.engine, self.participants.len(), self.config.cycles)
    }

    /// Team-level pairings of the round in progress.
    pub fn get_pairings(&self) -> Option<Pairings> {
        self.state.pairings.clone()
    }

    /// Board pairings, available once the team-level pairings are final.
    pub fn get_team_pairings(&self) -> Option<TeamPairings> {
        self.team_pairings.clone()
    }

    pub fn generate_pairings(&mut self) -> Result<(), TournamentError> {
        let ids = self.participant_ids();
        self.state.generate(&self.engine, &ids, self.config.cycles)?;
        self.materialize_team_pairings();
        Ok(())
    }

    pub fn clarify_pairings(&mut self, pairings: Pairings) -> Result<(), TournamentError> {
        self.state.clarify(pairings)?;
        self.materialize_team_pairings();
        Ok(())
    }

    pub fn finalize_pairings(&mut self, pairings: Pairings) -> Result<(), TournamentError> {
        self.state.finalize(pairings)?;
        self.materialize_team_pairings();
        Ok(())
    }

    /// Expands settled team-level pairings into boards, once per round.
    fn materialize_team_pairings(&mut self) {
        if self.team_pairings.is_some() {
            return;
        }
        let Some(Ok(pairings)) = self.state.pairings.as_ref().map(Pairings::finalize) else {
            return;
        };
        let team_pairings = TeamPairings::from_pairings(&pairings, self.config.boards);
        debug!(
            round = %team_pairings.index,
            matches = team_pairings.matches.len(),
            boards = self.config.boards,
            "team pairings materialized"
        );
        self.accumulator = Some(TeamRoundAccumulator::new(&team_pairings));
        self.team_pairings = Some(team_pairings);
    }

    fn team_match(&self, index: usize) -> Result<&TeamPairing, TournamentError> {
        let team_pairings = self.team_pairings.as_ref().ok_or(PairingError::NotGenerated)?;
        let len = team_pairings.matches.len();
        team_pairings
            .matches
            .get(index)
            .ok_or_else(|| PairingError::IndexOutOfRange { index, len }.into())
    }

    fn has_result(&self, index: usize) -> bool {
        self.accumulator
            .as_ref()
            .and_then(|accumulator| accumulator.matches.get(index))
            .is_some_and(Option::is_some)
    }

    /// Every id named on a side must belong to the team playing that side.
    fn check_roster<I>(&self, team: Option<ParticipantId>, ids: I) -> Result<(), TournamentError>
    where
        I: IntoIterator<Item = ParticipantId>,
    {
        let roster = team.and_then(|id| self.participant(id));
        for id in ids {
            if !roster.is_some_and(|team| team.has_member(id)) {
                return Err(TournamentError::NotFound(id));
            }
        }
        Ok(())
    }

    fn check_board_rosters(&self, pairing: &TeamPairing) -> Result<(), TournamentError> {
        for board in &pairing.boards {
            self.check_roster(pairing.team_1, board.side_1.mentioned_ids())?;
            self.check_roster(pairing.team_2, board.side_2.mentioned_ids())?;
        }
        Ok(())
    }

    pub fn clarify_team_pairing(&mut self, index: usize, pairing: TeamPairing) -> Result<(), TournamentError> {
        let current = self.team_match(index)?;
        if self.has_result(index) {
            return Err(PairingError::ResultRecorded { index }.into());
        }
        if !pairing.is_valid() {
            return Err(PairingError::Invalid.into());
        }
        self.check_board_rosters(&pairing)?;
        if !pairing.stricter_than(current) {
            return Err(PairingError::Looser.into());
        }

        debug!(index, "team pairing clarified");
        if let Some(team_pairings) = self.team_pairings.as_mut() {
            team_pairings.matches[index] = pairing;
        }
        Ok(())
    }

    pub fn finalize_team_pairing(&mut self, index: usize, pairing: TeamPairing) -> Result<(), TournamentError> {
        if !pairing.is_finalized() {
            return Err(PairingError::NotFinal.into());
        }
        self.clarify_team_pairing(index, pairing)
    }

    /// Records the board results of one team match. The match's board
    /// pairing must be final first. The last match of the round folds the
    /// whole round into the shared history.
    pub fn add_team_game_result(&mut self, index: usize, result: TeamGameResult) -> Result<(), TournamentError> {
        let current = self.team_match(index)?;
        if !current.is_finalized() {
            return Err(PairingError::NotFinal.into());
        }
        if !TeamPairing::from(result.team_pairing()).stricter_than(current) {
            return Err(PairingError::Mismatch.into());
        }
        for board in &result.boards {
            self.check_roster(result.team_1, board.participant_1)?;
            self.check_roster(result.team_2, board.participant_2)?;
        }
        let finalized = result.finalize()?;
        if !GameResult::from(finalized.game_result(&self.config.board_scoring_system)).is_valid() {
            return Err(ResultError::Invalid.into());
        }
        let mut accumulator = self.accumulator.clone().ok_or(PairingError::NotGenerated)?;

        debug!(index, boards = finalized.boards.len(), "team match result recorded");
        accumulator.matches[index] = Some(finalized);

        match accumulator.complete() {
            Some(team_round) => {
                let round = team_round.round_result(&self.config.board_scoring_system);
                info!(round = %team_round.index, matches = team_round.matches.len(), "team round folded");
                self.state.record(round);
                self.team_results.rounds.push(team_round);
                self.team_pairings = None;
                self.accumulator = None;
            }
            None => {
                debug!(pending = accumulator.pending(), "waiting for team matches");
                self.accumulator = Some(accumulator);
            }
        }
        Ok(())
    }

    pub fn get_standings(&self) -> Standings<Team> {
        self.standings_after(self.state.results.len())
    }

    /// Standings over the first `rounds` recorded rounds.
    pub fn standings_after(&self, rounds: usize) -> Standings<Team> {
        let history = &self.state.results.rounds;
        let count = rounds.min(history.len());
        let team_rounds = &self.team_results.rounds;
        let context = StandingsContext {
            participants: self.participant_ids(),
            scoring_system: &self.config.scoring_system,
            tiebreaks: &self.config.tiebreaks,
            rounds: &history[..count],
            team: Some(TeamContext {
                rounds: &team_rounds[..count.min(team_rounds.len())],
                board_scoring_system: &self.config.board_scoring_system,
            }),
        };
        Standings::compute(&self.participants, &context)
    }

    pub fn drop_out(&mut self, ids: &[ParticipantId]) -> Result<(), TournamentError> {
        if !self.is_drop_out_allowed() {
            return Err(TournamentError::Permission("dropping out is not allowed"));
        }
        self.state.drop_out(&mut self.participants, ids)
    }

    pub fn drop_in(&mut self, teams: Vec<Team>) -> Result<(), TournamentError> {
        if !self.is_drop_in_allowed() {
            return Err(TournamentError::Permission(
                "teams may only join before the first round is recorded",
            ));
        }
        self.state.drop_in(&mut self.participants, teams);
        Ok(())
    }

    pub fn take_byes(&mut self, ids: &[ParticipantId]) -> Result<(), TournamentError> {
        if !self.is_taking_byes_allowed() {
            return Err(TournamentError::Permission("taking byes is not allowed"));
        }
        self.state.take_byes(&self.participants, ids)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        store::save_json(self, path)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        store::load_json(path)
    }
}

/// Board pairing filling each present side with the team's members in
/// roster order; boards beyond a team's roster stay empty.
pub fn lineup_pairing(template: &TeamPairing, team_1: Option<&Team>, team_2: Option<&Team>) -> TeamPairing {
    let seat = |slot: &PairingSlot, team: Option<&Team>, board: usize| match team {
        Some(team) if !slot.is_finalized() => team
            .members
            .get(board)
            .map(|player| PairingSlot::fixed(player.id))
            .unwrap_or_else(|| PairingSlot::empty(false)),
        _ => slot.clone(),
    };

    TeamPairing {
        team_1: template.team_1,
        team_2: template.team_2,
        boards: template
            .boards
            .iter()
            .enumerate()
            .map(|(board, pairing)| {
                GamePairing::new(
                    seat(&pairing.side_1, team_1, board),
                    seat(&pairing.side_2, team_2, board),
                )
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "team_tournament_tests.rs"]
mod team_tournament_tests;
