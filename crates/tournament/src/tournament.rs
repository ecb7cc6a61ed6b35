//! Individual round-robin tournaments
//!
//! A tournament moves through the same cycle every round: pairings are
//! generated, optionally clarified, finalized, and a result is recorded,
//! which clears the pairings for the next round. Every operation validates
//! its input completely before touching any state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

use crate::config::TournamentConfig;
use crate::error::{ConfigError, PairingError, ResultError, StoreError, TournamentError};
use crate::pairing::{GamePairing, Pairings};
use crate::participant::{Participant, ParticipantId, Player};
use crate::result::{FinalizedRoundResult, Results, RoundResult};
use crate::round_robin::{PairingEngine, RoundRobinEngine};
use crate::slot::PairingSlot;
use crate::standings::{Standings, StandingsContext};
use crate::store;

/// What participants may do between rounds. Each tournament kind decides.
pub trait TournamentPolicy {
    fn is_drop_out_allowed(&self) -> bool {
        true
    }

    fn is_drop_in_allowed(&self) -> bool {
        true
    }

    fn is_taking_byes_allowed(&self) -> bool {
        false
    }
}

/// Progress shared by every tournament kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TournamentState {
    /// Participants with recorded games who no longer play
    pub drop_outs: BTreeSet<ParticipantId>,
    /// Participants sitting out the next round
    pub byes: BTreeSet<ParticipantId>,
    /// Pairings of the round in progress
    pub pairings: Option<Pairings>,
    pub results: Results,
}

impl TournamentState {
    pub(crate) fn is_finished(&self, engine: &impl PairingEngine, participants: usize, cycles: u32) -> bool {
        self.results.len() >= engine.total_rounds(participants, cycles)
    }

    pub(crate) fn generate(
        &mut self,
        engine: &impl PairingEngine,
        participants: &[ParticipantId],
        cycles: u32,
    ) -> Result<(), PairingError> {
        if self.pairings.is_some() {
            return Err(PairingError::AlreadyGenerated);
        }
        if self.is_finished(engine, participants.len(), cycles) {
            return Err(PairingError::Finished);
        }

        let mut pairings = engine.next_pairings(participants, self.results.len(), cycles);
        for game in &mut pairings.games {
            self.vacate_absent(game);
        }
        info!(round = %pairings.index, games = pairings.games.len(), "pairings generated");
        self.pairings = Some(pairings);
        Ok(())
    }

    /// Empties the slots of dropped-out participants and of those taking a
    /// bye; their opponents are left facing a voluntary absence.
    fn vacate_absent(&self, game: &mut GamePairing) {
        for slot in [&mut game.side_1, &mut game.side_2] {
            let absent = slot
                .participant()
                .is_some_and(|id| self.drop_outs.contains(&id) || self.byes.contains(&id));
            if absent {
                *slot = PairingSlot::empty(false);
            }
        }
    }

    pub(crate) fn clarify(&mut self, pairings: Pairings) -> Result<(), PairingError> {
        let current = self.pairings.as_ref().ok_or(PairingError::NotGenerated)?;
        if !pairings.is_valid() {
            return Err(PairingError::Invalid);
        }
        if !pairings.stricter_than(current) {
            return Err(PairingError::Looser);
        }
        debug!(round = %pairings.index, "pairings clarified");
        self.pairings = Some(pairings);
        Ok(())
    }

    pub(crate) fn finalize(&mut self, pairings: Pairings) -> Result<(), PairingError> {
        if !pairings.is_finalized() {
            return Err(PairingError::NotFinal);
        }
        self.clarify(pairings)
    }

    /// Checks a submitted round against the current pairings.
    pub(crate) fn check_round_result(
        &self,
        round_result: &RoundResult,
    ) -> Result<FinalizedRoundResult, TournamentError> {
        let current = self.pairings.as_ref().ok_or(PairingError::NotGenerated)?;
        if !Pairings::from(round_result.pairings()).stricter_than(current) {
            return Err(PairingError::Mismatch.into());
        }
        if !round_result.is_valid() {
            return Err(ResultError::Invalid.into());
        }
        Ok(round_result.finalize()?)
    }

    /// Appends a settled round and resets the per-round state.
    pub(crate) fn record(&mut self, round: FinalizedRoundResult) {
        info!(round = %round.index, games = round.games.len(), "round recorded");
        self.results.push(round);
        self.pairings = None;
        self.byes.clear();
    }

    /// Validated ids of `ids`, all of which must be on the roster.
    pub(crate) fn known_ids<P: Participant>(
        roster: &[P],
        ids: &[ParticipantId],
    ) -> Result<BTreeSet<ParticipantId>, TournamentError> {
        let known: BTreeSet<_> = roster.iter().map(Participant::id).collect();
        match ids.iter().find(|id| !known.contains(id)) {
            Some(missing) => Err(TournamentError::NotFound(*missing)),
            None => Ok(ids.iter().copied().collect()),
        }
    }

    /// Removes participants without history from the roster and marks the
    /// rest as dropped out.
    pub(crate) fn drop_out<P: Participant>(
        &mut self,
        roster: &mut Vec<P>,
        ids: &[ParticipantId],
    ) -> Result<(), TournamentError> {
        let ids = Self::known_ids(roster, ids)?;
        let played = self.results.participant_ids();
        roster.retain(|participant| {
            let id = participant.id();
            !ids.contains(&id) || played.contains(&id)
        });
        for id in ids.intersection(&played) {
            debug!(participant = %id, "participant dropped out");
            self.drop_outs.insert(*id);
        }
        Ok(())
    }

    /// Re-activates dropped-out participants and appends new ones in order.
    pub(crate) fn drop_in<P: Participant>(&mut self, roster: &mut Vec<P>, participants: Vec<P>) {
        for participant in participants {
            let id = participant.id();
            self.drop_outs.remove(&id);
            if roster.iter().all(|existing| existing.id() != id) {
                debug!(participant = %id, name = participant.name(), "participant dropped in");
                roster.push(participant);
            }
        }
    }

    pub(crate) fn take_byes<P: Participant>(
        &mut self,
        roster: &[P],
        ids: &[ParticipantId],
    ) -> Result<(), TournamentError> {
        let ids = Self::known_ids(roster, ids)?;
        self.byes.extend(ids);
        Ok(())
    }
}

/// Rejects a roster that lists the same participant twice.
pub(crate) fn check_unique_ids<P: Participant>(roster: &[P]) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    match roster.iter().map(Participant::id).find(|id| !seen.insert(*id)) {
        Some(duplicate) => Err(ConfigError::Invalid(format!(
            "participant {duplicate} is listed twice"
        ))),
        None => Ok(()),
    }
}

/// Individual round robin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRobinTournament {
    /// Roster in join order
    pub participants: Vec<Player>,
    pub config: TournamentConfig,
    pub state: TournamentState,
    #[serde(skip)]
    engine: RoundRobinEngine,
}

impl TournamentPolicy for RoundRobinTournament {
    fn is_drop_in_allowed(&self) -> bool {
        false
    }
}

impl RoundRobinTournament {
    pub fn new(participants: Vec<Player>, config: TournamentConfig) -> Result<Self, TournamentError> {
        config.validate()?;
        check_unique_ids(&participants)?;
        Ok(Self {
            participants,
            config,
            state: TournamentState::default(),
            engine: RoundRobinEngine::new(),
        })
    }

    pub fn participant_ids(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(Participant::id).collect()
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Player> {
        self.participants.iter().find(|player| player.id == id)
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

    /// Current pairings, if a round is in progress.
    pub fn get_pairings(&self) -> Option<Pairings> {
        self.state.pairings.clone()
    }

    pub fn generate_pairings(&mut self) -> Result<(), TournamentError> {
        let ids = self.participant_ids();
        Ok(self.state.generate(&self.engine, &ids, self.config.cycles)?)
    }

    pub fn clarify_pairings(&mut self, pairings: Pairings) -> Result<(), TournamentError> {
        Ok(self.state.clarify(pairings)?)
    }

    pub fn finalize_pairings(&mut self, pairings: Pairings) -> Result<(), TournamentError> {
        Ok(self.state.finalize(pairings)?)
    }

    pub fn add_round_result(&mut self, round_result: RoundResult) -> Result<(), TournamentError> {
        let round = self.state.check_round_result(&round_result)?;
        self.state.record(round);
        Ok(())
    }

    pub fn get_standings(&self) -> Standings<Player> {
        self.standings_after(self.state.results.len())
    }

    /// Standings over the first `rounds` recorded rounds.
    pub fn standings_after(&self, rounds: usize) -> Standings<Player> {
        let history = &self.state.results.rounds;
        let context = StandingsContext {
            participants: self.participant_ids(),
            scoring_system: &self.config.scoring_system,
            tiebreaks: &self.config.tiebreaks,
            rounds: &history[..rounds.min(history.len())],
            team: None,
        };
        Standings::compute(&self.participants, &context)
    }

    pub fn drop_out(&mut self, ids: &[ParticipantId]) -> Result<(), TournamentError> {
        if !self.is_drop_out_allowed() {
            return Err(TournamentError::Permission("dropping out is not allowed"));
        }
        self.state.drop_out(&mut self.participants, ids)
    }

    pub fn drop_in(&mut self, players: Vec<Player>) -> Result<(), TournamentError> {
        if !self.is_drop_in_allowed() {
            return Err(TournamentError::Permission("dropping in is not allowed"));
        }
        self.state.drop_in(&mut self.participants, players);
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

#[cfg(test)]
#[path = "tournament_tests.rs"]
mod tournament_tests;
