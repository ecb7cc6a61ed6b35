//! Round-robin pairing engine (circle / Berger method)
//!
//! Participants are numbered 1..=N in join order. An odd field is padded with
//! a phantom participant N+1; whoever meets the phantom sits the round out
//! against an empty slot. Each cycle has `m - 1` rounds for a padded field of
//! `m`, and every even cycle replays the first one with sides reversed.
//!
//! # Reference
//! Berger (1899), "Schachjahrbuch"; the FIDE Handbook C.05 Annex 1 tables.

use crate::pairing::{FinalizedGamePairing, FinalizedPairings, Pairings, RoundIndex};
use crate::participant::ParticipantId;

/// Computes the next round of a tournament from its current progress.
pub trait PairingEngine {
    /// Pairings for the round following `completed_rounds` recorded rounds.
    ///
    /// `participants` must be in a stable order (join order); the same
    /// inputs always produce the same pairings.
    fn next_pairings(
        &self,
        participants: &[ParticipantId],
        completed_rounds: usize,
        cycles: u32,
    ) -> Pairings;

    /// Number of rounds the whole tournament lasts.
    fn total_rounds(&self, participant_count: usize, cycles: u32) -> usize;
}

/// The classical Berger round-robin scheduler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundRobinEngine;

impl RoundRobinEngine {
    pub fn new() -> Self {
        Self
    }

    /// Rounds in one cycle: N-1 for an even field, N for an odd one.
    pub fn rounds_per_cycle(participant_count: usize) -> usize {
        if participant_count == 0 {
            return 0;
        }
        participant_count + participant_count % 2 - 1
    }

    /// 1-based cycle and round-within-cycle following `completed_rounds`.
    pub fn position(participant_count: usize, completed_rounds: usize) -> (u32, u32) {
        let per_cycle = Self::rounds_per_cycle(participant_count).max(1);
        let cycle = completed_rounds / per_cycle + 1;
        let round = completed_rounds % per_cycle + 1;
        (cycle as u32, round as u32)
    }

    /// Berger table pairs of 1-based indices for an even field `size`.
    ///
    /// `round` is 1-based and must be below `size`.
    pub fn berger_pairs(size: usize, round: usize) -> Vec<(usize, usize)> {
        debug_assert!(size % 2 == 0, "berger tables need an even field");
        debug_assert!(round >= 1 && round < size, "round {round} outside the cycle");
        if size < 2 {
            return Vec::new();
        }

        let modulus = size - 1;
        let half = size / 2;
        let i = ((round - 1) * half) % modulus + 1;

        let mut pairs = Vec::with_capacity(half);
        if i <= half {
            pairs.push((i, size));
        } else {
            pairs.push((size, i));
        }
        for k in 1..half {
            let a = (i + k - 1) % modulus + 1;
            let b = (i + modulus - k - 1) % modulus + 1;
            pairs.push((a, b));
        }
        pairs
    }

    fn finalized_pairings(
        &self,
        participants: &[ParticipantId],
        completed_rounds: usize,
        cycles: u32,
    ) -> FinalizedPairings {
        let count = participants.len();
        let (cycle, round) = Self::position(count, completed_rounds);
        let index = if cycles == 1 {
            RoundIndex::Single(round)
        } else {
            RoundIndex::Cycle { cycle, round }
        };
        if count == 0 {
            return FinalizedPairings {
                index,
                games: Vec::new(),
            };
        }

        let size = count + count % 2;
        let lookup = |slot: usize| participants.get(slot - 1).copied();
        let games = Self::berger_pairs(size, round as usize)
            .into_iter()
            .map(|(a, b)| if cycle % 2 == 0 { (b, a) } else { (a, b) })
            .map(|(a, b)| FinalizedGamePairing::from_participants(lookup(a), lookup(b)))
            .collect();

        FinalizedPairings { index, games }
    }
}

impl PairingEngine for RoundRobinEngine {
    fn next_pairings(
        &self,
        participants: &[ParticipantId],
        completed_rounds: usize,
        cycles: u32,
    ) -> Pairings {
        self.finalized_pairings(participants, completed_rounds, cycles)
            .into()
    }

    fn total_rounds(&self, participant_count: usize, cycles: u32) -> usize {
        Self::rounds_per_cycle(participant_count) * cycles as usize
    }
}

#[cfg(test)]
#[path = "round_robin_tests.rs"]
mod round_robin_tests;
