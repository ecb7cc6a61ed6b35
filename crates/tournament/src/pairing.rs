//! Game and round pairings

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PairingError;
use crate::participant::ParticipantId;
use crate::slot::{FinalizedSlot, PairingSlot, SlotContent};

/// Position of a round within the tournament
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundIndex {
    /// Round number of a single-cycle tournament
    Single(u32),
    /// Cycle and round within the cycle, both 1-based
    Cycle { cycle: u32, round: u32 },
}

impl fmt::Display for RoundIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundIndex::Single(round) => write!(f, "{round}"),
            RoundIndex::Cycle { cycle, round } => write!(f, "{cycle}.{round}"),
        }
    }
}

/// Both sides of one game, possibly still uncertain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePairing {
    pub side_1: PairingSlot,
    pub side_2: PairingSlot,
}

impl GamePairing {
    pub fn new(side_1: PairingSlot, side_2: PairingSlot) -> Self {
        Self { side_1, side_2 }
    }

    /// Both sides open to anyone (the starting point of a team board).
    pub fn free() -> Self {
        Self::new(PairingSlot::unknown(), PairingSlot::unknown())
    }

    pub fn is_valid(&self) -> bool {
        self.side_1.is_valid() && self.side_2.is_valid()
    }

    /// Valid and both sides name a participant.
    pub fn is_playable(&self) -> bool {
        self.is_valid()
            && matches!(self.side_1.content, SlotContent::Fixed(_))
            && matches!(self.side_2.content, SlotContent::Fixed(_))
    }

    pub fn is_finalized(&self) -> bool {
        self.side_1.is_finalized() && self.side_2.is_finalized()
    }

    pub fn stricter_than(&self, other: &GamePairing) -> bool {
        self.side_1.stricter_than(&other.side_1) && self.side_2.stricter_than(&other.side_2)
    }

    pub fn finalize(&self) -> Result<FinalizedGamePairing, PairingError> {
        Ok(FinalizedGamePairing {
            side_1: FinalizedSlot::try_from(self.side_1.clone())?,
            side_2: FinalizedSlot::try_from(self.side_2.clone())?,
        })
    }
}

/// A game pairing with no uncertainty left
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedGamePairing {
    pub side_1: FinalizedSlot,
    pub side_2: FinalizedSlot,
}

impl FinalizedGamePairing {
    /// A game between two participants; `None` leaves that side voluntarily
    /// empty.
    pub fn from_participants(side_1: Option<ParticipantId>, side_2: Option<ParticipantId>) -> Self {
        Self::with_byes(side_1, side_2, false, false)
    }

    pub fn with_byes(
        side_1: Option<ParticipantId>,
        side_2: Option<ParticipantId>,
        bye_1: bool,
        bye_2: bool,
    ) -> Self {
        Self {
            side_1: FinalizedSlot::from_participant(side_1, bye_1),
            side_2: FinalizedSlot::from_participant(side_2, bye_2),
        }
    }

    pub fn participants(&self) -> (Option<ParticipantId>, Option<ParticipantId>) {
        (self.side_1.participant(), self.side_2.participant())
    }

    pub fn stricter_than(&self, other: &GamePairing) -> bool {
        GamePairing::from(self.clone()).stricter_than(other)
    }
}

impl From<FinalizedGamePairing> for GamePairing {
    fn from(pairing: FinalizedGamePairing) -> Self {
        Self {
            side_1: pairing.side_1.into(),
            side_2: pairing.side_2.into(),
        }
    }
}

/// All game pairings of one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairings {
    pub index: RoundIndex,
    pub games: Vec<GamePairing>,
}

impl Pairings {
    pub fn new(index: RoundIndex, games: Vec<GamePairing>) -> Self {
        Self { index, games }
    }

    pub fn is_valid(&self) -> bool {
        self.games.iter().all(GamePairing::is_valid)
    }

    pub fn is_finalized(&self) -> bool {
        self.games.iter().all(GamePairing::is_finalized)
    }

    /// Same round, same number of games, and every game refines its
    /// counterpart.
    pub fn stricter_than(&self, other: &Pairings) -> bool {
        self.index == other.index
            && self.games.len() == other.games.len()
            && self
                .games
                .iter()
                .zip(&other.games)
                .all(|(mine, theirs)| mine.stricter_than(theirs))
    }

    pub fn finalize(&self) -> Result<FinalizedPairings, PairingError> {
        let games = self
            .games
            .iter()
            .map(GamePairing::finalize)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FinalizedPairings {
            index: self.index,
            games,
        })
    }
}

/// Round pairings with every game settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedPairings {
    pub index: RoundIndex,
    pub games: Vec<FinalizedGamePairing>,
}

impl From<FinalizedPairings> for Pairings {
    fn from(pairings: FinalizedPairings) -> Self {
        Self {
            index: pairings.index,
            games: pairings.games.into_iter().map(GamePairing::from).collect(),
        }
    }
}

#[cfg(test)]
#[path = "pairing_tests.rs"]
mod pairing_tests;
