//! Pairing slots: one side of one game as a refinable commitment
//!
//! A slot starts out as loose as needed (any participant, a shortlist, ...)
//! and is narrowed step by step until it names exactly one participant or is
//! deliberately left empty. The `stricter_than` relation is the preorder that
//! every clarification has to respect.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::PairingError;
use crate::participant::ParticipantId;

/// Who may occupy a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotContent {
    /// Any participant may fill the slot
    Unknown,
    /// One of a non-empty set of participants
    Candidates(BTreeSet<ParticipantId>),
    /// Exactly this participant
    Fixed(ParticipantId),
    /// Nobody
    Empty,
}

/// One side of a single game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingSlot {
    pub content: SlotContent,
    #[serde(default)]
    pub bye: bool,
    #[serde(default)]
    pub nullable: bool,
}

impl PairingSlot {
    /// A free slot: any participant, or nobody.
    pub fn unknown() -> Self {
        Self {
            content: SlotContent::Unknown,
            bye: false,
            nullable: true,
        }
    }

    /// An empty slot. With `bye` set the emptiness was allocated by the
    /// pairing, otherwise the side is voluntarily absent.
    pub fn empty(bye: bool) -> Self {
        Self {
            content: SlotContent::Empty,
            bye,
            nullable: !bye,
        }
    }

    pub fn fixed(id: ParticipantId) -> Self {
        Self {
            content: SlotContent::Fixed(id),
            bye: false,
            nullable: false,
        }
    }

    /// Shortlist of acceptable participants. A single candidate collapses to
    /// a fixed slot.
    pub fn candidates<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = ParticipantId>,
    {
        let ids: BTreeSet<_> = ids.into_iter().collect();
        let single = if ids.len() == 1 {
            ids.iter().next().copied()
        } else {
            None
        };
        let content = match single {
            Some(id) => SlotContent::Fixed(id),
            None => SlotContent::Candidates(ids),
        };
        Self {
            content,
            bye: false,
            nullable: false,
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn is_valid(&self) -> bool {
        if matches!(&self.content, SlotContent::Candidates(ids) if ids.is_empty()) {
            return false;
        }
        let empty = self.content == SlotContent::Empty;
        if empty && !self.nullable && !self.bye {
            return false;
        }
        if self.bye && (!empty || self.nullable) {
            return false;
        }
        true
    }

    /// No uncertainty left: a fixed participant or nobody.
    pub fn is_finalized(&self) -> bool {
        matches!(self.content, SlotContent::Fixed(_) | SlotContent::Empty)
    }

    pub fn participant(&self) -> Option<ParticipantId> {
        match self.content {
            SlotContent::Fixed(id) => Some(id),
            _ => None,
        }
    }

    /// Whether `self` may replace `other`, only ever reducing uncertainty.
    pub fn stricter_than(&self, other: &PairingSlot) -> bool {
        if !self.is_valid() {
            return false;
        }
        if self.bye != other.bye {
            return false;
        }
        if self.bye {
            return true;
        }
        if self.nullable && !other.nullable {
            return false;
        }
        if other.content == SlotContent::Unknown {
            return true;
        }
        if self.content == SlotContent::Unknown {
            return false;
        }

        match (&self.content, &other.content) {
            (SlotContent::Empty, SlotContent::Empty) => true,
            (_, SlotContent::Empty) => false,
            // Unused team boards may settle to empty from any shortlist.
            (SlotContent::Empty, _) => true,
            (SlotContent::Fixed(a), SlotContent::Fixed(b)) => a == b,
            (SlotContent::Fixed(a), SlotContent::Candidates(ids)) => ids.contains(a),
            (SlotContent::Candidates(_), SlotContent::Fixed(_)) => false,
            (SlotContent::Candidates(a), SlotContent::Candidates(b)) => a.is_subset(b),
            (_, SlotContent::Unknown) | (SlotContent::Unknown, _) => false,
        }
    }

    /// Every participant id this slot mentions.
    pub fn mentioned_ids(&self) -> Vec<ParticipantId> {
        match &self.content {
            SlotContent::Fixed(id) => vec![*id],
            SlotContent::Candidates(ids) => ids.iter().copied().collect(),
            SlotContent::Unknown | SlotContent::Empty => Vec::new(),
        }
    }
}

/// A settled slot: a valid slot holding one participant or nobody.
///
/// Only obtainable through validating conversions, so a finalized slot with
/// leftover uncertainty cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PairingSlot", into = "PairingSlot")]
pub struct FinalizedSlot {
    participant: Option<ParticipantId>,
    bye: bool,
    nullable: bool,
}

impl FinalizedSlot {
    /// A present participant, or an empty slot carrying `bye`.
    pub fn from_participant(participant: Option<ParticipantId>, bye: bool) -> Self {
        match participant {
            Some(id) => Self {
                participant: Some(id),
                bye: false,
                nullable: false,
            },
            None => Self {
                participant: None,
                bye,
                nullable: !bye,
            },
        }
    }

    pub fn participant(&self) -> Option<ParticipantId> {
        self.participant
    }

    pub fn bye(&self) -> bool {
        self.bye
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_empty(&self) -> bool {
        self.participant.is_none()
    }
}

impl TryFrom<PairingSlot> for FinalizedSlot {
    type Error = PairingError;

    fn try_from(slot: PairingSlot) -> Result<Self, Self::Error> {
        if !slot.is_valid() {
            return Err(PairingError::Invalid);
        }
        let participant = match slot.content {
            SlotContent::Fixed(id) => Some(id),
            SlotContent::Empty => None,
            SlotContent::Unknown | SlotContent::Candidates(_) => {
                return Err(PairingError::NotFinal)
            }
        };
        Ok(Self {
            participant,
            bye: slot.bye,
            nullable: slot.nullable,
        })
    }
}

impl From<FinalizedSlot> for PairingSlot {
    fn from(slot: FinalizedSlot) -> Self {
        let content = match slot.participant {
            Some(id) => SlotContent::Fixed(id),
            None => SlotContent::Empty,
        };
        Self {
            content,
            bye: slot.bye,
            nullable: slot.nullable,
        }
    }
}

#[cfg(test)]
#[path = "slot_tests.rs"]
mod slot_tests;
