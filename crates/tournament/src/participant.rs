//! Participants: individual players and teams of players

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque unique identity of a player or a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// Fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id, mostly useful for fixtures
    pub fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that can sit on one side of a game.
pub trait Participant {
    fn id(&self) -> ParticipantId;
    fn name(&self) -> &str;
}

/// FIDE title of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Title {
    GrandMaster,
    InternationalMaster,
    FideMaster,
    CandidateMaster,
    WomanGrandMaster,
    WomanInternationalMaster,
    WomanFideMaster,
    WomanCandidateMaster,
    #[default]
    None,
}

impl Title {
    pub fn abbreviation(self) -> &'static str {
        match self {
            Title::GrandMaster => "GM",
            Title::InternationalMaster => "IM",
            Title::FideMaster => "FM",
            Title::CandidateMaster => "CM",
            Title::WomanGrandMaster => "WGM",
            Title::WomanInternationalMaster => "WIM",
            Title::WomanFideMaster => "WFM",
            Title::WomanCandidateMaster => "WCM",
            Title::None => "",
        }
    }
}

/// An individual competitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default)]
    pub title: Title,
    #[serde(default)]
    pub rating: Option<u32>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ParticipantId::new(), name)
    }

    pub fn with_id(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            title: Title::None,
            rating: None,
            country: None,
        }
    }

    pub fn with_title(mut self, title: Title) -> Self {
        self.title = title;
        self
    }

    pub fn with_rating(mut self, rating: u32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

impl Participant for Player {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A team owning an ordered roster of players.
///
/// Roster order is board order: the first member is the natural choice for
/// board 1, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: ParticipantId,
    pub name: String,
    pub members: Vec<Player>,
}

impl Team {
    pub fn new(name: impl Into<String>, members: Vec<Player>) -> Self {
        Self::with_id(ParticipantId::new(), name, members)
    }

    pub fn with_id(id: ParticipantId, name: impl Into<String>, members: Vec<Player>) -> Self {
        Self {
            id,
            name: name.into(),
            members,
        }
    }

    pub fn member_ids(&self) -> Vec<ParticipantId> {
        self.members.iter().map(|member| member.id).collect()
    }

    pub fn has_member(&self, id: ParticipantId) -> bool {
        self.members.iter().any(|member| member.id == id)
    }
}

impl Participant for Team {
    fn id(&self) -> ParticipantId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
