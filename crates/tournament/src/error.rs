//! Error types for tournament progression

use thiserror::Error;

use crate::participant::ParticipantId;

/// Errors raised while generating, clarifying or finalizing pairings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    #[error("pairings were already generated")]
    AlreadyGenerated,
    #[error("the tournament is already finished")]
    Finished,
    #[error("no pairings were generated")]
    NotGenerated,
    #[error("the provided pairings are invalid")]
    Invalid,
    #[error("the provided pairings are looser than the current ones")]
    Looser,
    #[error("the provided pairings are not final")]
    NotFinal,
    #[error("the provided result does not match the current pairings")]
    Mismatch,
    #[error("team match {index} already has a recorded result")]
    ResultRecorded { index: usize },
    #[error("team match index {index} is out of range ({len} matches this round)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors raised while recording results
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultError {
    #[error("some game results are invalid")]
    Invalid,
    #[error("some game results are missing")]
    NotFinalized,
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors raised by the JSON store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to (de)serialize: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any failure of a public tournament operation
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error(transparent)]
    Pairing(#[from] PairingError),
    #[error(transparent)]
    Result(#[from] ResultError),
    #[error("participant {0} is not present in the tournament")]
    NotFound(ParticipantId),
    #[error("permission denied: {0}")]
    Permission(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
