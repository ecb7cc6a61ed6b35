//! Tournament configuration
//!
//! Both tournament kinds read their parameters from TOML. Every field is
//! optional and falls back to the defaults below:
//!
//! ```toml
//! cycles = 2
//! tiebreaks = [{ type = "buchholz" }, { type = "sonneborn_berger" }]
//!
//! [scoring_system]
//! win = 1.0
//! draw = 0.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::scoring::ScoringSystem;
use crate::tiebreak::TiebreakCriterion;

/// Parameters of an individual round robin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub scoring_system: ScoringSystem,
    pub tiebreaks: Vec<TiebreakCriterion>,
    /// Number of complete round-robin passes
    pub cycles: u32,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            scoring_system: ScoringSystem::default(),
            tiebreaks: vec![TiebreakCriterion::SonnebornBerger],
            cycles: 1,
        }
    }
}

impl TournamentConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_cycles(self.cycles)?;
        if let Some(criterion) = self.tiebreaks.iter().find(|c| c.is_team_only()) {
            return Err(ConfigError::Invalid(format!(
                "{criterion} is only available in team tournaments"
            )));
        }
        Ok(())
    }
}

/// Parameters of a team round robin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamTournamentConfig {
    /// Scoring of whole team matches
    pub scoring_system: ScoringSystem,
    pub tiebreaks: Vec<TiebreakCriterion>,
    pub cycles: u32,
    /// Boards per team match
    pub boards: usize,
    /// Scoring of individual board games
    pub board_scoring_system: ScoringSystem,
}

impl Default for TeamTournamentConfig {
    fn default() -> Self {
        Self {
            scoring_system: ScoringSystem::match_points(),
            tiebreaks: vec![TiebreakCriterion::BoardPoints],
            cycles: 1,
            boards: 8,
            board_scoring_system: ScoringSystem::default(),
        }
    }
}

impl TeamTournamentConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_cycles(self.cycles)?;
        if self.boards == 0 {
            return Err(ConfigError::Invalid(
                "a team match needs at least one board".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_cycles(cycles: u32) -> Result<(), ConfigError> {
    if cycles == 0 {
        return Err(ConfigError::Invalid(
            "a tournament needs at least one cycle".to_string(),
        ));
    }
    Ok(())
}
