//! Round-robin tournament progression
//!
//! This crate provides:
//! - Pairing slots that are narrowed step by step until every game is settled
//! - Berger round-robin scheduling over any number of cycles
//! - Result recording validated against the settled pairings
//! - Team matches played on boards and folded into team results
//! - Standings with configurable tiebreaks
//!
//! # Usage
//!
//! ```bash
//! # Simulate a six-player double round robin
//! cargo run -p tournament -- run --players 6 --cycles 2 --seed 7
//!
//! # Simulate a team round robin on four boards
//! cargo run -p tournament -- team --teams 4 --boards 4
//! ```

mod config;
mod error;
mod pairing;
mod participant;
mod result;
mod round_robin;
mod scoring;
mod slot;
mod standings;
mod store;
mod team;
mod team_tournament;
mod tiebreak;
mod tournament;

pub use config::*;
pub use error::*;
pub use pairing::*;
pub use participant::*;
pub use result::*;
pub use round_robin::*;
pub use scoring::*;
pub use slot::*;
pub use standings::*;
pub use store::*;
pub use team::*;
pub use team_tournament::*;
pub use tiebreak::*;
pub use tournament::*;
