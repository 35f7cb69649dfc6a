//! Data structures for the bracket organizer: matches, teams, engine state.

mod bracket;
mod game;
mod team;

pub use bracket::{BracketDb, BracketEngine, BracketError, TournamentConfig, TournamentMeta};
pub use game::{BracketKind, MatchId, MatchRecord, MatchStatus, Slot, TeamSlot};
pub use team::{Team, TeamId};
