//! Double-elimination bracket organizer: library with models, bracket
//! algorithms, and persistence.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    generate_bracket, merge_scores, process_updates, rebuild_bracket, seed_participants,
    GRAND_FINAL_ID,
};
pub use models::{
    BracketDb, BracketEngine, BracketError, BracketKind, MatchId, MatchRecord, MatchStatus, Slot,
    Team, TeamId, TeamSlot, TournamentConfig, TournamentMeta,
};
