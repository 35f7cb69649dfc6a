//! BracketEngine state, error types, and the persisted db record.

use crate::models::game::{MatchId, MatchRecord, TeamSlot};
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Errors that can occur while building or updating a bracket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Fewer than two participants; nothing can be built.
    NotEnoughParticipants { provided: usize },
    /// A next/loser pointer references a match id that was never built.
    /// Indicates a builder defect and aborts generation.
    UnresolvedPointer { from: MatchId, to: MatchId },
    /// A score update referenced an id absent from the current bracket.
    MatchNotFound(MatchId),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::NotEnoughParticipants { provided } => {
                write!(f, "Need at least 2 participants to build a bracket (got {})", provided)
            }
            BracketError::UnresolvedPointer { from, to } => {
                write!(f, "Match {} points at {}, which does not exist", from, to)
            }
            BracketError::MatchNotFound(id) => write!(f, "Match {} not found", id),
        }
    }
}

/// One bracket generation: owns the participant list, the seeded slot vector,
/// and the match arena for a single generate -> merge -> propagate cycle.
///
/// Matches live in a `Vec` in creation order (winners rounds ascending, then
/// losers rounds, grand final last); `by_id` maps ids to arena indices so
/// propagation resolves next/loser pointers in constant time without holding
/// references between matches.
#[derive(Clone, Debug)]
pub struct BracketEngine {
    pub(crate) participants: Vec<TeamId>,
    pub(crate) seeded: Vec<TeamSlot>,
    pub(crate) slot_count: usize,
    pub(crate) matches: Vec<MatchRecord>,
    pub(crate) by_id: HashMap<MatchId, usize>,
}

impl BracketEngine {
    /// Create an engine for the given participants. Seeds immediately so an
    /// undersized list fails before any match is built.
    pub fn new(participants: Vec<TeamId>) -> Result<Self, BracketError> {
        let seeded = crate::logic::seed_participants(&participants)?;
        let slot_count = seeded.len();
        Ok(Self {
            participants,
            seeded,
            slot_count,
            matches: Vec::new(),
            by_id: HashMap::new(),
        })
    }

    /// Number of first-round slots (smallest power of two >= participant count).
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    pub fn participants(&self) -> &[TeamId] {
        &self.participants
    }

    /// All matches in creation order. Empty until the bracket is generated.
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// Consume the engine, keeping the final match list.
    pub fn into_matches(self) -> Vec<MatchRecord> {
        self.matches
    }

    /// A match by id, if the bracket has been generated and contains it.
    pub fn get(&self, id: &str) -> Option<&MatchRecord> {
        self.by_id.get(id).map(|&idx| &self.matches[idx])
    }

    /// Record a result for a match. Winner and status are not touched here;
    /// they are recomputed by the next propagation pass.
    pub fn set_score(&mut self, id: &str, score_1: u32, score_2: u32) -> Result<(), BracketError> {
        let idx = *self
            .by_id
            .get(id)
            .ok_or_else(|| BracketError::MatchNotFound(id.to_string()))?;
        let m = &mut self.matches[idx];
        m.score_1 = score_1;
        m.score_2 = score_2;
        Ok(())
    }
}

/// Tournament metadata carried through to the persisted record.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentMeta {
    #[serde(default)]
    pub title: String,
    /// Event start, shown by the presentation layer (countdown etc.).
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
}

/// Tournament configuration: metadata plus the ordered participant list.
/// Input order is authoritative; entry i is paired against entry
/// slot_count - 1 - i in the first round.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    #[serde(default)]
    pub meta: TournamentMeta,
    pub participants: Vec<TeamId>,
}

/// The persisted record consumed by the presentation layer: a timestamp,
/// tournament metadata, a team lookup, and the ordered match list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketDb {
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub meta: TournamentMeta,
    #[serde(default)]
    pub teams: HashMap<TeamId, Team>,
    pub bracket: Vec<MatchRecord>,
}

impl BracketDb {
    /// Assemble a record stamped with the current time.
    pub fn new(meta: TournamentMeta, teams: HashMap<TeamId, Team>, bracket: Vec<MatchRecord>) -> Self {
        Self {
            updated_at: Utc::now(),
            meta,
            teams,
            bracket,
        }
    }
}
