//! Match record, team slots, and bracket/status enums.

use crate::models::team::TeamId;
use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier for a match. Stable across rebuilds for a given
/// participant count (e.g. `wb_r1_m1`, `lb_r2_m3`, `gf_m1`) so that merging
/// previous scores by id works.
pub type MatchId = String;

/// Which half of the double-elimination tree a match belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketKind {
    Winner,
    Loser,
}

/// One of the two team positions within a match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    #[default]
    One,
    Two,
}

/// Lifecycle of a match. The engine sets Waiting, Live, and Finished;
/// Scheduled is reserved for callers and is left untouched by recomputation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Waiting,
    Scheduled,
    Live,
    Finished,
}

/// Content of a team position: not yet determined, a bye (no opponent), or a
/// real team. Also used for the winner field, where Empty means undecided.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSlot {
    #[default]
    Empty,
    Bye,
    Team(TeamId),
}

impl TeamSlot {
    /// True when the slot holds a real team id (not a bye, not empty).
    pub fn is_real(&self) -> bool {
        matches!(self, TeamSlot::Team(_))
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, TeamSlot::Bye)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TeamSlot::Empty)
    }

    /// The team id, if a real team occupies the slot.
    pub fn as_team(&self) -> Option<&TeamId> {
        match self {
            TeamSlot::Team(id) => Some(id),
            _ => None,
        }
    }
}

/// A single match in the bracket graph.
///
/// `next_match_id`/`next_slot` say where the winner goes; `loser_match_id`/
/// `loser_slot` where the loser drops (winners bracket only). Both targets and
/// slots are fixed at construction so sibling matches can never race for the
/// same parent slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: MatchId,
    /// 1-based round within the match's own bracket.
    pub round: u32,
    pub kind: BracketKind,
    pub team_1: TeamSlot,
    pub team_2: TeamSlot,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score_1: u32,
    #[serde(default, deserialize_with = "lenient_score")]
    pub score_2: u32,
    /// Empty until decided; set exactly once and never reassigned.
    pub winner: TeamSlot,
    pub status: MatchStatus,
    pub next_match_id: Option<MatchId>,
    pub next_slot: Slot,
    pub loser_match_id: Option<MatchId>,
    pub loser_slot: Slot,
    #[serde(default)]
    pub is_grand_final: bool,
}

impl MatchRecord {
    /// Create an unwired match with empty slots, zero scores, and Waiting status.
    pub fn new(id: impl Into<MatchId>, round: u32, kind: BracketKind) -> Self {
        Self {
            id: id.into(),
            round,
            kind,
            team_1: TeamSlot::Empty,
            team_2: TeamSlot::Empty,
            score_1: 0,
            score_2: 0,
            winner: TeamSlot::Empty,
            status: MatchStatus::Waiting,
            next_match_id: None,
            next_slot: Slot::One,
            loser_match_id: None,
            loser_slot: Slot::One,
            is_grand_final: false,
        }
    }

    pub fn slot(&self, slot: Slot) -> &TeamSlot {
        match slot {
            Slot::One => &self.team_1,
            Slot::Two => &self.team_2,
        }
    }

    pub fn set_slot(&mut self, slot: Slot, value: TeamSlot) {
        match slot {
            Slot::One => self.team_1 = value,
            Slot::Two => self.team_2 = value,
        }
    }
}

/// Scores in previously persisted data are taken as non-negative integers;
/// numeric strings are accepted and anything else falls back to 0 so a single
/// malformed field never discards the rest of the record.
fn lenient_score<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
