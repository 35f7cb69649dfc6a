//! Reconciliation with previously persisted results.

use crate::models::{BracketEngine, MatchRecord};

/// Copy recorded scores from a previous match list into the freshly built
/// skeleton, matched by id.
///
/// Only score_1/score_2 move over. Team assignments, winner, and status are
/// always recomputed by propagation so the bracket stays structurally
/// consistent after a roster change. Ids present only on one side are
/// ignored, which makes repeated rebuilds idempotent and roster edits safe.
pub fn merge_scores(engine: &mut BracketEngine, previous: &[MatchRecord]) {
    for old in previous {
        if let Some(&idx) = engine.by_id.get(&old.id) {
            let m = &mut engine.matches[idx];
            m.score_1 = old.score_1;
            m.score_2 = old.score_2;
        }
    }
}
