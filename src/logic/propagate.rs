//! Result propagation: resolve byes and scores into winners, advance winners,
//! drop losers, and recompute match status.

use crate::models::{BracketEngine, MatchStatus, Slot, TeamSlot};

/// Run full passes over the match set until nothing changes, then recompute
/// statuses.
///
/// Repetition is required because one resolution can fill a slot that itself
/// triggers a downstream bye resolution (bye chains). Each pass can only grow
/// the set of decided matches, which is bounded by the match count, so the
/// loop always terminates.
pub fn process_updates(engine: &mut BracketEngine) {
    loop {
        let mut changed = false;
        for idx in 0..engine.matches.len() {
            // A decided winner is terminal; never revisit.
            if !engine.matches[idx].winner.is_empty() {
                continue;
            }
            if let Some(side) = resolve_winner(engine, idx) {
                apply_winner(engine, idx, side);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    for m in &mut engine.matches {
        if !m.winner.is_empty() {
            m.status = MatchStatus::Finished;
        } else if m.team_1.is_real() && m.team_2.is_real() {
            m.status = MatchStatus::Live;
        }
        // Otherwise leave the status alone (Waiting, or a caller-set value).
    }
}

/// Decide the winning side of an undecided match, if it can be decided.
///
/// Byes first: a real team opposite a bye advances without a score, and a
/// bye-vs-bye pairing lets the bye itself advance so downstream matches are
/// not wedged. Then scores: an unequal score decides the match only when the
/// leading slot holds a real team; 0-0 decides nothing, and a score leading
/// toward an empty or bye slot waits until a real team occupies it.
fn resolve_winner(engine: &BracketEngine, idx: usize) -> Option<Slot> {
    let m = &engine.matches[idx];

    match (&m.team_1, &m.team_2) {
        (TeamSlot::Team(_), TeamSlot::Bye) => return Some(Slot::One),
        (TeamSlot::Bye, TeamSlot::Team(_)) => return Some(Slot::Two),
        (TeamSlot::Bye, TeamSlot::Bye) => return Some(Slot::One),
        _ => {}
    }

    if m.score_1 != m.score_2 {
        let side = if m.score_1 > m.score_2 { Slot::One } else { Slot::Two };
        if m.slot(side).is_real() {
            return Some(side);
        }
    }

    None
}

/// Write the winner (terminal), advance it into the fixed slot of the next
/// match, and drop the loser into its designated slot when the loser is a
/// real team (byes are never dropped into the losers bracket).
fn apply_winner(engine: &mut BracketEngine, idx: usize, side: Slot) {
    let (winner, loser, next, next_slot, drop, drop_slot) = {
        let m = &engine.matches[idx];
        let (winner, loser) = match side {
            Slot::One => (m.team_1.clone(), m.team_2.clone()),
            Slot::Two => (m.team_2.clone(), m.team_1.clone()),
        };
        (
            winner,
            loser,
            m.next_match_id.clone(),
            m.next_slot,
            m.loser_match_id.clone(),
            m.loser_slot,
        )
    };

    engine.matches[idx].winner = winner.clone();

    if let Some(next_id) = next {
        if let Some(&next_idx) = engine.by_id.get(&next_id) {
            engine.matches[next_idx].set_slot(next_slot, winner);
        }
    }
    if loser.is_real() {
        if let Some(drop_id) = drop {
            if let Some(&drop_idx) = engine.by_id.get(&drop_id) {
                engine.matches[drop_idx].set_slot(drop_slot, loser);
            }
        }
    }
}
