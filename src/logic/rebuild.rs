//! The composed rebuild cycle: generate, merge previous scores, propagate.

use crate::logic::{generate_bracket, merge_scores, process_updates};
use crate::models::{BracketEngine, BracketError, MatchRecord, TeamId};

/// Build the bracket for the given participants, restore scores from a
/// previous match list, and resolve the result to a fixed point.
///
/// This is the one entry point orchestration code needs: running it again on
/// its own output yields an identical match list, and a roster edit keeps
/// every score whose match id survives the reshape. Pass an empty previous
/// list for a fresh tournament.
pub fn rebuild_bracket(
    participants: &[TeamId],
    previous: &[MatchRecord],
) -> Result<Vec<MatchRecord>, BracketError> {
    let mut engine = BracketEngine::new(participants.to_vec())?;
    generate_bracket(&mut engine)?;
    merge_scores(&mut engine, previous);
    process_updates(&mut engine);
    Ok(engine.into_matches())
}
