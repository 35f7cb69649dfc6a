//! Seeding: pad the participant list to a power-of-two slot count with byes.

use crate::models::{BracketError, TeamId, TeamSlot};

/// Seed participants into first-round slots.
///
/// Slot count is the smallest power of two >= the participant count; the
/// original ids keep their input order and the tail is padded with byes.
/// First-round pairing is positional: entry i meets entry slot_count - 1 - i,
/// so every bye lands opposite one of the first teams in the list.
pub fn seed_participants(participants: &[TeamId]) -> Result<Vec<TeamSlot>, BracketError> {
    if participants.len() < 2 {
        return Err(BracketError::NotEnoughParticipants {
            provided: participants.len(),
        });
    }
    let slot_count = participants.len().next_power_of_two();
    let mut seeded: Vec<TeamSlot> = participants
        .iter()
        .cloned()
        .map(TeamSlot::Team)
        .collect();
    seeded.resize(slot_count, TeamSlot::Bye);
    Ok(seeded)
}
