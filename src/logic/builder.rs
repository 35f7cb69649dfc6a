//! Bracket construction: winners tree, losers tree, grand final, and the
//! next/loser wiring between them.

use crate::models::{BracketEngine, BracketError, BracketKind, MatchRecord, Slot};

/// Id of the grand final, the single terminal match.
pub const GRAND_FINAL_ID: &str = "gf_m1";

/// Build the complete match graph for the engine's seeded slots.
///
/// Creation order is winners rounds ascending, losers rounds ascending, grand
/// final last; merge relies on the ids being a pure function of slot count.
/// Wiring, with k = log2(slot_count) and 0-based match index i per round:
///
/// - Winners round r < k: winner to `wb_r{r+1}_m{i/2+1}`, slot One/Two by
///   parity of i. Winners round k: winner to the grand final, slot One.
/// - Winners round 1 losers pair up in `lb_r1_m{i/2+1}` (parity slots);
///   rounds 2..=k drop one loser each into `lb_r{2(r-1)}_m{i+1}` slot One,
///   leaving slot Two for the losers-bracket survivor. Round k's formula
///   lands in the losers final.
/// - Losers bracket has 2(k-1) rounds; sizes start at slot_count/4 and halve
///   after even rounds. Odd rounds advance same-index into slot Two of the
///   next round; even rounds pair up by parity; the losers final feeds the
///   grand final, slot Two.
///
/// With two entrants there is no losers bracket and the single winners match
/// routes its loser straight to grand final slot Two.
pub fn generate_bracket(engine: &mut BracketEngine) -> Result<(), BracketError> {
    engine.matches.clear();
    engine.by_id.clear();

    let slot_count = engine.slot_count;
    let rounds = slot_count.trailing_zeros();

    // Winners bracket
    let mut match_count = slot_count / 2;
    for round in 1..=rounds {
        for i in 0..match_count {
            let mut m = MatchRecord::new(
                format!("wb_r{}_m{}", round, i + 1),
                round,
                BracketKind::Winner,
            );

            // Teams are only known up front in round 1
            if round == 1 {
                m.team_1 = engine.seeded[i].clone();
                m.team_2 = engine.seeded[slot_count - 1 - i].clone();
            }

            if round == rounds {
                m.next_match_id = Some(GRAND_FINAL_ID.to_string());
                m.next_slot = Slot::One;
            } else {
                m.next_match_id = Some(format!("wb_r{}_m{}", round + 1, i / 2 + 1));
                m.next_slot = parity_slot(i);
            }

            if slot_count < 4 {
                // Two entrants: no losers bracket, so the loser of the only
                // winners match takes the second grand final slot directly.
                m.loser_match_id = Some(GRAND_FINAL_ID.to_string());
                m.loser_slot = Slot::Two;
            } else if round == 1 {
                m.loser_match_id = Some(format!("lb_r1_m{}", i / 2 + 1));
                m.loser_slot = parity_slot(i);
            } else {
                m.loser_match_id = Some(format!("lb_r{}_m{}", (round - 1) * 2, i + 1));
                m.loser_slot = Slot::One;
            }

            push_match(engine, m);
        }
        match_count /= 2;
    }

    // Losers bracket
    if slot_count >= 4 {
        let loser_rounds = (rounds - 1) * 2;
        let mut match_count = slot_count / 4;
        for round in 1..=loser_rounds {
            for i in 0..match_count {
                let mut m = MatchRecord::new(
                    format!("lb_r{}_m{}", round, i + 1),
                    round,
                    BracketKind::Loser,
                );

                if round == loser_rounds {
                    m.next_match_id = Some(GRAND_FINAL_ID.to_string());
                    m.next_slot = Slot::Two;
                } else if round % 2 == 1 {
                    // Same-size follow-up round: slot One is reserved for the
                    // winners-bracket drop-in.
                    m.next_match_id = Some(format!("lb_r{}_m{}", round + 1, i + 1));
                    m.next_slot = Slot::Two;
                } else {
                    m.next_match_id = Some(format!("lb_r{}_m{}", round + 1, i / 2 + 1));
                    m.next_slot = parity_slot(i);
                }

                push_match(engine, m);
            }
            // Sizes halve only after the pure-elimination (even) rounds
            if round % 2 == 0 {
                match_count /= 2;
            }
        }
    }

    // Grand final
    let mut gf = MatchRecord::new(GRAND_FINAL_ID, rounds + 1, BracketKind::Winner);
    gf.is_grand_final = true;
    push_match(engine, gf);

    validate_wiring(engine)
}

/// Sibling matches alternate parent slots so two winners never fight over one.
fn parity_slot(i: usize) -> Slot {
    if i % 2 == 0 {
        Slot::One
    } else {
        Slot::Two
    }
}

fn push_match(engine: &mut BracketEngine, m: MatchRecord) {
    engine.by_id.insert(m.id.clone(), engine.matches.len());
    engine.matches.push(m);
}

/// Every next/loser pointer must resolve within the match set; propagation
/// relies on this and a dangling id would silently strand a team.
fn validate_wiring(engine: &BracketEngine) -> Result<(), BracketError> {
    for m in &engine.matches {
        for target in [&m.next_match_id, &m.loser_match_id].into_iter().flatten() {
            if !engine.by_id.contains_key(target) {
                return Err(BracketError::UnresolvedPointer {
                    from: m.id.clone(),
                    to: target.clone(),
                });
            }
        }
    }
    Ok(())
}
