//! Integration tests for result propagation: byes, scores, drops, status.

use double_elim_web::{
    generate_bracket, process_updates, BracketEngine, BracketError, MatchStatus, TeamSlot,
    GRAND_FINAL_ID,
};

fn engine(ids: &[&str]) -> BracketEngine {
    let mut engine = BracketEngine::new(ids.iter().map(|s| s.to_string()).collect()).unwrap();
    generate_bracket(&mut engine).unwrap();
    engine
}

fn team(id: &str) -> TeamSlot {
    TeamSlot::Team(id.to_string())
}

#[test]
fn bye_resolves_without_scores_and_real_pairing_goes_live() {
    // [A,B,C] pads to 4 slots: m1 = A vs bye, m2 = B vs C.
    let mut e = engine(&["A", "B", "C"]);
    process_updates(&mut e);

    let m1 = e.get("wb_r1_m1").unwrap();
    assert_eq!(m1.status, MatchStatus::Finished);
    assert_eq!(m1.winner, team("A"));

    let m2 = e.get("wb_r1_m2").unwrap();
    assert_eq!(m2.status, MatchStatus::Live);
    assert_eq!(m2.winner, TeamSlot::Empty);

    // The bye chain already advanced A into the winners final
    let final_match = e.get("wb_r2_m1").unwrap();
    assert_eq!(final_match.team_1, team("A"));
    assert_eq!(final_match.team_2, TeamSlot::Empty);
    assert_eq!(final_match.status, MatchStatus::Waiting);
}

#[test]
fn bye_loser_is_not_dropped_into_losers_bracket() {
    let mut e = engine(&["A", "B", "C"]);
    process_updates(&mut e);
    // m1's "loser" was the bye; the losers match keeps that slot empty.
    let lb = e.get("lb_r1_m1").unwrap();
    assert_eq!(lb.team_1, TeamSlot::Empty);
    assert_eq!(lb.team_2, TeamSlot::Empty);
    assert_eq!(lb.status, MatchStatus::Waiting);
}

#[test]
fn zero_zero_is_not_decisive() {
    let mut e = engine(&["A", "B", "C", "D"]);
    process_updates(&mut e);
    let m1 = e.get("wb_r1_m1").unwrap();
    assert_eq!((m1.score_1, m1.score_2), (0, 0));
    assert_eq!(m1.winner, TeamSlot::Empty);
    assert_eq!(m1.status, MatchStatus::Live);
}

#[test]
fn score_toward_an_empty_slot_decides_nothing() {
    let mut e = engine(&["A", "B", "C", "D"]);
    // Nobody has dropped into the losers bracket yet, but a score is already
    // on the books; the leading slot is empty so the match must stay open.
    e.set_score("lb_r1_m1", 1, 0).unwrap();
    process_updates(&mut e);
    let lb = e.get("lb_r1_m1").unwrap();
    assert_eq!(lb.winner, TeamSlot::Empty);
    assert_eq!(lb.status, MatchStatus::Waiting);
}

#[test]
fn walkover_score_advances_the_present_team() {
    // [A,B,C]: B beats C, so C drops to the losers bracket where the other
    // slot can never fill (its feeder lost to a bye). A 0-1 walkover score
    // lets C through.
    let mut e = engine(&["A", "B", "C"]);
    e.set_score("wb_r1_m2", 3, 2).unwrap();
    process_updates(&mut e);

    let lb = e.get("lb_r1_m1").unwrap();
    assert_eq!(lb.team_1, TeamSlot::Empty);
    assert_eq!(lb.team_2, team("C"));
    assert_eq!(lb.status, MatchStatus::Waiting);

    e.set_score("lb_r1_m1", 0, 1).unwrap();
    process_updates(&mut e);
    let lb = e.get("lb_r1_m1").unwrap();
    assert_eq!(lb.winner, team("C"));
    assert_eq!(lb.status, MatchStatus::Finished);
    assert_eq!(e.get("lb_r2_m1").unwrap().team_2, team("C"));
}

#[test]
fn winner_is_never_reassigned() {
    let mut e = engine(&["A", "B", "C", "D"]);
    e.set_score("wb_r1_m1", 2, 1).unwrap();
    process_updates(&mut e);
    assert_eq!(e.get("wb_r1_m1").unwrap().winner, team("A"));

    // Flipping the score afterwards must not flip the recorded winner.
    e.set_score("wb_r1_m1", 0, 3).unwrap();
    process_updates(&mut e);
    assert_eq!(e.get("wb_r1_m1").unwrap().winner, team("A"));
    assert_eq!(e.get("wb_r2_m1").unwrap().team_1, team("A"));
}

#[test]
fn set_score_rejects_unknown_match() {
    let mut e = engine(&["A", "B"]);
    assert!(matches!(
        e.set_score("wb_r9_m9", 1, 0),
        Err(BracketError::MatchNotFound(_))
    ));
}

#[test]
fn four_team_tournament_plays_through_to_a_champion() {
    let mut e = engine(&["A", "B", "C", "D"]);

    // Round 1: A vs D, B vs C
    e.set_score("wb_r1_m1", 2, 0).unwrap();
    e.set_score("wb_r1_m2", 1, 2).unwrap();
    process_updates(&mut e);
    assert_eq!(e.get("wb_r2_m1").unwrap().team_1, team("A"));
    assert_eq!(e.get("wb_r2_m1").unwrap().team_2, team("C"));
    assert_eq!(e.get("lb_r1_m1").unwrap().team_1, team("D"));
    assert_eq!(e.get("lb_r1_m1").unwrap().team_2, team("B"));
    assert_eq!(e.get("lb_r1_m1").unwrap().status, MatchStatus::Live);

    // Winners final and first losers round
    e.set_score("wb_r2_m1", 3, 1).unwrap();
    e.set_score("lb_r1_m1", 0, 2).unwrap();
    process_updates(&mut e);
    let gf = e.get(GRAND_FINAL_ID).unwrap();
    assert_eq!(gf.team_1, team("A"));
    let lb_final = e.get("lb_r2_m1").unwrap();
    assert_eq!(lb_final.team_1, team("C"));
    assert_eq!(lb_final.team_2, team("B"));

    // Losers final decides who meets A
    e.set_score("lb_r2_m1", 2, 1).unwrap();
    process_updates(&mut e);
    let gf = e.get(GRAND_FINAL_ID).unwrap();
    assert_eq!(gf.team_2, team("C"));
    assert_eq!(gf.status, MatchStatus::Live);

    // Grand final
    e.set_score(GRAND_FINAL_ID, 3, 2).unwrap();
    process_updates(&mut e);
    let gf = e.get(GRAND_FINAL_ID).unwrap();
    assert_eq!(gf.winner, team("A"));
    assert_eq!(gf.status, MatchStatus::Finished);

    // Every match decided
    assert!(e.matches().iter().all(|m| m.status == MatchStatus::Finished));
}

#[test]
fn two_participant_bracket_rematches_in_the_grand_final() {
    let mut e = engine(&["A", "B"]);
    e.set_score("wb_r1_m1", 0, 2).unwrap();
    process_updates(&mut e);
    let gf = e.get(GRAND_FINAL_ID).unwrap();
    assert_eq!(gf.team_1, team("B"));
    assert_eq!(gf.team_2, team("A"));
    assert_eq!(gf.status, MatchStatus::Live);
}

#[test]
fn scores_preset_on_later_rounds_cascade_in_one_pass() {
    // Every result is on the books before a single propagation pass runs;
    // the fixed-point loop must carry teams forward until everything settles.
    let mut e = engine(&["A", "B", "C", "D"]);
    e.set_score("wb_r1_m1", 2, 0).unwrap();
    e.set_score("wb_r1_m2", 2, 0).unwrap();
    e.set_score("wb_r2_m1", 2, 0).unwrap();
    e.set_score("lb_r1_m1", 2, 0).unwrap();
    e.set_score("lb_r2_m1", 2, 0).unwrap();
    e.set_score(GRAND_FINAL_ID, 2, 0).unwrap();
    process_updates(&mut e);
    assert!(e.matches().iter().all(|m| m.status == MatchStatus::Finished));
    assert_eq!(e.get(GRAND_FINAL_ID).unwrap().winner, team("A"));
}
