use crate::domain::card;
use crate::domain::state::{RoundState, Seat};
use crate::domain::tricks::{pass, play_cards, Advance};
use crate::domain::Card;
use crate::errors::domain::RuleViolationKind;

fn hand_of(ids: &[&str]) -> Vec<Card> {
    ids.iter().map(|id| *card(id).unwrap()).collect()
}

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

/// Seat layout follows the rotation 0 -> 2 -> 3 -> 1.
fn round_with(hands: [&[&str]; 4], first: Seat) -> RoundState {
    RoundState::new(
        [
            hand_of(hands[0]),
            hand_of(hands[1]),
            hand_of(hands[2]),
            hand_of(hands[3]),
        ],
        first,
    )
}

#[test]
fn acting_out_of_turn_is_rejected() {
    let mut round = round_with([&["WT1"], &["WD1"], &["WR1"], &["WE1"]], 0);
    let err = play_cards(&mut round, 2, &ids(&["WR1"])).unwrap_err();
    assert_eq!(err.kind(), Some(RuleViolationKind::OutOfTurn));
    // Nothing was recorded.
    assert!(round.trick.entries.is_empty());
    assert_eq!(round.hand(2).len(), 1);
}

#[test]
fn an_out_seat_cannot_act_at_all() {
    let mut round = round_with([&["WT1"], &["WD1"], &["WR1"], &["WE1"]], 0);
    round.out_flags[0] = true;
    let err = play_cards(&mut round, 0, &ids(&["WT1"])).unwrap_err();
    assert_eq!(err.kind(), Some(RuleViolationKind::SeatIsOut));
}

#[test]
fn the_leader_cannot_pass() {
    let mut round = round_with([&["WT1"], &["WD1"], &["WR1"], &["WE1"]], 0);
    let err = pass(&mut round, 0, &ids(&["WT1"])).unwrap_err();
    assert_eq!(err.kind(), Some(RuleViolationKind::WrongCardCount));
}

#[test]
fn pass_discards_must_match_the_lead_count() {
    let mut round = round_with(
        [&["WT1", "WT2"], &["WD1", "M12"], &["WR1", "M24"], &["WE1", "M14"]],
        0,
    );
    let (_, advance) = play_cards(&mut round, 0, &ids(&["WT1", "WT2"])).unwrap();
    assert_eq!(
        advance,
        Advance::Turn {
            seat: 2,
            auto_passed: vec![]
        }
    );

    let err = pass(&mut round, 2, &ids(&["WR1"])).unwrap_err();
    assert_eq!(err.kind(), Some(RuleViolationKind::WrongCardCount));

    let (discarded, _) = pass(&mut round, 2, &ids(&["WR1", "M24"])).unwrap();
    assert_eq!(discarded.len(), 2);
    assert!(round.hand(2).is_empty());
}

#[test]
fn a_trick_visits_every_seat_in_rotation_then_completes() {
    let mut round = round_with([&["WP1"], &["WT1"], &["WR1"], &["WF1"]], 0);

    let (_, advance) = play_cards(&mut round, 0, &ids(&["WP1"])).unwrap();
    assert_eq!(
        advance,
        Advance::Turn {
            seat: 2,
            auto_passed: vec![]
        }
    );
    let (_, advance) = play_cards(&mut round, 2, &ids(&["WR1"])).unwrap();
    assert_eq!(
        advance,
        Advance::Turn {
            seat: 3,
            auto_passed: vec![]
        }
    );
    let (_, advance) = pass(&mut round, 3, &ids(&["WF1"])).unwrap();
    assert_eq!(
        advance,
        Advance::Turn {
            seat: 1,
            auto_passed: vec![]
        }
    );
    // Seat 1 is the rotation predecessor of the leader: the trick closes.
    let (_, advance) = play_cards(&mut round, 1, &ids(&["WT1"])).unwrap();
    assert_eq!(advance, Advance::TrickComplete { auto_passed: vec![] });
    assert_eq!(round.trick.entries.len(), 4);
}

#[test]
fn out_seats_are_skipped_with_a_zero_discard() {
    let mut round = round_with([&["WP1"], &["WT1"], &["WR1"], &["WF1", "WE1"]], 0);
    round.out_flags[3] = true;

    let (_, advance) = play_cards(&mut round, 0, &ids(&["WP1"])).unwrap();
    assert_eq!(
        advance,
        Advance::Turn {
            seat: 2,
            auto_passed: vec![]
        }
    );
    // Seat 3 is skipped on the way from 2 to 1.
    let (_, advance) = play_cards(&mut round, 2, &ids(&["WR1"])).unwrap();
    assert_eq!(
        advance,
        Advance::Turn {
            seat: 1,
            auto_passed: vec![3]
        }
    );

    let skipped = &round.trick.entries[2];
    assert_eq!(skipped.seat, 3);
    assert!(skipped.passed);
    assert!(skipped.cards.is_empty());
    // The OUT seat's hand is untouched.
    assert_eq!(round.hand(3).len(), 2);

    let (_, advance) = play_cards(&mut round, 1, &ids(&["WT1"])).unwrap();
    assert_eq!(advance, Advance::TrickComplete { auto_passed: vec![] });
}

#[test]
fn a_trick_led_into_out_seats_completes_once_they_are_skipped() {
    let mut round = round_with([&["WT1"], &["WP1"], &["WR1"], &["WF1"]], 2);
    round.out_flags[3] = true;
    round.out_flags[1] = true;

    // Leader 2; 3 and 1 are skipped; 0 closes (predecessor of 2).
    let (_, advance) = play_cards(&mut round, 2, &ids(&["WR1"])).unwrap();
    assert_eq!(
        advance,
        Advance::Turn {
            seat: 0,
            auto_passed: vec![3, 1]
        }
    );
    let (_, advance) = play_cards(&mut round, 0, &ids(&["WT1"])).unwrap();
    assert_eq!(advance, Advance::TrickComplete { auto_passed: vec![] });
}

#[test]
fn played_cards_leave_the_hand_and_set_the_leader() {
    let mut round = round_with(
        [&["WT1", "WD1"], &["WD2", "M12"], &["WR1", "M24"], &["WE1", "M14"]],
        0,
    );
    assert!(round.trick_leader.is_none());
    play_cards(&mut round, 0, &ids(&["WD1"])).unwrap();
    assert_eq!(round.trick_leader, Some(0));
    assert_eq!(round.hand(0), hand_of(&["WT1"]).as_slice());
    assert_eq!(round.trick.required_count(), Some(1));
}
