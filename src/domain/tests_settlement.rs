use crate::domain::card;
use crate::domain::combos::resolve;
use crate::domain::settlement::{game_winner, settle_trick, ZhiZunInfo};
use crate::domain::state::{PlayEntry, RoundState, Seat};
use crate::domain::Card;

fn hand_of(ids: &[&str]) -> Vec<Card> {
    ids.iter().map(|id| *card(id).unwrap()).collect()
}

fn empty_round() -> RoundState {
    RoundState::new([vec![], vec![], vec![], vec![]], 0)
}

fn push_play(round: &mut RoundState, seat: Seat, ids: &[&str], leading: bool) {
    let cards = hand_of(ids);
    let mut combo = resolve(&cards).unwrap();
    combo.is_leading = leading;
    if leading {
        round.trick_leader = Some(seat);
    }
    round.trick.entries.push(PlayEntry::play(seat, cards, combo));
}

fn push_pass(round: &mut RoundState, seat: Seat, ids: &[&str]) {
    round
        .trick
        .entries
        .push(PlayEntry::pass(seat, hand_of(ids)));
}

#[test]
fn highest_power_wins_and_collects_the_dong() {
    let mut round = empty_round();
    // Keep a card in every hand so the hand stays incomplete.
    round.hands = [
        hand_of(&["WD1"]),
        hand_of(&["WD2"]),
        hand_of(&["WR1"]),
        hand_of(&["WR2"]),
    ];
    round.dong_counts = [1, 1, 1, 1];
    push_play(&mut round, 0, &["WP1"], true);
    push_play(&mut round, 2, &["WT1"], false);
    push_pass(&mut round, 3, &["M12"]);
    push_pass(&mut round, 1, &["M24"]);

    let mut scores = [0; 4];
    let outcome = settle_trick(&mut round, &mut scores).unwrap();
    assert_eq!(outcome.winner, 2);
    assert_eq!(outcome.dong_value, 1);
    assert_eq!(round.dong_counts[2], 2);
    assert!(outcome.zhi_zun_info.is_none());
    assert!(!outcome.hand_complete);
    // Winner leads the next trick; the table is reset.
    assert_eq!(round.current_seat, 2);
    assert!(round.trick.entries.is_empty());
    assert!(round.trick_leader.is_none());
    assert_eq!(scores, [0; 4]);
}

#[test]
fn equal_power_goes_to_the_earlier_seat() {
    let mut round = empty_round();
    round.hands = [
        hand_of(&["WD1"]),
        hand_of(&["WD2"]),
        hand_of(&["WR1"]),
        hand_of(&["WR2"]),
    ];
    round.dong_counts = [1, 1, 1, 1];
    push_play(&mut round, 3, &["WT1"], true);
    push_play(&mut round, 1, &["WT2"], false);
    push_pass(&mut round, 0, &["M12"]);
    push_pass(&mut round, 2, &["M24"]);

    let mut scores = [0; 4];
    let outcome = settle_trick(&mut round, &mut scores).unwrap();
    assert_eq!(outcome.winner, 3);
}

#[test]
fn the_dong_value_is_the_leads_card_count() {
    let mut round = empty_round();
    round.hands = [
        hand_of(&["WD1"]),
        hand_of(&["WD2"]),
        hand_of(&["WR1"]),
        hand_of(&["WR2"]),
    ];
    round.dong_counts = [1, 1, 1, 1];
    push_play(&mut round, 0, &["WE1", "WE2", "M14", "M23"], true);
    push_pass(&mut round, 2, &["WP1", "WP2", "WG1", "WG2"]);
    push_pass(&mut round, 3, &["WB1", "WB2", "WF1", "WF2"]);
    push_pass(&mut round, 1, &["WM1", "WM2", "WC1", "WC2"]);

    let mut scores = [0; 4];
    let outcome = settle_trick(&mut round, &mut scores).unwrap();
    assert_eq!(outcome.winner, 0);
    assert_eq!(outcome.dong_value, 4);
    assert_eq!(round.dong_counts[0], 5);
}

#[test]
fn a_leading_zhizun_collects_everyones_dongs() {
    let mut round = empty_round();
    round.hands = [
        hand_of(&["WD1"]),
        hand_of(&["WD2"]),
        hand_of(&["WR1"]),
        hand_of(&["WR2"]),
    ];
    round.dong_counts = [2, 1, 3, 1];
    push_play(&mut round, 0, &["M12", "M24"], true);
    push_pass(&mut round, 2, &["WP1", "WP2"]);
    push_pass(&mut round, 3, &["WG1", "WG2"]);
    push_pass(&mut round, 1, &["WB1", "WB2"]);

    let mut scores = [0; 4];
    let outcome = settle_trick(&mut round, &mut scores).unwrap();
    assert_eq!(outcome.winner, 0);
    assert_eq!(
        outcome.zhi_zun_info,
        Some(ZhiZunInfo::MuZhiZun {
            player: 0,
            collected: 5
        })
    );
    assert_eq!(scores, [5, 0, 0, 0]);
    // The trick itself is still credited on top of the collection.
    assert_eq!(round.dong_counts[0], 4);
}

#[test]
fn an_unanswered_wen_zhizun_collects_like_the_mother() {
    let mut round = empty_round();
    round.hands = [
        hand_of(&["WD1"]),
        hand_of(&["WD2"]),
        hand_of(&["WR1"]),
        hand_of(&["WR2"]),
    ];
    round.dong_counts = [0, 2, 2, 2];
    push_play(&mut round, 2, &["WL1", "WL2"], true);
    push_pass(&mut round, 3, &["WP1", "WP2"]);
    push_pass(&mut round, 1, &["WB1", "WB2"]);
    push_pass(&mut round, 0, &["WM1", "WM2"]);

    let mut scores = [0; 4];
    let outcome = settle_trick(&mut round, &mut scores).unwrap();
    assert_eq!(outcome.winner, 2);
    assert_eq!(
        outcome.zhi_zun_info,
        Some(ZhiZunInfo::WenZhiZun {
            player: 2,
            collected: 4
        })
    );
    assert_eq!(scores, [0, 0, 4, 0]);
}

#[test]
fn a_countered_wen_zhizun_pays_its_own_dongs_and_loses_the_trick() {
    let mut round = empty_round();
    round.hands = [
        hand_of(&["WD1"]),
        hand_of(&["WD2"]),
        hand_of(&["WR1"]),
        hand_of(&["WR2"]),
    ];
    round.dong_counts = [3, 1, 1, 1];
    push_play(&mut round, 0, &["WL1", "WL2"], true);
    push_play(&mut round, 2, &["WG1", "WG2"], false);
    push_pass(&mut round, 3, &["WP1", "WP2"]);
    push_pass(&mut round, 1, &["WB1", "WB2"]);

    let mut scores = [0; 4];
    let outcome = settle_trick(&mut round, &mut scores).unwrap();
    // 双高脚七 (20) outranks the followed 文至尊 (10).
    assert_eq!(outcome.winner, 2);
    assert_eq!(
        outcome.zhi_zun_info,
        Some(ZhiZunInfo::WenZhiZunBeaten {
            wen_zhi_zun_player: 0,
            counter_player: 2,
            penalty: 3
        })
    );
    assert_eq!(scores, [-3, 0, 3, 0]);
    assert_eq!(round.dong_counts[2], 3);
}

#[test]
fn emptying_the_hand_without_dongs_forfeits_the_trick() {
    let mut round = empty_round();
    // Seat 2 just played its last card; everyone else holds one.
    round.hands = [hand_of(&["WD1"]), hand_of(&["WD2"]), vec![], hand_of(&["WR2"])];
    round.dong_counts = [1, 1, 0, 1];
    push_play(&mut round, 0, &["WP1"], true);
    push_play(&mut round, 2, &["WT1"], false);
    push_pass(&mut round, 3, &["M12"]);
    push_pass(&mut round, 1, &["M24"]);

    let mut scores = [0; 4];
    let outcome = settle_trick(&mut round, &mut scores).unwrap();
    // The 天 would have won, but its seat forfeited.
    assert_eq!(outcome.winner, 0);
    assert!(outcome.newly_out.contains(&2));
    assert!(round.out_flags[2]);
    assert_eq!(round.dong_counts[2], 0);
}

#[test]
fn one_card_and_no_dongs_after_the_close_means_out() {
    let mut round = empty_round();
    round.hands = [
        hand_of(&["WD1", "WD2"]),
        hand_of(&["WR1", "WR2"]),
        hand_of(&["WM1", "WM2"]),
        hand_of(&["WB1"]),
    ];
    round.dong_counts = [1, 1, 1, 0];
    push_play(&mut round, 0, &["WP1"], true);
    push_play(&mut round, 2, &["WT1"], false);
    push_pass(&mut round, 3, &["M12"]);
    push_pass(&mut round, 1, &["M24"]);

    let mut scores = [0; 4];
    let outcome = settle_trick(&mut round, &mut scores).unwrap();
    assert_eq!(outcome.winner, 2);
    assert_eq!(outcome.newly_out, vec![3]);
    assert!(round.out_flags[3]);
}

#[test]
fn the_hand_completes_when_every_seat_is_empty_or_out() {
    let mut round = empty_round();
    round.out_flags[3] = true;
    round.hands = [vec![], vec![], vec![], hand_of(&["WB1"])];
    round.dong_counts = [3, 2, 2, 0];
    push_play(&mut round, 0, &["WP1"], true);
    push_play(&mut round, 2, &["WT1"], false);
    push_pass(&mut round, 1, &["M24"]);

    let mut scores = [0; 4];
    let outcome = settle_trick(&mut round, &mut scores).unwrap();
    assert!(outcome.hand_complete);
    assert_eq!(outcome.winner, 2);
}

#[test]
fn game_winner_prefers_the_lowest_tied_seat() {
    assert_eq!(game_winner(&[3, 7, 7, 1]), 1);
    assert_eq!(game_winner(&[0, 0, 0, 0]), 0);
    assert_eq!(game_winner(&[-2, -1, -5, -1]), 1);
}
