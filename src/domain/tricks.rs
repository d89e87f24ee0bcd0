//! Turn/trick state machine: records validated plays and passes, rotates
//! the acting seat, auto-passes OUT seats, and detects trick completion.

use crate::domain::catalog::Card;
use crate::domain::combos::Combination;
use crate::domain::state::{next_seat, prev_seat, PlayEntry, RoundState, Seat};
use crate::domain::validator::{cards_from_hand, validate_play};
use crate::errors::domain::{DomainError, RuleViolationKind};

/// Where the trick stands after an action was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Play continues with `seat`; `auto_passed` lists OUT seats that
    /// were skipped (zero discard) on the way.
    Turn { seat: Seat, auto_passed: Vec<Seat> },
    /// Every seat has acted; settlement must run next.
    TrickComplete { auto_passed: Vec<Seat> },
}

/// Record a validated play for `seat`.
pub fn play_cards(
    round: &mut RoundState,
    seat: Seat,
    card_ids: &[String],
) -> Result<(Combination, Advance), DomainError> {
    require_turn(round, seat)?;

    let combo = validate_play(round.hand(seat), card_ids, &round.trick)?;
    let cards = combo.cards.clone();

    round.take_from_hand(seat, &cards);
    if round.trick_leader.is_none() {
        round.trick_leader = Some(seat);
    }
    round
        .trick
        .entries
        .push(PlayEntry::play(seat, cards, combo.clone()));

    let advance = advance_from(round, seat)?;
    Ok((combo, advance))
}

/// Record a pass for `seat`, discarding exactly as many cards as the
/// leading play's card count.
pub fn pass(
    round: &mut RoundState,
    seat: Seat,
    discard_ids: &[String],
) -> Result<(Vec<Card>, Advance), DomainError> {
    require_turn(round, seat)?;

    let required = round.trick.required_count().ok_or_else(|| {
        DomainError::rule(RuleViolationKind::WrongCardCount, "首家必须出牌，不能过")
    })?;
    if discard_ids.len() != required {
        return Err(DomainError::rule(
            RuleViolationKind::WrongCardCount,
            format!("过牌时必须丢弃{required}张牌"),
        ));
    }

    let discarded = cards_from_hand(round.hand(seat), discard_ids)?;
    round.take_from_hand(seat, &discarded);
    round
        .trick
        .entries
        .push(PlayEntry::pass(seat, discarded.clone()));

    let advance = advance_from(round, seat)?;
    Ok((discarded, advance))
}

fn require_turn(round: &RoundState, seat: Seat) -> Result<(), DomainError> {
    if round.out_flags[seat as usize] {
        return Err(DomainError::rule(
            RuleViolationKind::SeatIsOut,
            "您已出局，本局无需出牌",
        ));
    }
    if round.current_seat != seat {
        return Err(DomainError::rule(
            RuleViolationKind::OutOfTurn,
            "还没轮到您出牌",
        ));
    }
    Ok(())
}

/// Advance after `acted` has been recorded: the trick closes once the
/// rotation-predecessor of the leader has acted; OUT seats in between
/// are auto-passed with zero discard.
fn advance_from(round: &mut RoundState, acted: Seat) -> Result<Advance, DomainError> {
    let leader = round
        .trick_leader
        .ok_or_else(|| DomainError::invariant("trick has entries but no leader"))?;
    let closing_seat = prev_seat(leader);

    let mut auto_passed = Vec::new();
    let mut seat = acted;
    loop {
        if seat == closing_seat {
            return Ok(Advance::TrickComplete { auto_passed });
        }
        seat = next_seat(seat);
        if round.out_flags[seat as usize] {
            round.trick.entries.push(PlayEntry::pass(seat, Vec::new()));
            auto_passed.push(seat);
            continue;
        }
        round.current_seat = seat;
        return Ok(Advance::Turn { seat, auto_passed });
    }
}
