//! Settlement engine: trick winner resolution, the forced-forfeit (OUT)
//! rule, dong accounting, special-combination side payments, and
//! hand-end detection.

use serde::Serialize;

use crate::domain::combos::ComboKind;
use crate::domain::state::{PlayEntry, RoundState, Seat, SEATS};
use crate::errors::domain::DomainError;

/// Score movement caused by a leading special combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ZhiZunInfo {
    /// 母至尊 led: the leader collects every other seat's dong count.
    #[serde(rename_all = "camelCase")]
    MuZhiZun { player: Seat, collected: i32 },
    /// 文至尊 led and went unbeaten: collects like 母至尊.
    #[serde(rename_all = "camelCase")]
    WenZhiZun { player: Seat, collected: i32 },
    /// 文至尊 led and was beaten by 双高脚七: the leader pays its own
    /// dong count to the counter seat.
    #[serde(rename_all = "camelCase")]
    WenZhiZunBeaten {
        wen_zhi_zun_player: Seat,
        counter_player: Seat,
        penalty: i32,
    },
}

/// Result of settling one closed trick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickOutcome {
    pub winner: Seat,
    /// Cards in the winning play, credited to the winner's dong count.
    pub dong_value: u8,
    pub zhi_zun_info: Option<ZhiZunInfo>,
    /// Seats flagged OUT by this settlement, in flagging order.
    pub newly_out: Vec<Seat>,
    pub hand_complete: bool,
}

/// Settle the closed trick: determine the winner, apply side payments to
/// `scores`, credit the dong count, flag forfeited seats, and prepare the
/// next trick (winner leads) unless the hand is complete.
pub fn settle_trick(
    round: &mut RoundState,
    scores: &mut [i32; SEATS],
) -> Result<TrickOutcome, DomainError> {
    let active: Vec<PlayEntry> = round
        .trick
        .entries
        .iter()
        .filter(|e| !e.passed)
        .cloned()
        .collect();
    let Some(leading) = active.first() else {
        return Err(DomainError::invariant(
            "trick closed with zero non-passed entries",
        ));
    };
    let lead_combo = leading
        .combo
        .as_ref()
        .ok_or_else(|| DomainError::invariant("leading entry without a combination"))?;

    let mut newly_out = Vec::new();
    let mut zhi_zun_info = None;

    let winner = match lead_combo.kind {
        // A leading 母至尊 wins outright and collects.
        ComboKind::Zhizun => {
            zhi_zun_info = Some(collect_dongs(round, scores, leading.seat, false));
            leading.seat
        }
        ComboKind::WenZhizun => {
            let counter = active.iter().skip(1).find(|e| {
                e.combo
                    .as_ref()
                    .is_some_and(|c| c.is_wen_zhizun_counter())
            });
            match counter {
                None => {
                    zhi_zun_info = Some(collect_dongs(round, scores, leading.seat, true));
                    leading.seat
                }
                Some(counter_entry) => {
                    let penalty = round.dong_counts[leading.seat as usize] as i32;
                    scores[counter_entry.seat as usize] += penalty;
                    scores[leading.seat as usize] -= penalty;
                    zhi_zun_info = Some(ZhiZunInfo::WenZhiZunBeaten {
                        wen_zhi_zun_player: leading.seat,
                        counter_player: counter_entry.seat,
                        penalty,
                    });
                    best_by_power(round, &active, &mut newly_out)
                }
            }
        }
        _ => best_by_power(round, &active, &mut newly_out),
    };

    let dong_value = leading.cards.len() as u8;
    round.dong_counts[winner as usize] += dong_value;

    // Re-evaluate forfeiture for every seat after the close: one card
    // left with zero dongs can never win a trick it enters.
    for seat in 0..SEATS as Seat {
        if !round.out_flags[seat as usize]
            && round.hands[seat as usize].len() == 1
            && round.dong_counts[seat as usize] == 0
        {
            round.out_flags[seat as usize] = true;
            newly_out.push(seat);
        }
    }

    let hand_complete = round.is_hand_complete();
    round.trick.entries.clear();
    round.trick_leader = None;
    if !hand_complete {
        round.current_seat = winner;
    }

    Ok(TrickOutcome {
        winner,
        dong_value,
        zhi_zun_info,
        newly_out,
        hand_complete,
    })
}

/// Highest effective power wins; earlier entries win ties. In single-card
/// tricks a seat that just emptied its hand with zero dongs is scored at
/// power 0 and flagged OUT (sticky for the hand).
fn best_by_power(round: &mut RoundState, active: &[PlayEntry], newly_out: &mut Vec<Seat>) -> Seat {
    let single_trick = active[0].cards.len() == 1;

    let effective = |entry: &PlayEntry| -> u16 {
        let power = entry.combo.as_ref().map(|c| c.power).unwrap_or(0);
        if single_trick
            && round.hands[entry.seat as usize].is_empty()
            && round.dong_counts[entry.seat as usize] == 0
        {
            0
        } else {
            power
        }
    };

    if single_trick {
        for entry in active {
            let seat = entry.seat as usize;
            if round.hands[seat].is_empty()
                && round.dong_counts[seat] == 0
                && !round.out_flags[seat]
            {
                round.out_flags[seat] = true;
                newly_out.push(entry.seat);
            }
        }
    }

    let mut best = &active[0];
    let mut best_power = effective(best);
    for entry in &active[1..] {
        let power = effective(entry);
        if power > best_power {
            best = entry;
            best_power = power;
        }
    }
    best.seat
}

/// Leader collects every other seat's current dong count as score.
fn collect_dongs(
    round: &RoundState,
    scores: &mut [i32; SEATS],
    player: Seat,
    wen: bool,
) -> ZhiZunInfo {
    let mut collected = 0i32;
    for seat in 0..SEATS {
        if seat != player as usize {
            collected += round.dong_counts[seat] as i32;
        }
    }
    scores[player as usize] += collected;
    if wen {
        ZhiZunInfo::WenZhiZun { player, collected }
    } else {
        ZhiZunInfo::MuZhiZun { player, collected }
    }
}

/// Game winner: highest cumulative score, lowest seat on ties. Becomes
/// the next hand's dealer.
pub fn game_winner(scores: &[i32; SEATS]) -> Seat {
    let mut winner = 0usize;
    for seat in 1..SEATS {
        if scores[seat] > scores[winner] {
            winner = seat;
        }
    }
    winner as Seat
}
