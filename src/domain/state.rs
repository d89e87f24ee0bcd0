//! Round state and seat/turn math.
//!
//! Seats are laid out 0 (top-left), 1 (top-right), 2 (bottom-left),
//! 3 (bottom-right); physical play order is counter-clockwise, which is
//! the fixed cycle 0 -> 2 -> 3 -> 1 -> 0. All rotation math goes through
//! the helpers here so every layer shares one source of truth.

use crate::domain::catalog::Card;
use crate::domain::combos::Combination;

pub type Seat = u8; // 0..=3
pub const SEATS: usize = 4;

/// Counter-clockwise seat cycle.
pub const ROTATION: [Seat; 4] = [0, 2, 3, 1];

fn rotation_index(seat: Seat) -> usize {
    debug_assert!(seat < SEATS as Seat);
    match seat {
        0 => 0,
        2 => 1,
        3 => 2,
        _ => 3,
    }
}

/// Next seat counter-clockwise.
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    ROTATION[(rotation_index(seat) + 1) % SEATS]
}

/// Previous seat in rotation; the trick closes once this seat (relative
/// to the leader) has acted.
#[inline]
pub fn prev_seat(seat: Seat) -> Seat {
    ROTATION[(rotation_index(seat) + SEATS - 1) % SEATS]
}

/// Seat opposite the given seat (numeric layout, not rotation).
#[inline]
pub fn opposite_seat(seat: Seat) -> Seat {
    (seat + 2) % 4
}

/// First-play seat selected by a dice total: count `total` positions
/// around the rotation starting at the roller, inclusive.
#[inline]
pub fn seat_from_dice(roller: Seat, total: u8) -> Seat {
    debug_assert!((2..=12).contains(&total));
    ROTATION[(rotation_index(roller) + total as usize - 1) % SEATS]
}

/// The dealer for a hand is the rotation seat after the first player.
#[inline]
pub fn dealer_after(first_player: Seat) -> Seat {
    next_seat(first_player)
}

/// One entry of the current trick. A passed entry still carries the
/// discarded cards (empty only for auto-passed OUT seats).
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEntry {
    pub seat: Seat,
    pub cards: Vec<Card>,
    pub combo: Option<Combination>,
    pub passed: bool,
}

impl PlayEntry {
    pub fn play(seat: Seat, cards: Vec<Card>, combo: Combination) -> Self {
        Self {
            seat,
            cards,
            combo: Some(combo),
            passed: false,
        }
    }

    pub fn pass(seat: Seat, discarded: Vec<Card>) -> Self {
        Self {
            seat,
            cards: discarded,
            combo: None,
            passed: true,
        }
    }
}

/// The current trick ("dong"): an ordered sequence of plays and passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trick {
    pub entries: Vec<PlayEntry>,
}

impl Trick {
    pub fn is_open(&self) -> bool {
        !self.entries.is_empty()
    }

    /// The leading play: the first non-passed entry.
    pub fn leading(&self) -> Option<&PlayEntry> {
        self.entries.iter().find(|e| !e.passed)
    }

    /// The most recent non-passed entry, i.e. the play to beat.
    pub fn last_active(&self) -> Option<&PlayEntry> {
        self.entries.iter().rev().find(|e| !e.passed)
    }

    /// Card count every follow play and pass discard must match.
    pub fn required_count(&self) -> Option<usize> {
        self.leading().map(|e| e.cards.len())
    }

    pub fn active_entries(&self) -> Vec<&PlayEntry> {
        self.entries.iter().filter(|e| !e.passed).collect()
    }
}

/// Per-hand state, created at dice resolution and discarded at hand end.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub hands: [Vec<Card>; SEATS],
    pub current_seat: Seat,
    pub trick: Trick,
    /// Seat that opened the current trick.
    pub trick_leader: Option<Seat>,
    /// Cards won in tricks this hand, per seat (trick value = leading
    /// play's card count, not trick count).
    pub dong_counts: [u8; SEATS],
    /// Sticky forfeiture flags for this hand.
    pub out_flags: [bool; SEATS],
}

impl RoundState {
    pub fn new(hands: [Vec<Card>; SEATS], first_player: Seat) -> Self {
        Self {
            hands,
            current_seat: first_player,
            trick: Trick::default(),
            trick_leader: None,
            dong_counts: [0; SEATS],
            out_flags: [false; SEATS],
        }
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.hands[seat as usize]
    }

    pub fn hand_counts(&self) -> [usize; SEATS] {
        [
            self.hands[0].len(),
            self.hands[1].len(),
            self.hands[2].len(),
            self.hands[3].len(),
        ]
    }

    /// The hand ends once every seat is either OUT or holds no cards.
    pub fn is_hand_complete(&self) -> bool {
        (0..SEATS).all(|s| self.out_flags[s] || self.hands[s].is_empty())
    }

    /// Remove the given cards (already verified to be held) from a hand.
    pub fn take_from_hand(&mut self, seat: Seat, cards: &[Card]) {
        let hand = &mut self.hands[seat as usize];
        for card in cards {
            if let Some(pos) = hand.iter().position(|c| c.id == card.id) {
                hand.remove(pos);
            }
        }
    }
}
