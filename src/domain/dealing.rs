//! Shuffling and dealing: 32 cards, 8 per seat, dealt round-robin.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::catalog::{Card, CATALOG};
use crate::domain::state::SEATS;

/// Shuffle the full catalog and deal 8 cards to each of the 4 seats.
pub fn deal_hands<R: Rng + ?Sized>(rng: &mut R) -> [Vec<Card>; SEATS] {
    let mut deck: Vec<Card> = CATALOG.to_vec();
    deck.shuffle(rng);

    let mut hands: [Vec<Card>; SEATS] = Default::default();
    for (i, card) in deck.into_iter().enumerate() {
        hands[i % SEATS].push(card);
    }
    hands
}

/// Roll two six-sided dice.
pub fn roll_dice<R: Rng + ?Sized>(rng: &mut R) -> (u8, u8) {
    (rng.random_range(1..=6), rng.random_range(1..=6))
}
