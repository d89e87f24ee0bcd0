//! Domain layer: pure rules-engine types and operations.

pub mod catalog;
pub mod combos;
pub mod dealing;
pub mod settlement;
pub mod state;
pub mod tricks;
pub mod validator;

#[cfg(test)]
mod tests_combos;
#[cfg(test)]
mod tests_settlement;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use catalog::{card, Card, Category, CATALOG};
pub use combos::{resolve, ComboKind, Combination};
pub use dealing::{deal_hands, roll_dice};
pub use settlement::{game_winner, settle_trick, TrickOutcome, ZhiZunInfo};
pub use state::{
    dealer_after, next_seat, opposite_seat, prev_seat, seat_from_dice, PlayEntry, RoundState, Seat,
    Trick, ROTATION, SEATS,
};
