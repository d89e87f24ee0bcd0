//! Bot policy trait definition.

use std::fmt;

use crate::domain::state::Trick;
use crate::domain::Card;

/// Errors that can occur during bot decision-making.
#[derive(Debug)]
pub enum BotError {
    /// Bot was asked to act with no cards in hand.
    EmptyHand,
    /// Bot encountered an internal error.
    Internal(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::EmptyHand => write!(f, "bot has no cards to act with"),
            BotError::Internal(msg) => write!(f, "bot internal error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

/// A bot's chosen action, expressed as wire card ids so it routes through
/// the identical validation path as a human action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotAction {
    Play(Vec<String>),
    /// Pass, discarding the given cards (count must match the lead).
    Pass(Vec<String>),
}

/// Trait for bot players.
///
/// Implementations see only the seat's own hand and the public trick, and
/// must derive legality exclusively through the validator's contract —
/// never by re-implementing rules.
pub trait BotPolicy: Send + Sync {
    fn decide(&self, hand: &[Card], trick: &Trick) -> Result<BotAction, BotError>;
}
