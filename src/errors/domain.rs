//! Domain-level error type used across the rules engine and services.
//!
//! Rule violations are recoverable: they are surfaced to the acting client
//! as a rejection with a reason and never mutate game state. Invariant
//! violations are fatal to the round and must be logged by the caller.

use thiserror::Error;

/// The fixed taxonomy of play-rejection reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleViolationKind {
    /// A referenced card id is unknown or not in the acting seat's hand.
    InvalidCardOwnership,
    /// The selected cards resolve to no known combination.
    InvalidCombination,
    /// A follow play (or pass discard) has the wrong card count.
    WrongCardCount,
    /// A follow play is the wrong category or combination kind.
    TypeMismatch,
    /// The follow play does not strictly beat the last play (ties lose).
    InsufficientPower,
    /// The acting seat is not the current seat.
    OutOfTurn,
    /// The acting seat has been flagged OUT for this hand.
    SeatIsOut,
}

impl RuleViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleViolationKind::InvalidCardOwnership => "invalid_card_ownership",
            RuleViolationKind::InvalidCombination => "invalid_combination",
            RuleViolationKind::WrongCardCount => "wrong_card_count",
            RuleViolationKind::TypeMismatch => "type_mismatch",
            RuleViolationKind::InsufficientPower => "insufficient_power",
            RuleViolationKind::OutOfTurn => "out_of_turn",
            RuleViolationKind::SeatIsOut => "seat_is_out",
        }
    }
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A rejected action: reported to the actor, state untouched.
    #[error("rule violation {}: {detail}", kind.as_str())]
    Rule {
        kind: RuleViolationKind,
        detail: String,
    },
    /// Broken internal invariant: the round must be abandoned.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl DomainError {
    pub fn rule(kind: RuleViolationKind, detail: impl Into<String>) -> Self {
        Self::Rule {
            kind,
            detail: detail.into(),
        }
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant(detail.into())
    }

    /// Rejection kind, if this is a recoverable rule violation.
    pub fn kind(&self) -> Option<RuleViolationKind> {
        match self {
            DomainError::Rule { kind, .. } => Some(*kind),
            DomainError::Invariant(_) => None,
        }
    }

    /// Human-readable reason suitable for the `error{message}` event.
    pub fn client_message(&self) -> String {
        match self {
            DomainError::Rule { detail, .. } => detail.clone(),
            DomainError::Invariant(_) => "internal error".to_string(),
        }
    }
}
