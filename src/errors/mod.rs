//! Error handling for the Tianjiu backend.

pub mod domain;

pub use domain::{DomainError, RuleViolationKind};
