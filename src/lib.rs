//! Tianjiu (天九) game server: a four-player trick-taking card game over
//! websockets, with bot opponents filling empty seats.
//!
//! Layering, outermost first: `ws` (transport) -> `services` (rooms and
//! orchestration) -> `domain` (pure rules engine). The domain layer never
//! sees a connection; the transport layer never touches a rule.

pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod state;
pub mod ws;
