//! Bot players. Bots are strictly downstream of the validator's public
//! contract: they enumerate candidate selections and keep only what the
//! validator accepts.

pub mod greedy;
pub mod trait_def;

pub use greedy::GreedyBot;
pub use trait_def::{BotAction, BotError, BotPolicy};
