//! Websocket transport: wire protocol types and the per-connection actor.

pub mod protocol;
pub mod session;

pub use protocol::{ClientMsg, ServerMsg};
pub use session::WsSession;
