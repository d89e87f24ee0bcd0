//! Service layer: room state machines, the per-room actor, and the room
//! registry.

pub mod game_flow;
pub mod room_actor;
pub mod rooms;


pub use game_flow::{Effects, GameRoom, JoinOutcome, Outbound, TimerReq};
pub use room_actor::{RoomActor, RoomCmd, SessionSend};
pub use rooms::RoomManager;
