//! The room actor: owns one [`GameRoom`], serializes all mutations, and
//! turns the room's [`Effects`] into websocket deliveries and timers.

use std::collections::HashMap;
use std::time::Duration;

use actix::prelude::*;
use rand::Rng;
use tracing::debug;

use crate::config::PacingConfig;
use crate::domain::Seat;
use crate::services::game_flow::{Effects, GameRoom, JoinOutcome, Outbound, TimerReq};
use crate::services::rooms::RoomManager;
use crate::ws::protocol::ServerMsg;

/// A server message pushed to one session.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SessionSend(pub ServerMsg);

/// Commands a session forwards into its room.
#[derive(Message)]
#[rtype(result = "()")]
pub enum RoomCmd {
    Join {
        player_id: String,
        player_name: String,
        position: Option<usize>,
        conn: Recipient<SessionSend>,
    },
    Leave {
        player_id: String,
    },
    Ready {
        player_id: String,
    },
    RollDice {
        player_id: String,
    },
    PlayCards {
        player_id: String,
        cards: Vec<String>,
    },
    Pass {
        player_id: String,
        cards: Vec<String>,
    },
}

pub struct RoomActor {
    room: GameRoom,
    /// Live connections, keyed by player id.
    conns: HashMap<String, Recipient<SessionSend>>,
    registry: RoomManager,
    pacing: PacingConfig,
}

impl RoomActor {
    pub fn start_new(room_id: String, registry: RoomManager, pacing: PacingConfig) -> Addr<Self> {
        Self {
            room: GameRoom::new(room_id, None),
            conns: HashMap::new(),
            registry,
            pacing,
        }
        .start()
    }

    fn send_to_seat(&self, seat: Seat, msg: ServerMsg) {
        if let Some(player_id) = self.room.player_at(seat) {
            if let Some(conn) = self.conns.get(player_id) {
                conn.do_send(SessionSend(msg));
            }
        }
    }

    fn broadcast(&self, msg: ServerMsg) {
        for conn in self.conns.values() {
            conn.do_send(SessionSend(msg.clone()));
        }
    }

    fn bot_delay(&self) -> Duration {
        let (min, max) = (self.pacing.bot_delay_min_ms, self.pacing.bot_delay_max_ms);
        if max <= min {
            return Duration::from_millis(min);
        }
        Duration::from_millis(rand::rng().random_range(min..=max))
    }

    fn dispatch(&mut self, effects: Effects, ctx: &mut Context<Self>) {
        for out in effects.outbound {
            match out {
                Outbound::Broadcast(msg) => self.broadcast(msg),
                Outbound::To(seat, msg) => self.send_to_seat(seat, msg),
            }
        }
        for timer in effects.timers {
            let delay = self.bot_delay();
            ctx.run_later(delay, move |act, ctx| {
                let effects = match timer {
                    TimerReq::BotMove { seat, generation } => act.room.bot_move(seat, generation),
                    TimerReq::BotDice { seat, generation } => act.room.bot_dice(seat, generation),
                };
                act.dispatch(effects, ctx);
            });
        }
        if effects.close_room {
            debug!(room_id = %self.room.room_id(), "closing empty room");
            self.registry.remove(self.room.room_id());
            ctx.stop();
        }
    }
}

impl Actor for RoomActor {
    type Context = Context<Self>;
}

impl Handler<RoomCmd> for RoomActor {
    type Result = ();

    fn handle(&mut self, cmd: RoomCmd, ctx: &mut Context<Self>) {
        match cmd {
            RoomCmd::Join {
                player_id,
                player_name,
                position,
                conn,
            } => {
                conn.do_send(SessionSend(self.room.show_seats()));
                match self.room.join(&player_id, &player_name, position) {
                    JoinOutcome::Seated { effects, .. } => {
                        self.conns.insert(player_id, conn);
                        self.dispatch(effects, ctx);
                    }
                    JoinOutcome::Rejected { reply } => {
                        conn.do_send(SessionSend(reply));
                    }
                }
            }
            RoomCmd::Leave { player_id } => {
                self.conns.remove(&player_id);
                let effects = self.room.leave(&player_id);
                self.dispatch(effects, ctx);
            }
            RoomCmd::Ready { player_id } => {
                let effects = self.room.ready(&player_id);
                self.dispatch(effects, ctx);
            }
            RoomCmd::RollDice { player_id } => {
                let effects = self.room.roll_dice(&player_id);
                self.dispatch(effects, ctx);
            }
            RoomCmd::PlayCards { player_id, cards } => {
                let effects = self.room.play_cards(&player_id, &cards);
                self.dispatch(effects, ctx);
            }
            RoomCmd::Pass { player_id, cards } => {
                let effects = self.room.pass(&player_id, &cards);
                self.dispatch(effects, ctx);
            }
        }
    }
}
