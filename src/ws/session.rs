//! Per-connection websocket actor. Parses client messages, routes them
//! to the connection's room actor, and pushes room messages back out.

use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::{RoomActor, RoomCmd, SessionSend};
use crate::state::AppState;
use crate::ws::protocol::{CardRef, ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub struct WsSession {
    /// Server-side connection id, for log correlation only.
    session_id: Uuid,
    state: AppState,
    hb: Instant,
    /// Set once a `joinRoom` succeeds in reaching a room.
    player_id: Option<String>,
    room: Option<Addr<RoomActor>>,
}

impl WsSession {
    pub fn new(state: AppState) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            state,
            hb: Instant::now(),
            player_id: None,
            room: None,
        }
    }

    fn heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                debug!("websocket client timed out, disconnecting");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn send_error(&self, ctx: &mut ws::WebsocketContext<Self>, message: &str) {
        let msg = ServerMsg::Error {
            message: message.to_string(),
        };
        if let Ok(text) = serde_json::to_string(&msg) {
            ctx.text(text);
        }
    }

    fn handle_msg(&mut self, msg: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        if let ClientMsg::JoinRoom {
            room_id,
            player_id,
            player_name,
            position,
        } = msg
        {
            let room = self.state.rooms.get_or_create(&room_id);
            room.do_send(RoomCmd::Join {
                player_id: player_id.clone(),
                player_name,
                position,
                conn: ctx.address().recipient(),
            });
            self.player_id = Some(player_id);
            self.room = Some(room);
            return;
        }

        let (Some(player_id), Some(room)) = (&self.player_id, &self.room) else {
            self.send_error(ctx, "请先加入房间");
            return;
        };
        let player_id = player_id.clone();
        match msg {
            ClientMsg::Ready => room.do_send(RoomCmd::Ready { player_id }),
            ClientMsg::RollDice => room.do_send(RoomCmd::RollDice { player_id }),
            ClientMsg::PlayCards { cards } => room.do_send(RoomCmd::PlayCards {
                player_id,
                cards: card_ids(cards),
            }),
            ClientMsg::Pass { cards } => room.do_send(RoomCmd::Pass {
                player_id,
                cards: card_ids(cards),
            }),
            ClientMsg::JoinRoom { .. } => {}
        }
    }
}

fn card_ids(cards: Vec<CardRef>) -> Vec<String> {
    cards.into_iter().map(|c| c.id).collect()
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(session_id = %self.session_id, "websocket session opened");
        self.heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(session_id = %self.session_id, "websocket session closed");
        if let (Some(player_id), Some(room)) = (self.player_id.take(), self.room.take()) {
            room.do_send(RoomCmd::Leave { player_id });
        }
    }
}

impl Handler<SessionSend> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: SessionSend, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg.0) {
            Ok(text) => ctx.text(text),
            Err(err) => warn!(%err, "failed to serialize outbound message"),
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(bytes)) => {
                self.hb = Instant::now();
                ctx.pong(&bytes);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.hb = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(msg) => self.handle_msg(msg, ctx),
                    Err(err) => {
                        debug!(%err, "unparseable client message");
                        self.send_error(ctx, "无法识别的消息");
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.send_error(ctx, "不支持二进制消息");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {}
            Err(err) => {
                warn!(%err, "websocket protocol error");
                ctx.stop();
            }
        }
    }
}
