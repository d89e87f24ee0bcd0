//! Wire protocol: JSON messages tagged with a camelCase `type` field,
//! matching the message names the game client speaks.

use serde::{Deserialize, Serialize};

use crate::domain::settlement::ZhiZunInfo;
use crate::domain::{Card, Seat, SEATS};

/// Inbound card reference. Clients may send whole card objects; only the
/// id is honored — the server re-derives everything else from the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CardRef {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMsg {
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_id: String,
        player_id: String,
        player_name: String,
        #[serde(default)]
        position: Option<usize>,
    },
    Ready,
    RollDice,
    PlayCards {
        cards: Vec<CardRef>,
    },
    Pass {
        #[serde(default)]
        cards: Vec<CardRef>,
    },
}

/// Public view of one seat in the lobby.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub name: String,
    pub is_bot: bool,
    pub ready: bool,
}

/// Public view of one trick entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayView {
    pub player_index: Seat,
    pub cards: Vec<Card>,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMsg {
    #[serde(rename_all = "camelCase")]
    ShowSeats {
        room_id: String,
        seats: Vec<SeatView>,
    },
    SeatUpdate {
        seats: Vec<SeatView>,
    },
    SeatTaken {
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    JoinSuccess {
        room_id: String,
        position: usize,
        seats: Vec<SeatView>,
    },
    #[serde(rename_all = "camelCase")]
    PlayerReady {
        player_index: Seat,
        seats: Vec<SeatView>,
    },
    #[serde(rename_all = "camelCase")]
    PlayerLeft {
        player_index: Seat,
        seats: Vec<SeatView>,
    },
    GameStart,
    #[serde(rename_all = "camelCase")]
    WaitForDice {
        dealer_position: Option<Seat>,
        /// Seat that must roll; `None` on the first hand (anyone may).
        roller: Option<Seat>,
    },
    #[serde(rename_all = "camelCase")]
    DiceRolled {
        dice1: u8,
        dice2: u8,
        first_player: Seat,
        dealer_position: Seat,
    },
    /// Private, per seat.
    DealCards {
        cards: Vec<Card>,
        position: Seat,
    },
    #[serde(rename_all = "camelCase")]
    TurnChange {
        current_player: Seat,
    },
    #[serde(rename_all = "camelCase")]
    CardsPlayed {
        player_index: Seat,
        cards: Vec<Card>,
        current_dong: Vec<PlayView>,
        hand_counts: [usize; SEATS],
    },
    #[serde(rename_all = "camelCase")]
    PlayerPassed {
        player_index: Seat,
        discarded_cards: Vec<Card>,
        hand_counts: [usize; SEATS],
    },
    #[serde(rename_all = "camelCase")]
    PlayerOut {
        player_index: Seat,
    },
    #[serde(rename_all = "camelCase")]
    DongFinished {
        winner: Seat,
        dong_value: u8,
        dong_scores: [u8; SEATS],
        scores: [i32; SEATS],
        #[serde(skip_serializing_if = "Option::is_none")]
        zhi_zun_info: Option<ZhiZunInfo>,
    },
    #[serde(rename_all = "camelCase")]
    NewDong {
        current_player: Seat,
        dealer_position: Seat,
    },
    #[serde(rename_all = "camelCase")]
    GameOver {
        winner: Seat,
        final_scores: [i32; SEATS],
    },
    Error {
        message: String,
    },
}
