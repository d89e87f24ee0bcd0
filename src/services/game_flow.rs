//! Room orchestration: lobby seating, the dice ceremony, turn routing,
//! settlement, and bot scheduling.
//!
//! `GameRoom` is a pure state machine: every public method mutates the
//! room and returns the [`Effects`] (outbound messages and timer
//! requests) the caller must dispatch. All transport and timing lives in
//! the room actor, which keeps this module directly testable.

use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use tracing::{error, info, warn};

use crate::ai::{BotAction, BotPolicy, GreedyBot};
use crate::domain::state::{opposite_seat, RoundState, Seat, SEATS};
use crate::domain::tricks::{self, Advance};
use crate::domain::{
    deal_hands, dealer_after, game_winner, roll_dice, seat_from_dice, settle_trick, Card,
};
use crate::errors::domain::DomainError;
use crate::ws::protocol::{PlayView, SeatView, ServerMsg};

/// An outbound message the caller must deliver.
#[derive(Debug, Clone)]
pub enum Outbound {
    Broadcast(ServerMsg),
    /// Deliver to the connection seated at `Seat`; dropped if the seat is
    /// a bot or disconnected.
    To(Seat, ServerMsg),
}

/// A deferred bot action the caller must schedule. `generation` must
/// match the room's generation when the timer fires, or the action is
/// stale and must be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerReq {
    BotMove { seat: Seat, generation: u64 },
    BotDice { seat: Seat, generation: u64 },
}

#[derive(Debug, Default)]
pub struct Effects {
    pub outbound: Vec<Outbound>,
    pub timers: Vec<TimerReq>,
    /// Set when the last human left and the room should be torn down.
    pub close_room: bool,
}

impl Effects {
    fn broadcast(&mut self, msg: ServerMsg) {
        self.outbound.push(Outbound::Broadcast(msg));
    }

    fn to(&mut self, seat: Seat, msg: ServerMsg) {
        self.outbound.push(Outbound::To(seat, msg));
    }
}

/// Result of a join attempt. A rejected joiner holds no seat, so the
/// reply goes back on the joining connection directly.
#[derive(Debug)]
pub enum JoinOutcome {
    Seated { position: usize, effects: Effects },
    Rejected { reply: ServerMsg },
}

#[derive(Debug, Clone)]
struct PlayerSlot {
    player_id: String,
    name: String,
    is_bot: bool,
    ready: bool,
}

impl PlayerSlot {
    fn bot(index: usize) -> Self {
        Self {
            player_id: format!("bot-{index}"),
            name: format!("电脑{}", index + 1),
            is_bot: true,
            // Bots are always ready.
            ready: true,
        }
    }
}

/// One game room: four seats, a cumulative score sheet, and at most one
/// running hand.
pub struct GameRoom {
    room_id: String,
    players: [PlayerSlot; SEATS],
    scores: [i32; SEATS],
    /// Next hand's dealer; `None` until the first dice ceremony resolves.
    dealer: Option<Seat>,
    started: bool,
    waiting_for_dice: bool,
    /// Seat that must roll; `None` on the first hand (any human may).
    expected_roller: Option<Seat>,
    round: Option<RoundState>,
    bot: GreedyBot,
    rng: ChaCha12Rng,
    /// Bumped each time a bot timer is armed. A firing timer whose value
    /// no longer matches was superseded and must do nothing.
    generation: u64,
}

impl GameRoom {
    /// `Some(seed)` makes dealing, dice, and bot play reproducible.
    pub fn new(room_id: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha12Rng::seed_from_u64(s),
            None => ChaCha12Rng::from_os_rng(),
        };
        Self {
            room_id: room_id.into(),
            players: [
                PlayerSlot::bot(0),
                PlayerSlot::bot(1),
                PlayerSlot::bot(2),
                PlayerSlot::bot(3),
            ],
            scores: [0; SEATS],
            dealer: None,
            started: false,
            waiting_for_dice: false,
            expected_roller: None,
            round: None,
            bot: GreedyBot::new(seed),
            rng,
            generation: 0,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_humans(&self) -> bool {
        self.players.iter().any(|p| !p.is_bot)
    }

    /// The human player id seated at `seat`, if any.
    pub fn player_at(&self, seat: Seat) -> Option<&str> {
        let player = &self.players[seat as usize];
        (!player.is_bot).then_some(player.player_id.as_str())
    }

    fn seat_of(&self, player_id: &str) -> Option<Seat> {
        self.players
            .iter()
            .position(|p| !p.is_bot && p.player_id == player_id)
            .map(|i| i as Seat)
    }

    fn seats_view(&self) -> Vec<SeatView> {
        self.players
            .iter()
            .map(|p| SeatView {
                name: p.name.clone(),
                is_bot: p.is_bot,
                ready: p.ready,
            })
            .collect()
    }

    fn trick_view(&self, round: &RoundState) -> Vec<PlayView> {
        round
            .trick
            .entries
            .iter()
            .map(|e| PlayView {
                player_index: e.seat,
                cards: e.cards.clone(),
                passed: e.passed,
            })
            .collect()
    }

    /// The `showSeats` snapshot sent to a connection before it joins.
    pub fn show_seats(&self) -> ServerMsg {
        ServerMsg::ShowSeats {
            room_id: self.room_id.clone(),
            seats: self.seats_view(),
        }
    }

    // ---- lobby ----

    pub fn join(
        &mut self,
        player_id: &str,
        player_name: &str,
        position: Option<usize>,
    ) -> JoinOutcome {
        // Rejoin keeps the existing seat.
        if let Some(seat) = self.seat_of(player_id) {
            let mut effects = Effects::default();
            effects.to(
                seat,
                ServerMsg::JoinSuccess {
                    room_id: self.room_id.clone(),
                    position: seat as usize,
                    seats: self.seats_view(),
                },
            );
            self.resync_seat(seat, &mut effects);
            return JoinOutcome::Seated {
                position: seat as usize,
                effects,
            };
        }

        let seat = match position {
            Some(p) if p >= SEATS => {
                return JoinOutcome::Rejected {
                    reply: ServerMsg::Error {
                        message: "无效的座位".to_string(),
                    },
                }
            }
            Some(p) if !self.players[p].is_bot => {
                return JoinOutcome::Rejected {
                    reply: ServerMsg::SeatTaken {
                        message: "该座位已有玩家".to_string(),
                    },
                }
            }
            Some(p) => p,
            None => match self.players.iter().position(|p| p.is_bot) {
                Some(p) => p,
                None => {
                    return JoinOutcome::Rejected {
                        reply: ServerMsg::SeatTaken {
                            message: "房间已满".to_string(),
                        },
                    }
                }
            },
        };

        self.players[seat] = PlayerSlot {
            player_id: player_id.to_string(),
            name: player_name.to_string(),
            is_bot: false,
            ready: false,
        };
        info!(room_id = %self.room_id, seat, player = player_name, "player joined");

        let mut effects = Effects::default();
        effects.to(
            seat as Seat,
            ServerMsg::JoinSuccess {
                room_id: self.room_id.clone(),
                position: seat,
                seats: self.seats_view(),
            },
        );
        effects.broadcast(ServerMsg::SeatUpdate {
            seats: self.seats_view(),
        });
        self.resync_seat(seat as Seat, &mut effects);
        JoinOutcome::Seated {
            position: seat,
            effects,
        }
    }

    /// Bring a joiner (or rejoiner) up to date with a running hand: a
    /// human taking over a bot seat inherits its cards mid-hand.
    fn resync_seat(&mut self, seat: Seat, effects: &mut Effects) {
        if !self.started {
            return;
        }
        effects.to(seat, ServerMsg::GameStart);
        if self.waiting_for_dice {
            effects.to(
                seat,
                ServerMsg::WaitForDice {
                    dealer_position: self.dealer,
                    roller: self.expected_roller,
                },
            );
        }
        if let Some(round) = &self.round {
            effects.to(
                seat,
                ServerMsg::DealCards {
                    cards: round.hand(seat).to_vec(),
                    position: seat,
                },
            );
            effects.to(
                seat,
                ServerMsg::TurnChange {
                    current_player: round.current_seat,
                },
            );
        }
    }

    pub fn leave(&mut self, player_id: &str) -> Effects {
        let mut effects = Effects::default();
        let Some(seat) = self.seat_of(player_id) else {
            return effects;
        };

        self.players[seat as usize] = PlayerSlot::bot(seat as usize);
        info!(room_id = %self.room_id, seat, "player left, seat reverts to bot");
        effects.broadcast(ServerMsg::PlayerLeft {
            player_index: seat,
            seats: self.seats_view(),
        });
        effects.broadcast(ServerMsg::SeatUpdate {
            seats: self.seats_view(),
        });

        if !self.has_humans() {
            effects.close_room = true;
            return effects;
        }

        // The replacing bot takes over any action the leaver owed.
        if self.waiting_for_dice && self.expected_roller == Some(seat) {
            self.arm_bot_dice(seat, &mut effects);
        } else if self.round.as_ref().is_some_and(|r| r.current_seat == seat) {
            self.arm_bot_move(seat, &mut effects);
        }
        effects
    }

    pub fn ready(&mut self, player_id: &str) -> Effects {
        let mut effects = Effects::default();
        if self.started {
            return effects;
        }
        let Some(seat) = self.seat_of(player_id) else {
            return effects;
        };
        self.players[seat as usize].ready = true;
        effects.broadcast(ServerMsg::PlayerReady {
            player_index: seat,
            seats: self.seats_view(),
        });

        if self.players.iter().all(|p| p.ready) {
            self.start_game(&mut effects);
        }
        effects
    }

    /// Every hand opens with the dice ceremony. On the first hand any
    /// human may roll; afterwards the seat opposite the dealer must.
    fn start_game(&mut self, effects: &mut Effects) {
        self.started = true;
        self.waiting_for_dice = true;
        self.expected_roller = self.dealer.map(opposite_seat);
        info!(room_id = %self.room_id, roller = ?self.expected_roller, "game starting");

        effects.broadcast(ServerMsg::GameStart);
        effects.broadcast(ServerMsg::WaitForDice {
            dealer_position: self.dealer,
            roller: self.expected_roller,
        });

        if let Some(roller) = self.expected_roller {
            if self.players[roller as usize].is_bot {
                self.arm_bot_dice(roller, effects);
            }
        }
    }

    // ---- dice ceremony ----

    pub fn roll_dice(&mut self, player_id: &str) -> Effects {
        let mut effects = Effects::default();
        let Some(seat) = self.seat_of(player_id) else {
            return effects;
        };
        if !self.waiting_for_dice {
            effects.to(
                seat,
                ServerMsg::Error {
                    message: "现在不能掷骰子".to_string(),
                },
            );
            return effects;
        }
        if let Some(roller) = self.expected_roller {
            if roller != seat {
                effects.to(
                    seat,
                    ServerMsg::Error {
                        message: "应由庄家对面的玩家掷骰子".to_string(),
                    },
                );
                return effects;
            }
        }
        self.resolve_dice(seat, &mut effects);
        effects
    }

    pub fn bot_dice(&mut self, seat: Seat, generation: u64) -> Effects {
        let mut effects = Effects::default();
        if generation != self.generation
            || !self.waiting_for_dice
            || !self.players[seat as usize].is_bot
        {
            return effects;
        }
        self.resolve_dice(seat, &mut effects);
        effects
    }

    fn resolve_dice(&mut self, roller: Seat, effects: &mut Effects) {
        let (d1, d2) = roll_dice(&mut self.rng);
        let first_player = seat_from_dice(roller, d1 + d2);
        let dealer = dealer_after(first_player);
        self.dealer = Some(dealer);
        self.waiting_for_dice = false;
        self.expected_roller = None;
        info!(
            room_id = %self.room_id,
            roller, d1, d2, first_player, dealer, "dice resolved"
        );

        effects.broadcast(ServerMsg::DiceRolled {
            dice1: d1,
            dice2: d2,
            first_player,
            dealer_position: dealer,
        });

        let hands = deal_hands(&mut self.rng);
        for seat in 0..SEATS as Seat {
            effects.to(
                seat,
                ServerMsg::DealCards {
                    cards: hands[seat as usize].clone(),
                    position: seat,
                },
            );
        }
        self.round = Some(RoundState::new(hands, first_player));

        effects.broadcast(ServerMsg::TurnChange {
            current_player: first_player,
        });
        self.schedule_if_bot(first_player, effects);
    }

    // ---- trick play ----

    pub fn play_cards(&mut self, player_id: &str, card_ids: &[String]) -> Effects {
        let mut effects = Effects::default();
        let Some(seat) = self.seat_of(player_id) else {
            return effects;
        };
        if let Err(err) = self.play_from_seat(seat, card_ids, &mut effects) {
            self.report_error(seat, err, &mut effects);
        }
        effects
    }

    pub fn pass(&mut self, player_id: &str, discard_ids: &[String]) -> Effects {
        let mut effects = Effects::default();
        let Some(seat) = self.seat_of(player_id) else {
            return effects;
        };
        if let Err(err) = self.pass_from_seat(seat, discard_ids, &mut effects) {
            self.report_error(seat, err, &mut effects);
        }
        effects
    }

    fn play_from_seat(
        &mut self,
        seat: Seat,
        card_ids: &[String],
        effects: &mut Effects,
    ) -> Result<(), DomainError> {
        let round = self
            .round
            .as_mut()
            .ok_or_else(|| DomainError::invariant("play with no active round"))?;
        let (combo, advance) = tricks::play_cards(round, seat, card_ids)?;

        let round = self.round.as_ref().ok_or_else(unreachable_round)?;
        effects.broadcast(ServerMsg::CardsPlayed {
            player_index: seat,
            cards: combo.cards.clone(),
            current_dong: self.trick_view(round),
            hand_counts: round.hand_counts(),
        });
        self.handle_advance(advance, effects)
    }

    fn pass_from_seat(
        &mut self,
        seat: Seat,
        discard_ids: &[String],
        effects: &mut Effects,
    ) -> Result<(), DomainError> {
        let round = self
            .round
            .as_mut()
            .ok_or_else(|| DomainError::invariant("pass with no active round"))?;
        let (discarded, advance) = tricks::pass(round, seat, discard_ids)?;

        let round = self.round.as_ref().ok_or_else(unreachable_round)?;
        effects.broadcast(ServerMsg::PlayerPassed {
            player_index: seat,
            discarded_cards: discarded,
            hand_counts: round.hand_counts(),
        });
        self.handle_advance(advance, effects)
    }

    fn handle_advance(&mut self, advance: Advance, effects: &mut Effects) -> Result<(), DomainError> {
        let auto_passed = match &advance {
            Advance::Turn { auto_passed, .. } => auto_passed.clone(),
            Advance::TrickComplete { auto_passed } => auto_passed.clone(),
        };
        if let Some(round) = &self.round {
            for seat in auto_passed {
                effects.broadcast(ServerMsg::PlayerPassed {
                    player_index: seat,
                    discarded_cards: Vec::new(),
                    hand_counts: round.hand_counts(),
                });
            }
        }

        match advance {
            Advance::Turn { seat, .. } => {
                effects.broadcast(ServerMsg::TurnChange {
                    current_player: seat,
                });
                self.schedule_if_bot(seat, effects);
                Ok(())
            }
            Advance::TrickComplete { .. } => self.settle(effects),
        }
    }

    fn settle(&mut self, effects: &mut Effects) -> Result<(), DomainError> {
        let round = self.round.as_mut().ok_or_else(unreachable_round)?;
        let outcome = settle_trick(round, &mut self.scores)?;

        for seat in &outcome.newly_out {
            effects.broadcast(ServerMsg::PlayerOut {
                player_index: *seat,
            });
        }
        effects.broadcast(ServerMsg::DongFinished {
            winner: outcome.winner,
            dong_value: outcome.dong_value,
            dong_scores: round.dong_counts,
            scores: self.scores,
            zhi_zun_info: outcome.zhi_zun_info.clone(),
        });

        if outcome.hand_complete {
            let dong_counts = round.dong_counts;
            self.finish_hand(dong_counts, effects);
            return Ok(());
        }

        let dealer = self
            .dealer
            .ok_or_else(|| DomainError::invariant("running hand without a dealer"))?;
        effects.broadcast(ServerMsg::NewDong {
            current_player: outcome.winner,
            dealer_position: dealer,
        });
        self.schedule_if_bot(outcome.winner, effects);
        Ok(())
    }

    /// Hand over: each seat's dong count folds into its cumulative score,
    /// the score leader wins and deals next. The room returns to the
    /// lobby; the next hand starts once every human readies again.
    fn finish_hand(&mut self, dong_counts: [u8; SEATS], effects: &mut Effects) {
        for seat in 0..SEATS {
            self.scores[seat] += dong_counts[seat] as i32;
        }
        let winner = game_winner(&self.scores);
        info!(room_id = %self.room_id, winner, scores = ?self.scores, "hand complete");
        effects.broadcast(ServerMsg::GameOver {
            winner,
            final_scores: self.scores,
        });

        self.dealer = Some(winner);
        self.round = None;
        self.started = false;
        self.waiting_for_dice = false;
        for player in &mut self.players {
            player.ready = player.is_bot;
        }
        effects.broadcast(ServerMsg::SeatUpdate {
            seats: self.seats_view(),
        });
    }

    // ---- bots ----

    fn arm_bot_move(&mut self, seat: Seat, effects: &mut Effects) {
        self.generation += 1;
        effects.timers.push(TimerReq::BotMove {
            seat,
            generation: self.generation,
        });
    }

    fn arm_bot_dice(&mut self, seat: Seat, effects: &mut Effects) {
        self.generation += 1;
        effects.timers.push(TimerReq::BotDice {
            seat,
            generation: self.generation,
        });
    }

    fn schedule_if_bot(&mut self, seat: Seat, effects: &mut Effects) {
        if self.players[seat as usize].is_bot {
            self.arm_bot_move(seat, effects);
        }
    }

    pub fn bot_move(&mut self, seat: Seat, generation: u64) -> Effects {
        let mut effects = Effects::default();
        if generation != self.generation || !self.players[seat as usize].is_bot {
            return effects;
        }
        let Some(round) = &self.round else {
            return effects;
        };
        if round.current_seat != seat {
            return effects;
        }

        let decision = self.bot.decide(round.hand(seat), &round.trick);
        let result = match decision {
            Ok(BotAction::Play(ids)) => self.play_from_seat(seat, &ids, &mut effects),
            Ok(BotAction::Pass(ids)) => self.pass_from_seat(seat, &ids, &mut effects),
            Err(err) => {
                error!(room_id = %self.room_id, seat, %err, "bot failed to decide");
                return effects;
            }
        };
        if let Err(err) = result {
            self.report_error(seat, err, &mut effects);
        }
        effects
    }

    fn report_error(&mut self, seat: Seat, err: DomainError, effects: &mut Effects) {
        match err.kind() {
            Some(kind) => {
                warn!(
                    room_id = %self.room_id,
                    seat,
                    kind = kind.as_str(),
                    "rejected action: {err}"
                );
                effects.to(
                    seat,
                    ServerMsg::Error {
                        message: err.client_message(),
                    },
                );
            }
            // An invariant break leaves the round unrecoverable.
            None => {
                error!(room_id = %self.room_id, seat, %err, "round abandoned");
                self.round = None;
                self.started = false;
                self.waiting_for_dice = false;
                for player in &mut self.players {
                    player.ready = player.is_bot;
                }
                effects.broadcast(ServerMsg::Error {
                    message: "服务器内部错误，本局作废".to_string(),
                });
                effects.broadcast(ServerMsg::SeatUpdate {
                    seats: self.seats_view(),
                });
            }
        }
    }

    /// Test-only accessors.
    #[cfg(test)]
    pub(crate) fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn scores(&self) -> [i32; SEATS] {
        self.scores
    }

    #[cfg(test)]
    pub(crate) fn started(&self) -> bool {
        self.started
    }

    #[cfg(test)]
    pub(crate) fn hand_of(&self, seat: Seat) -> Vec<Card> {
        self.round
            .as_ref()
            .map(|r| r.hand(seat).to_vec())
            .unwrap_or_default()
    }
}

fn unreachable_round() -> DomainError {
    DomainError::invariant("round vanished mid-action")
}
