//! Greedy bot: leads with its weakest legal combination and follows with
//! the weakest legal beat, with a per-count probability of holding back.

use parking_lot::Mutex;
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;

use crate::ai::trait_def::{BotAction, BotError, BotPolicy};
use crate::domain::combos::resolve;
use crate::domain::state::Trick;
use crate::domain::validator::validate_play;
use crate::domain::Card;

/// Probability of actually playing a legal beat, per required card count.
fn beat_probability(count: usize) -> f64 {
    match count {
        1 => 0.6,
        _ => 0.7,
    }
}

pub struct GreedyBot {
    /// Interior mutability: `BotPolicy::decide` takes `&self` but the RNG
    /// needs mutable access.
    rng: Mutex<ChaCha12Rng>,
}

impl GreedyBot {
    /// `Some(seed)` gives reproducible decisions for tests; `None` uses
    /// system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha12Rng::seed_from_u64(s),
            None => ChaCha12Rng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn lead(&self, hand: &[Card]) -> Result<BotAction, BotError> {
        let max_size = hand.len().min(4);
        let mut best: Option<(u16, Vec<String>)> = None;
        for size in 1..=max_size {
            for subset in subsets(hand, size) {
                if let Some(combo) = resolve(&subset) {
                    let ids: Vec<String> = subset.iter().map(|c| c.id.to_string()).collect();
                    match &best {
                        Some((power, _)) if *power <= combo.power => {}
                        _ => best = Some((combo.power, ids)),
                    }
                }
            }
        }
        // Every single card resolves, so a non-empty hand always leads.
        best.map(|(_, ids)| BotAction::Play(ids))
            .ok_or(BotError::EmptyHand)
    }

    fn follow(&self, hand: &[Card], trick: &Trick) -> Result<BotAction, BotError> {
        let required = trick
            .required_count()
            .ok_or_else(|| BotError::Internal("follow called on an empty trick".into()))?;

        let mut best: Option<(u16, Vec<String>)> = None;
        for subset in subsets(hand, required) {
            let ids: Vec<String> = subset.iter().map(|c| c.id.to_string()).collect();
            if let Ok(combo) = validate_play(hand, &ids, trick) {
                match &best {
                    Some((power, _)) if *power <= combo.power => {}
                    _ => best = Some((combo.power, ids)),
                }
            }
        }

        if let Some((_, ids)) = best {
            let mut rng = self.rng.lock();
            if rng.random_bool(beat_probability(required)) {
                return Ok(BotAction::Play(ids));
            }
        }

        Ok(BotAction::Pass(lowest_cards(hand, required)))
    }
}

impl BotPolicy for GreedyBot {
    fn decide(&self, hand: &[Card], trick: &Trick) -> Result<BotAction, BotError> {
        if hand.is_empty() {
            return Err(BotError::EmptyHand);
        }
        match trick.last_active() {
            None => self.lead(hand),
            Some(_) => self.follow(hand, trick),
        }
    }
}

/// The seat's lowest-power cards, used as pass discards.
fn lowest_cards(hand: &[Card], count: usize) -> Vec<String> {
    let mut sorted: Vec<&Card> = hand.iter().collect();
    sorted.sort_by_key(|c| c.power);
    sorted.iter().take(count).map(|c| c.id.to_string()).collect()
}

/// All subsets of `hand` of the given size. Hands hold at most 8 cards,
/// so the enumeration is tiny.
fn subsets(hand: &[Card], size: usize) -> Vec<Vec<Card>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(size);
    fn rec(hand: &[Card], size: usize, start: usize, current: &mut Vec<Card>, out: &mut Vec<Vec<Card>>) {
        if current.len() == size {
            out.push(current.clone());
            return;
        }
        for i in start..hand.len() {
            current.push(hand[i]);
            rec(hand, size, i + 1, current, out);
            current.pop();
        }
    }
    rec(hand, size, 0, &mut current, &mut out);
    out
}
