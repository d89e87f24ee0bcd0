//! Combination resolver: maps a 1-4 card multiset to its identity and power.
//!
//! The tables here are exhaustive, hard-coded game content. There is no
//! heuristic fallback: a selection that matches none of the enumerated
//! shapes is simply not a combination.

use crate::domain::catalog::{
    wenwu_family, Card, Category, WEN_ZHIZUN_COUNTER_NAME, WEN_ZHIZUN_NAME, ZHIZUN_SIX_ID,
    ZHIZUN_THREE_ID,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboKind {
    Single,
    WenPair,
    WuPair,
    WenWuPair,
    /// 母至尊: three-point + six-point. Invincible only as a leading play.
    Zhizun,
    /// 文至尊: both copies of the designated wen rank. Leading-only
    /// invincible, except against the fixed counter pair.
    WenZhizun,
    WenWuTriple {
        wen_count: u8,
    },
    WenWuQuad,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    pub kind: ComboKind,
    pub name: String,
    pub power: u16,
    /// Member cards, sorted by id: identity is the multiset, never the
    /// selection order.
    pub cards: Vec<Card>,
    /// Set by the validator on the trick's leading play. Only meaningful
    /// for the two special two-card combinations.
    pub is_leading: bool,
}

impl Combination {
    fn new(kind: ComboKind, name: impl Into<String>, cards: Vec<Card>) -> Self {
        let power = cards.iter().map(|c| c.power).sum();
        Self {
            kind,
            name: name.into(),
            power,
            cards,
            is_leading: false,
        }
    }

    /// Category of a single-card combination.
    pub fn single_category(&self) -> Option<Category> {
        match self.kind {
            ComboKind::Single => Some(self.cards[0].category),
            _ => None,
        }
    }

    /// Kind used for follow-play matching and settlement comparison.
    ///
    /// A special combination played as a follow is an ordinary low-power
    /// pair: 母至尊 compares as a wu pair, 文至尊 as a wen pair.
    pub fn follow_kind(&self) -> ComboKind {
        match self.kind {
            ComboKind::Zhizun => ComboKind::WuPair,
            ComboKind::WenZhizun => ComboKind::WenPair,
            kind => kind,
        }
    }

    pub fn card_ids(&self) -> Vec<&'static str> {
        self.cards.iter().map(|c| c.id).collect()
    }

    /// True for 双高脚七, the sole legal follow to a leading 文至尊.
    pub fn is_wen_zhizun_counter(&self) -> bool {
        self.kind == ComboKind::WenPair && self.cards[0].name == WEN_ZHIZUN_COUNTER_NAME
    }
}

/// Resolve a card multiset to its combination, or `None` if illegal.
pub fn resolve(cards: &[Card]) -> Option<Combination> {
    let mut cards = cards.to_vec();
    cards.sort_by_key(|c| c.id);
    match cards.len() {
        1 => {
            let name = cards[0].name;
            Some(Combination::new(ComboKind::Single, name, cards))
        }
        2 => resolve_pair(cards),
        3 => resolve_triple(cards),
        4 => resolve_quad(cards),
        _ => None,
    }
}

fn resolve_pair(cards: Vec<Card>) -> Option<Combination> {
    let (a, b) = (cards[0], cards[1]);
    if a.id == b.id {
        return None;
    }

    // Specials take priority over the plain pair tables.
    let ids = [a.id, b.id];
    if ids.contains(&ZHIZUN_THREE_ID) && ids.contains(&ZHIZUN_SIX_ID) {
        return Some(Combination::new(ComboKind::Zhizun, "母至尊", cards));
    }
    if a.name == WEN_ZHIZUN_NAME && b.name == WEN_ZHIZUN_NAME {
        return Some(Combination::new(ComboKind::WenZhizun, "文至尊", cards));
    }

    match (a.category, b.category) {
        (Category::Wen, Category::Wen) if a.name == b.name => {
            let name = format!("双{}", a.name);
            Some(Combination::new(ComboKind::WenPair, name, cards))
        }
        (Category::Wu, Category::Wu) if a.points == b.points => {
            let name = wu_pair_name(a.points)?;
            Some(Combination::new(ComboKind::WuPair, name, cards))
        }
        (Category::Wen, Category::Wu) => wenwu_pair(a, b, cards),
        (Category::Wu, Category::Wen) => wenwu_pair(b, a, cards),
        _ => None,
    }
}

fn wenwu_pair(wen: Card, wu: Card, cards: Vec<Card>) -> Option<Combination> {
    let family = wenwu_family(wen.name, wu.points)?;
    Some(Combination::new(ComboKind::WenWuPair, family.name, cards))
}

/// The four wu pair families, by shared point value.
fn wu_pair_name(points: u8) -> Option<&'static str> {
    match points {
        9 => Some("杂九"),
        8 => Some("杂八"),
        7 => Some("杂七"),
        5 => Some("杂五"),
        _ => None,
    }
}

fn resolve_triple(cards: Vec<Card>) -> Option<Combination> {
    let (wen, wu) = split_categories(&cards)?;
    let (family, wen_count) = match (wen.len(), wu.len()) {
        (2, 1) => {
            if wen[0].name != wen[1].name {
                return None;
            }
            (wenwu_family(wen[0].name, wu[0].points)?, 2u8)
        }
        (1, 2) => {
            if wu[0].points != wu[1].points {
                return None;
            }
            (wenwu_family(wen[0].name, wu[0].points)?, 1u8)
        }
        _ => return None,
    };
    Some(Combination::new(
        ComboKind::WenWuTriple { wen_count },
        family.name,
        cards,
    ))
}

fn resolve_quad(cards: Vec<Card>) -> Option<Combination> {
    let (wen, wu) = split_categories(&cards)?;
    if wen.len() != 2 || wu.len() != 2 {
        return None;
    }
    if wen[0].name != wen[1].name || wu[0].points != wu[1].points {
        return None;
    }
    let family = wenwu_family(wen[0].name, wu[0].points)?;
    Some(Combination::new(ComboKind::WenWuQuad, family.name, cards))
}

/// Split into (wen, wu), rejecting duplicate card instances.
fn split_categories(cards: &[Card]) -> Option<(Vec<Card>, Vec<Card>)> {
    for i in 0..cards.len() {
        for j in (i + 1)..cards.len() {
            if cards[i].id == cards[j].id {
                return None;
            }
        }
    }
    let wen = cards
        .iter()
        .filter(|c| c.category == Category::Wen)
        .copied()
        .collect();
    let wu = cards
        .iter()
        .filter(|c| c.category == Category::Wu)
        .copied()
        .collect();
    Some((wen, wu))
}
