//! Play validator: sole authority on whether a proposed play is legal.
//!
//! Humans and bots go through the identical entry points here; nothing
//! else in the crate re-implements a legality rule.

use crate::domain::catalog::{self, Card};
use crate::domain::combos::{resolve, ComboKind, Combination};
use crate::domain::state::Trick;
use crate::errors::domain::{DomainError, RuleViolationKind};

/// Resolve wire card ids against a hand, rejecting unknown ids,
/// duplicates, and cards the seat does not hold.
pub fn cards_from_hand(hand: &[Card], card_ids: &[String]) -> Result<Vec<Card>, DomainError> {
    let mut cards = Vec::with_capacity(card_ids.len());
    for id in card_ids {
        let card = catalog::card(id).ok_or_else(|| {
            DomainError::rule(
                RuleViolationKind::InvalidCardOwnership,
                format!("未知的牌: {id}"),
            )
        })?;
        if cards.iter().any(|c: &Card| c.id == card.id) {
            return Err(DomainError::rule(
                RuleViolationKind::InvalidCardOwnership,
                format!("重复选择了牌: {id}"),
            ));
        }
        if !hand.iter().any(|c| c.id == card.id) {
            return Err(DomainError::rule(
                RuleViolationKind::InvalidCardOwnership,
                "您没有这张牌",
            ));
        }
        cards.push(*card);
    }
    Ok(cards)
}

/// Validate a proposed play against the current trick.
///
/// Returns the resolved combination (flagged `is_leading` when the trick
/// has no non-passed entry yet) without mutating anything.
pub fn validate_play(
    hand: &[Card],
    card_ids: &[String],
    trick: &Trick,
) -> Result<Combination, DomainError> {
    if card_ids.is_empty() {
        return Err(DomainError::rule(
            RuleViolationKind::WrongCardCount,
            "请选择要出的牌",
        ));
    }
    let cards = cards_from_hand(hand, card_ids)?;

    match trick.last_active() {
        None => validate_leading(&cards),
        Some(last) => validate_follow(&cards, last.cards.len(), last.combo.as_ref()),
    }
}

fn validate_leading(cards: &[Card]) -> Result<Combination, DomainError> {
    let mut combo = resolve(cards).ok_or_else(|| {
        DomainError::rule(
            RuleViolationKind::InvalidCombination,
            "这些牌不构成合法组合",
        )
    })?;
    combo.is_leading = true;
    Ok(combo)
}

fn validate_follow(
    cards: &[Card],
    required_count: usize,
    last_combo: Option<&Combination>,
) -> Result<Combination, DomainError> {
    if cards.len() != required_count {
        return Err(DomainError::rule(
            RuleViolationKind::WrongCardCount,
            format!("需要出{required_count}张牌"),
        ));
    }
    let last = last_combo
        .ok_or_else(|| DomainError::invariant("non-passed trick entry without a combination"))?;
    let combo = resolve(cards).ok_or_else(|| {
        DomainError::rule(
            RuleViolationKind::InvalidCombination,
            "这些牌不构成合法组合",
        )
    })?;

    // Leading-play-only invincibility for the two specials.
    if last.is_leading {
        match last.kind {
            ComboKind::Zhizun => {
                return Err(DomainError::rule(
                    RuleViolationKind::InsufficientPower,
                    "母至尊无敌，无法打败",
                ));
            }
            ComboKind::WenZhizun => {
                if combo.is_wen_zhizun_counter() {
                    return Ok(combo);
                }
                return Err(DomainError::rule(
                    RuleViolationKind::InsufficientPower,
                    "文至尊只有双高脚七能打",
                ));
            }
            _ => {}
        }
    }

    if combo.kind == ComboKind::Single {
        // Singles compare within a category only.
        let category = combo.cards[0].category;
        if last.cards[0].category != category {
            return Err(DomainError::rule(
                RuleViolationKind::TypeMismatch,
                "必须出同一类的牌",
            ));
        }
    } else if combo.follow_kind() != last.follow_kind() {
        return Err(DomainError::rule(
            RuleViolationKind::TypeMismatch,
            format!("必须出与{}同类型的组合", last.name),
        ));
    }

    if combo.power == last.power {
        return Err(DomainError::rule(
            RuleViolationKind::InsufficientPower,
            "大小相同，先出者为大",
        ));
    }
    if combo.power < last.power {
        return Err(DomainError::rule(
            RuleViolationKind::InsufficientPower,
            "您的牌不够大",
        ));
    }
    Ok(combo)
}
