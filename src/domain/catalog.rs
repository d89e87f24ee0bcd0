//! The fixed 32-card Tianjiu deck.
//!
//! Card identities, points, and power values are game content, not data:
//! the deck is a process-wide constant and cards cross every boundary by
//! `id` alone. `power` totally orders single-card strength within a
//! category; the two copies of a wen rank (and the two wu cards of one
//! point value) share `power`, so a tied follow play always loses to the
//! earlier one.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Wen,
    Wu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub points: u8,
    pub power: u16,
    /// Rendering hint owned by the client; opaque to the rules engine.
    pub image: &'static str,
}

const fn wen(id: &'static str, name: &'static str, points: u8, power: u16, image: &'static str) -> Card {
    Card {
        id,
        name,
        category: Category::Wen,
        points,
        power,
        image,
    }
}

const fn wu(id: &'static str, name: &'static str, points: u8, power: u16, image: &'static str) -> Card {
    Card {
        id,
        name,
        category: Category::Wu,
        points,
        power,
        image,
    }
}

/// Both copies of this wen rank form the 文至尊 pair.
pub const WEN_ZHIZUN_NAME: &str = "鼻屎六";
/// Both copies of this wen rank form the sole counter to a leading 文至尊.
pub const WEN_ZHIZUN_COUNTER_NAME: &str = "高脚七";
/// The three-point and six-point wu cards form the 母至尊 pair.
pub const ZHIZUN_THREE_ID: &str = "M12";
pub const ZHIZUN_SIX_ID: &str = "M24";

/// All 32 cards: 11 wen ranks x 2 copies, 10 wu cards.
pub const CATALOG: [Card; 32] = [
    wen("WT1", "天", 12, 100, "天.svg"),
    wen("WT2", "天", 12, 100, "天.svg"),
    wen("WD1", "地", 2, 90, "地.svg"),
    wen("WD2", "地", 2, 90, "地.svg"),
    wen("WR1", "人", 8, 80, "人.svg"),
    wen("WR2", "人", 8, 80, "人.svg"),
    wen("WE1", "饿", 4, 70, "饿.svg"),
    wen("WE2", "饿", 4, 70, "饿.svg"),
    wen("WM1", "梅", 10, 60, "梅.svg"),
    wen("WM2", "梅", 10, 60, "梅.svg"),
    wen("WC1", "长山", 6, 50, "长山.svg"),
    wen("WC2", "长山", 6, 50, "长山.svg"),
    wen("WB1", "板凳", 4, 40, "板凳.svg"),
    wen("WB2", "板凳", 4, 40, "板凳.svg"),
    wen("WF1", "斧头", 11, 30, "斧头.svg"),
    wen("WF2", "斧头", 11, 30, "斧头.svg"),
    wen("WP1", "平峰", 10, 20, "平峰.svg"),
    wen("WP2", "平峰", 10, 20, "平峰.svg"),
    wen("WG1", "高脚七", 7, 10, "高脚七.svg"),
    wen("WG2", "高脚七", 7, 10, "高脚七.svg"),
    wen("WL1", "鼻屎六", 6, 5, "鼻屎六.svg"),
    wen("WL2", "鼻屎六", 6, 5, "鼻屎六.svg"),
    wu("M45", "九点A", 9, 9, "九点A.svg"),
    wu("M36", "九点B", 9, 9, "九点B.svg"),
    wu("M26", "八点A", 8, 8, "八点A.svg"),
    wu("M35", "八点B", 8, 8, "八点B.svg"),
    wu("M25", "七点A", 7, 7, "七点A.svg"),
    wu("M34", "七点B", 7, 7, "七点B.svg"),
    wu("M14", "五点A", 5, 5, "五点A.svg"),
    wu("M23", "五点B", 5, 5, "五点B.svg"),
    wu("M24", "六点", 6, 6, "六点.svg"),
    wu("M12", "三点", 3, 3, "三点.svg"),
];

static BY_ID: Lazy<HashMap<&'static str, &'static Card>> =
    Lazy::new(|| CATALOG.iter().map(|c| (c.id, c)).collect());

/// Look up a card by wire id.
pub fn card(id: &str) -> Option<&'static Card> {
    BY_ID.get(id).copied()
}

/// The fixed cross-category families: one wen rank paired with one wu
/// point value. Pairs, triples (2+1 / 1+2), and quads (2+2) are drawn
/// exclusively from these four families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WenWuFamily {
    pub wen_name: &'static str,
    pub wu_points: u8,
    pub name: &'static str,
}

pub const WENWU_FAMILIES: [WenWuFamily; 4] = [
    WenWuFamily {
        wen_name: "天",
        wu_points: 9,
        name: "天九",
    },
    WenWuFamily {
        wen_name: "地",
        wu_points: 8,
        name: "地八",
    },
    WenWuFamily {
        wen_name: "人",
        wu_points: 7,
        name: "人七",
    },
    WenWuFamily {
        wen_name: "饿",
        wu_points: 5,
        name: "饿五",
    },
];

/// Family containing the given (wen name, wu points) pairing, if any.
pub fn wenwu_family(wen_name: &str, wu_points: u8) -> Option<&'static WenWuFamily> {
    WENWU_FAMILIES
        .iter()
        .find(|f| f.wen_name == wen_name && f.wu_points == wu_points)
}
