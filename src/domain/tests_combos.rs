use crate::domain::card;
use crate::domain::combos::{resolve, ComboKind};
use crate::domain::Card;

fn cards(ids: &[&str]) -> Vec<Card> {
    ids.iter().map(|id| *card(id).unwrap()).collect()
}

#[test]
fn singles_resolve_to_their_own_power() {
    let combo = resolve(&cards(&["WT1"])).unwrap();
    assert_eq!(combo.kind, ComboKind::Single);
    assert_eq!(combo.name, "天");
    assert_eq!(combo.power, 100);

    let combo = resolve(&cards(&["M12"])).unwrap();
    assert_eq!(combo.power, 3);
}

#[test]
fn wen_pairs_need_both_copies_of_one_rank() {
    let combo = resolve(&cards(&["WT1", "WT2"])).unwrap();
    assert_eq!(combo.kind, ComboKind::WenPair);
    assert_eq!(combo.name, "双天");
    assert_eq!(combo.power, 200);

    let combo = resolve(&cards(&["WD2", "WD1"])).unwrap();
    assert_eq!(combo.power, 180);

    // Two different wen ranks are nothing.
    assert!(resolve(&cards(&["WT1", "WD1"])).is_none());
}

#[test]
fn wu_pairs_share_a_point_value() {
    let combo = resolve(&cards(&["M36", "M45"])).unwrap();
    assert_eq!(combo.kind, ComboKind::WuPair);
    assert_eq!(combo.name, "杂九");
    assert_eq!(combo.power, 18);

    let combo = resolve(&cards(&["M14", "M23"])).unwrap();
    assert_eq!(combo.name, "杂五");
    assert_eq!(combo.power, 10);

    // Different point values do not pair.
    assert!(resolve(&cards(&["M36", "M26"])).is_none());
}

#[test]
fn the_specials_outrank_the_plain_pair_tables() {
    let combo = resolve(&cards(&["M12", "M24"])).unwrap();
    assert_eq!(combo.kind, ComboKind::Zhizun);
    assert_eq!(combo.name, "母至尊");
    assert_eq!(combo.power, 9);

    let combo = resolve(&cards(&["WL1", "WL2"])).unwrap();
    assert_eq!(combo.kind, ComboKind::WenZhizun);
    assert_eq!(combo.name, "文至尊");
    assert_eq!(combo.power, 10);
}

#[test]
fn specials_compare_as_plain_pairs_when_following() {
    let zhizun = resolve(&cards(&["M12", "M24"])).unwrap();
    assert_eq!(zhizun.follow_kind(), ComboKind::WuPair);
    // Weaker than the weakest real wu pair (杂五, 10).
    assert!(zhizun.power < 10);

    let wen_zhizun = resolve(&cards(&["WL1", "WL2"])).unwrap();
    assert_eq!(wen_zhizun.follow_kind(), ComboKind::WenPair);
}

#[test]
fn the_counter_pair_is_exactly_both_gao_jiao_qi() {
    let counter = resolve(&cards(&["WG1", "WG2"])).unwrap();
    assert!(counter.is_wen_zhizun_counter());
    assert!(!resolve(&cards(&["WT1", "WT2"])).unwrap().is_wen_zhizun_counter());
    assert!(!resolve(&cards(&["M36", "M45"])).unwrap().is_wen_zhizun_counter());
}

#[test]
fn wenwu_pairs_come_only_from_the_four_families() {
    let combo = resolve(&cards(&["WT1", "M45"])).unwrap();
    assert_eq!(combo.kind, ComboKind::WenWuPair);
    assert_eq!(combo.name, "天九");
    assert_eq!(combo.power, 109);

    assert_eq!(resolve(&cards(&["WD1", "M26"])).unwrap().name, "地八");
    assert_eq!(resolve(&cards(&["WR2", "M34"])).unwrap().name, "人七");
    assert_eq!(resolve(&cards(&["WE1", "M14"])).unwrap().name, "饿五");

    // 天 with an eight-point wu card is outside every family.
    assert!(resolve(&cards(&["WT1", "M26"])).is_none());
    // 梅 belongs to no family at all.
    assert!(resolve(&cards(&["WM1", "M45"])).is_none());
}

#[test]
fn triples_take_either_shape_within_one_family() {
    let combo = resolve(&cards(&["WT1", "WT2", "M45"])).unwrap();
    assert_eq!(combo.kind, ComboKind::WenWuTriple { wen_count: 2 });
    assert_eq!(combo.name, "天九");
    assert_eq!(combo.power, 209);

    let combo = resolve(&cards(&["WT1", "M36", "M45"])).unwrap();
    assert_eq!(combo.kind, ComboKind::WenWuTriple { wen_count: 1 });
    assert_eq!(combo.power, 118);

    // Cross-family triples are nothing.
    assert!(resolve(&cards(&["WT1", "WT2", "M26"])).is_none());
    assert!(resolve(&cards(&["WT1", "WD1", "M45"])).is_none());
}

#[test]
fn quads_are_both_copies_plus_both_wu_cards() {
    let combo = resolve(&cards(&["WT1", "WT2", "M36", "M45"])).unwrap();
    assert_eq!(combo.kind, ComboKind::WenWuQuad);
    assert_eq!(combo.name, "天九");
    assert_eq!(combo.power, 218);

    assert!(resolve(&cards(&["WT1", "WT2", "M26", "M35"])).is_none());
    assert!(resolve(&cards(&["WT1", "WD1", "M36", "M45"])).is_none());
}

#[test]
fn resolution_ignores_selection_order() {
    let a = resolve(&cards(&["M45", "WT2", "WT1", "M36"])).unwrap();
    let b = resolve(&cards(&["WT1", "M36", "M45", "WT2"])).unwrap();
    assert_eq!(a, b);
}

#[test]
fn degenerate_selections_resolve_to_nothing() {
    assert!(resolve(&[]).is_none());
    assert!(resolve(&cards(&["WT1", "WT1"])).is_none());
    assert!(resolve(&cards(&["WT1", "WT2", "WD1", "WD2", "WR1"])).is_none());
}
