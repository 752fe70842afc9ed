use super::common::*;
use crate::engine::pair::PairTokenSets;
use crate::engine::select::{select_pair_cards, select_saju_cards, SelectionLimits};
use crate::engine::tokens::TokenSet;

#[test]
fn passing_cards_carry_evidence_and_computed_scores() {
    let set = tokens(&["ten-stems:direct-wealth", "ten-stems:direct-wealth#H"]);
    let cards = vec![
        scored(
            card(
                "card_a",
                60,
                r#"{"all":[{"token":"ten-stems:direct-wealth"},{"token":"ten-stems:direct-wealth#H"}]}"#,
            ),
            r#"{"base":50,"bonus_if":[{"token":"ten-stems:direct-wealth#H","add":10}]}"#,
        ),
        scored(
            card("card_b", 50, r#"{"all":[{"token":"confidence:overall#L"}]}"#),
            r#"{"base":40}"#,
        ),
    ];

    let selection = select_saju_cards(cards, &set, SelectionLimits::unlimited());
    assert_eq!(selection.len(), 1);
    assert_eq!(selection.cards[0].card_id, "card_a");
    assert_eq!(selection.scores, vec![60]);
    assert_eq!(
        selection.evidence[0],
        vec![
            "ten-stems:direct-wealth".to_string(),
            "ten-stems:direct-wealth#H".to_string()
        ]
    );
}

#[test]
fn cooldown_group_admits_only_the_best_ranked_member() {
    let set = tokens(&["confidence:overall"]);
    let cards = vec![
        in_cooldown_group(
            card("c1", 70, r#"{"any":[{"token":"confidence:overall"}]}"#),
            "g1",
        ),
        in_cooldown_group(
            card("c2", 60, r#"{"any":[{"token":"confidence:overall"}]}"#),
            "g1",
        ),
    ];
    let selection = select_saju_cards(cards, &set, SelectionLimits::unlimited());
    assert_eq!(selection.len(), 1);
    assert_eq!(selection.cards[0].card_id, "c1");
}

#[test]
fn domain_cap_keeps_the_higher_ranked_cards() {
    let set = tokens(&["confidence:overall"]);
    let cards = vec![
        in_domains(card("d1", 70, r#"{"any":[{"token":"confidence:overall"}]}"#), &["work"]),
        in_domains(card("d2", 60, r#"{"any":[{"token":"confidence:overall"}]}"#), &["work"]),
        in_domains(card("d3", 50, r#"{"any":[{"token":"confidence:overall"}]}"#), &["work"]),
    ];
    let selection = select_saju_cards(
        cards,
        &set,
        SelectionLimits {
            max_per_domain: 2,
            max_per_tag: 0,
        },
    );
    assert_eq!(selection.len(), 2);
    assert_eq!(selection.cards[0].card_id, "d1");
    assert_eq!(selection.cards[1].card_id, "d2");
}

#[test]
fn tag_cap_applies_independently_of_domains() {
    let set = tokens(&["confidence:overall"]);
    let cards = vec![
        with_tags(card("t1", 70, r#"{"any":[{"token":"confidence:overall"}]}"#), &["love"]),
        with_tags(card("t2", 60, r#"{"any":[{"token":"confidence:overall"}]}"#), &["love"]),
    ];
    let selection = select_saju_cards(
        cards,
        &set,
        SelectionLimits {
            max_per_domain: 0,
            max_per_tag: 1,
        },
    );
    assert_eq!(selection.len(), 1);
    assert_eq!(selection.cards[0].card_id, "t1");
}

#[test]
fn ties_resolve_by_ascending_card_id_across_runs() {
    let set = tokens(&["confidence:overall"]);
    let cards = vec![
        scored(card("card_z", 50, r#"{"any":[{"token":"confidence:overall"}]}"#), r#"{"base":50}"#),
        scored(card("card_a", 50, r#"{"any":[{"token":"confidence:overall"}]}"#), r#"{"base":50}"#),
        scored(card("card_m", 50, r#"{"any":[{"token":"confidence:overall"}]}"#), r#"{"base":50}"#),
    ];
    let mut first_order: Option<Vec<String>> = None;
    for _ in 0..5 {
        let selection =
            select_saju_cards(cards.clone(), &set, SelectionLimits::unlimited());
        let order: Vec<String> = selection
            .cards
            .iter()
            .map(|card| card.card_id.clone())
            .collect();
        match &first_order {
            None => first_order = Some(order),
            Some(first) => assert_eq!(&order, first),
        }
    }
    assert_eq!(
        first_order.expect("at least one run"),
        vec!["card_a".to_string(), "card_m".to_string(), "card_z".to_string()]
    );
}

#[test]
fn rule_less_cards_rank_by_priority_while_explicit_zero_stays_zero() {
    let set = tokens(&["confidence:overall"]);
    let cards = vec![
        card("no_rule", 45, r#"{"any":[{"token":"confidence:overall"}]}"#),
        scored(
            card("zero_rule", 45, r#"{"any":[{"token":"confidence:overall"}]}"#),
            r#"{"base":0}"#,
        ),
    ];
    let selection = select_saju_cards(cards, &set, SelectionLimits::unlimited());
    assert_eq!(selection.len(), 2);
    // Same priority; the rule-less card's priority-backed score outranks the
    // explicit zero.
    assert_eq!(selection.cards[0].card_id, "no_rule");
    assert_eq!(selection.scores, vec![45, 0]);
}

#[test]
fn per_card_occurrence_cap_suppresses_repeats_of_the_same_id() {
    let set = tokens(&["confidence:overall"]);
    let mut repeated = card("dup", 60, r#"{"any":[{"token":"confidence:overall"}]}"#);
    repeated.max_per_user = 1;
    let cards = vec![repeated.clone(), repeated];
    let selection = select_saju_cards(cards, &set, SelectionLimits::unlimited());
    assert_eq!(selection.len(), 1);
}

#[test]
fn empty_token_set_selects_nothing_with_conditional_triggers() {
    let cards = vec![
        card("c1", 60, r#"{"all":[{"token":"ten-stems:direct-wealth"}]}"#),
        card("c2", 50, r#"{"any":[{"token":"confidence:overall"}]}"#),
    ];
    let selection = select_saju_cards(cards, &TokenSet::default(), SelectionLimits::unlimited());
    assert!(selection.is_empty());
    assert!(selection.evidence.is_empty());
    assert!(selection.scores.is_empty());
}

#[test]
fn pair_selection_scores_against_the_merged_set() {
    let sets = PairTokenSets::new(
        tokens(&["special-marker:romance"]),
        tokens(&["special-marker:travel"]),
        tokens(&["pair-relation:combination"]),
    );
    let pair_card = scored(
        card(
            "pair_combo",
            50,
            r#"{"all":[{"src":"P","token":"pair-relation:combination"}]}"#,
        ),
        // Bonuses reference A's and B's own tokens; the merged set makes
        // both visible to scoring.
        r#"{"base":40,"bonus_if":[{"token":"special-marker:romance","add":5},{"token":"special-marker:travel","add":5}]}"#,
    );
    let selection = select_pair_cards(vec![pair_card], &sets, SelectionLimits::unlimited());
    assert_eq!(selection.len(), 1);
    assert_eq!(selection.scores, vec![50]);
    assert_eq!(
        selection.evidence[0],
        vec!["pair-relation:combination".to_string()]
    );
}

#[test]
fn malformed_trigger_or_score_stays_local_to_its_card() {
    let set = tokens(&["confidence:overall"]);
    let cards = vec![
        card("broken_trigger", 70, "{not json"),
        scored(
            card("broken_score", 60, r#"{"any":[{"token":"confidence:overall"}]}"#),
            "{not json",
        ),
        card("healthy", 50, r#"{"any":[{"token":"confidence:overall"}]}"#),
    ];
    let selection = select_saju_cards(cards, &set, SelectionLimits::unlimited());
    let ids: Vec<&str> = selection.cards.iter().map(|c| c.card_id.as_str()).collect();
    assert_eq!(ids, vec!["broken_score", "healthy"]);
    // Malformed score text computes to zero rather than failing the card.
    assert_eq!(selection.scores[0], 0);
}
