//! Candidate ranking and capped selection.
//!
//! Matching cards are sorted by (priority, score) descending with an
//! ascending card-id tie-break so repeated runs select identically, then
//! walked under the cooldown-group, per-card, per-domain, and per-tag caps.

use super::pair::PairTokenSets;
use super::score::compute_score;
use super::tokens::TokenSet;
use super::trigger::{evaluate_pair_trigger, evaluate_trigger};
use crate::catalog::Card;
use std::collections::{HashMap, HashSet};

/// Default per-domain cap applied by the service facade. 0 means unlimited.
pub const DEFAULT_MAX_PER_DOMAIN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionLimits {
    pub max_per_domain: usize,
    pub max_per_tag: usize,
}

impl Default for SelectionLimits {
    fn default() -> SelectionLimits {
        SelectionLimits {
            max_per_domain: DEFAULT_MAX_PER_DOMAIN,
            max_per_tag: 0,
        }
    }
}

impl SelectionLimits {
    pub const fn unlimited() -> SelectionLimits {
        SelectionLimits {
            max_per_domain: 0,
            max_per_tag: 0,
        }
    }
}

/// Accepted cards with their evidence and scores as parallel arrays, in
/// acceptance order.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub cards: Vec<Card>,
    pub evidence: Vec<Vec<String>>,
    pub scores: Vec<i32>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

struct Candidate {
    card: Card,
    evidence: Vec<String>,
    score: i32,
}

/// A card with no score rule ranks by its static priority; a present rule
/// keeps its computed value even when that value is zero.
fn ranking_score(card: &Card, tokens: &TokenSet) -> i32 {
    match &card.score {
        Some(raw) => compute_score(tokens, raw),
        None => card.priority,
    }
}

/// Single-profile selection over an already-fetched card list.
pub fn select_saju_cards(
    cards: Vec<Card>,
    tokens: &TokenSet,
    limits: SelectionLimits,
) -> Selection {
    let mut candidates = Vec::new();
    for card in cards {
        if let Some(evidence) = evaluate_trigger(tokens, &card.trigger) {
            let score = ranking_score(&card, tokens);
            candidates.push(Candidate {
                card,
                evidence,
                score,
            });
        }
    }
    rank_and_cap(candidates, limits)
}

/// Pair selection: triggers consult the three sets separately, scoring uses
/// their union.
pub fn select_pair_cards(
    cards: Vec<Card>,
    sets: &PairTokenSets,
    limits: SelectionLimits,
) -> Selection {
    let merged = sets.merged();
    let mut candidates = Vec::new();
    for card in cards {
        if let Some(evidence) = evaluate_pair_trigger(sets, &card.trigger) {
            let score = ranking_score(&card, &merged);
            candidates.push(Candidate {
                card,
                evidence,
                score,
            });
        }
    }
    rank_and_cap(candidates, limits)
}

fn rank_and_cap(mut candidates: Vec<Candidate>, limits: SelectionLimits) -> Selection {
    candidates.sort_by(|left, right| {
        right
            .card
            .priority
            .cmp(&left.card.priority)
            .then(right.score.cmp(&left.score))
            .then(left.card.card_id.cmp(&right.card.card_id))
    });

    let mut used_groups: HashSet<String> = HashSet::new();
    let mut per_card: HashMap<String, u32> = HashMap::new();
    let mut per_domain: HashMap<String, usize> = HashMap::new();
    let mut per_tag: HashMap<String, usize> = HashMap::new();
    let mut selection = Selection::default();

    for candidate in candidates {
        let card = &candidate.card;
        if !card.cooldown_group.is_empty() && used_groups.contains(&card.cooldown_group) {
            continue;
        }
        if card.max_per_user > 0
            && per_card.get(&card.card_id).copied().unwrap_or(0) >= card.max_per_user
        {
            continue;
        }
        if limits.max_per_domain > 0
            && card
                .domains
                .iter()
                .any(|domain| per_domain.get(domain).copied().unwrap_or(0) >= limits.max_per_domain)
        {
            continue;
        }
        if limits.max_per_tag > 0
            && card
                .tags
                .iter()
                .any(|tag| per_tag.get(tag).copied().unwrap_or(0) >= limits.max_per_tag)
        {
            continue;
        }

        if !card.cooldown_group.is_empty() {
            used_groups.insert(card.cooldown_group.clone());
        }
        *per_card.entry(card.card_id.clone()).or_insert(0) += 1;
        for domain in &card.domains {
            *per_domain.entry(domain.clone()).or_insert(0) += 1;
        }
        for tag in &card.tags {
            *per_tag.entry(tag.clone()).or_insert(0) += 1;
        }

        selection.evidence.push(candidate.evidence);
        selection.scores.push(candidate.score);
        selection.cards.push(candidate.card);
    }

    selection
}
