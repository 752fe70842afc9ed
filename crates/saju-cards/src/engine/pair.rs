//! Pair extension: cross-profile facts from two charts.
//!
//! Only position-aligned pillars are compared (year against year, month
//! against month, and so on); cross-position relations are out of scope for
//! pair mode. The three resulting token sets (self A, self B, pair P) feed
//! the same trigger/score/select machinery as single-profile mode.

use super::facts::{Fact, FactCategory, RULESET_PAIR};
use super::tokens::TokenSet;
use super::trigger::SourceTag;
use crate::pillars::relations;
use crate::pillars::{Chart, Position};

/// The three token sets consulted in pair mode.
#[derive(Debug, Clone, Default)]
pub struct PairTokenSets {
    pub a: TokenSet,
    pub b: TokenSet,
    pub p: TokenSet,
}

impl PairTokenSets {
    pub fn new(a: TokenSet, b: TokenSet, p: TokenSet) -> PairTokenSets {
        PairTokenSets { a, b, p }
    }

    pub fn source(&self, tag: SourceTag) -> &TokenSet {
        match tag {
            SourceTag::A => &self.a,
            SourceTag::B => &self.b,
            SourceTag::P => &self.p,
        }
    }

    /// Union of all three sets; score bonuses and penalties may reference
    /// any of them.
    pub fn merged(&self) -> TokenSet {
        self.a
            .iter()
            .chain(self.b.iter())
            .chain(self.p.iter())
            .cloned()
            .collect()
    }
}

fn pair_location(position: Position) -> String {
    format!("A.{label}-B.{label}", label = position.label())
}

/// Derives cross-profile facts from two charts. When no relation fires at
/// any aligned position, one fallback confidence fact keeps the pipeline
/// from starving.
pub fn derive_pair_facts(a: &Chart, b: &Chart) -> Vec<Fact> {
    let mut facts = Vec::new();
    let aligned = [
        (
            Position::YearStem,
            Position::YearBranch,
            Some(a.year),
            Some(b.year),
        ),
        (
            Position::MonthStem,
            Position::MonthBranch,
            Some(a.month),
            Some(b.month),
        ),
        (
            Position::DayStem,
            Position::DayBranch,
            Some(a.day),
            Some(b.day),
        ),
        (Position::HourStem, Position::HourBranch, a.hour, b.hour),
    ];

    for (stem_pos, branch_pos, pillar_a, pillar_b) in aligned {
        let (Some(pillar_a), Some(pillar_b)) = (pillar_a, pillar_b) else {
            continue;
        };
        if relations::stem_combination(pillar_a.stem, pillar_b.stem) {
            facts.push(
                Fact::new(FactCategory::PairRelation, "stem-combination", 75)
                    .at(pair_location(stem_pos))
                    .ruleset(RULESET_PAIR),
            );
        }
        let (branch_a, branch_b) = (pillar_a.branch, pillar_b.branch);
        let location = pair_location(branch_pos);
        if relations::clash(branch_a, branch_b) {
            facts.push(
                Fact::new(FactCategory::PairRelation, "clash", 90)
                    .at(location.clone())
                    .ruleset(RULESET_PAIR),
            );
        }
        if relations::combination(branch_a, branch_b) {
            facts.push(
                Fact::new(FactCategory::PairRelation, "combination", 75)
                    .at(location.clone())
                    .ruleset(RULESET_PAIR),
            );
        }
        if relations::punishment(branch_a, branch_b) {
            facts.push(
                Fact::new(FactCategory::PairRelation, "punishment", 70)
                    .at(location.clone())
                    .ruleset(RULESET_PAIR),
            );
        }
        if relations::harm(branch_a, branch_b) {
            facts.push(
                Fact::new(FactCategory::PairRelation, "harm", 70)
                    .at(location.clone())
                    .ruleset(RULESET_PAIR),
            );
        }
        if relations::triple_combination(branch_a, branch_b) {
            facts.push(
                Fact::new(FactCategory::PairRelation, "triple-combination", 80)
                    .at(location)
                    .ruleset(RULESET_PAIR),
            );
        }
    }

    if facts.is_empty() {
        facts.push(
            Fact::new(FactCategory::PairRelation, "confidence", 80).ruleset(RULESET_PAIR),
        );
    }
    facts
}
