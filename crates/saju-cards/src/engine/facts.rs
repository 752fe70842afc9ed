//! Fact derivation: one chart in, an ordered list of typed observations out.
//!
//! Facts are produced fresh per request and never persisted. Derivation is
//! total; anything malformed must be rejected at the oracle boundary before
//! a chart reaches this module.

use super::tokens::location_pair;
use crate::pillars::relations;
use crate::pillars::ten_gods::chart_ten_gods;
use crate::pillars::{Chart, Position};

pub const RULESET_COMMON: &str = "common_v1";
pub const RULESET_ARCHETYPE: &str = "simple_month_stem_v1";
pub const RULESET_DOMINANT_ELEMENT: &str = "simple_day_stem_v1";
pub const RULESET_STRENGTH: &str = "simple_month_ling_v1";
pub const RULESET_PAIR: &str = "pair_v1";

/// Fact families. The string form is the token prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactCategory {
    TenStems,
    FiveElement,
    Relation,
    SpecialMarker,
    HiddenStem,
    Strength,
    Archetype,
    DominantElement,
    Confidence,
    PairRelation,
}

impl FactCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            FactCategory::TenStems => "ten-stems",
            FactCategory::FiveElement => "five-element",
            FactCategory::Relation => "relation",
            FactCategory::SpecialMarker => "special-marker",
            FactCategory::HiddenStem => "hidden-stem",
            FactCategory::Strength => "strength",
            FactCategory::Archetype => "archetype",
            FactCategory::DominantElement => "dominant-element",
            FactCategory::Confidence => "confidence",
            FactCategory::PairRelation => "pair-relation",
        }
    }
}

/// One typed, weighted observation derived from a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub category: FactCategory,
    pub name: String,
    pub locations: Vec<String>,
    /// 0-100; drives the token grade band.
    pub weight: u8,
    pub ruleset: Option<&'static str>,
}

impl Fact {
    pub(crate) fn new(category: FactCategory, name: impl Into<String>, weight: u8) -> Fact {
        Fact {
            category,
            name: name.into(),
            locations: Vec::new(),
            weight,
            ruleset: None,
        }
    }

    pub(crate) fn at(mut self, location: String) -> Fact {
        self.locations.push(location);
        self
    }

    pub(crate) fn ruleset(mut self, ruleset: &'static str) -> Fact {
        self.ruleset = Some(ruleset);
        self
    }
}

/// Derives the single-profile fact list from a chart.
pub fn derive_facts(chart: &Chart) -> Vec<Fact> {
    let mut facts = Vec::new();
    let day_master = chart.day_master();
    let day_element = day_master.element();

    // One ten-god observation per non-self slot.
    let gods = chart_ten_gods(chart);
    for (position, god) in &gods {
        facts.push(
            Fact::new(FactCategory::TenStems, god.name(), 70).at(position.label().to_string()),
        );
    }

    facts.push(Fact::new(FactCategory::FiveElement, day_element.name(), 70));

    let stems = chart.stem_positions();
    for i in 0..stems.len() {
        for j in i + 1..stems.len() {
            if relations::stem_combination(stems[i].1, stems[j].1) {
                facts.push(
                    Fact::new(FactCategory::Relation, "stem-combination", 75)
                        .at(location_pair(stems[i].0, stems[j].0)),
                );
            }
        }
    }

    let branches = chart.branch_positions();
    for i in 0..branches.len() {
        for j in i + 1..branches.len() {
            let (pos_a, a) = branches[i];
            let (pos_b, b) = branches[j];
            let location = location_pair(pos_a, pos_b);
            if relations::clash(a, b) {
                facts.push(Fact::new(FactCategory::Relation, "clash", 90).at(location.clone()));
            }
            if relations::combination(a, b) {
                facts.push(
                    Fact::new(FactCategory::Relation, "combination", 75).at(location.clone()),
                );
            }
            if relations::punishment(a, b) {
                facts.push(
                    Fact::new(FactCategory::Relation, "punishment", 70).at(location.clone()),
                );
            }
            if relations::harm(a, b) {
                facts.push(Fact::new(FactCategory::Relation, "harm", 70).at(location.clone()));
            }
            if relations::triple_combination(a, b) {
                facts.push(
                    Fact::new(FactCategory::Relation, "triple-combination", 80).at(location),
                );
            }
        }
    }

    for (position, branch) in &branches {
        let location = position.label().to_string();
        if relations::is_romance(*branch) {
            facts.push(
                Fact::new(FactCategory::SpecialMarker, "romance", 70)
                    .at(location.clone())
                    .ruleset(RULESET_COMMON),
            );
        }
        if relations::is_travel(*branch) {
            facts.push(
                Fact::new(FactCategory::SpecialMarker, "travel", 70)
                    .at(location.clone())
                    .ruleset(RULESET_COMMON),
            );
        }
        if relations::is_noble_helper(day_master, *branch) {
            facts.push(
                Fact::new(FactCategory::SpecialMarker, "noble-helper", 75)
                    .at(location)
                    .ruleset(RULESET_COMMON),
            );
        }
    }

    for (position, branch) in &branches {
        facts.push(
            Fact::new(
                FactCategory::HiddenStem,
                relations::hidden_dominant(*branch).name(),
                70,
            )
            .at(format!("{}.hidden.dominant", position.label())),
        );
    }

    if let Some((_, god)) = gods
        .iter()
        .find(|(position, _)| *position == Position::MonthBranch)
    {
        facts.push(
            Fact::new(FactCategory::Archetype, format!("{}-archetype", god.name()), 70)
                .at(Position::MonthBranch.label().to_string())
                .ruleset(RULESET_ARCHETYPE),
        );
    }

    // Seed for future refinement; today it mirrors the day element.
    facts.push(
        Fact::new(FactCategory::DominantElement, day_element.name(), 70)
            .ruleset(RULESET_DOMINANT_ELEMENT),
    );

    let month_element = chart.month.branch.element();
    let (strength, weight) = if month_element == day_element {
        ("strong", 70)
    } else if day_element.index() == (month_element.index() + 4) % 5 {
        ("weak", 40)
    } else {
        ("balanced", 55)
    };
    facts.push(Fact::new(FactCategory::Strength, strength, weight).ruleset(RULESET_STRENGTH));

    // Catch-all so a chart with no notable structure still yields a token.
    facts.push(Fact::new(FactCategory::Confidence, "overall", 80));

    facts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pillars::{Branch, Pillar, Stem};

    fn sample_chart() -> Chart {
        Chart::new(
            Pillar::new(Stem::Geng, Branch::Wu),
            Pillar::new(Stem::Ji, Branch::Chou),
            Pillar::new(Stem::Jia, Branch::Zi),
            Some(Pillar::new(Stem::Bing, Branch::Yin)),
        )
    }

    fn has(facts: &[Fact], category: FactCategory, name: &str, location: Option<&str>) -> bool {
        facts.iter().any(|fact| {
            fact.category == category
                && fact.name == name
                && location.map_or(true, |loc| {
                    fact.locations.iter().any(|candidate| candidate == loc)
                })
        })
    }

    #[test]
    fn ten_god_facts_cover_every_non_self_slot() {
        let facts = derive_facts(&sample_chart());
        let ten_gods: Vec<&Fact> = facts
            .iter()
            .filter(|fact| fact.category == FactCategory::TenStems)
            .collect();
        assert_eq!(ten_gods.len(), 7);
        assert!(has(
            &facts,
            FactCategory::TenStems,
            "seven-killings",
            Some("year-stem")
        ));
        assert!(has(
            &facts,
            FactCategory::TenStems,
            "direct-wealth",
            Some("month-branch")
        ));
        assert!(!ten_gods
            .iter()
            .any(|fact| fact.locations.iter().any(|loc| loc == "day-stem")));
    }

    #[test]
    fn relation_facts_match_the_branch_tables() {
        let facts = derive_facts(&sample_chart());
        assert!(has(
            &facts,
            FactCategory::Relation,
            "clash",
            Some("year-branch-day-branch")
        ));
        assert!(has(
            &facts,
            FactCategory::Relation,
            "harm",
            Some("year-branch-month-branch")
        ));
        assert!(has(
            &facts,
            FactCategory::Relation,
            "triple-combination",
            Some("year-branch-hour-branch")
        ));
        assert!(has(
            &facts,
            FactCategory::Relation,
            "combination",
            Some("month-branch-day-branch")
        ));
        // jia-ji five-combination between the month and day stems.
        assert!(has(
            &facts,
            FactCategory::Relation,
            "stem-combination",
            Some("month-stem-day-stem")
        ));
    }

    #[test]
    fn markers_and_hidden_stems_sit_on_their_branch_slots() {
        let facts = derive_facts(&sample_chart());
        assert!(has(
            &facts,
            FactCategory::SpecialMarker,
            "romance",
            Some("year-branch")
        ));
        assert!(has(
            &facts,
            FactCategory::SpecialMarker,
            "romance",
            Some("day-branch")
        ));
        assert!(has(
            &facts,
            FactCategory::SpecialMarker,
            "noble-helper",
            Some("month-branch")
        ));
        assert!(has(
            &facts,
            FactCategory::SpecialMarker,
            "travel",
            Some("hour-branch")
        ));
        assert!(has(
            &facts,
            FactCategory::HiddenStem,
            "gui",
            Some("day-branch.hidden.dominant")
        ));
        assert!(has(
            &facts,
            FactCategory::HiddenStem,
            "jia",
            Some("hour-branch.hidden.dominant")
        ));
    }

    #[test]
    fn summary_facts_close_the_list() {
        let facts = derive_facts(&sample_chart());
        assert!(has(&facts, FactCategory::FiveElement, "wood", None));
        assert!(has(
            &facts,
            FactCategory::Archetype,
            "direct-wealth-archetype",
            Some("month-branch")
        ));
        assert!(has(&facts, FactCategory::DominantElement, "wood", None));
        // Earth month branch neither matches nor generates the wood day
        // master, so strength lands in the middle band.
        let strength = facts
            .iter()
            .find(|fact| fact.category == FactCategory::Strength)
            .expect("strength fact present");
        assert_eq!(strength.name, "balanced");
        assert_eq!(strength.weight, 55);

        let last = facts.last().expect("non-empty fact list");
        assert_eq!(last.category, FactCategory::Confidence);
        assert_eq!(last.name, "overall");
        assert_eq!(last.weight, 80);
    }

    #[test]
    fn strength_bands_follow_the_month_day_cycle() {
        // Wood month branch backing a wood day master: strong.
        let strong = Chart::new(
            Pillar::new(Stem::Geng, Branch::Wu),
            Pillar::new(Stem::Ding, Branch::Mao),
            Pillar::new(Stem::Jia, Branch::Zi),
            None,
        );
        let fact = derive_facts(&strong)
            .into_iter()
            .find(|fact| fact.category == FactCategory::Strength)
            .expect("strength fact");
        assert_eq!((fact.name.as_str(), fact.weight), ("strong", 70));

        // Fire month branch is what a wood day master generates; the drain
        // reads as weak.
        let weak = Chart::new(
            Pillar::new(Stem::Geng, Branch::Wu),
            Pillar::new(Stem::Ding, Branch::Si),
            Pillar::new(Stem::Jia, Branch::Zi),
            None,
        );
        let fact = derive_facts(&weak)
            .into_iter()
            .find(|fact| fact.category == FactCategory::Strength)
            .expect("strength fact");
        assert_eq!((fact.name.as_str(), fact.weight), ("weak", 40));
    }

    #[test]
    fn hour_slots_drop_out_with_the_hour_pillar() {
        let mut chart = sample_chart();
        chart.hour = None;
        let facts = derive_facts(&chart);
        assert!(!facts
            .iter()
            .any(|fact| fact.locations.iter().any(|loc| loc.contains("hour"))));
        // The catch-all survives regardless of chart shape.
        assert!(has(&facts, FactCategory::Confidence, "overall", None));
    }
}
