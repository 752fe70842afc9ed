//! Ten-god derivation relative to the chart owner's day stem.
//!
//! The element-cycle difference between a slot and the day master selects one
//! of five pairs; yin/yang polarity selects the member. Stem slots carry
//! their own polarity; branch slots take the polarity of their dominant
//! hidden stem.

use super::relations::hidden_dominant;
use super::{Chart, Element, Position, Stem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TenGod {
    Companion,
    RobWealth,
    EatingGod,
    HurtingOfficer,
    IndirectWealth,
    DirectWealth,
    SevenKillings,
    DirectOfficer,
    IndirectResource,
    DirectResource,
}

impl TenGod {
    pub const fn name(self) -> &'static str {
        match self {
            TenGod::Companion => "companion",
            TenGod::RobWealth => "rob-wealth",
            TenGod::EatingGod => "eating-god",
            TenGod::HurtingOfficer => "hurting-officer",
            TenGod::IndirectWealth => "indirect-wealth",
            TenGod::DirectWealth => "direct-wealth",
            TenGod::SevenKillings => "seven-killings",
            TenGod::DirectOfficer => "direct-officer",
            TenGod::IndirectResource => "indirect-resource",
            TenGod::DirectResource => "direct-resource",
        }
    }
}

/// Ten god for a slot with the given element and polarity, relative to the
/// day master.
pub fn ten_god(day_master: Stem, target_element: Element, target_yang: bool) -> TenGod {
    let diff = (target_element.index() + 5 - day_master.element().index()) % 5;
    let same_polarity = day_master.is_yang() == target_yang;
    match (diff, same_polarity) {
        (0, true) => TenGod::Companion,
        (0, false) => TenGod::RobWealth,
        (1, true) => TenGod::EatingGod,
        (1, false) => TenGod::HurtingOfficer,
        (2, true) => TenGod::IndirectWealth,
        (2, false) => TenGod::DirectWealth,
        (3, true) => TenGod::SevenKillings,
        (3, false) => TenGod::DirectOfficer,
        (4, true) => TenGod::IndirectResource,
        (4, false) => TenGod::DirectResource,
        // diff is mod 5, so this arm is unreachable.
        _ => TenGod::Companion,
    }
}

/// Ten god per chart position in year→hour order. The day stem is the self
/// and is omitted.
pub fn chart_ten_gods(chart: &Chart) -> Vec<(Position, TenGod)> {
    let day_master = chart.day_master();
    let mut out = Vec::with_capacity(7);
    let pillars = [
        (Position::YearStem, Position::YearBranch, Some(chart.year)),
        (Position::MonthStem, Position::MonthBranch, Some(chart.month)),
        (Position::DayStem, Position::DayBranch, Some(chart.day)),
        (Position::HourStem, Position::HourBranch, chart.hour),
    ];
    for (stem_pos, branch_pos, pillar) in pillars {
        let Some(pillar) = pillar else { continue };
        if stem_pos != Position::DayStem {
            out.push((
                stem_pos,
                ten_god(day_master, pillar.stem.element(), pillar.stem.is_yang()),
            ));
        }
        out.push((
            branch_pos,
            ten_god(
                day_master,
                pillar.branch.element(),
                hidden_dominant(pillar.branch).is_yang(),
            ),
        ));
    }
    out
}
