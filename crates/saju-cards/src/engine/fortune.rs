//! Great-fortune period charts.
//!
//! A period chart is the birth chart with its month pillar shifted by the
//! period step and the shifted pillar occupying both the year and month
//! slots. Shift direction: forward for a male born in a yang year or a
//! female born in a yin year, backward otherwise.

use crate::pillars::{Branch, Chart, Gender, Pillar, Stem};

/// Synthetic chart for the given period step (0-based).
pub fn fortune_chart(birth: &Chart, gender: Gender, step: u32) -> Chart {
    let yang_year = birth.year.stem.is_yang();
    let forward = yang_year == (gender == Gender::Male);
    let shift = if forward { step as i64 } else { -(step as i64) };

    let stem = Stem::from_index((birth.month.stem.index() as i64 + shift).rem_euclid(10) as usize);
    let branch =
        Branch::from_index((birth.month.branch.index() as i64 + shift).rem_euclid(12) as usize);
    let period = Pillar::new(stem, branch);

    Chart::new(period, period, birth.day, birth.hour)
}
