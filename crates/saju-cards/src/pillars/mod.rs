//! Chart primitives: the ten stems, twelve branches, pillar positions, and
//! the four-pillar [`Chart`] every derivation starts from.
//!
//! Index tables follow the sexagenary convention: stems and branches are
//! addressed by their cycle index (0-based), and a pillar is valid only when
//! both indices share parity.

pub mod oracle;
pub mod relations;
pub mod ten_gods;

use serde::{Deserialize, Serialize};

/// The five-element families, in generation-cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const fn index(self) -> usize {
        match self {
            Element::Wood => 0,
            Element::Fire => 1,
            Element::Earth => 2,
            Element::Metal => 3,
            Element::Water => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Element::Wood => "wood",
            Element::Fire => "fire",
            Element::Earth => "earth",
            Element::Metal => "metal",
            Element::Water => "water",
        }
    }
}

/// One of the ten heavenly stems, addressed by cycle index 0-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Jia,
        Stem::Yi,
        Stem::Bing,
        Stem::Ding,
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stem for a cycle index, wrapping modulo 10.
    pub const fn from_index(index: usize) -> Stem {
        Stem::ALL[index % 10]
    }

    pub const fn element(self) -> Element {
        match self {
            Stem::Jia | Stem::Yi => Element::Wood,
            Stem::Bing | Stem::Ding => Element::Fire,
            Stem::Wu | Stem::Ji => Element::Earth,
            Stem::Geng | Stem::Xin => Element::Metal,
            Stem::Ren | Stem::Gui => Element::Water,
        }
    }

    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    pub const fn name(self) -> &'static str {
        match self {
            Stem::Jia => "jia",
            Stem::Yi => "yi",
            Stem::Bing => "bing",
            Stem::Ding => "ding",
            Stem::Wu => "wu",
            Stem::Ji => "ji",
            Stem::Geng => "geng",
            Stem::Xin => "xin",
            Stem::Ren => "ren",
            Stem::Gui => "gui",
        }
    }
}

/// One of the twelve earthly branches, addressed by cycle index 0-11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Zi,
        Branch::Chou,
        Branch::Yin,
        Branch::Mao,
        Branch::Chen,
        Branch::Si,
        Branch::Wu,
        Branch::Wei,
        Branch::Shen,
        Branch::You,
        Branch::Xu,
        Branch::Hai,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Branch for a cycle index, wrapping modulo 12.
    pub const fn from_index(index: usize) -> Branch {
        Branch::ALL[index % 12]
    }

    pub const fn element(self) -> Element {
        match self {
            Branch::Yin | Branch::Mao => Element::Wood,
            Branch::Si | Branch::Wu => Element::Fire,
            Branch::Chou | Branch::Chen | Branch::Wei | Branch::Xu => Element::Earth,
            Branch::Shen | Branch::You => Element::Metal,
            Branch::Hai | Branch::Zi => Element::Water,
        }
    }

    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    pub const fn name(self) -> &'static str {
        match self {
            Branch::Zi => "zi",
            Branch::Chou => "chou",
            Branch::Yin => "yin",
            Branch::Mao => "mao",
            Branch::Chen => "chen",
            Branch::Si => "si",
            Branch::Wu => "wu",
            Branch::Wei => "wei",
            Branch::Shen => "shen",
            Branch::You => "you",
            Branch::Xu => "xu",
            Branch::Hai => "hai",
        }
    }
}

/// The eight pillar slots in canonical order. The discriminant doubles as the
/// normalization priority for two-part location labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    YearStem,
    YearBranch,
    MonthStem,
    MonthBranch,
    DayStem,
    DayBranch,
    HourStem,
    HourBranch,
}

impl Position {
    pub const ALL: [Position; 8] = [
        Position::YearStem,
        Position::YearBranch,
        Position::MonthStem,
        Position::MonthBranch,
        Position::DayStem,
        Position::DayBranch,
        Position::HourStem,
        Position::HourBranch,
    ];

    pub const fn priority(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Position::YearStem => "year-stem",
            Position::YearBranch => "year-branch",
            Position::MonthStem => "month-stem",
            Position::MonthBranch => "month-branch",
            Position::DayStem => "day-stem",
            Position::DayBranch => "day-branch",
            Position::HourStem => "hour-stem",
            Position::HourBranch => "hour-branch",
        }
    }

    pub fn from_label(label: &str) -> Option<Position> {
        Position::ALL.into_iter().find(|p| p.label() == label)
    }
}

/// Gender of the chart owner; only the great-fortune shift direction reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// A stem/branch pair for one of the four pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub const fn new(stem: Stem, branch: Branch) -> Pillar {
        Pillar { stem, branch }
    }

    /// Sexagenary pairing constraint: stem and branch indices share parity.
    pub const fn is_valid_pair(self) -> bool {
        self.stem.index() % 2 == self.branch.index() % 2
    }

    pub fn label(self) -> String {
        format!("{}{}", self.stem.name(), self.branch.name())
    }
}

/// The four pillars of one birth. The hour pillar is absent when the birth
/// time is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Option<Pillar>,
}

impl Chart {
    pub const fn new(year: Pillar, month: Pillar, day: Pillar, hour: Option<Pillar>) -> Chart {
        Chart {
            year,
            month,
            day,
            hour,
        }
    }

    /// The day stem is the chart owner's self reference for all ten-god math.
    pub const fn day_master(&self) -> Stem {
        self.day.stem
    }

    /// Concatenated chart label (the traditional "eight characters"; six
    /// when the hour is unknown).
    pub fn eight_chars(&self) -> String {
        let mut out = String::new();
        for pillar in [Some(self.year), Some(self.month), Some(self.day), self.hour]
            .into_iter()
            .flatten()
        {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&pillar.label());
        }
        out
    }

    /// Stem slots present in this chart, in year→hour order.
    pub fn stem_positions(&self) -> Vec<(Position, Stem)> {
        let mut out = vec![
            (Position::YearStem, self.year.stem),
            (Position::MonthStem, self.month.stem),
            (Position::DayStem, self.day.stem),
        ];
        if let Some(hour) = self.hour {
            out.push((Position::HourStem, hour.stem));
        }
        out
    }

    /// Branch slots present in this chart, in year→hour order.
    pub fn branch_positions(&self) -> Vec<(Position, Branch)> {
        let mut out = vec![
            (Position::YearBranch, self.year.branch),
            (Position::MonthBranch, self.month.branch),
            (Position::DayBranch, self.day.branch),
        ];
        if let Some(hour) = self.hour {
            out.push((Position::HourBranch, hour.branch));
        }
        out
    }

    /// Reports the first pillar violating the sexagenary pairing rule.
    pub fn validate(&self) -> Result<(), ChartError> {
        let pillars = [
            ("year", Some(self.year)),
            ("month", Some(self.month)),
            ("day", Some(self.day)),
            ("hour", self.hour),
        ];
        for (name, pillar) in pillars {
            if let Some(pillar) = pillar {
                if !pillar.is_valid_pair() {
                    return Err(ChartError::ParityMismatch { pillar: name });
                }
            }
        }
        Ok(())
    }
}

/// Structural chart defect surfaced at the oracle boundary.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("{pillar} pillar: stem/branch parity mismatch (not a valid sexagenary pair)")]
    ParityMismatch { pillar: &'static str },
}
