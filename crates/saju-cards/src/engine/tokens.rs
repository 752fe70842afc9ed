//! Token compilation: facts become canonical string keys for rule matching.
//!
//! A fact expands to an existence form `category:name`, per-location forms
//! with `@location` and `#grade` suffixes, and a `~ruleset` variant. The
//! output is deduplicated and sorted so identical fact lists always compile
//! to identical token lists.

use super::facts::Fact;
use crate::pillars::Position;
use std::collections::HashSet;

/// Weight band carried in `#grade` suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Low,
    Mid,
    High,
}

impl Grade {
    pub const fn as_str(self) -> &'static str {
        match self {
            Grade::Low => "L",
            Grade::Mid => "M",
            Grade::High => "H",
        }
    }
}

/// Bands: L below 50, M below 70, H from 70 up.
pub const fn grade_from_weight(weight: u8) -> Grade {
    if weight < 50 {
        Grade::Low
    } else if weight < 70 {
        Grade::Mid
    } else {
        Grade::High
    }
}

/// Two-part location label ordered by position priority (year before month
/// before day before hour, stems before their branch).
pub fn location_pair(a: Position, b: Position) -> String {
    let (first, second) = if a.priority() <= b.priority() {
        (a, b)
    } else {
        (b, a)
    };
    format!("{}-{}", first.label(), second.label())
}

/// Reorders a dash-joined pair of canonical position labels into priority
/// order. Anything that is not exactly two known labels passes through
/// unchanged, so hidden-stem and pair-mode labels are untouched.
pub fn normalize_location(raw: &str) -> String {
    match split_two_positions(raw) {
        Some((first, second)) if second.priority() < first.priority() => {
            format!("{}-{}", second.label(), first.label())
        }
        _ => raw.to_string(),
    }
}

fn split_two_positions(raw: &str) -> Option<(Position, Position)> {
    for first in Position::ALL {
        if let Some(rest) = raw.strip_prefix(first.label()) {
            if let Some(rest) = rest.strip_prefix('-') {
                if let Some(second) = Position::from_label(rest) {
                    return Some((first, second));
                }
            }
        }
    }
    None
}

/// Expands every fact into its token forms, deduplicates by exact string,
/// and sorts lexicographically.
pub fn compile_tokens(facts: &[Fact]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();
    let emit = |token: String, seen: &mut HashSet<String>, tokens: &mut Vec<String>| {
        if seen.insert(token.clone()) {
            tokens.push(token);
        }
    };

    for fact in facts {
        let grade = grade_from_weight(fact.weight).as_str();
        let base = format!("{}:{}", fact.category.as_str(), fact.name);
        emit(base.clone(), &mut seen, &mut tokens);

        for location in &fact.locations {
            let location = if location.contains('-') {
                normalize_location(location)
            } else {
                location.clone()
            };
            emit(format!("{base}@{location}"), &mut seen, &mut tokens);
            emit(format!("{base}#{grade}"), &mut seen, &mut tokens);
            emit(
                format!("{base}@{location}#{grade}"),
                &mut seen,
                &mut tokens,
            );
        }
        if fact.locations.is_empty() && fact.weight > 0 {
            emit(format!("{base}#{grade}"), &mut seen, &mut tokens);
        }
        if let Some(ruleset) = fact.ruleset {
            emit(format!("{base}~{ruleset}"), &mut seen, &mut tokens);
        }
    }

    tokens.sort();
    tokens
}

/// Membership-only view of a compiled token list.
#[derive(Debug, Clone, Default)]
pub struct TokenSet(HashSet<String>);

impl TokenSet {
    pub fn from_facts(facts: &[Fact]) -> TokenSet {
        compile_tokens(facts).into_iter().collect()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl FromIterator<String> for TokenSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> TokenSet {
        TokenSet(iter.into_iter().collect())
    }
}

impl Extend<String> for TokenSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
