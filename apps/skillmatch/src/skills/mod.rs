//! Skill sets: normalized, order-independent collections of skill names.
//!
//! Every skill string entering the system (model output, request bodies, compare
//! payloads) passes through `normalize_skill`, so "Python", "python" and " PYTHON "
//! collapse to a single entry and set algebra stays stable across formatting noise.

pub mod comparison;
pub mod handlers;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub use comparison::{compare_skill_sets, ComparisonResult};

/// Lower-cases and trims a single skill. Returns `None` for blank input.
pub fn normalize_skill(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// A normalized set of skills.
///
/// Backed by a `BTreeSet` so iteration, serialization and prompt rendering are always
/// sorted. Deserialization normalizes, which makes the set safe to build straight from
/// untrusted JSON arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from any sequence of raw skill strings.
    pub fn normalized<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            items
                .into_iter()
                .filter_map(|s| normalize_skill(s.as_ref()))
                .collect(),
        )
    }

    /// Parses a comma-separated skill list such as `"Python, SQL, Excel"`.
    pub fn from_csv(text: &str) -> Self {
        Self::normalized(text.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn contains(&self, skill: &str) -> bool {
        normalize_skill(skill)
            .map(|s| self.0.contains(&s))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        Self(self.0.intersection(&other.0).cloned().collect())
    }

    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        Self(self.0.difference(&other.0).cloned().collect())
    }

    pub fn union(&self, other: &SkillSet) -> SkillSet {
        Self(self.0.union(&other.0).cloned().collect())
    }

    pub fn is_disjoint(&self, other: &SkillSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    /// Renders the set as a sorted JSON array, the form used in prompts.
    pub fn to_json_array(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "[]".to_string())
    }
}

impl<'de> Deserialize<'de> for SkillSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(SkillSet::normalized(raw))
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SkillSet::normalized(iter)
    }
}

impl fmt::Display for SkillSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.iter().collect::<Vec<_>>().join(", ");
        f.write_str(&joined)
    }
}
