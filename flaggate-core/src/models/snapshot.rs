//! Rule and segment snapshot delivered by the synchronization engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Treatment assigned to members of a segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRule {
    pub segment: String,
    pub treatment: String,
}

/// Rule definition for a single flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRule {
    pub default_treatment: String,
    /// A killed flag always serves its default treatment
    #[serde(default)]
    pub killed: bool,
    /// Explicit per-key treatments
    #[serde(default)]
    pub keys: HashMap<String, String>,
    /// Segment rules, checked in order
    #[serde(default)]
    pub segments: Vec<SegmentRule>,
}

impl FlagRule {
    pub fn evaluate<'a>(
        &'a self,
        key: &str,
        segments: &HashMap<String, HashSet<String>>,
    ) -> &'a str {
        if self.killed {
            return &self.default_treatment;
        }

        if let Some(treatment) = self.keys.get(key) {
            return treatment;
        }

        self.segments
            .iter()
            .find(|rule| {
                segments
                    .get(&rule.segment)
                    .is_some_and(|members| members.contains(key))
            })
            .map(|rule| rule.treatment.as_str())
            .unwrap_or(self.default_treatment.as_str())
    }
}

/// A complete view of rule definitions and segment memberships
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSnapshot {
    #[serde(default)]
    pub flags: HashMap<String, FlagRule>,
    #[serde(default)]
    pub segments: HashMap<String, HashSet<String>>,
    #[serde(default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,
}

impl RuleSnapshot {
    /// Treatment for `key` under `flag`, or `None` if the flag is unknown
    pub fn treatment(&self, key: &str, flag: &str) -> Option<&str> {
        self.flags
            .get(flag)
            .map(|rule| rule.evaluate(key, &self.segments))
    }
}
