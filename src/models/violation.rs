//! Violation and report models.
//!
//! A check produces two channels:
//! - `violations`: rule outcomes keyed per rule and program, each with a
//!   `satisfied` flag so both passing and failing outcomes can be shown.
//! - `other`: hard structural problems (overlapping programs in one group)
//!   whose mere presence is the problem.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ProgramId;

/// Rule identifier.
pub type RuleId = String;

/// Message attached to every built-in overlap problem.
pub const OVERLAP_MESSAGE: &str = "Více programů pro jednu skupinu";

/// A finding about one program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Affected program.
    pub program: ProgramId,
    /// Rule that produced this finding, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleId>,
    /// Human-readable description.
    pub msg: String,
    /// Whether the rule holds. Absent for structural problems.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfied: Option<bool>,
}

impl Violation {
    /// Creates a rule outcome.
    pub fn rule_outcome(
        program: impl Into<ProgramId>,
        rule: impl Into<RuleId>,
        msg: impl Into<String>,
        satisfied: bool,
    ) -> Self {
        Self {
            program: program.into(),
            rule: Some(rule.into()),
            msg: msg.into(),
            satisfied: Some(satisfied),
        }
    }

    /// Creates a built-in overlap problem.
    pub fn overlap(program: impl Into<ProgramId>) -> Self {
        Self {
            program: program.into(),
            rule: None,
            msg: OVERLAP_MESSAGE.to_string(),
            satisfied: None,
        }
    }

    /// Whether this finding counts as a problem.
    ///
    /// Structural problems always do.
    #[inline]
    pub fn is_problem(&self) -> bool {
        !self.satisfied.unwrap_or(false)
    }
}

/// A rule whose evaluation itself failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFailure {
    /// Failing rule.
    pub rule: RuleId,
    /// Error description.
    pub message: String,
}

/// Result of one checker pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Rule outcomes keyed by `"{rule}:{program}"`.
    pub violations: BTreeMap<String, Violation>,
    /// Structural problems, in detection order.
    pub other: Vec<Violation>,
    /// Rules that could not be evaluated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<RuleFailure>,
}

impl CheckReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Key under which a rule outcome for a program is stored.
    pub fn key(rule: &str, program: &str) -> String {
        format!("{rule}:{program}")
    }

    /// Inserts a rule outcome, replacing an earlier one for the same pair.
    pub fn insert_outcome(&mut self, violation: Violation) {
        let rule = violation.rule.as_deref().unwrap_or_default();
        let key = Self::key(rule, &violation.program);
        self.violations.insert(key, violation);
    }

    /// Adds a structural problem.
    pub fn add_other(&mut self, violation: Violation) {
        self.other.push(violation);
    }

    /// Whether every rule holds and there are no structural problems.
    pub fn is_satisfied(&self) -> bool {
        self.violations.values().all(|v| !v.is_problem()) && self.other.is_empty()
    }

    /// Number of findings that count as problems.
    pub fn problem_count(&self) -> usize {
        self.violations.values().filter(|v| v.is_problem()).count() + self.other.len()
    }

    /// Problems grouped by program: unsatisfied rule outcomes first, then
    /// structural problems.
    pub fn violations_per_program(&self) -> BTreeMap<ProgramId, Vec<Violation>> {
        let mut per_program: BTreeMap<ProgramId, Vec<Violation>> = BTreeMap::new();
        for v in self.violations.values().filter(|v| v.is_problem()) {
            per_program.entry(v.program.clone()).or_default().push(v.clone());
        }
        for v in &self.other {
            per_program.entry(v.program.clone()).or_default().push(v.clone());
        }
        per_program
    }

    /// Problems for one program.
    pub fn problems_for(&self, program: &str) -> Vec<&Violation> {
        self.violations
            .values()
            .filter(|v| v.is_problem())
            .chain(self.other.iter())
            .filter(|v| v.program == program)
            .collect()
    }
}
