//! Conflict checker.
//!
//! Runs every supplied rule once over the whole schedule, then performs the
//! built-in pairwise overlap check. Conflicts are findings, not failures:
//! the checker never errors, and a rule that fails is recorded without
//! affecting the rest of the pass.
//!
//! # Usage
//!
//! ```
//! use u_timetable::checker::{Checker, FnRule, RuleOutcome};
//! use u_timetable::models::Program;
//!
//! let checker = Checker::new().with_rule(FnRule::new("titled", |programs, _| {
//!     Ok(programs
//!         .iter()
//!         .filter_map(|p| p.id.clone().map(|id| (id, !p.title.is_empty())))
//!         .map(|(id, ok)| RuleOutcome { program: id, satisfied: ok, msg: "title".into() })
//!         .collect())
//! }));
//!
//! let report = checker.check(&[Program::new("a")], &[]);
//! assert!(!report.is_satisfied());
//! ```

mod rule;

pub use rule::{FnRule, Rule, RuleOutcome};

use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::models::{
    groups_intersect, same_group_set, time_overlaps, CheckReport, Person, Program, RuleFailure,
    Violation,
};

/// A reusable set of rules.
#[derive(Debug, Clone, Default)]
pub struct Checker {
    rules: Vec<Arc<dyn Rule>>,
}

impl Checker {
    /// Creates a checker with no custom rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule.
    pub fn with_rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds an already shared rule.
    pub fn with_shared_rule(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Registered rules, in evaluation order.
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Checks a schedule snapshot.
    pub fn check(&self, programs: &[Program], people: &[Person]) -> CheckReport {
        check_rules(&self.rules, programs, people)
    }
}

/// Evaluates `rules` and the built-in overlap check over `programs`.
///
/// Deterministic for a given input.
pub fn check_rules(rules: &[Arc<dyn Rule>], programs: &[Program], people: &[Person]) -> CheckReport {
    let mut report = CheckReport::new();

    for rule in rules {
        match rule.evaluate(programs, people) {
            Ok(outcomes) => {
                for outcome in outcomes {
                    report.insert_outcome(Violation::rule_outcome(
                        outcome.program,
                        rule.id(),
                        outcome.msg,
                        outcome.satisfied,
                    ));
                }
            }
            Err(e) => {
                warn!(rule = rule.id(), error = %e, "rule evaluation failed");
                report.failures.push(RuleFailure {
                    rule: rule.id().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    for v in find_overlaps(programs) {
        report.add_other(v);
    }

    debug!(
        programs = programs.len(),
        rules = rules.len(),
        violations = report.violations.len(),
        other = report.other.len(),
        failures = report.failures.len(),
        "schedule checked"
    );

    report
}

/// Whether two programs compete for the same group at the same time.
///
/// Overlap is excused when both programs cover the same groups and declare
/// different block orders: they are stacked inside one block on purpose.
pub fn is_conflict(a: &Program, b: &Program) -> bool {
    if !time_overlaps(a, b) || !groups_intersect(&a.groups, &b.groups) {
        return false;
    }
    let stacked = a.effective_block_order() != b.effective_block_order()
        && same_group_set(&a.groups, &b.groups);
    !stacked
}

/// Built-in overlap problems, one per program per conflicting pair.
///
/// Pairs are visited in input order; programs without an id are compared
/// but produce no entries.
fn find_overlaps(programs: &[Program]) -> Vec<Violation> {
    let placed: Vec<&Program> = programs.iter().filter(|p| p.is_placed()).collect();
    let mut found = Vec::new();

    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            if !is_conflict(a, b) {
                continue;
            }
            trace!(a = ?a.id, b = ?b.id, "overlapping programs");
            for p in [a, b] {
                if let Some(id) = &p.id {
                    found.push(Violation::overlap(id.clone()));
                }
            }
        }
    }

    found
}
