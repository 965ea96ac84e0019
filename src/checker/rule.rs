//! Rule evaluator contract.
//!
//! Rule definitions live outside the core. The checker only knows that a
//! rule can look at the whole schedule and report, per program, whether it
//! holds.

use std::fmt;

use crate::error::Result;
use crate::models::{Person, Program, ProgramId};

/// What a rule concluded about one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Program the outcome refers to.
    pub program: ProgramId,
    /// Whether the rule holds for it.
    pub satisfied: bool,
    /// Human-readable explanation.
    pub msg: String,
}

impl RuleOutcome {
    /// The rule holds for `program`.
    pub fn satisfied(program: impl Into<ProgramId>, msg: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            satisfied: true,
            msg: msg.into(),
        }
    }

    /// The rule is broken by `program`.
    pub fn violated(program: impl Into<ProgramId>, msg: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            satisfied: false,
            msg: msg.into(),
        }
    }
}

/// A custom rule evaluated against the full schedule.
///
/// Returning `Err` marks this rule as failed for the pass; other rules and
/// the overlap check are unaffected.
pub trait Rule: Send + Sync + fmt::Debug {
    /// Stable identifier, used in violation keys.
    fn id(&self) -> &str;

    /// Evaluates the rule over all programs.
    fn evaluate(&self, programs: &[Program], people: &[Person]) -> Result<Vec<RuleOutcome>>;
}

type RuleFn = dyn Fn(&[Program], &[Person]) -> Result<Vec<RuleOutcome>> + Send + Sync;

/// Adapts a closure into a [`Rule`].
pub struct FnRule {
    id: String,
    f: Box<RuleFn>,
}

impl FnRule {
    /// Creates a rule from a closure.
    pub fn new<F>(id: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Program], &[Person]) -> Result<Vec<RuleOutcome>> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            f: Box::new(f),
        }
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("id", &self.id).finish()
    }
}

impl Rule for FnRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn evaluate(&self, programs: &[Program], people: &[Person]) -> Result<Vec<RuleOutcome>> {
        (self.f)(programs, people)
    }
}
