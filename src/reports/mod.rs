/*!
Reports for the context.
*/

use crate::structures::plan::Plan;

/// High-level reports regarding a search.
#[derive(Clone, Debug)]
pub enum SearchReport {
    /// A plan solving the problem. The depth of the solution is the length
    /// of the plan.
    Found(Plan),

    /// Every plan was examined and none solves the problem.
    Exhausted,

    /// The search gave up: the depth ceiling or the step limit was reached
    /// with plans still unexamined.
    GaveUp,
}

impl std::fmt::Display for SearchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Found(plan) => write!(f, "Plan found at depth {}.", plan.len()),
            Self::Exhausted => write!(f, "No plans found."),
            Self::GaveUp => write!(f, "Gave up."),
        }
    }
}

/// The verdict of the verifier on a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyReport {
    /// The plan replays and its final state satisfies the goals.
    Success,

    /// The preconditions of the action at the noted (0-based) index do not
    /// hold in the state it is applied to.
    InvalidAction(usize),

    /// The plan replays, but its final state does not satisfy the goals.
    GoalsNotAchieved,
}

impl VerifyReport {
    /// The process exit code the CLI reports the verdict with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InvalidAction(_) => 2,
            Self::GoalsNotAchieved => 3,
        }
    }
}

impl std::fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::InvalidAction(index) => write!(f, "FAILURE: Invalid action #{index}."),
            Self::GoalsNotAchieved => write!(f, "FAILURE: Does not achieve goals."),
        }
    }
}
