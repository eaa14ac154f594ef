/*!
Plan verification.

A plan is replayed from the initial state: before each action the
substituted preconditions are checked against the current state, and the
action applied.
A failing precondition, or an inapplicable operator, convicts the action;
otherwise the final state is checked against the goals.
*/

use crate::{
    builder,
    context::PlanContext,
    misc::log::targets,
    reports::VerifyReport,
    structures::{formula::Formula, substitution::Substitution},
    types::err::{self, ErrorKind},
};

impl PlanContext {
    /// Verify a plan given as `defplan` text.
    pub fn verify(&self, plan_text: &str) -> Result<VerifyReport, ErrorKind> {
        let steps = builder::parse_plan_steps(plan_text, &self.problem)?;
        self.verify_steps(&steps)
    }

    /// Replay resolved plan steps and check the goals.
    pub fn verify_steps(
        &self,
        steps: &[(usize, Substitution)],
    ) -> Result<VerifyReport, ErrorKind> {
        let mut current = self.problem.init.clone();

        for (index, (oper_index, substitution)) in steps.iter().enumerate() {
            let oper = self.problem.domain.oper(*oper_index)?;

            let mut preconditions = Vec::with_capacity(oper.preconditions.len());
            for literal in &oper.preconditions {
                preconditions.push(literal.after_substitution(substitution, 0)?);
            }

            if !current.is_consistent(&Formula::Conj(preconditions)) {
                log::info!(target: targets::VERIFY, "Preconditions of action {index} fail");
                return Ok(VerifyReport::InvalidAction(index));
            }

            current = match current.next_state(oper, substitution) {
                Ok(next) => next,

                Err(ErrorKind::State(err::StateError::OperNotApplicable)) => {
                    return Ok(VerifyReport::InvalidAction(index));
                }

                Err(e) => return Err(e),
            };
        }

        match current.is_consistent(&self.problem.goal) {
            true => Ok(VerifyReport::Success),
            false => Ok(VerifyReport::GoalsNotAchieved),
        }
    }
}
