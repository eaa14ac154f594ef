/*!
A plan --- a sequence of ground operator applications against a problem,
together with the state following each.

A plan is grown one action at a time by
[apply_operator](Plan::apply_operator), which applies the action to the
current final state and reports whether the new state repeats an earlier one
--- the breadth-first driver discards such extensions.
*/

use std::rc::Rc;

use crate::{
    state::State,
    structures::{problem::Problem, substitution::Substitution, term::Term},
    types::err::ErrorKind,
};

/// One action of a plan: an operator with a grounding substitution, and the
/// state the action produced.
#[derive(Clone, Debug)]
pub struct PlanStep {
    /// The index of the operator in the domain.
    pub operator: usize,

    /// The substitution grounding the operator.
    pub substitution: Substitution,

    /// The state after the action.
    pub result: State,
}

/// A (partial) solution to a planning problem.
#[derive(Clone, Debug)]
pub struct Plan {
    problem: Rc<Problem>,
    steps: Vec<PlanStep>,
}

impl Plan {
    /// An empty plan for a problem.
    pub fn new(problem: Rc<Problem>) -> Self {
        Plan {
            problem,
            steps: Vec::new(),
        }
    }

    /// The problem the plan is for.
    pub fn problem(&self) -> &Rc<Problem> {
        &self.problem
    }

    /// The number of actions in the plan.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The steps of the plan, in order.
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// The step at an index.
    pub fn step(&self, index: usize) -> Result<&PlanStep, ErrorKind> {
        self.steps.get(index).ok_or(ErrorKind::IndexOutOfBounds)
    }

    /// The state after the last action, or the initial state of the problem
    /// for an empty plan.
    pub fn final_state(&self) -> &State {
        match self.steps.last() {
            Some(step) => &step.result,
            None => &self.problem.init,
        }
    }

    /// Whether a state appears along the plan, the initial state included.
    pub fn contains_state(&self, state: &State) -> bool {
        self.steps.iter().any(|step| step.result == *state) || self.problem.init == *state
    }

    /// Extend the plan with an action.
    ///
    /// The substitution must ground the operator and make it applicable to
    /// the current final state.
    /// Returns whether the new state repeats a state already on the plan.
    pub fn apply_operator(
        &mut self,
        operator: usize,
        substitution: Substitution,
    ) -> Result<bool, ErrorKind> {
        let oper = self.problem.domain.oper(operator)?;

        let result = self.final_state().next_state(oper, &substitution)?;
        let repeat = self.contains_state(&result);

        self.steps.push(PlanStep {
            operator,
            substitution,
            result,
        });

        Ok(repeat)
    }

    /// Drop the last action, for backtracking search.
    pub(crate) fn pop(&mut self) -> Option<PlanStep> {
        self.steps.pop()
    }

    /// Whether the plan solves its problem, i.e. the final state satisfies
    /// the goals.
    pub fn is_complete(&self) -> bool {
        self.final_state().is_consistent(&self.problem.goal)
    }

    /// Render an action as `( name arg… )`, resolving each head parameter
    /// through the action's substitution.
    pub fn action_str(&self, index: usize) -> Result<String, ErrorKind> {
        let step = self.step(index)?;
        let oper = self.problem.domain.oper(step.operator)?;

        let mut out = format!("( {}", oper.name);
        for parameter in &oper.parameters {
            let term = step
                .substitution
                .apply_to_term(&Term::Variable(parameter.clone()), 0)?;
            out.push_str(&format!(" {term}"));
        }
        out.push_str(" )");

        Ok(out)
    }
}

impl std::fmt::Display for Plan {
    /// One tab-indented action per line.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for index in 0..self.len() {
            match self.action_str(index) {
                Ok(action) => writeln!(f, "\t{action}")?,
                Err(_) => return Err(std::fmt::Error),
            }
        }
        Ok(())
    }
}
