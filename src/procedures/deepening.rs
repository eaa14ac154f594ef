/*!
Iterative deepening.

Depth-first search to a bound: at each node, every instantiation of every
operator is applied and the successor explored, unless the bound is reached.
The bound is raised from one until a plan is found, the configured ceiling
passes, or the step limit is exceeded.

As depth-first search to bound *d* examines every plan of length at most
*d*, the first plan found across the deepening iterations is of minimum
length --- at the price of re-examining the shallow plans at each iteration.
*/

use crate::{
    context::PlanContext,
    misc::log::targets,
    reports::SearchReport,
    structures::{plan::Plan, substitution::Substitution},
    types::err::ErrorKind,
};

impl PlanContext {
    /// Search for a plan by iterative deepening.
    ///
    /// The [depth callback](crate::context::callbacks::CallbackOnDepth) is
    /// made for each bound exhausted without a plan.
    pub fn solve_deepening(&mut self) -> Result<SearchReport, ErrorKind> {
        if self.problem.init.is_consistent(&self.problem.goal) {
            return Ok(SearchReport::Found(Plan::new(self.problem.clone())));
        }

        for bound in 1..=self.config.max_depth.value {
            log::info!(target: targets::DEEPENING, "Searching to depth {bound}");

            let mut plan = Plan::new(self.problem.clone());

            if let Some(found) = self.deepen(&mut plan, bound)? {
                return Ok(SearchReport::Found(found));
            }

            if self.over_step_limit() {
                log::info!(target: targets::DEEPENING, "Step limit passed at depth {bound}");
                return Ok(SearchReport::GaveUp);
            }

            self.counters.depth_completed = bound;
            self.note_depth_exhausted(bound, self.counters.expansions);
        }

        Ok(SearchReport::GaveUp)
    }

    /// Depth-first search below the final state of `plan`, to `bound`.
    fn deepen(&mut self, plan: &mut Plan, bound: u32) -> Result<Option<Plan>, ErrorKind> {
        if self.over_step_limit() {
            return Ok(None);
        }

        for oper_index in 0..self.problem.domain.num_opers() {
            let substitutions = {
                let oper = self.problem.domain.oper(oper_index)?;
                plan.final_state().operator_instantiations(
                    oper,
                    &Substitution::new(),
                    self.order.as_mut(),
                )?
            };

            for substitution in substitutions {
                self.counters.expansions += 1;

                plan.apply_operator(oper_index, substitution)?;

                if plan.is_complete() {
                    return Ok(Some(plan.clone()));
                }

                if (plan.len() as u32) < bound {
                    if let Some(found) = self.deepen(plan, bound)? {
                        return Ok(Some(found));
                    }
                }

                plan.pop();
            }
        }

        Ok(None)
    }
}
