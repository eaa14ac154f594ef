/*!
Breadth-first search with loop elimination.

A FIFO of partial plans, shortest first.
Each dequeued plan is extended by every applicable instantiation of every
operator; an extension whose new state already appears on its own path ---
the initial state included --- loops, and is discarded rather than enqueued.
The first extension satisfying the goals is the answer, and is of minimum
length among loop-free plans, as the queue is worked in length order.

Progress is reported through the context's callbacks: one as each depth is
exhausted, one per expansion.
*/

use std::collections::VecDeque;

use crate::{
    context::PlanContext,
    misc::log::targets,
    reports::SearchReport,
    structures::{plan::Plan, substitution::Substitution},
    types::err::ErrorKind,
};

impl PlanContext {
    /// Search for a plan breadth-first, discarding looping branches.
    pub fn solve_breadth(&mut self) -> Result<SearchReport, ErrorKind> {
        if self.problem.init.is_consistent(&self.problem.goal) {
            return Ok(SearchReport::Found(Plan::new(self.problem.clone())));
        }

        let mut queue = VecDeque::new();
        queue.push_back(Plan::new(self.problem.clone()));

        let mut depth: u32 = 0;
        let mut count: u64 = 0;

        while let Some(current) = queue.pop_front() {
            // The queue is in length order, so a longer plan means every
            // shorter plan has been processed.
            if current.len() as u32 > depth {
                self.note_depth_exhausted(depth, count);
                log::info!(
                    target: targets::BREADTH,
                    "Every extension of {count} plan(s) of length {depth} processed"
                );
                depth = current.len() as u32;
                count = 0;
            }

            count += 1;
            self.counters.plans_processed += 1;

            for oper_index in 0..self.problem.domain.num_opers() {
                let substitutions = {
                    let oper = self.problem.domain.oper(oper_index)?;
                    current.final_state().operator_instantiations(
                        oper,
                        &Substitution::new(),
                        self.order.as_mut(),
                    )?
                };

                for substitution in substitutions {
                    self.counters.expansions += 1;
                    if self.over_step_limit() {
                        log::info!(target: targets::BREADTH, "Step limit passed");
                        return Ok(SearchReport::GaveUp);
                    }

                    let mut extension = current.clone();
                    let repeat = extension.apply_operator(oper_index, substitution)?;

                    self.note_expansion(&current, &extension, repeat);

                    if extension.is_complete() {
                        return Ok(SearchReport::Found(extension));
                    }

                    if !repeat {
                        queue.push_back(extension);
                    }
                }
            }
        }

        Ok(SearchReport::Exhausted)
    }
}
