/*!
The context --- which owns a planning run: the problem, the configuration,
counters, callbacks, and the conjunct-ordering heuristic.

# Example

```rust
# use heron_plan::{builder, config::Config, context::PlanContext, reports::SearchReport};
# use std::rc::Rc;
let domain = builder::parse_domain(
    "(define (domain switch)
       (:predicates (lit))
       (:action flip-on :parameters () :precondition (and) :effect (lit)))",
)
.unwrap();

let problem = builder::parse_problem(
    "(define (problem dark) (:domain switch) (:init) (:goal (lit)))",
    Rc::new(domain),
)
.unwrap();

let mut ctx = PlanContext::new(Rc::new(problem), Config::default());

assert!(matches!(ctx.solve_deepening().unwrap(), SearchReport::Found(_)));
```
*/

pub mod callbacks;
mod counters;
pub use counters::Counters;

use std::rc::Rc;

use crate::{
    config::Config,
    state::rank::ConjunctOrder,
    structures::{domain::Domain, problem::Problem},
};

use callbacks::{CallbackOnDepth, CallbackOnExpansion};

/// A context for solving, or verifying solutions to, one planning problem.
pub struct PlanContext {
    /// The configuration of the context.
    pub config: Config,

    /// Counters related to a context/solve.
    pub counters: Counters,

    /// The problem the context plans for.
    pub problem: Rc<Problem>,

    /// The conjunct order used during instantiation.
    pub order: Box<dyn ConjunctOrder>,

    /// An optional callback made when a depth is exhausted without a plan.
    pub(crate) callback_depth: Option<Box<CallbackOnDepth>>,

    /// An optional callback made on each expansion of a partial plan.
    pub(crate) callback_expansion: Option<Box<CallbackOnExpansion>>,
}

impl PlanContext {
    /// A context for a problem, with the heuristic the configuration names.
    pub fn new(problem: Rc<Problem>, config: Config) -> Self {
        let order = config.conjunct_order();

        PlanContext {
            config,
            counters: Counters::default(),
            problem,
            order,
            callback_depth: None,
            callback_expansion: None,
        }
    }

    /// The domain of the context's problem.
    pub fn domain(&self) -> &Rc<Domain> {
        &self.problem.domain
    }

    /// Whether the step limit, if any, has been passed.
    pub(crate) fn over_step_limit(&self) -> bool {
        let limit = self.config.step_limit.value;
        limit != 0 && self.counters.expansions > limit
    }
}
