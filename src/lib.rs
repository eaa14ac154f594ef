/*!
A library for classical (STRIPS) planning over a PDDL subset.

heron_plan determines, for a planning domain (typed predicates and operator
schemas) and a problem (objects, an initial state, and a goal formula),
whether some sequence of ground operator applications transforms the initial
state into a state satisfying the goal, and if so returns such a sequence.

# Orientation

The library is designed around the core structure of a [context](crate::context).

A context owns a parsed [problem](crate::structures::problem) (which in turn
owns its [domain](crate::structures::domain)), a [configuration](crate::config),
counters, and the conjunct-ordering heuristic used during instantiation.

Internally, and at a high level, planning is viewed in terms of three
operations on a [state](crate::state):

- Evaluation of a ground formula against the atoms of the state
  ([is_consistent](crate::state::State::is_consistent)).
- Enumeration of every substitution which makes an operator's head and
  preconditions ground and satisfied in the state
  ([operator_instantiations](crate::state::State::operator_instantiations)).
- Application of a ground effect to obtain a successor state
  ([next_state](crate::state::State::next_state)).

The [search procedures](crate::procedures) --- iterative deepening and
breadth-first with loop elimination --- and the [plan verifier](crate::procedures::verify)
are thin drivers over these three operations.

Useful starting points:
- The [instantiator](crate::state::instantiate) to inspect the unification
  machinery and the most-constrained-first selection of sub-goals.
- The [structures](crate::structures) to familiarise yourself with terms,
  formulas, substitutions, operators, and plans.
- The [builder](crate::builder) for the PDDL subset read by the library.

# Example

```rust
use heron_plan::{builder, config::Config, context::PlanContext, reports::SearchReport};

let domain = builder::parse_domain(
    "(define (domain switch)
       (:predicates (lit))
       (:action flip-on :parameters () :precondition (and) :effect (lit)))",
)
.unwrap();

let problem = builder::parse_problem(
    "(define (problem dark) (:domain switch) (:init) (:goal (lit)))",
    std::rc::Rc::new(domain),
)
.unwrap();

let mut ctx = PlanContext::new(std::rc::Rc::new(problem), Config::default());

match ctx.solve_breadth().unwrap() {
    SearchReport::Found(plan) => assert_eq!(plan.len(), 1),
    _ => panic!("no plan"),
}
```

# Logs

Calls to [log!](log) are made throughout the library, with a variety of
targets defined in [misc::log] to help narrow output to relevant parts of the
library. No log implementation is provided, or required.
*/

#![allow(clippy::collapsible_else_if)]
#![allow(clippy::single_match)]

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod state;
pub mod structures;
pub mod types;

pub mod generic;

pub mod reports;

pub mod misc;
