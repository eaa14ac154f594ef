/*!
The search and verification procedures, as implementations on a
[context](crate::context::PlanContext).

- [deepening] --- iterative deepening: bounded depth-first search, the bound
  raised until a plan is found or the ceiling is reached.
  A found plan is of minimum length, as every shorter length was exhausted
  at an earlier bound.
- [breadth] --- breadth-first over partial plans, discarding any extension
  which revisits a state on its own path.
- [verify] --- replay of a given plan from the initial state, checking each
  action's preconditions and then the goals.
*/

pub mod breadth;
pub mod deepening;
pub mod verify;
