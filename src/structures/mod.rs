/*!
The structures of a planning problem, and their representation.

- [Terms](term) --- variables and constants, optionally typed.
- [Substitutions](substitution) --- partial maps from variables to terms.
- [Formulas](formula) --- atoms, equalities, their negations, and flat
  conjunctions of these, over a table of declared relations.
- [Operators](operator) --- action schemas with parameters, preconditions,
  and effects.
- [Domains](domain) and [problems](problem) --- the immutable parsed inputs.
- [Plans](plan) --- sequences of ground operator applications together with
  the states they produce.

The [state](crate::state) module holds the evaluated store of ground atoms,
and is kept separate as it carries the instantiation machinery.
*/

pub mod domain;
pub mod formula;
pub mod operator;
pub mod plan;
pub mod problem;
pub mod substitution;
pub mod term;
