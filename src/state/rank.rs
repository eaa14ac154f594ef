/*!
Ordering of precondition conjuncts before instantiation.

The instantiator works through a conjunction front to back, so the front
conjunct should be the one with the fewest possible instantiations ---
branching early on a negated equality over every pair of constants when an
atom with a single match is waiting is ruinous.

The ordering sits behind the [ConjunctOrder] trait so alternatives can be
swapped in for experimentation.
The set of substitutions found is invariant under the order; only the work
done, and the order of enumeration, changes.

[MostConstrained] is the default:

1. Equalities first (at most a handful of extensions), then atoms, then
   negations (up to one extension per pair of constants).
2. Atom against atom: the one whose relation's held atoms, filtered on the
   atom's ground parameters, leave fewer candidates.
3. Within the remaining classes: more constants first, then fewer variables.

The sort is stable, so ties keep their given order.
*/

use std::cmp::Ordering;

use rand::seq::SliceRandom;

use crate::{
    generic::random::MinimalPCG32,
    misc::text::eq_no_case,
    state::State,
    structures::{
        formula::{Literal, Predicate},
        term::Term,
    },
};

/// An ordering of precondition conjuncts, applied before dispatching on the
/// front conjunct.
pub trait ConjunctOrder {
    /// Reorder the conjuncts in place.
    fn order(&mut self, state: &State, conjuncts: &mut Vec<Literal>);
}

/// Order conjuncts by estimated branching factor, smallest first.
#[derive(Clone, Copy, Debug, Default)]
pub struct MostConstrained;

/// The coarse class of a literal for ranking: equalities, atoms, negations.
fn class(literal: &Literal) -> u8 {
    match literal {
        Literal::Equ(_) => 0,
        Literal::Pred(_) => 1,
        Literal::NegPred(_) | Literal::NegEqu(_) => 2,
    }
}

/// How many held atoms remain candidates for an atom conjunct, filtering the
/// atom's relation on its ground parameter positions.
fn candidate_count(state: &State, pred: &Predicate) -> usize {
    let mut count = 0;

    for bucket in &state.buckets {
        if bucket.relation != pred.relation {
            continue;
        }

        for held in &bucket.atoms {
            let agrees = pred
                .terms
                .iter()
                .zip(held.terms.iter())
                .all(|(ours, theirs)| match ours {
                    Term::Constant(c) => theirs
                        .as_constant()
                        .is_some_and(|held_c| eq_no_case(&c.name, &held_c.name)),
                    Term::Variable(_) => true,
                });

            if agrees {
                count += 1;
            }
        }
    }

    count
}

impl ConjunctOrder for MostConstrained {
    fn order(&mut self, state: &State, conjuncts: &mut Vec<Literal>) {
        conjuncts.sort_by(|a, b| {
            match class(a).cmp(&class(b)) {
                Ordering::Equal => {}
                unequal => return unequal,
            }

            if let (Literal::Pred(a), Literal::Pred(b)) = (a, b) {
                return candidate_count(state, a).cmp(&candidate_count(state, b));
            }

            // Equalities or negations: more constants, then fewer variables.
            match b.constants().len().cmp(&a.constants().len()) {
                Ordering::Equal => a.variables().len().cmp(&b.variables().len()),
                unequal => unequal,
            }
        });

        log::trace!(target: crate::misc::log::targets::RANK, "Ordered {} conjuncts", conjuncts.len());
    }
}

/// Shuffle the conjuncts, seeded and so reproducible.
///
/// A stress order: anything the instantiator finds under [MostConstrained]
/// it must also find under a shuffle, typically less quickly.
pub struct Shuffled {
    rng: MinimalPCG32,
}

impl Shuffled {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Shuffled {
            rng: MinimalPCG32::from_seed(seed.to_le_bytes()),
        }
    }
}

impl ConjunctOrder for Shuffled {
    fn order(&mut self, _state: &State, conjuncts: &mut Vec<Literal>) {
        conjuncts.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod rank_tests {
    use super::*;
    use crate::structures::{
        formula::Equality,
        term::{Constant, Variable},
    };
    use std::rc::Rc;

    fn constant(name: &str) -> Term {
        Term::Constant(Constant::new(name, None))
    }

    fn variable(name: &str) -> Term {
        Term::Variable(Variable::new(name, None))
    }

    fn atom(relation: usize, name: &str, terms: Vec<Term>) -> Predicate {
        Predicate {
            relation,
            name: name.to_owned(),
            terms,
        }
    }

    #[test]
    fn equalities_lead_negations_trail() {
        let state = State::new();

        let mut conjuncts = vec![
            Literal::NegEqu(Equality {
                left: variable("?x"),
                right: variable("?y"),
            }),
            Literal::Pred(atom(0, "at", vec![variable("?x")])),
            Literal::Equ(Equality {
                left: variable("?x"),
                right: constant("a"),
            }),
        ];

        MostConstrained.order(&state, &mut conjuncts);

        assert!(matches!(conjuncts[0], Literal::Equ(_)));
        assert!(matches!(conjuncts[1], Literal::Pred(_)));
        assert!(matches!(conjuncts[2], Literal::NegEqu(_)));
    }

    #[test]
    fn tighter_atoms_lead() {
        let mut state = State::new();
        for name in ["a", "b", "c"] {
            state.insert(Rc::new(atom(0, "at", vec![constant(name)])));
        }
        state.insert(Rc::new(atom(1, "on", vec![constant("a"), constant("b")])));
        state.normalize();

        let loose = Literal::Pred(atom(0, "at", vec![variable("?x")]));
        let tight = Literal::Pred(atom(1, "on", vec![variable("?x"), variable("?y")]));

        let mut conjuncts = vec![loose.clone(), tight.clone()];
        MostConstrained.order(&state, &mut conjuncts);

        assert_eq!(conjuncts, vec![tight, loose]);
    }

    #[test]
    fn ground_filtering_counts() {
        let mut state = State::new();
        state.insert(Rc::new(atom(0, "on", vec![constant("a"), constant("b")])));
        state.insert(Rc::new(atom(0, "on", vec![constant("c"), constant("b")])));
        state.insert(Rc::new(atom(0, "on", vec![constant("a"), constant("c")])));
        state.normalize();

        let anchored = atom(0, "on", vec![constant("a"), variable("?y")]);
        assert_eq!(candidate_count(&state, &anchored), 2);

        let free = atom(0, "on", vec![variable("?x"), variable("?y")]);
        assert_eq!(candidate_count(&state, &free), 3);
    }
}
