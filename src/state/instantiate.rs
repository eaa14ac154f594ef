/*!
The instantiator --- enumeration of the substitutions which make a
conjunction of literals hold in a state.

# Contract

Given precondition literals Φ, a partial substitution σ, and a list of
*relevant* variables R, [instantiations](State::instantiations) returns the
extensions σ′ ⊇ σ such that σ′(Φ) is ground and satisfied in the state, with
every variable of R bound.

R controls how hard the search works: while R is non-empty every distinct
extension is enumerated; once R is empty the caller is taken to want at least
one extension, and the loops over candidate atoms and constants stop at the
first success.
A caller wanting full enumeration seeds R accordingly ---
[operator_instantiations](State::operator_instantiations) seeds it with every
head variable.

# Method

Each call applies σ to the conjuncts and discards those now ground: a ground
inconsistent conjunct refutes the whole conjunction, a ground consistent one
is dropped.
An empty residue means σ itself is the single answer.
Otherwise the residue is re-ordered most-constrained-first (see
[rank](crate::state::rank)) and the front conjunct dispatched on:

- an atom unifies against each held atom of its relation;
- an equality binds a variable, or rewires one variable onto another;
- a negated equality branches over the constants of the state --- the only
  place the constant set drives branching.

Each successful branch recurses on the whole residue with the extended
substitution; the front conjunct, now ground, is consumed by the next call's
pre-processing.
Negated *atoms* are not dispatched on: when still non-ground at the front of
the residue they are outside the supported subset.
*/

use std::rc::Rc;

use crate::{
    misc::{log::targets, text::eq_no_case},
    state::{rank::ConjunctOrder, State},
    structures::{
        formula::{Equality, Literal, Predicate},
        operator::Operator,
        substitution::Substitution,
        term::{unifiable_typings, Constant, Term, Typing, Variable},
    },
    types::err::ErrorKind,
};

/// Whether a constant satisfies the typing of the other side of a (negated)
/// equality: an untyped side accepts any constant, a typed side only
/// constants of its type.
fn typed_candidate(side: &Typing, candidate: &Constant) -> bool {
    match side {
        None => true,
        Some(typing) => candidate
            .typing
            .as_deref()
            .is_some_and(|candidate_typing| eq_no_case(typing, candidate_typing)),
    }
}

impl State {
    /// Every substitution extending `seed` which makes the operator's head
    /// and preconditions ground and applicable in this state.
    pub fn operator_instantiations(
        &self,
        oper: &Operator,
        seed: &Substitution,
        order: &mut dyn ConjunctOrder,
    ) -> Result<Vec<Substitution>, ErrorKind> {
        log::trace!(target: targets::INSTANTIATE, "Instantiating \"{}\"", oper.name);

        let relevant = oper.parameters.clone();

        let constants = self.constants();

        let mut precondition_vars = Vec::new();
        for literal in &oper.preconditions {
            literal.collect_variables(&mut precondition_vars);
        }

        // Head parameters missing from the preconditions are unconstrained,
        // so each is pre-expanded against every well-typed constant.
        let mut worklist = vec![seed.clone()];
        let mut results = Vec::new();

        while let Some(partial) = worklist.pop() {
            let unconstrained = oper.parameters.iter().find(|parameter| {
                !partial.binds(parameter) && !precondition_vars.contains(parameter)
            });

            match unconstrained {
                Some(parameter) => {
                    for constant in &constants {
                        if !unifiable_typings(&parameter.typing, &constant.typing)? {
                            continue;
                        }
                        let mut expanded = partial.clone();
                        expanded
                            .add_pair(parameter.clone(), Term::Constant(constant.clone()))?;
                        worklist.push(expanded);
                    }
                }

                None => {
                    let mut remaining = relevant.clone();
                    remaining.retain(|variable| !partial.binds(variable));

                    results.extend(self.instantiations(
                        &oper.preconditions,
                        &partial,
                        &remaining,
                        order,
                    )?);
                }
            }
        }

        log::trace!(
            target: targets::INSTANTIATE,
            "\"{}\" has {} instantiation(s)",
            oper.name,
            results.len()
        );

        Ok(results)
    }

    /// Every substitution extending `sub` which makes the conjuncts ground
    /// and satisfied, with every variable of `relevant` bound.
    ///
    /// With `relevant` empty the first satisfying extension found is
    /// returned alone.
    pub fn instantiations(
        &self,
        conjuncts: &[Literal],
        sub: &Substitution,
        relevant: &[Variable],
        order: &mut dyn ConjunctOrder,
    ) -> Result<Vec<Substitution>, ErrorKind> {
        // Apply the substitution, refuting on a failed ground conjunct and
        // dropping satisfied ones.
        let mut residue = Vec::new();
        for conjunct in conjuncts {
            let applied = conjunct.after_substitution(sub, 0)?;

            if applied.is_ground() {
                if !self.literal_holds(&applied) {
                    return Ok(Vec::new());
                }
            } else {
                residue.push(applied);
            }
        }

        if residue.is_empty() {
            return Ok(vec![sub.clone()]);
        }

        order.order(self, &mut residue);

        match &residue[0] {
            Literal::Pred(_) => self.instantiations_predicate(&residue, sub, relevant, order),

            Literal::Equ(_) => self.instantiations_equality(&residue, sub, relevant, order),

            Literal::NegEqu(_) => {
                self.instantiations_negated_equality(&residue, sub, relevant, order)
            }

            Literal::NegPred(_) => Err(ErrorKind::NotImplemented(
                "only equalities may be negated in preconditions, for performance".to_owned(),
            )),
        }
    }

    /// Dispatch for a front conjunct which is an atom: unify against each
    /// held atom of the same relation.
    fn instantiations_predicate(
        &self,
        conjuncts: &[Literal],
        sub: &Substitution,
        relevant: &[Variable],
        order: &mut dyn ConjunctOrder,
    ) -> Result<Vec<Substitution>, ErrorKind> {
        let Literal::Pred(pred) = &conjuncts[0] else {
            return Err(ErrorKind::FormulaTypeUnknown);
        };

        let mut results = Vec::new();

        'bucket_loop: for bucket in &self.buckets {
            if bucket.relation != pred.relation {
                continue;
            }

            for held in &bucket.atoms {
                self.unify_against_atom(conjuncts, pred, held, sub, relevant, order, &mut results)?;

                if !results.is_empty() && relevant.is_empty() {
                    break 'bucket_loop;
                }
            }
        }

        Ok(results)
    }

    /// Unify the front atom against one held atom, parameter by parameter,
    /// and recurse on success.
    #[allow(clippy::too_many_arguments)]
    fn unify_against_atom(
        &self,
        conjuncts: &[Literal],
        pred: &Predicate,
        held: &Rc<Predicate>,
        sub: &Substitution,
        relevant: &[Variable],
        order: &mut dyn ConjunctOrder,
        results: &mut Vec<Substitution>,
    ) -> Result<(), ErrorKind> {
        let mut extended = sub.clone();
        let mut remaining = relevant.to_vec();

        for (ours, theirs) in pred.terms.iter().zip(held.terms.iter()) {
            match ours {
                Term::Constant(_) => {
                    if ours != theirs {
                        return Ok(());
                    }
                }

                Term::Variable(variable) => match extended.get(variable) {
                    Some(bound) => {
                        if bound != theirs {
                            return Ok(());
                        }
                    }

                    None => {
                        if !unifiable_typings(&variable.typing, theirs.typing())? {
                            return Ok(());
                        }
                        extended.add_pair(variable.clone(), theirs.clone())?;
                        remaining.retain(|known| known != variable);
                    }
                },
            }
        }

        results.extend(self.instantiations(conjuncts, &extended, &remaining, order)?);
        Ok(())
    }

    /// Dispatch for a front conjunct which is an equality.
    ///
    /// The equality is non-ground, so at least one side is a variable.
    fn instantiations_equality(
        &self,
        conjuncts: &[Literal],
        sub: &Substitution,
        relevant: &[Variable],
        order: &mut dyn ConjunctOrder,
    ) -> Result<Vec<Substitution>, ErrorKind> {
        let Literal::Equ(Equality { left, right }) = &conjuncts[0] else {
            return Err(ErrorKind::FormulaTypeUnknown);
        };

        // A typed side can only equal a term of the same type.
        if let Some(typing) = left.typing() {
            match right.typing() {
                Some(right_typing) if eq_no_case(typing, right_typing) => {}
                _ => return Ok(Vec::new()),
            }
        }

        let bind = |variable: &Variable, term: &Term| -> Result<(Substitution, Vec<Variable>), ErrorKind> {
            let mut extended = sub.clone();
            extended.add_pair(variable.clone(), term.clone())?;
            let mut remaining = relevant.to_vec();
            remaining.retain(|known| known != variable);
            Ok((extended, remaining))
        };

        match (left, right) {
            (Term::Constant(_), Term::Variable(variable)) => {
                // The one substitution which satisfies the equality.
                let (extended, remaining) = bind(variable, left)?;
                self.instantiations(conjuncts, &extended, &remaining, order)
            }

            (Term::Variable(variable), Term::Constant(_)) => {
                let (extended, remaining) = bind(variable, right)?;
                self.instantiations(conjuncts, &extended, &remaining, order)
            }

            (Term::Variable(ours), Term::Variable(theirs)) if ours == theirs => {
                // Satisfied under any substitution. The conjunct never
                // grounds, so it is dropped here rather than left for the
                // pre-processor.
                self.instantiations(&conjuncts[1..], sub, relevant, order)
            }

            (Term::Variable(ours), Term::Variable(_)) => {
                // The two variables must be made the same.
                let mut extended = sub.clone();
                extended.replace_term(left, right);
                let mut remaining = relevant.to_vec();
                remaining.retain(|known| known != ours);
                self.instantiations(conjuncts, &extended, &remaining, order)
            }

            (Term::Constant(_), Term::Constant(_)) => {
                // Ground equalities are consumed by pre-processing.
                Err(ErrorKind::FormulaTypeUnknown)
            }
        }
    }

    /// Dispatch for a front conjunct which is a negated equality: branch
    /// over the distinct constants of the state.
    fn instantiations_negated_equality(
        &self,
        conjuncts: &[Literal],
        sub: &Substitution,
        relevant: &[Variable],
        order: &mut dyn ConjunctOrder,
    ) -> Result<Vec<Substitution>, ErrorKind> {
        let Literal::NegEqu(Equality { left, right }) = &conjuncts[0] else {
            return Err(ErrorKind::FormulaTypeUnknown);
        };

        let constants = self.constants();
        let mut results = Vec::new();

        match (left, right) {
            (Term::Constant(fixed), Term::Variable(variable)) => {
                // Every properly typed constant other than the fixed one.
                for candidate in &constants {
                    if candidate != fixed && typed_candidate(&variable.typing, candidate) {
                        self.unequal_branch(
                            conjuncts,
                            sub,
                            relevant,
                            order,
                            variable,
                            candidate,
                            &mut results,
                        )?;
                    }
                    if !results.is_empty() && relevant.is_empty() {
                        break;
                    }
                }
            }

            (Term::Variable(variable), Term::Constant(fixed)) => {
                for candidate in &constants {
                    if candidate != fixed && typed_candidate(&variable.typing, candidate) {
                        self.unequal_branch(
                            conjuncts,
                            sub,
                            relevant,
                            order,
                            variable,
                            candidate,
                            &mut results,
                        )?;
                    }
                    if !results.is_empty() && relevant.is_empty() {
                        break;
                    }
                }
            }

            (Term::Variable(ours), Term::Variable(theirs)) if ours == theirs => {
                // Cannot be satisfied.
            }

            (Term::Variable(ours), Term::Variable(theirs)) => {
                // Every ordered pair of distinct, properly typed constants.
                'outer: for (i, first) in constants.iter().enumerate() {
                    if !typed_candidate(&ours.typing, first) {
                        continue;
                    }

                    for (j, second) in constants.iter().enumerate() {
                        if i != j && typed_candidate(&theirs.typing, second) {
                            let mut extended = sub.clone();
                            extended.add_pair(ours.clone(), Term::Constant(first.clone()))?;
                            extended.add_pair(theirs.clone(), Term::Constant(second.clone()))?;

                            let mut remaining = relevant.to_vec();
                            remaining.retain(|known| known != ours && known != theirs);

                            results.extend(self.instantiations(
                                conjuncts,
                                &extended,
                                &remaining,
                                order,
                            )?);
                        }

                        if !results.is_empty() && relevant.is_empty() {
                            break 'outer;
                        }
                    }
                }
            }

            (Term::Constant(_), Term::Constant(_)) => {
                // Ground negated equalities are consumed by pre-processing.
                return Err(ErrorKind::FormulaTypeUnknown);
            }
        }

        Ok(results)
    }

    /// One branch of a negated equality: bind the variable to the candidate
    /// constant and recurse.
    #[allow(clippy::too_many_arguments)]
    fn unequal_branch(
        &self,
        conjuncts: &[Literal],
        sub: &Substitution,
        relevant: &[Variable],
        order: &mut dyn ConjunctOrder,
        variable: &Variable,
        candidate: &Constant,
        results: &mut Vec<Substitution>,
    ) -> Result<(), ErrorKind> {
        let mut extended = sub.clone();
        extended.add_pair(variable.clone(), Term::Constant(candidate.clone()))?;

        let mut remaining = relevant.to_vec();
        remaining.retain(|known| known != variable);

        results.extend(self.instantiations(conjuncts, &extended, &remaining, order)?);
        Ok(())
    }
}
