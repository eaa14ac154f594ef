/*!
Effect application --- the forward state transition.

[next_state](State::next_state) checks that the substituted preconditions are
ground and hold, then applies the substituted effects to a copy of the state:
every deleted atom is removed first, then every added atom is inserted.
The order matters: an atom both deleted and added by one effect is present in
the successor, the STRIPS convention.
*/

use std::rc::Rc;

use crate::{
    misc::log::targets,
    state::State,
    structures::{
        formula::{Formula, Predicate},
        operator::{EffectAtom, Operator},
        substitution::Substitution,
    },
    types::err::{self, ErrorKind},
};

impl State {
    /// The state resulting from applying an operator under a substitution.
    ///
    /// The substitution must ground the preconditions and effects, and the
    /// ground preconditions must hold here; otherwise the operator instance
    /// is not applicable.
    pub fn next_state(&self, oper: &Operator, sub: &Substitution) -> Result<State, ErrorKind> {
        let mut preconditions = Vec::with_capacity(oper.preconditions.len());
        for literal in &oper.preconditions {
            preconditions.push(literal.after_substitution(sub, 0)?);
        }
        let preconditions = Formula::Conj(preconditions);

        if !preconditions.is_ground() {
            return Err(err::StateError::OperNotApplicable.into());
        }
        if !self.is_consistent(&preconditions) {
            return Err(err::StateError::OperNotApplicable.into());
        }

        let mut deletes = Vec::new();
        let mut adds = Vec::new();
        for effect in &oper.effects {
            let atom = effect.predicate().after_substitution(sub, 0)?;
            if !atom.is_ground() {
                return Err(err::StateError::OperNotApplicable.into());
            }
            match effect {
                EffectAtom::Delete(_) => deletes.push(atom),
                EffectAtom::Add(_) => adds.push(atom),
            }
        }

        log::debug!(
            target: targets::STATE,
            "Applying \"{}\": -{} +{}",
            oper.name,
            deletes.len(),
            adds.len()
        );

        let mut next = self.clone();
        next.apply_effects(deletes, adds);

        Ok(next)
    }

    /// Remove the deleted atoms, then insert the added ones, and restore the
    /// store invariants.
    fn apply_effects(&mut self, deletes: Vec<Predicate>, adds: Vec<Predicate>) {
        for atom in &deletes {
            self.remove(atom);
        }

        for atom in adds {
            self.insert(Rc::new(atom));
        }

        self.invalidate_constants();
        self.normalize();
    }
}
