/*!
A state --- the complete set of ground atoms that hold simultaneously ---
together with its evaluation and instantiation machinery.

# Representation

Atoms are stored in buckets, one per relation present, so that checking
whether an atom holds inspects only atoms of the same relation.
Atoms are immutable once constructed and shared between successor states by
reference, so taking a successor copies the bucket structure but never an
atom.

After every mutation the store is normalized: buckets are ordered by (bucket
size, relation index) and atoms within a bucket by their parameter tuple.
The order is total, so state equality is plain structural equality --- which
the breadth-first driver leans on for loop elimination.

A list of the distinct constants appearing in the atoms is computed on first
request and cached; applying effects invalidates the cache.

# Operations

- [is_consistent](State::is_consistent) --- whether a ground formula holds.
- [could_be_consistent](State::could_be_consistent) --- a necessary filter
  for partially-substituted formulas.
- [operator_instantiations](State::operator_instantiations) --- every
  substitution making an operator applicable (see [instantiate]).
- [next_state](State::next_state) --- the state after applying a ground
  operator instance (see [apply]).
*/

pub mod apply;
pub mod instantiate;
pub mod rank;

use std::{cell::RefCell, rc::Rc};

use crate::{
    misc::text::cmp_no_case,
    structures::{
        formula::{Formula, Literal, Predicate},
        term::{Constant, Term},
    },
    types::err::{self, ErrorKind},
};

/// The atoms of one relation which hold in a state.
#[derive(Clone, Debug, PartialEq)]
pub(in crate::state) struct Bucket {
    /// The relation shared by every atom of the bucket.
    pub relation: usize,

    /// The distinct atoms, in normalized order.
    pub atoms: Vec<Rc<Predicate>>,
}

/// A set of ground atoms representing a world.
#[derive(Debug, Default)]
pub struct State {
    pub(in crate::state) buckets: Vec<Bucket>,

    /// Distinct constants appearing in the atoms, filled on demand.
    /// Empty means not yet computed.
    constants: RefCell<Vec<Constant>>,
}

impl Clone for State {
    fn clone(&self) -> Self {
        State {
            buckets: self.buckets.clone(),
            constants: RefCell::new(Vec::new()),
        }
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.buckets == other.buckets
    }
}

impl State {
    pub fn new() -> Self {
        State::default()
    }

    /// Build a state from a list of atoms.
    ///
    /// Every atom must be ground; duplicates are dropped.
    pub fn from_atoms(atoms: Vec<Predicate>) -> Result<Self, ErrorKind> {
        let mut state = State::new();

        for atom in atoms {
            if !atom.is_ground() {
                return Err(err::ParseError::StateNotAtom(atom.to_string()).into());
            }
            state.insert(Rc::new(atom));
        }

        state.normalize();
        Ok(state)
    }

    /// Add an atom, unless already present.
    pub(in crate::state) fn insert(&mut self, atom: Rc<Predicate>) {
        match self
            .buckets
            .iter_mut()
            .find(|bucket| bucket.relation == atom.relation)
        {
            Some(bucket) => {
                if !bucket.atoms.iter().any(|held| **held == *atom) {
                    bucket.atoms.push(atom);
                }
            }

            None => self.buckets.push(Bucket {
                relation: atom.relation,
                atoms: vec![atom],
            }),
        }
    }

    /// Remove an atom, if present, dropping its bucket if emptied.
    pub(in crate::state) fn remove(&mut self, atom: &Predicate) {
        for bucket in self.buckets.iter_mut() {
            if bucket.relation == atom.relation {
                bucket.atoms.retain(|held| **held != *atom);
            }
        }
        self.buckets.retain(|bucket| !bucket.atoms.is_empty());
    }

    /// Whether an atom holds.
    pub fn contains(&self, atom: &Predicate) -> bool {
        match self
            .buckets
            .iter()
            .find(|bucket| bucket.relation == atom.relation)
        {
            Some(bucket) => bucket.atoms.iter().any(|held| **held == *atom),
            None => false,
        }
    }

    /// The number of atoms which hold.
    pub fn num_atoms(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.atoms.len()).sum()
    }

    /// The atoms which hold, in normalized order.
    pub fn atoms(&self) -> impl Iterator<Item = &Predicate> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.atoms.iter().map(Rc::as_ref))
    }

    /// Whether a ground literal holds as-is.
    ///
    /// A literal containing variables does not hold.
    pub fn literal_holds(&self, literal: &Literal) -> bool {
        if !literal.is_ground() {
            return false;
        }

        match literal {
            Literal::Pred(p) => self.contains(p),
            Literal::NegPred(p) => !self.contains(p),
            Literal::Equ(e) => e.left == e.right,
            Literal::NegEqu(e) => e.left != e.right,
        }
    }

    /// Whether a ground formula holds as-is.
    ///
    /// Total: a formula containing variables does not hold, and no canonical
    /// formula errors.
    pub fn is_consistent(&self, formula: &Formula) -> bool {
        formula
            .conjuncts()
            .iter()
            .all(|literal| self.literal_holds(literal))
    }

    /// Whether a literal could be made to hold by some substitution.
    ///
    /// Necessary, not sufficient: a ground literal must hold as-is; a
    /// non-ground atom must agree with some held atom on every ground
    /// parameter; any other non-ground literal passes.
    pub fn literal_could_hold(&self, literal: &Literal) -> bool {
        if literal.is_ground() {
            return self.literal_holds(literal);
        }

        match literal {
            Literal::Pred(p) => match self
                .buckets
                .iter()
                .find(|bucket| bucket.relation == p.relation)
            {
                None => false,
                Some(bucket) => bucket.atoms.iter().any(|held| {
                    p.terms.iter().zip(held.terms.iter()).all(|(ours, theirs)| {
                        match ours {
                            Term::Constant(_) => ours == theirs,
                            Term::Variable(_) => true,
                        }
                    })
                }),
            },

            Literal::Equ(_) | Literal::NegEqu(_) | Literal::NegPred(_) => true,
        }
    }

    /// Whether a formula could be made to hold by some substitution.
    ///
    /// This is not a strict test: `( and ( = ?x ?y ) ( not ( = ?x ?y ) ) )`
    /// passes though nothing satisfies it.
    /// If the test fails, no substitution exists.
    pub fn could_be_consistent(&self, formula: &Formula) -> bool {
        formula
            .conjuncts()
            .iter()
            .all(|literal| self.literal_could_hold(literal))
    }

    /// The distinct constants appearing in the atoms, in discovery order.
    ///
    /// Computed on the first call after a mutation, then cached.
    pub fn constants(&self) -> Vec<Constant> {
        if self.constants.borrow().is_empty() {
            let mut found = Vec::new();
            for bucket in &self.buckets {
                for atom in &bucket.atoms {
                    for term in &atom.terms {
                        if let Term::Constant(c) = term {
                            if !found.contains(c) {
                                found.push(c.clone());
                            }
                        }
                    }
                }
            }
            *self.constants.borrow_mut() = found;
        }

        self.constants.borrow().clone()
    }

    /// Drop the cached constants list.
    pub(in crate::state) fn invalidate_constants(&mut self) {
        self.constants.borrow_mut().clear();
    }

    /// Restore the normalized order of the store.
    ///
    /// Buckets order by (size, relation index) --- total, as a relation has
    /// at most one bucket --- and atoms within a bucket by parameter tuple.
    pub(in crate::state) fn normalize(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.atoms.sort_by(|a, b| atom_order(a.as_ref(), b.as_ref()));
        }

        self.buckets
            .sort_by_key(|bucket| (bucket.atoms.len(), bucket.relation));
    }
}

/// Order two atoms of the same relation by their parameter tuples.
fn atom_order(a: &Predicate, b: &Predicate) -> std::cmp::Ordering {
    for (ours, theirs) in a.terms.iter().zip(b.terms.iter()) {
        match cmp_no_case(ours.name(), theirs.name()) {
            std::cmp::Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    std::cmp::Ordering::Equal
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "( ")?;
        for atom in self.atoms() {
            write!(f, "{atom} ")?;
        }
        write!(f, ")")
    }
}

impl State {
    /// Render the state as a PDDL `:init` block.
    pub fn to_pddl(&self) -> String {
        let mut out = String::from("  ( :init\n");
        for atom in self.atoms() {
            out.push_str(&format!("    {atom}\n"));
        }
        out.push_str("  )\n");
        out
    }
}
