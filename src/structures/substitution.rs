/*!
Substitutions --- partial maps from variables to terms.

A substitution is a value object: extended as unification proceeds, cloned
freely, and applied to terms and formulas without mutating either.

Bindings are kept in insertion order, so that iteration --- and hence every
enumeration seeded from a substitution --- is deterministic.

A variable may be bound to another variable, so applying a substitution
follows chains of bindings.
Rather than an occurs check, chains are resolved lazily up to
[COMPOSITION_BOUND] and resolution past the bound is a hard error.
*/

use crate::{
    structures::term::{Term, Variable},
    types::err::{self, ErrorKind},
};

/// The longest chain of bindings a single application will follow.
pub const COMPOSITION_BOUND: u32 = 32;

/// A partial map from variables to terms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Substitution {
    pairs: Vec<(Variable, Term)>,
}

impl Substitution {
    pub fn new() -> Self {
        Substitution { pairs: Vec::new() }
    }

    /// The term bound to a variable, if any.
    pub fn get(&self, variable: &Variable) -> Option<&Term> {
        self.pairs
            .iter()
            .find(|(bound, _)| bound == variable)
            .map(|(_, term)| term)
    }

    /// Whether a variable is bound.
    pub fn binds(&self, variable: &Variable) -> bool {
        self.get(variable).is_some()
    }

    /// Extend the substitution with a fresh pair.
    ///
    /// The variable must not already be bound.
    pub fn add_pair(&mut self, variable: Variable, term: Term) -> Result<(), ErrorKind> {
        if self.binds(&variable) {
            return Err(err::SubstitutionError::Duplicate.into());
        }
        self.pairs.push((variable, term));
        Ok(())
    }

    /// Rewrite every codomain entry equal to `from` into `to`, and bind
    /// `from` to `to` if `from` is an unbound variable.
    ///
    /// Used to unify two unbound variables by rewiring one onto the other.
    pub fn replace_term(&mut self, from: &Term, to: &Term) {
        for (_, term) in self.pairs.iter_mut() {
            if term == from {
                *term = to.clone();
            }
        }

        if let Term::Variable(variable) = from {
            if !self.binds(variable) {
                self.pairs.push((variable.clone(), to.clone()));
            }
        }
    }

    /// The result of applying the substitution to a term.
    ///
    /// Constants pass through.
    /// A bound variable resolves through the chain of bindings, failing if
    /// the chain outruns [COMPOSITION_BOUND] from the given depth.
    pub fn apply_to_term(&self, term: &Term, depth: u32) -> Result<Term, ErrorKind> {
        if depth > COMPOSITION_BOUND {
            return Err(err::SubstitutionError::TooDeep.into());
        }

        match term {
            Term::Constant(_) => Ok(term.clone()),

            Term::Variable(variable) => match self.get(variable) {
                None => Ok(term.clone()),
                Some(bound) => self.apply_to_term(bound, depth + 1),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// The pairs of the substitution, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.pairs.iter().map(|(variable, term)| (variable, term))
    }
}

#[cfg(test)]
mod substitution_tests {
    use super::*;
    use crate::structures::term::Constant;

    fn var(name: &str) -> Variable {
        Variable::new(name, None)
    }

    fn constant(name: &str) -> Term {
        Term::Constant(Constant::new(name, None))
    }

    #[test]
    fn no_rebinding() {
        let mut sub = Substitution::new();
        assert!(sub.add_pair(var("?x"), constant("a")).is_ok());
        assert!(sub.add_pair(var("?X"), constant("b")).is_err());
    }

    #[test]
    fn chains_resolve() {
        let mut sub = Substitution::new();
        sub.add_pair(var("?x"), Term::Variable(var("?y"))).unwrap();
        sub.add_pair(var("?y"), constant("a")).unwrap();

        let result = sub.apply_to_term(&Term::Variable(var("?x")), 0).unwrap();
        assert_eq!(result, constant("a"));
    }

    #[test]
    fn cyclic_chains_error() {
        let mut sub = Substitution::new();
        sub.add_pair(var("?x"), Term::Variable(var("?y"))).unwrap();
        sub.add_pair(var("?y"), Term::Variable(var("?x"))).unwrap();

        assert!(sub.apply_to_term(&Term::Variable(var("?x")), 0).is_err());
    }

    #[test]
    fn rewiring_binds_the_replaced_variable() {
        let mut sub = Substitution::new();
        sub.add_pair(var("?z"), Term::Variable(var("?x"))).unwrap();

        sub.replace_term(&Term::Variable(var("?x")), &Term::Variable(var("?y")));

        assert_eq!(sub.get(&var("?z")), Some(&Term::Variable(var("?y"))));
        assert_eq!(sub.get(&var("?x")), Some(&Term::Variable(var("?y"))));
    }

    #[test]
    fn unbound_variables_pass_through() {
        let sub = Substitution::new();
        let x = Term::Variable(var("?x"));
        assert_eq!(sub.apply_to_term(&x, 0).unwrap(), x);
    }
}
