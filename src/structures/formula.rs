/*!
Formulas, in the canonical form the planner reasons over.

The canonical form permits: atoms, equalities, negations of either, and flat
conjunctions of these.
No nested conjunctions, no negated conjunctions, no double negation.
Rather than checking the form at evaluation time, the representation makes
anything else unrepresentable: a [Literal] is one of the four permitted
shapes, and a [Formula] is a literal or a conjunction of literals.

Relations are interned in a [RelationTable] when a domain is loaded, and an
atom stores the index of its relation.
Two relations are the same iff their names agree, without regard to case.
*/

use crate::{
    misc::text::eq_no_case,
    structures::{
        substitution::Substitution,
        term::{Constant, Term, Typing, Variable},
    },
    types::err::{self, ErrorKind},
};

/// A declared predicate symbol: a relation name with the types of its
/// parameters.
///
/// In an untyped domain the typings are present but empty ([None] per
/// parameter), so the arity is always the length of the typing list.
#[derive(Clone, Debug)]
pub struct PredicateDecl {
    /// The relation name, as declared.
    pub name: String,

    /// One typing per parameter.
    pub param_typings: Vec<Typing>,
}

impl PredicateDecl {
    /// The number of parameters of the relation.
    pub fn arity(&self) -> usize {
        self.param_typings.len()
    }
}

/// The table of relations usable in a domain.
///
/// Relations receive stable indices in declaration order.
/// A domain with a `:predicates` block closes the table: only declared
/// relations may be used, at their declared arities.
/// Without the block any relation may be used, and is interned on first
/// sight.
#[derive(Clone, Debug, Default)]
pub struct RelationTable {
    decls: Vec<PredicateDecl>,
    closed: bool,
}

impl RelationTable {
    /// Declare a relation, closing the table.
    ///
    /// Redeclaration is an error.
    pub fn declare(&mut self, name: &str, param_typings: Vec<Typing>) -> Result<usize, ErrorKind> {
        if self.index_of(name).is_some() {
            return Err(ErrorKind::NotImplemented(format!(
                "the predicate \"{name}\" was declared twice"
            )));
        }

        self.closed = true;
        self.decls.push(PredicateDecl {
            name: name.to_owned(),
            param_typings,
        });
        Ok(self.decls.len() - 1)
    }

    /// The index of a relation by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.decls
            .iter()
            .position(|decl| eq_no_case(&decl.name, name))
    }

    /// Resolve a relation use to its index.
    ///
    /// With a closed table the relation must be declared, at the given arity.
    /// Otherwise an unseen relation is interned at the given arity.
    pub fn resolve(&mut self, name: &str, arity: usize) -> Result<usize, ErrorKind> {
        match self.index_of(name) {
            Some(index) => match self.decls[index].arity() == arity {
                true => Ok(index),
                false => Err(err::ParseError::UnknownPredicate(name.to_owned()).into()),
            },

            None => match self.closed {
                true => Err(err::ParseError::UnknownPredicate(name.to_owned()).into()),
                false => {
                    self.decls.push(PredicateDecl {
                        name: name.to_owned(),
                        param_typings: vec![None; arity],
                    });
                    Ok(self.decls.len() - 1)
                }
            },
        }
    }

    /// The declaration at an index.
    pub fn decl(&self, index: usize) -> Result<&PredicateDecl, ErrorKind> {
        self.decls.get(index).ok_or(ErrorKind::IndexOutOfBounds)
    }

    /// The declarations, in index order.
    pub fn decls(&self) -> &[PredicateDecl] {
        &self.decls
    }

    /// Whether the table was closed by a `:predicates` block.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// An atom: a relation applied to terms.
#[derive(Clone, Debug, Eq)]
pub struct Predicate {
    /// The index of the relation in the table of the domain.
    pub relation: usize,

    /// The relation name, carried for rendering.
    pub name: String,

    /// The parameters, one per relation parameter.
    pub terms: Vec<Term>,
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.relation == other.relation && self.terms == other.terms
    }
}

impl Predicate {
    /// The number of parameters.
    pub fn valence(&self) -> usize {
        self.terms.len()
    }

    /// Whether every parameter is a constant.
    pub fn is_ground(&self) -> bool {
        self.terms
            .iter()
            .all(|term| matches!(term, Term::Constant(_)))
    }

    /// The atom after applying a substitution to each parameter.
    pub fn after_substitution(
        &self,
        sub: &Substitution,
        depth: u32,
    ) -> Result<Predicate, ErrorKind> {
        let mut terms = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            terms.push(sub.apply_to_term(term, depth)?);
        }
        Ok(Predicate {
            relation: self.relation,
            name: self.name.clone(),
            terms,
        })
    }
}

/// An equality between two terms.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Equality {
    pub left: Term,
    pub right: Term,
}

impl Equality {
    /// Whether both sides are constants.
    pub fn is_ground(&self) -> bool {
        matches!(self.left, Term::Constant(_)) && matches!(self.right, Term::Constant(_))
    }

    /// The equality after applying a substitution to both sides.
    pub fn after_substitution(&self, sub: &Substitution, depth: u32) -> Result<Equality, ErrorKind> {
        Ok(Equality {
            left: sub.apply_to_term(&self.left, depth)?,
            right: sub.apply_to_term(&self.right, depth)?,
        })
    }
}

/// A literal: one of the four canonical non-conjunctive shapes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Literal {
    /// An atom.
    Pred(Predicate),

    /// An equality.
    Equ(Equality),

    /// A negated atom.
    NegPred(Predicate),

    /// A negated equality.
    NegEqu(Equality),
}

impl Literal {
    /// Whether the literal contains no variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Self::Pred(p) | Self::NegPred(p) => p.is_ground(),
            Self::Equ(e) | Self::NegEqu(e) => e.is_ground(),
        }
    }

    /// The literal after applying a substitution throughout.
    pub fn after_substitution(&self, sub: &Substitution, depth: u32) -> Result<Literal, ErrorKind> {
        let literal = match self {
            Self::Pred(p) => Self::Pred(p.after_substitution(sub, depth)?),
            Self::Equ(e) => Self::Equ(e.after_substitution(sub, depth)?),
            Self::NegPred(p) => Self::NegPred(p.after_substitution(sub, depth)?),
            Self::NegEqu(e) => Self::NegEqu(e.after_substitution(sub, depth)?),
        };
        Ok(literal)
    }

    fn terms(&self) -> Box<dyn Iterator<Item = &Term> + '_> {
        match self {
            Self::Pred(p) | Self::NegPred(p) => Box::new(p.terms.iter()),
            Self::Equ(e) | Self::NegEqu(e) => {
                Box::new(std::iter::once(&e.left).chain(std::iter::once(&e.right)))
            }
        }
    }

    /// Collect the variables of the literal into `out`, skipping duplicates.
    pub fn collect_variables(&self, out: &mut Vec<Variable>) {
        for term in self.terms() {
            if let Term::Variable(v) = term {
                if !out.contains(v) {
                    out.push(v.clone());
                }
            }
        }
    }

    /// Collect the constants of the literal into `out`, skipping duplicates.
    pub fn collect_constants(&self, out: &mut Vec<Constant>) {
        for term in self.terms() {
            if let Term::Constant(c) = term {
                if !out.contains(c) {
                    out.push(c.clone());
                }
            }
        }
    }

    /// The variables of the literal, in discovery order.
    pub fn variables(&self) -> Vec<Variable> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    /// The constants of the literal, in discovery order.
    pub fn constants(&self) -> Vec<Constant> {
        let mut out = Vec::new();
        self.collect_constants(&mut out);
        out
    }
}

/// A formula in canonical form: a literal, or a flat conjunction of literals.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Formula {
    /// A single literal.
    Literal(Literal),

    /// A flat conjunction.
    Conj(Vec<Literal>),
}

impl Formula {
    /// The conjuncts of the formula, a singleton literal counting as a
    /// one-element conjunction.
    pub fn conjuncts(&self) -> &[Literal] {
        match self {
            Self::Literal(literal) => std::slice::from_ref(literal),
            Self::Conj(literals) => literals,
        }
    }

    /// Whether the formula contains no variables.
    pub fn is_ground(&self) -> bool {
        self.conjuncts().iter().all(Literal::is_ground)
    }

    /// The formula after applying a substitution throughout.
    ///
    /// The canonical shape is preserved by construction.
    pub fn after_substitution(&self, sub: &Substitution, depth: u32) -> Result<Formula, ErrorKind> {
        match self {
            Self::Literal(literal) => Ok(Self::Literal(literal.after_substitution(sub, depth)?)),

            Self::Conj(literals) => {
                let mut out = Vec::with_capacity(literals.len());
                for literal in literals {
                    out.push(literal.after_substitution(sub, depth)?);
                }
                Ok(Self::Conj(out))
            }
        }
    }

    /// The variables of the formula, in discovery order.
    pub fn variables(&self) -> Vec<Variable> {
        let mut out = Vec::new();
        for literal in self.conjuncts() {
            literal.collect_variables(&mut out);
        }
        out
    }

    /// The constants of the formula, in discovery order.
    pub fn constants(&self) -> Vec<Constant> {
        let mut out = Vec::new();
        for literal in self.conjuncts() {
            literal.collect_constants(&mut out);
        }
        out
    }

    /// Whether this formula implies another.
    ///
    /// As both formulas are in canonical form, this holds iff every conjunct
    /// of the other is a conjunct of this.
    pub fn implies(&self, other: &Formula) -> bool {
        let ours = self.conjuncts();
        other
            .conjuncts()
            .iter()
            .all(|conjunct| ours.contains(conjunct))
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "( {}", self.name)?;
        for term in &self.terms {
            write!(f, " {term}")?;
        }
        write!(f, " )")
    }
}

impl std::fmt::Display for Equality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "( = {} {} )", self.left, self.right)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pred(p) => write!(f, "{p}"),
            Self::Equ(e) => write!(f, "{e}"),
            Self::NegPred(p) => write!(f, "( not {p} )"),
            Self::NegEqu(e) => write!(f, "( not {e} )"),
        }
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal}"),

            Self::Conj(literals) => {
                write!(f, "( and")?;
                for literal in literals {
                    write!(f, " {literal}")?;
                }
                write!(f, " )")
            }
        }
    }
}

#[cfg(test)]
mod formula_tests {
    use super::*;

    fn atom(relation: usize, name: &str, terms: Vec<Term>) -> Literal {
        Literal::Pred(Predicate {
            relation,
            name: name.to_owned(),
            terms,
        })
    }

    fn constant(name: &str) -> Term {
        Term::Constant(Constant::new(name, None))
    }

    fn variable(name: &str) -> Term {
        Term::Variable(Variable::new(name, None))
    }

    #[test]
    fn groundness() {
        let ground = atom(0, "at", vec![constant("a")]);
        let open = atom(0, "at", vec![variable("?x")]);

        assert!(Formula::Literal(ground.clone()).is_ground());
        assert!(!Formula::Conj(vec![ground, open]).is_ground());
    }

    #[test]
    fn substitution_grounds() {
        let open = atom(0, "at", vec![variable("?x")]);

        let mut sub = Substitution::new();
        sub.add_pair(Variable::new("?x", None), constant("a"))
            .unwrap();

        let closed = open.after_substitution(&sub, 0).unwrap();
        assert_eq!(closed, atom(0, "at", vec![constant("a")]));
    }

    #[test]
    fn implication_is_conjunct_containment() {
        let p = atom(0, "p", vec![constant("a")]);
        let q = atom(1, "q", vec![constant("a")]);

        let both = Formula::Conj(vec![p.clone(), q.clone()]);
        let just_p = Formula::Literal(p);
        let just_q = Formula::Literal(q);

        assert!(both.implies(&just_p));
        assert!(both.implies(&just_q));
        assert!(both.implies(&both));
        assert!(!just_p.implies(&just_q));
        assert!(!just_p.implies(&both));
    }

    #[test]
    fn closed_table_rejects_unknowns() {
        let mut table = RelationTable::default();
        let on = table.declare("on", vec![None, None]).unwrap();

        assert_eq!(table.resolve("ON", 2).unwrap(), on);
        assert!(table.resolve("on", 3).is_err());
        assert!(table.resolve("clear", 1).is_err());
    }

    #[test]
    fn open_table_interns() {
        let mut table = RelationTable::default();
        let at = table.resolve("at", 1).unwrap();
        assert_eq!(table.resolve("At", 1).unwrap(), at);
        assert_eq!(table.resolve("on", 2).unwrap(), at + 1);
    }
}
