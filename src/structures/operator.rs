/*!
Operator schemas --- parameterised actions with preconditions and effects.

An operator's head is its name applied to its parameters.
Preconditions are a conjunction of [literals](crate::structures::formula::Literal).
Effects are restricted to adding and deleting atoms, and the representation
([EffectAtom]) makes anything else --- equalities in particular ---
unrepresentable.
*/

use crate::{
    structures::{
        formula::{Literal, Predicate},
        term::Variable,
    },
    types::err::ErrorKind,
};

/// One conjunct of an effect: an atom to add, or an atom to delete.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EffectAtom {
    /// The atom holds in the successor state.
    Add(Predicate),

    /// The atom does not hold in the successor state, unless also added.
    Delete(Predicate),
}

impl EffectAtom {
    /// The atom added or deleted.
    pub fn predicate(&self) -> &Predicate {
        match self {
            Self::Add(p) | Self::Delete(p) => p,
        }
    }
}

/// An action schema.
#[derive(Clone, Debug)]
pub struct Operator {
    /// The name of the operator.
    pub name: String,

    /// The parameters of the head, in declaration order.
    pub parameters: Vec<Variable>,

    /// The preconditions, a flat conjunction.
    pub preconditions: Vec<Literal>,

    /// The effects.
    pub effects: Vec<EffectAtom>,
}

impl Operator {
    /// Assemble an operator, checking that every variable of the effects
    /// appears in the head or the preconditions.
    pub fn new(
        name: String,
        parameters: Vec<Variable>,
        preconditions: Vec<Literal>,
        effects: Vec<EffectAtom>,
    ) -> Result<Self, ErrorKind> {
        let mut known = parameters.clone();
        for literal in &preconditions {
            literal.collect_variables(&mut known);
        }

        for effect in &effects {
            for variable in Literal::Pred(effect.predicate().clone()).variables() {
                if !known.contains(&variable) {
                    return Err(ErrorKind::NotImplemented(format!(
                        "the effect variable {} of \"{name}\" appears in neither head nor preconditions",
                        variable.name,
                    )));
                }
            }
        }

        Ok(Operator {
            name,
            parameters,
            preconditions,
            effects,
        })
    }

    /// The number of parameters of the head.
    pub fn num_params(&self) -> usize {
        self.parameters.len()
    }

    /// A parameter of the head.
    pub fn param(&self, index: usize) -> Result<&Variable, ErrorKind> {
        self.parameters.get(index).ok_or(ErrorKind::IndexOutOfBounds)
    }

    /// Render the operator as a PDDL action block.
    pub fn to_pddl(&self, typed: bool) -> String {
        let mut out = String::new();

        out.push_str(&format!("  ( :action {}\n", self.name));

        out.push_str("    :parameters (");
        for parameter in &self.parameters {
            out.push(' ');
            out.push_str(&parameter.name);
            if typed {
                if let Some(typing) = &parameter.typing {
                    out.push_str(&format!(" - {typing}"));
                }
            }
        }
        out.push_str(" )\n");

        out.push_str("    :precondition ( and");
        for literal in &self.preconditions {
            out.push_str(&format!(" {literal}"));
        }
        out.push_str(" )\n");

        out.push_str("    :effect ( and");
        for effect in &self.effects {
            match effect {
                EffectAtom::Add(p) => out.push_str(&format!(" {p}")),
                EffectAtom::Delete(p) => out.push_str(&format!(" ( not {p} )")),
            }
        }
        out.push_str(" )\n  )");

        out
    }
}

#[cfg(test)]
mod operator_tests {
    use super::*;
    use crate::structures::term::Term;

    #[test]
    fn unattached_effect_variables_are_rejected() {
        let x = Variable::new("?x", None);
        let y = Variable::new("?y", None);

        let add = EffectAtom::Add(Predicate {
            relation: 0,
            name: "at".to_owned(),
            terms: vec![Term::Variable(y)],
        });

        assert!(Operator::new("drift".to_owned(), vec![x], vec![], vec![add]).is_err());
    }
}
