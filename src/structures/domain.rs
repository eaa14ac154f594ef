/*!
A classical (STRIPS) planning domain.

A domain is constructed once, by the [builder](crate::builder), and immutable
thereafter: a name, the PDDL requirements in force, the declared types and
constants, the table of relations, and the operators.
*/

use crate::{
    misc::text::eq_no_case,
    structures::{formula::RelationTable, operator::Operator, term::TypeTable},
    types::err::ErrorKind,
};

/// A bitflag set of PDDL requirements.
pub type Requirements = u8;

/// The PDDL requirements this planner recognises.
pub mod requirements {
    use super::Requirements;

    /// Basic STRIPS: positive preconditions, add and delete effects.
    pub const STRIPS: Requirements = 1;

    /// Typed terms.
    pub const TYPING: Requirements = 1 << 1;

    /// Equality in preconditions and goals.
    pub const EQUALITY: Requirements = 1 << 2;

    /// Negated preconditions.
    pub const NEGATIVE_PRECONDITIONS: Requirements = 1 << 3;

    /// Render a requirement set as a PDDL block.
    pub fn to_pddl(requirements: Requirements) -> String {
        let mut out = String::from("( :requirements");
        if requirements & STRIPS != 0 {
            out.push_str(" :strips");
        }
        if requirements & TYPING != 0 {
            out.push_str(" :typing");
        }
        if requirements & EQUALITY != 0 {
            out.push_str(" :equality");
        }
        if requirements & NEGATIVE_PRECONDITIONS != 0 {
            out.push_str(" :negative-preconditions");
        }
        out.push_str(" )");
        out
    }
}

/// A planning domain.
#[derive(Debug)]
pub struct Domain {
    /// The name of the domain.
    pub name: String,

    /// The requirements in force.
    pub requirements: Requirements,

    /// The declared types, in declaration order, when `:typing` is in force.
    pub types: Vec<String>,

    /// The declared constants with their types.
    ///
    /// If empty, any constant may be used.
    pub constant_types: TypeTable,

    /// The relations usable in the domain.
    pub relations: RelationTable,

    /// The operators of the domain, in declaration order.
    pub operators: Vec<Operator>,
}

impl Domain {
    /// Whether the domain is typed.
    pub fn has_typing(&self) -> bool {
        self.requirements & requirements::TYPING != 0
    }

    /// The number of operators.
    pub fn num_opers(&self) -> usize {
        self.operators.len()
    }

    /// The operator at an index.
    pub fn oper(&self, index: usize) -> Result<&Operator, ErrorKind> {
        self.operators.get(index).ok_or(ErrorKind::IndexOutOfBounds)
    }

    /// The index of an operator by name.
    pub fn oper_index_by_name(&self, name: &str) -> Result<usize, ErrorKind> {
        self.operators
            .iter()
            .position(|oper| eq_no_case(&oper.name, name))
            .ok_or(ErrorKind::IndexOutOfBounds)
    }

    /// Render the domain as PDDL text.
    pub fn to_pddl(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("( define ( domain {} )\n", self.name));
        out.push_str(&format!("  {}\n", requirements::to_pddl(self.requirements)));

        if self.has_typing() {
            out.push_str("  ( :types");
            for typing in &self.types {
                out.push_str(&format!(" {typing}"));
            }
            out.push_str(" )\n");
        }

        if !self.constant_types.is_empty() {
            out.push_str("  ( :constants\n");
            for (name, typing) in self.constant_types.iter() {
                match self.has_typing() {
                    true => out.push_str(&format!("    {name} - {typing}\n")),
                    false => out.push_str(&format!("    {name}\n")),
                }
            }
            out.push_str("  )\n");
        }

        if self.relations.is_closed() {
            out.push_str("  ( :predicates\n");
            for decl in self.relations.decls() {
                out.push_str(&format!("    ( {}", decl.name));
                for (position, typing) in decl.param_typings.iter().enumerate() {
                    out.push_str(&format!(" ?p{position}"));
                    if let Some(typing) = typing {
                        out.push_str(&format!(" - {typing}"));
                    }
                }
                out.push_str(" )\n");
            }
            out.push_str("  )\n");
        }

        for oper in &self.operators {
            out.push_str(&oper.to_pddl(self.has_typing()));
            out.push('\n');
        }

        out.push_str(")\n");
        out
    }
}
