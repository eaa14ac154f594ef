/*!
A classical (STRIPS) planning problem: objects, an initial state, and a goal,
against a [domain](crate::structures::domain).

Constructed once by the [builder](crate::builder) and immutable thereafter.
The problem owns its domain behind an [Rc], as plans and search contexts
share both.
*/

use std::rc::Rc;

use crate::{
    state::State,
    structures::{
        domain::{requirements, Domain, Requirements},
        formula::{Formula, RelationTable},
        term::TypeTable,
    },
};

/// A planning problem.
#[derive(Debug)]
pub struct Problem {
    /// The name of the problem.
    pub name: String,

    /// The domain the problem is posed against.
    pub domain: Rc<Domain>,

    /// The requirements in force.
    pub requirements: Requirements,

    /// The declared objects with their types.
    ///
    /// If empty, the constants of the domain serve as the objects.
    pub object_types: TypeTable,

    /// The relation table of the problem.
    ///
    /// An extension of the domain's table: identical when the domain closed
    /// its table with a `:predicates` block, possibly longer otherwise.
    pub relations: RelationTable,

    /// The initial state.
    pub init: State,

    /// The goal formula.
    pub goal: Formula,
}

impl Problem {
    /// The objects of the problem with their types: the declared objects, or
    /// the constants of the domain if none were declared.
    pub fn object_types(&self) -> &TypeTable {
        match self.object_types.is_empty() {
            false => &self.object_types,
            true => &self.domain.constant_types,
        }
    }

    /// Render the problem as PDDL text.
    pub fn to_pddl(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("( define ( problem {} )\n", self.name));
        out.push_str(&format!("  ( :domain {} )\n", self.domain.name));
        out.push_str(&format!("  {}\n", requirements::to_pddl(self.requirements)));

        if !self.object_types.is_empty() {
            out.push_str("  ( :objects\n");
            for (name, typing) in self.object_types.iter() {
                match self.domain.has_typing() {
                    true => out.push_str(&format!("    {name} - {typing}\n")),
                    false => out.push_str(&format!("    {name}\n")),
                }
            }
            out.push_str("  )\n");
        }

        out.push_str(&self.init.to_pddl());

        out.push_str("  ( :goal\n");
        out.push_str(&format!("    {}\n", self.goal));
        out.push_str("  )\n)\n");

        out
    }
}
