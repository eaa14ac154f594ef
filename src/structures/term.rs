/*!
Terms --- variables and constants, optionally typed.

A term is the parameter of an atom, an equality, or an operator head.
Variables are distinguished lexically, by a leading `?`, and carry a *depth*
used for α-renaming during substitution composition: two variables are equal
iff their names and depths agree.
Constants are equal iff their names agree.
All name comparison is without regard to ASCII case.

Typing is all or nothing: within one domain either every term carries a type,
or none does.
Operations which meet a typed and an untyped term together report
[NotImplemented](crate::types::err::ErrorKind::NotImplemented) rather than
guessing.
*/

use crate::{
    misc::text::eq_no_case,
    types::err::{self, ErrorKind},
};

/// The type annotation of a term, when the domain is typed.
pub type Typing = Option<String>;

/// A variable, named with a leading `?`.
#[derive(Clone, Debug, Eq)]
pub struct Variable {
    /// The name of the variable, including the leading `?`.
    pub name: String,

    /// The α-renaming depth, zero for any parsed variable.
    pub depth: u32,

    /// The type of the variable, if the domain is typed.
    pub typing: Typing,
}

/// A constant.
#[derive(Clone, Debug, Eq)]
pub struct Constant {
    /// The name of the constant.
    pub name: String,

    /// The type of the constant, if the domain is typed.
    pub typing: Typing,
}

/// A term: a variable or a constant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Term {
    /// A variable term.
    Variable(Variable),

    /// A constant term.
    Constant(Constant),
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth && eq_no_case(&self.name, &other.name)
    }
}

impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        eq_no_case(&self.name, &other.name)
    }
}

impl Variable {
    pub fn new(name: impl Into<String>, typing: Typing) -> Self {
        Variable {
            name: name.into(),
            depth: 0,
            typing,
        }
    }
}

impl Constant {
    pub fn new(name: impl Into<String>, typing: Typing) -> Self {
        Constant {
            name: name.into(),
            typing,
        }
    }
}

impl Term {
    /// The name of the term.
    pub fn name(&self) -> &str {
        match self {
            Self::Variable(v) => &v.name,
            Self::Constant(c) => &c.name,
        }
    }

    /// The typing of the term, if any.
    pub fn typing(&self) -> &Typing {
        match self {
            Self::Variable(v) => &v.typing,
            Self::Constant(c) => &c.typing,
        }
    }

    /// Whether the term carries a typing.
    pub fn has_typing(&self) -> bool {
        self.typing().is_some()
    }

    /// The term as a variable, if it is one.
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(v) => Some(v),
            Self::Constant(_) => None,
        }
    }

    /// The term as a constant, if it is one.
    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Self::Constant(c) => Some(c),
            Self::Variable(_) => None,
        }
    }
}

/// Whether two typings are compatible for unification.
///
/// Meeting a typed and an untyped term is an error, as a domain is typed
/// throughout or not at all.
pub fn unifiable_typings(a: &Typing, b: &Typing) -> Result<bool, ErrorKind> {
    match (a, b) {
        (None, None) => Ok(true),
        (Some(a), Some(b)) => Ok(eq_no_case(a, b)),
        _ => Err(ErrorKind::NotImplemented(
            "either all terms must be typed, or none".to_owned(),
        )),
    }
}

/// Whether two typings agree, with absence counting as disagreement with
/// presence.
///
/// Used where the original planner treats a typing mismatch as
/// unsatisfiability rather than an error, viz. equality formulas.
pub fn matching_typings(a: &Typing, b: &Typing) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => eq_no_case(a, b),
        _ => false,
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A table associating term names with their types.
///
/// Filled by `:constants`, `:objects`, and `:parameters` declarations, and
/// consulted whenever a term is read.
/// If the table is empty any term may be used, untyped.
/// Otherwise only the listed terms may be used, each with its associated
/// type.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    entries: Vec<(String, String)>,
}

impl TypeTable {
    /// Look up the type of a name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| eq_no_case(entry, name))
            .map(|(_, typing)| typing.as_str())
    }

    /// Whether the table contains a name.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Add a name with its type.
    ///
    /// Returns false, without updating the table, if the name is present.
    pub fn insert(&mut self, name: impl Into<String>, typing: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.entries.push((name, typing.into()));
        true
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The entries of the table, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t.as_str()))
    }

    /// Read a term against the table.
    ///
    /// With a non-empty table only listed names may be used, and the term
    /// receives its listed type.
    /// With an empty table any name may be used, untyped.
    pub fn read_term(&self, name: &str) -> Result<Term, ErrorKind> {
        let typing = match self.is_empty() {
            true => None,
            false => match self.get(name) {
                // Entries without a type arise in untyped domains which
                // still declare their constants.
                Some("") => None,
                Some(typing) => Some(typing.to_owned()),
                None => return Err(err::ParseError::UntypedTerm(name.to_owned()).into()),
            },
        };

        match name.starts_with('?') {
            true => Ok(Term::Variable(Variable::new(name, typing))),
            false => Ok(Term::Constant(Constant::new(name, typing))),
        }
    }
}
