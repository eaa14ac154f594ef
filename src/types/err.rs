/*!
Error types used in the library.

- Most of these are very unlikely to occur during use.
- Some are external --- e.g. a parse error is the expected result of handing
  the builder a file which is not PDDL.
- One is internally expected --- the verifier uses
  [OperNotApplicable](StateError::OperNotApplicable) to identify the failing
  step of a plan.

Each error displays as its code name followed by a message, which is the
one-line diagnostic printed by the CLI binaries.
*/

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error related to reading a file.
    File(FileError),

    /// An error related to parsing.
    Parse(ParseError),

    /// An error related to a substitution.
    Substitution(SubstitutionError),

    /// An error related to a state.
    State(StateError),

    /// A request for a feature outside the supported subset.
    NotImplemented(String),

    /// A structurally impossible formula shape at evaluation.
    ///
    /// The canonical form is enforced by the types, so observing this means a
    /// dispatch invariant was broken upstream.
    FormulaTypeUnknown,

    /// A programmer error on an accessor.
    IndexOutOfBounds,

    /// The problem references a domain other than the one passed in.
    DomainMismatch {
        /// The name of the loaded domain.
        expected: String,
        /// The name the problem asked for.
        found: String,
    },
}

/// An error related to reading a file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FileError {
    /// The file could not be read, with the offending path.
    Unreadable(String),
}

impl From<FileError> for ErrorKind {
    fn from(e: FileError) -> Self {
        ErrorKind::File(e)
    }
}

/// Errors during parsing.
///
/// Offsets are byte offsets into the input text.
/// The file name, if any, is attached at the catch site by
/// [in_file](ParseError::in_file).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An expected token was missing.
    Expected {
        /// What the parser was looking for.
        expected: String,
        /// Where it was looking.
        offset: usize,
        /// The file being read, once annotated.
        file: Option<String>,
    },

    /// A non-ground literal appeared inside an `:init` block.
    StateNotAtom(String),

    /// A negation was applied to something other than an atom or an equality.
    NegNotPred(usize),

    /// A predicate symbol outside the declared list, or with the wrong arity.
    UnknownPredicate(String),

    /// A term without a declared type in a typed domain.
    UntypedTerm(String),
}

impl ParseError {
    /// Attach a file name to the error, if the variant carries one.
    pub fn in_file(self, name: &str) -> Self {
        match self {
            Self::Expected {
                expected, offset, ..
            } => Self::Expected {
                expected,
                offset,
                file: Some(name.to_owned()),
            },
            _ => self,
        }
    }
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Noted violations of the substitution invariants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubstitutionError {
    /// An attempt to bind a variable which is already bound.
    Duplicate,

    /// A chain of bindings exceeded the composition depth bound.
    TooDeep,
}

impl From<SubstitutionError> for ErrorKind {
    fn from(e: SubstitutionError) -> Self {
        ErrorKind::Substitution(e)
    }
}

/// Errors from operations on a state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StateError {
    /// An operator was applied whose instance is not ground, or whose
    /// preconditions do not hold in the state.
    OperNotApplicable,
}

impl From<StateError> for ErrorKind {
    fn from(e: StateError) -> Self {
        ErrorKind::State(e)
    }
}

impl ErrorKind {
    /// The code name of the error, stable across messages.
    pub fn code(&self) -> &'static str {
        match self {
            Self::File(_) => "file_read",
            Self::Parse(ParseError::Expected { .. }) => "parse_expected",
            Self::Parse(ParseError::StateNotAtom(_)) => "state_not_atom",
            Self::Parse(ParseError::NegNotPred(_)) => "neg_not_pred",
            Self::Parse(ParseError::UnknownPredicate(_)) => "unknown_predicate",
            Self::Parse(ParseError::UntypedTerm(_)) => "untyped_term",
            Self::Substitution(SubstitutionError::Duplicate) => "subst_duplicate",
            Self::Substitution(SubstitutionError::TooDeep) => "subst_too_deep",
            Self::State(StateError::OperNotApplicable) => "oper_not_applicable",
            Self::NotImplemented(_) => "not_implemented",
            Self::FormulaTypeUnknown => "formula_type_unknown",
            Self::IndexOutOfBounds => "index_out_of_bounds",
            Self::DomainMismatch { .. } => "domain_mismatch",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.code())?;
        match self {
            Self::File(FileError::Unreadable(path)) => {
                write!(f, "unable to read \"{path}\"")
            }

            Self::Parse(ParseError::Expected {
                expected,
                offset,
                file,
            }) => {
                write!(f, "expected {expected} at offset {offset}")?;
                if let Some(file) = file {
                    write!(f, " of {file}")?;
                }
                Ok(())
            }

            Self::Parse(ParseError::StateNotAtom(s)) => {
                write!(f, "\"{s}\" is a member of a state, but not an atom")
            }

            Self::Parse(ParseError::NegNotPred(offset)) => {
                write!(
                    f,
                    "only atoms and equalities may be negated (offset {offset})"
                )
            }

            Self::Parse(ParseError::UnknownPredicate(name)) => {
                write!(f, "\"{name}\" is not a declared predicate of the domain")
            }

            Self::Parse(ParseError::UntypedTerm(name)) => {
                write!(f, "\"{name}\" has no declared type")
            }

            Self::Substitution(SubstitutionError::Duplicate) => {
                write!(f, "the variable is already bound")
            }

            Self::Substitution(SubstitutionError::TooDeep) => {
                write!(f, "a chain of bindings exceeded the composition bound")
            }

            Self::State(StateError::OperNotApplicable) => {
                write!(f, "the operator instance is not applicable to the state")
            }

            Self::NotImplemented(msg) => write!(f, "{msg}"),

            Self::FormulaTypeUnknown => write!(f, "unknown formula shape"),

            Self::IndexOutOfBounds => write!(f, "bounds error"),

            Self::DomainMismatch { expected, found } => {
                write!(f, "the problem is for \"{found}\", not \"{expected}\"")
            }
        }
    }
}
