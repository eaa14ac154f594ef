/*!
Reading the PDDL subset.

Input is s-expression text, read by a small scanner with the handful of
operations the grammar needs: skip whitespace, insist on a token, read a
token, read a balanced parenthetical.
Block parsers for [domains](domain), [problems](problem), and
[plans](plan) sit on top, with the [formula] parser shared between them.

Parse errors carry the byte offset at which the parser gave up; the CLI
attaches the file name at its catch site.

The supported grammar, and the order and uniqueness restrictions on blocks,
are documented on [parse_domain] and [parse_problem].
*/

mod scan;
pub(crate) use scan::Scanner;

pub mod formula;

pub mod domain;
pub use domain::parse_domain;

pub mod problem;
pub use problem::parse_problem;

pub mod plan;
pub use plan::parse_plan_steps;

use crate::types::err::{self, ErrorKind};

/// Read a file to a string, mapping failure to a
/// [file error](crate::types::err::FileError).
pub fn read_file(path: &str) -> Result<String, ErrorKind> {
    std::fs::read_to_string(path).map_err(|_| err::FileError::Unreadable(path.to_owned()).into())
}
