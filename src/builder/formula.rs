/*!
Parsing formulas in canonical form.

A formula is a conjunction `( and LITERAL… )` or a single literal.
A literal is an atom `( relation term… )`, an equality `( = term term )`, or
a negation `( not LITERAL )` whose body must itself be an atom or an
equality.

The canonical-form restrictions are enforced here, as the
[representation](crate::structures::formula) cannot hold anything else:
nested conjunctions are rejected as unsupported, and negations of anything
but an atom or equality with
[NegNotPred](crate::types::err::ParseError::NegNotPred).
*/

use crate::{
    builder::Scanner,
    misc::text::eq_no_case,
    structures::{
        formula::{Equality, Formula, Literal, Predicate, RelationTable},
        term::TypeTable,
    },
    types::err::{self, ErrorKind},
};

/// Read the leading keyword of a parenthetical without consuming anything.
fn head_of(parenthetical: &str) -> &str {
    parenthetical[1..]
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '(' || c == ')')
        .next()
        .unwrap_or("")
}

/// Parse an atom `( relation term… )`.
pub(crate) fn parse_predicate(
    scan: &mut Scanner,
    types: &TypeTable,
    relations: &mut RelationTable,
) -> Result<Predicate, ErrorKind> {
    scan.eat_whitespace();
    scan.expect("(")?;
    scan.eat_whitespace();

    let name = scan.read_token()?.to_owned();

    let mut terms = Vec::new();
    loop {
        scan.eat_whitespace();
        match scan.peek() {
            Some(')') => break,
            Some(_) => terms.push(types.read_term(scan.read_token()?)?),
            None => return scan_failure(scan, "a term or \")\""),
        }
    }
    scan.expect(")")?;

    let relation = relations.resolve(&name, terms.len())?;

    Ok(Predicate {
        relation,
        name,
        terms,
    })
}

fn scan_failure<T>(scan: &Scanner, expected: &str) -> Result<T, ErrorKind> {
    Err(err::ParseError::Expected {
        expected: expected.to_owned(),
        offset: scan.offset(),
        file: None,
    }
    .into())
}

/// Parse an equality `( = term term )`.
fn parse_equality(scan: &mut Scanner, types: &TypeTable) -> Result<Equality, ErrorKind> {
    scan.eat_whitespace();
    scan.expect("(")?;
    scan.eat_whitespace();
    scan.expect("=")?;

    scan.eat_whitespace();
    let left = types.read_term(scan.read_token()?)?;
    scan.eat_whitespace();
    let right = types.read_term(scan.read_token()?)?;

    scan.eat_whitespace();
    scan.expect(")")?;

    Ok(Equality { left, right })
}

/// Parse a literal.
pub(crate) fn parse_literal(
    scan: &mut Scanner,
    types: &TypeTable,
    relations: &mut RelationTable,
) -> Result<Literal, ErrorKind> {
    scan.eat_whitespace();

    let (parenthetical, base) = scan.read_parenthetical()?;
    let mut inner = Scanner::with_base(parenthetical, base);

    match head_of(parenthetical) {
        "=" => Ok(Literal::Equ(parse_equality(&mut inner, types)?)),

        head if eq_no_case(head, "and") => Err(ErrorKind::NotImplemented(
            "a conjunction may not contain a conjunction".to_owned(),
        )),

        head if eq_no_case(head, "not") => {
            inner.expect("(")?;
            inner.eat_whitespace();
            inner.expect("not")?;
            inner.eat_whitespace();

            let (body, body_base) = inner.read_parenthetical()?;
            let mut body_scan = Scanner::with_base(body, body_base);

            let negated = match head_of(body) {
                "=" => Literal::NegEqu(parse_equality(&mut body_scan, types)?),

                head if eq_no_case(head, "and") || eq_no_case(head, "not") => {
                    return Err(err::ParseError::NegNotPred(body_base).into());
                }

                _ => Literal::NegPred(parse_predicate(&mut body_scan, types, relations)?),
            };

            inner.eat_whitespace();
            inner.expect(")")?;

            Ok(negated)
        }

        _ => Ok(Literal::Pred(parse_predicate(&mut inner, types, relations)?)),
    }
}

/// Parse a formula: a conjunction of literals, or a single literal.
pub(crate) fn parse_formula(
    scan: &mut Scanner,
    types: &TypeTable,
    relations: &mut RelationTable,
) -> Result<Formula, ErrorKind> {
    scan.eat_whitespace();

    let (parenthetical, base) = scan.read_parenthetical()?;

    match eq_no_case(head_of(parenthetical), "and") {
        false => {
            let mut literal_scan = Scanner::with_base(parenthetical, base);
            Ok(Formula::Literal(parse_literal(
                &mut literal_scan,
                types,
                relations,
            )?))
        }

        true => {
            let mut inner = Scanner::with_base(parenthetical, base);
            inner.expect("(")?;
            inner.eat_whitespace();
            inner.expect("and")?;

            let mut literals = Vec::new();
            loop {
                inner.eat_whitespace();
                match inner.peek() {
                    Some(')') => break,
                    Some('(') => literals.push(parse_literal(&mut inner, types, relations)?),
                    _ => return scan_failure(&inner, "a literal or \")\""),
                }
            }
            inner.expect(")")?;

            Ok(Formula::Conj(literals))
        }
    }
}
