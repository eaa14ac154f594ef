/*!
Parsing a PDDL problem.

```text
( define ( problem NAME )
  ( :domain NAME )
  ( :requirements … )
  ( :objects … )
  ( :init … )
  ( :goal … ) )
```

Blocks must appear in the order above and at most once each; `:init` and
`:goal` are mandatory.
The `:domain` name must match the loaded domain.
When the domain declares constants, every object must be one of them, at its
declared type.
`:init` is an implicit conjunction of ground atoms; `:goal` is a single
formula.
*/

use std::rc::Rc;

use crate::{
    builder::{
        domain::parse_requirements_block,
        formula::{parse_formula, parse_predicate},
        Scanner,
    },
    misc::text::eq_no_case,
    state::State,
    structures::{domain::Domain, problem::Problem, term::TypeTable},
    types::err::ErrorKind,
};

/// Read a `name` or `name - type` declaration, as the domain parser does.
fn read_typed_name(scan: &mut Scanner, typed: bool) -> Result<(String, String), ErrorKind> {
    let name = scan.read_token()?.to_owned();
    scan.eat_whitespace();

    let typing = match typed {
        false => String::new(),
        true => {
            scan.expect("-")?;
            scan.eat_whitespace();
            let typing = scan.read_token()?.to_owned();
            scan.eat_whitespace();
            typing
        }
    };

    Ok((name, typing))
}

/// Parse a problem from its PDDL text, against a loaded domain.
pub fn parse_problem(text: &str, domain: Rc<Domain>) -> Result<Problem, ErrorKind> {
    log::trace!(target: crate::misc::log::targets::PARSE, "Parsing a problem of {} bytes", text.len());

    let mut scan = Scanner::new(text);

    scan.eat_whitespace();
    scan.expect("(")?;
    scan.eat_whitespace();
    scan.expect("define")?;
    scan.eat_whitespace();
    scan.expect("(")?;
    scan.eat_whitespace();
    scan.expect("problem")?;
    scan.eat_whitespace();
    let name = scan.read_token()?.to_owned();
    scan.eat_whitespace();
    scan.expect(")")?;

    scan.eat_whitespace();
    scan.expect("(")?;
    scan.eat_whitespace();
    scan.expect(":domain")?;
    scan.eat_whitespace();
    let domain_name = scan.read_token()?.to_owned();
    if !eq_no_case(&domain_name, &domain.name) {
        return Err(ErrorKind::DomainMismatch {
            expected: domain.name.clone(),
            found: domain_name,
        });
    }
    scan.eat_whitespace();
    scan.expect(")")?;
    scan.eat_whitespace();

    let mut requirements = domain.requirements;
    let mut object_types = TypeTable::default();
    let mut relations = domain.relations.clone();
    let mut init: Option<State> = None;
    let mut goal = None;

    let mut seen_requirements = false;
    let mut seen_objects = false;

    while scan.peek() == Some('(') {
        let (block, base) = scan.read_parenthetical()?;
        scan.eat_whitespace();

        let mut inner = Scanner::with_base(block, base);
        inner.expect("(")?;
        inner.eat_whitespace();
        let block_head = inner.read_token()?.to_owned();
        inner.eat_whitespace();

        if eq_no_case(&block_head, ":requirements") {
            if seen_requirements {
                return Err(ErrorKind::NotImplemented(
                    "a PDDL problem may not have multiple requirements blocks".to_owned(),
                ));
            }
            for (block_name, seen) in [
                (":objects", seen_objects),
                (":init", init.is_some()),
                (":goal", goal.is_some()),
            ] {
                if seen {
                    return Err(ErrorKind::NotImplemented(format!(
                        "the PDDL requirements block must come before the {block_name} block"
                    )));
                }
            }
            seen_requirements = true;
            requirements = parse_requirements_block(&mut inner)?;
        } else if eq_no_case(&block_head, ":objects") {
            if seen_objects {
                return Err(ErrorKind::NotImplemented(
                    "a PDDL problem may not have multiple objects blocks".to_owned(),
                ));
            }
            for (block_name, seen) in [(":init", init.is_some()), (":goal", goal.is_some())] {
                if seen {
                    return Err(ErrorKind::NotImplemented(format!(
                        "the PDDL objects block must come before the {block_name} block"
                    )));
                }
            }
            seen_objects = true;

            loop {
                inner.eat_whitespace();
                match inner.peek() {
                    Some(')') | None => break,
                    Some(_) => {
                        let (object, typing) =
                            read_typed_name(&mut inner, domain.has_typing())?;

                        if !domain.constant_types.is_empty() {
                            match domain.constant_types.get(&object) {
                                None => {
                                    return Err(ErrorKind::NotImplemented(format!(
                                        "object {object} is not a declared constant in the domain"
                                    )));
                                }
                                Some(declared) => {
                                    if !eq_no_case(declared, &typing) {
                                        return Err(ErrorKind::NotImplemented(format!(
                                            "object {object} is not of the same type as constant {object} in the domain"
                                        )));
                                    }
                                }
                            }
                        }

                        if !object_types.insert(object.as_str(), typing) {
                            return Err(ErrorKind::NotImplemented(format!(
                                "object {object} has been declared twice"
                            )));
                        }
                    }
                }
            }
        } else if eq_no_case(&block_head, ":init") {
            if init.is_some() {
                return Err(ErrorKind::NotImplemented(
                    "a PDDL problem may not have multiple init blocks".to_owned(),
                ));
            }
            if goal.is_some() {
                return Err(ErrorKind::NotImplemented(
                    "the PDDL init block must come before the goal block".to_owned(),
                ));
            }

            let term_types = match object_types.is_empty() {
                false => &object_types,
                true => &domain.constant_types,
            };

            let mut atoms = Vec::new();
            loop {
                inner.eat_whitespace();
                match inner.peek() {
                    Some('(') => {
                        atoms.push(parse_predicate(&mut inner, term_types, &mut relations)?)
                    }
                    _ => break,
                }
            }

            init = Some(State::from_atoms(atoms)?);
        } else if eq_no_case(&block_head, ":goal") {
            if goal.is_some() {
                return Err(ErrorKind::NotImplemented(
                    "a PDDL problem may not have multiple goal blocks".to_owned(),
                ));
            }

            let term_types = match object_types.is_empty() {
                false => &object_types,
                true => &domain.constant_types,
            };

            goal = Some(parse_formula(&mut inner, term_types, &mut relations)?);
        } else if eq_no_case(&block_head, ":constraints") {
            return Err(ErrorKind::NotImplemented(
                "the constraints feature of PDDL is not supported".to_owned(),
            ));
        } else if eq_no_case(&block_head, ":metric") {
            return Err(ErrorKind::NotImplemented(
                "the metric feature of PDDL is not supported".to_owned(),
            ));
        } else {
            return Err(ErrorKind::NotImplemented(format!(
                "unknown PDDL feature {block_head}"
            )));
        }
    }

    scan.expect(")")?;

    let init = match init {
        Some(init) => init,
        None => {
            return Err(ErrorKind::NotImplemented(
                "a problem file must contain an initial state block".to_owned(),
            ));
        }
    };

    let goal = match goal {
        Some(goal) => goal,
        None => {
            return Err(ErrorKind::NotImplemented(
                "a problem file must contain a goal block".to_owned(),
            ));
        }
    };

    Ok(Problem {
        name,
        domain,
        requirements,
        object_types,
        relations,
        init,
        goal,
    })
}
