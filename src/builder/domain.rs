/*!
Parsing a PDDL domain.

```text
( define ( domain NAME )
  ( :requirements … )
  ( :types … )
  ( :constants … )
  ( :predicates … )
  ( :action NAME :parameters ( … ) :precondition … :effect … )
  … )
```

Blocks must appear in the order above and at most once each (actions aside).
The recognised requirements are `:strips`, `:typing`, `:equality`, and
`:negative-preconditions`; `:typing` and a `:types` block come together or
not at all.
`:functions`, `:constraints`, and `:method` blocks are recognised and
rejected.
*/

use crate::{
    builder::{formula::parse_formula, Scanner},
    misc::text::eq_no_case,
    structures::{
        domain::{requirements, Domain, Requirements},
        formula::{Literal, RelationTable},
        operator::{EffectAtom, Operator},
        term::{TypeTable, Typing, Variable},
    },
    types::err::ErrorKind,
};

/// Parse the tokens of a `:requirements` block.
pub(crate) fn parse_requirements_block(scan: &mut Scanner) -> Result<Requirements, ErrorKind> {
    let mut flags = requirements::STRIPS;

    loop {
        scan.eat_whitespace();
        match scan.peek() {
            Some(')') | None => break,
            Some(_) => {
                let token = scan.read_token()?;

                if eq_no_case(token, ":strips") {
                    flags |= requirements::STRIPS;
                } else if eq_no_case(token, ":typing") {
                    flags |= requirements::TYPING;
                } else if eq_no_case(token, ":equality") {
                    flags |= requirements::EQUALITY;
                } else if eq_no_case(token, ":negative-preconditions") {
                    flags |= requirements::NEGATIVE_PRECONDITIONS;
                } else {
                    return Err(ErrorKind::NotImplemented(format!(
                        "the requirement \"{token}\" is not supported"
                    )));
                }
            }
        }
    }

    Ok(flags)
}

/// Read a `name` or `name - type` declaration, depending on whether typing
/// is in force.
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

/// Tracks which blocks have been seen, to enforce order and uniqueness.
#[derive(Default)]
struct Seen {
    requirements: bool,
    types: bool,
    constants: bool,
    predicates: bool,
    actions: bool,
}

impl Seen {
    /// Reject a block appearing twice, or after any block it must precede.
    fn admit(&self, block: &str, duplicate: bool, later: &[(&str, bool)]) -> Result<(), ErrorKind> {
        if duplicate {
            return Err(ErrorKind::NotImplemented(format!(
                "a PDDL domain may not have multiple {block} blocks"
            )));
        }

        for (name, seen) in later {
            if *seen {
                return Err(ErrorKind::NotImplemented(format!(
                    "the PDDL {block} block must come before the {name} block"
                )));
            }
        }

        Ok(())
    }
}

/// Parse a domain from its PDDL text.
pub fn parse_domain(text: &str) -> Result<Domain, ErrorKind> {
    log::trace!(target: crate::misc::log::targets::PARSE, "Parsing a domain of {} bytes", text.len());

    let mut scan = Scanner::new(text);

    scan.eat_whitespace();
    scan.expect("(")?;
    scan.eat_whitespace();
    scan.expect("define")?;
    scan.eat_whitespace();
    scan.expect("(")?;
    scan.eat_whitespace();
    scan.expect("domain")?;
    scan.eat_whitespace();
    let name = scan.read_token()?.to_owned();
    scan.eat_whitespace();
    scan.expect(")")?;
    scan.eat_whitespace();

    let mut flags = requirements::STRIPS;
    let mut types: Vec<String> = Vec::new();
    let mut constant_types = TypeTable::default();
    let mut relations = RelationTable::default();
    let mut operators = Vec::new();

    let mut seen = Seen::default();

    while scan.peek() == Some('(') {
        let (block, base) = scan.read_parenthetical()?;
        let mut inner = Scanner::with_base(block, base);

        inner.expect("(")?;
        inner.eat_whitespace();
        let block_head = inner.read_token()?.to_owned();
        inner.eat_whitespace();

        if eq_no_case(&block_head, ":action") {
            seen.actions = true;
            let mut action_scan = Scanner::with_base(block, base);
            operators.push(parse_action(
                &mut action_scan,
                &constant_types,
                &mut relations,
                flags & requirements::TYPING != 0,
            )?);
        } else if eq_no_case(&block_head, ":requirements") {
            seen.admit(
                ":requirements",
                seen.requirements,
                &[
                    (":types", seen.types),
                    (":constants", seen.constants),
                    (":predicates", seen.predicates),
                    (":action", seen.actions),
                ],
            )?;
            seen.requirements = true;
            flags = parse_requirements_block(&mut inner)?;
        } else if eq_no_case(&block_head, ":types") {
            seen.admit(
                ":types",
                seen.types,
                &[
                    (":constants", seen.constants),
                    (":predicates", seen.predicates),
                    (":action", seen.actions),
                ],
            )?;
            if flags & requirements::TYPING == 0 {
                return Err(ErrorKind::NotImplemented(
                    "the PDDL types block requires the typing requirement".to_owned(),
                ));
            }
            seen.types = true;

            loop {
                inner.eat_whitespace();
                match inner.peek() {
                    Some(')') | None => break,
                    Some(_) => {
                        let new_type = inner.read_token()?;
                        if !types.iter().any(|known| eq_no_case(known, new_type)) {
                            types.push(new_type.to_owned());
                        }
                    }
                }
            }
        } else if eq_no_case(&block_head, ":constants") {
            seen.admit(
                ":constants",
                seen.constants,
                &[(":predicates", seen.predicates), (":action", seen.actions)],
            )?;
            seen.constants = true;

            loop {
                inner.eat_whitespace();
                match inner.peek() {
                    Some(')') | None => break,
                    Some(_) => {
                        let (constant, typing) =
                            read_typed_name(&mut inner, flags & requirements::TYPING != 0)?;
                        if !constant_types.insert(constant.as_str(), typing) {
                            return Err(ErrorKind::NotImplemented(format!(
                                "the constant \"{constant}\" may not be declared twice"
                            )));
                        }
                    }
                }
            }
        } else if eq_no_case(&block_head, ":predicates") {
            seen.admit(
                ":predicates",
                seen.predicates,
                &[(":action", seen.actions)],
            )?;
            seen.predicates = true;

            loop {
                inner.eat_whitespace();
                match inner.peek() {
                    Some('(') => {
                        parse_predicate_decl(
                            &mut inner,
                            &types,
                            &mut relations,
                            flags & requirements::TYPING != 0,
                        )?;
                    }
                    _ => break,
                }
            }
        } else if eq_no_case(&block_head, ":functions") {
            return Err(ErrorKind::NotImplemented(
                "functions are not supported".to_owned(),
            ));
        } else if eq_no_case(&block_head, ":constraints") {
            return Err(ErrorKind::NotImplemented(
                "constraints are not supported".to_owned(),
            ));
        } else if eq_no_case(&block_head, ":method") {
            return Err(ErrorKind::NotImplemented(
                "a STRIPS domain may not contain methods".to_owned(),
            ));
        } else {
            return Err(ErrorKind::NotImplemented(format!(
                "unrecognised PDDL feature: {block_head}"
            )));
        }

        scan.eat_whitespace();
    }

    scan.expect(")")?;

    if flags & requirements::TYPING != 0 && !seen.types {
        return Err(ErrorKind::NotImplemented(
            "the typing requirement means that you must have a types block".to_owned(),
        ));
    }

    Ok(Domain {
        name,
        requirements: flags,
        types,
        constant_types,
        relations,
        operators,
    })
}

/// Parse one declaration of a `:predicates` block.
fn parse_predicate_decl(
    scan: &mut Scanner,
    types: &[String],
    relations: &mut RelationTable,
    typed: bool,
) -> Result<(), ErrorKind> {
    scan.expect("(")?;
    scan.eat_whitespace();
    let relation = scan.read_token()?.to_owned();

    let mut param_typings: Vec<Typing> = Vec::new();

    loop {
        scan.eat_whitespace();
        match scan.peek() {
            Some(')') | None => break,
            Some(_) => {
                let (_, typing) = read_typed_name(scan, typed)?;
                match typed {
                    false => param_typings.push(None),
                    true => {
                        if !types.iter().any(|known| eq_no_case(known, &typing)) {
                            return Err(ErrorKind::NotImplemented(format!(
                                "the undeclared type \"{typing}\" was used in a predicate declaration"
                            )));
                        }
                        param_typings.push(Some(typing));
                    }
                }
            }
        }
    }
    scan.expect(")")?;

    relations.declare(&relation, param_typings)?;
    Ok(())
}

/// Parse an `:action` block to an operator.
fn parse_action(
    scan: &mut Scanner,
    constant_types: &TypeTable,
    relations: &mut RelationTable,
    typed: bool,
) -> Result<Operator, ErrorKind> {
    scan.expect("(")?;
    scan.eat_whitespace();
    scan.expect(":action")?;
    scan.eat_whitespace();
    let name = scan.read_token()?.to_owned();

    // In a typed domain terms of the action body resolve against the domain
    // constants extended by the parameters; untyped domains place no
    // restriction on terms.
    let mut local_types = match typed {
        true => constant_types.clone(),
        false => TypeTable::default(),
    };
    let mut parameters: Vec<Variable> = Vec::new();

    scan.eat_whitespace();
    scan.expect(":parameters")?;
    scan.eat_whitespace();
    scan.expect("(")?;
    loop {
        scan.eat_whitespace();
        match scan.peek() {
            Some(')') | None => break,
            Some(_) => {
                let (parameter, typing) = read_typed_name(scan, typed)?;

                let variable = Variable {
                    name: parameter.clone(),
                    depth: 0,
                    typing: match typing.is_empty() {
                        true => None,
                        false => Some(typing.clone()),
                    },
                };

                let duplicate = parameters.contains(&variable)
                    || (typed && !local_types.insert(parameter.as_str(), typing.as_str()));
                if duplicate {
                    return Err(ErrorKind::NotImplemented(format!(
                        "the parameter \"{parameter}\" of \"{name}\" is declared twice"
                    )));
                }

                parameters.push(variable);
            }
        }
    }
    scan.expect(")")?;

    scan.eat_whitespace();
    scan.expect(":precondition")?;
    let preconditions = parse_formula(scan, &local_types, relations)?
        .conjuncts()
        .to_vec();

    scan.eat_whitespace();
    scan.expect(":effect")?;
    let effect_formula = parse_formula(scan, &local_types, relations)?;

    let mut effects = Vec::new();
    for literal in effect_formula.conjuncts() {
        match literal {
            Literal::Pred(p) => effects.push(EffectAtom::Add(p.clone())),
            Literal::NegPred(p) => effects.push(EffectAtom::Delete(p.clone())),
            Literal::Equ(_) | Literal::NegEqu(_) => {
                return Err(ErrorKind::NotImplemented(format!(
                    "the effects of \"{name}\" may not contain equalities"
                )));
            }
        }
    }

    scan.eat_whitespace();
    scan.expect(")")?;

    Operator::new(name, parameters, preconditions, effects)
}
