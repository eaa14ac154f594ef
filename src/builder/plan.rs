/*!
Parsing a plan for the verifier.

```text
( defplan DOMAIN-NAME PLAN-NAME
  ( OPERATOR arg… )
  … )
```

Each step names an operator of the domain and supplies one argument per head
parameter; the arguments are read against the problem's objects and bound to
the parameters, giving the `(operator index, substitution)` pairs the
[verifier](crate::procedures::verify) replays.
*/

use crate::{
    builder::Scanner,
    misc::text::eq_no_case,
    structures::{problem::Problem, substitution::Substitution},
    types::err::ErrorKind,
};

/// Parse a plan's steps from its textual representation.
pub fn parse_plan_steps(
    text: &str,
    problem: &Problem,
) -> Result<Vec<(usize, Substitution)>, ErrorKind> {
    let mut scan = Scanner::new(text);

    scan.eat_whitespace();
    scan.expect("(")?;
    scan.eat_whitespace();
    scan.expect("defplan")?;
    scan.eat_whitespace();

    let domain_name = scan.read_token()?.to_owned();
    if !eq_no_case(&domain_name, &problem.domain.name) {
        return Err(ErrorKind::DomainMismatch {
            expected: problem.domain.name.clone(),
            found: domain_name,
        });
    }

    scan.eat_whitespace();
    let _plan_name = scan.read_token()?;
    scan.eat_whitespace();

    let mut steps = Vec::new();

    while scan.peek() == Some('(') {
        scan.expect("(")?;
        scan.eat_whitespace();

        let oper_name = scan.read_token()?;
        let oper_index = problem.domain.oper_index_by_name(oper_name)?;
        let oper = problem.domain.oper(oper_index)?;

        let mut substitution = Substitution::new();
        for parameter in &oper.parameters {
            scan.eat_whitespace();
            let argument = scan.read_token()?;
            let term = problem.object_types().read_term(argument)?;
            substitution.add_pair(parameter.clone(), term)?;
        }

        scan.eat_whitespace();
        scan.expect(")")?;
        scan.eat_whitespace();

        steps.push((oper_index, substitution));
    }

    scan.expect(")")?;

    Ok(steps)
}
