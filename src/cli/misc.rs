//! Helpers shared by the CLI binaries.

use std::rc::Rc;

use heron_plan::{
    builder,
    structures::problem::Problem,
    types::err::ErrorKind,
};

/// Print the one-line diagnostic for an error and exit with the
/// usage/parse-error code.
pub fn fail(e: ErrorKind) -> ! {
    println!("\n{e}");
    std::process::exit(1);
}

/// Attach a file name to a parse error, for the diagnostic line.
fn annotate(e: ErrorKind, path: &str) -> ErrorKind {
    match e {
        ErrorKind::Parse(parse) => ErrorKind::Parse(parse.in_file(path)),
        other => other,
    }
}

/// Read and parse the domain and problem files, exiting on any failure.
pub fn load_problem(domain_path: &str, problem_path: &str) -> Rc<Problem> {
    let domain_text = builder::read_file(domain_path).unwrap_or_else(|e| fail(e));
    let domain = builder::parse_domain(&domain_text)
        .unwrap_or_else(|e| fail(annotate(e, domain_path)));

    let problem_text = builder::read_file(problem_path).unwrap_or_else(|e| fail(e));
    let problem = builder::parse_problem(&problem_text, Rc::new(domain))
        .unwrap_or_else(|e| fail(annotate(e, problem_path)));

    Rc::new(problem)
}
