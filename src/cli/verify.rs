/*!
Plan verification from the command line.

# Use

```sh
verify <domain-file> <problem-file> <plan-file>
```

Prints `SUCCESS` and exits 0 if the plan replays from the initial state and
achieves the goals.
Otherwise prints the failure and exits 2 (an action whose preconditions do
not hold) or 3 (the goals are not achieved).
File and parse errors exit 1.
*/

use heron_plan::{builder, config::Config, context::PlanContext};

mod misc;

/// Entrypoint to the verifier CLI.
fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 4 {
        eprintln!("\nUsage: ");
        eprintln!("verify <domain-file> <problem-file> <plan-file>");
        std::process::exit(1);
    }

    let problem = misc::load_problem(&args[1], &args[2]);

    let plan_text = builder::read_file(&args[3]).unwrap_or_else(|e| misc::fail(e));

    let ctx = PlanContext::new(problem, Config::default());

    match ctx.verify(&plan_text) {
        Ok(report) => {
            println!("{report}");
            std::process::exit(report.exit_code());
        }

        Err(e) => misc::fail(e),
    }
}
