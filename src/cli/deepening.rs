/*!
Iterative-deepening planning from the command line.

# Use

```sh
iterative-deepening <domain-file> <problem-file>
```

On success the plan is printed, one tab-indented action per line, and the
process exits 0.
Each depth exhausted without a plan prints a failure line; if the ceiling is
reached the process reports giving up and exits 1.
*/

use heron_plan::{config::Config, context::PlanContext, reports::SearchReport};

mod misc;

/// Entrypoint to the iterative-deepening CLI.
fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 3 {
        eprintln!("\nUsage: ");
        eprintln!("iterative-deepening <domain-file> <problem-file>");
        std::process::exit(1);
    }

    let problem = misc::load_problem(&args[1], &args[2]);

    let mut ctx = PlanContext::new(problem, Config::default());
    let ceiling = ctx.config.max_depth.value;

    ctx.set_callback_depth(Box::new(|depth, _| {
        println!("Failed at depth {depth}.");
    }));

    match ctx.solve_deepening() {
        Ok(SearchReport::Found(plan)) => {
            println!("\nPlan found at depth {}.", plan.len());
            print!("{plan}");
        }

        Ok(SearchReport::GaveUp) | Ok(SearchReport::Exhausted) => {
            println!("Gave up after trying depth {ceiling}.");
            std::process::exit(1);
        }

        Err(e) => misc::fail(e),
    }
}
