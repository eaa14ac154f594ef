/*!
Breadth-first planning from the command line.

# Use

```sh
breadth-first <domain-file> <problem-file> <log-level>
```

Valid log levels:
- `0` --- only print the plan.
- `1` --- print the number of plans processed at each depth.
- `2` --- print each state and action as the search expands it.

Exits 0 whether a plan was found or the (finite, loop-free) search space was
exhausted without one; 1 on a usage or parse error.
*/

use heron_plan::{config::Config, context::PlanContext, reports::SearchReport};

mod misc;

/// Entrypoint to the breadth-first CLI.
fn main() {
    let args: Vec<String> = std::env::args().collect();

    let log_level = match args.len() {
        4 => args[3].parse::<u8>().ok().filter(|level| *level <= 2),
        _ => None,
    };

    let Some(log_level) = log_level else {
        eprintln!("\nUsage: ");
        eprintln!("breadth-first <domain-file> <problem-file> <log-level>");
        eprintln!("Valid log levels:");
        eprintln!("\t0 Only print plan");
        eprintln!("\t1 Print number of nodes at each depth");
        eprintln!("\t2 Print each state and action");
        std::process::exit(1);
    };

    let problem = misc::load_problem(&args[1], &args[2]);

    let mut ctx = PlanContext::new(problem, Config::default());

    if log_level >= 1 {
        ctx.set_callback_depth(Box::new(|depth, count| {
            println!(
                "\nProcessed all extensions of {count} {depth}-length plans without success ..."
            );
        }));
    }

    if log_level >= 2 {
        ctx.set_callback_expansion(Box::new(|plan, extension, repeat| {
            println!("\n\n*************************************");
            println!("Extending the following partial plan:");
            println!("\nInitial State:");
            println!("{}", plan.problem().init);

            for index in 0..plan.len() {
                let action = plan.action_str(index).unwrap_or_default();
                println!("\nAction {index}:\t{action}");
                if let Ok(step) = plan.step(index) {
                    println!("\nState {index}");
                    println!("{}", step.result);
                }
            }

            let last = extension.len() - 1;
            let action = extension.action_str(last).unwrap_or_default();
            println!("\nNew Action:\t{action}");
            println!("\nResulting State:");
            println!("{}", extension.final_state());

            if repeat {
                println!("\nThis branch loops and thus will be terminated.");
            }
        }));
    }

    match ctx.solve_breadth() {
        Ok(SearchReport::Found(plan)) => {
            println!("\nPlan found at depth {}.", plan.len());
            print!("{plan}");
        }

        Ok(SearchReport::Exhausted) => {
            println!("\nNo plans found.");
        }

        Ok(SearchReport::GaveUp) => {
            println!("\nGave up.");
        }

        Err(e) => misc::fail(e),
    }
}
