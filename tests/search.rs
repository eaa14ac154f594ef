use std::rc::Rc;

use heron_plan::{
    builder,
    config::{Config, Selection},
    context::PlanContext,
    reports::SearchReport,
    structures::problem::Problem,
};

fn load(domain: &str, problem: &str) -> Rc<Problem> {
    let domain = builder::parse_domain(domain).expect("domain should parse");
    Rc::new(builder::parse_problem(problem, Rc::new(domain)).expect("problem should parse"))
}

fn context(domain: &str, problem: &str) -> PlanContext {
    PlanContext::new(load(domain, problem), Config::default())
}

/// The actions of a plan, rendered.
fn actions(report: &SearchReport) -> Vec<String> {
    match report {
        SearchReport::Found(plan) => (0..plan.len())
            .map(|index| plan.action_str(index).expect("actions render"))
            .collect(),
        _ => panic!("no plan was found"),
    }
}

const SWITCH: &str = "
(define (domain switch)
  (:requirements :strips :negative-preconditions)
  (:predicates (lit) (dark))
  (:action flip-on
    :parameters ()
    :precondition (not (lit))
    :effect (lit))
  (:action flip-off
    :parameters ()
    :precondition (lit)
    :effect (not (lit))))";

const TRAVEL: &str = "
(define (domain travel)
  (:predicates (at ?x) (road ?x ?y))
  (:action move
    :parameters (?x ?y)
    :precondition (and (at ?x) (road ?x ?y))
    :effect (and (not (at ?x)) (at ?y))))";

mod trivial_goals {
    use super::*;

    #[test]
    fn deepening_returns_the_empty_plan() {
        let mut ctx = context(
            SWITCH,
            "(define (problem lit-up) (:domain switch) (:init (lit)) (:goal (lit)))",
        );

        match ctx.solve_deepening().expect("search completes") {
            SearchReport::Found(plan) => assert!(plan.is_empty()),
            _ => panic!("no plan was found"),
        }
    }

    #[test]
    fn breadth_returns_the_empty_plan() {
        let mut ctx = context(
            SWITCH,
            "(define (problem lit-up) (:domain switch) (:init (lit)) (:goal (lit)))",
        );

        match ctx.solve_breadth().expect("search completes") {
            SearchReport::Found(plan) => assert!(plan.is_empty()),
            _ => panic!("no plan was found"),
        }
    }
}

mod single_steps {
    use super::*;

    #[test]
    fn one_action_plans() {
        let mut ctx = context(
            SWITCH,
            "(define (problem dark-room) (:domain switch) (:init) (:goal (lit)))",
        );

        let report = ctx.solve_breadth().expect("search completes");
        assert_eq!(actions(&report), vec!["( flip-on )"]);

        let mut ctx = context(
            SWITCH,
            "(define (problem dark-room) (:domain switch) (:init) (:goal (lit)))",
        );

        let report = ctx.solve_deepening().expect("search completes");
        assert_eq!(actions(&report), vec!["( flip-on )"]);
    }
}

mod minimality {
    use super::*;

    const RING: &str = "(define (problem ring) (:domain travel)
       (:init (at s) (road s m) (road m g) (road s g))
       (:goal (at g)))";

    #[test]
    fn deepening_finds_a_shortest_plan() {
        let mut ctx = context(TRAVEL, RING);

        match ctx.solve_deepening().expect("search completes") {
            SearchReport::Found(plan) => assert_eq!(plan.len(), 1),
            _ => panic!("no plan was found"),
        }
    }

    #[test]
    fn breadth_finds_a_shortest_plan() {
        let mut ctx = context(TRAVEL, RING);

        match ctx.solve_breadth().expect("search completes") {
            SearchReport::Found(plan) => {
                assert_eq!(plan.len(), 1);
                assert_eq!(actions(&SearchReport::Found(plan)), vec!["( move s g )"]);
            }
            _ => panic!("no plan was found"),
        }
    }

    #[test]
    fn two_step_plans_when_no_shortcut_exists() {
        let mut ctx = context(
            TRAVEL,
            "(define (problem walk) (:domain travel)
               (:init (at s) (road s m) (road m g))
               (:goal (at g)))",
        );

        let report = ctx.solve_deepening().expect("search completes");
        assert_eq!(actions(&report), vec!["( move s m )", "( move m g )"]);
    }
}

mod loop_elimination {
    use super::*;

    #[test]
    fn breadth_terminates_on_unreachable_goals() {
        // flip-on and flip-off invert one another, so without loop
        // elimination the queue never drains.
        let mut ctx = context(
            SWITCH,
            "(define (problem hopeless) (:domain switch) (:init) (:goal (dark)))",
        );

        match ctx.solve_breadth().expect("search completes") {
            SearchReport::Exhausted => {}
            _ => panic!("the unreachable goal was reported reachable"),
        }
    }

    #[test]
    fn found_plans_never_revisit_a_state() {
        let mut ctx = context(
            TRAVEL,
            "(define (problem wander) (:domain travel)
               (:init (at s) (road s m) (road m s) (road m g))
               (:goal (at g)))",
        );

        match ctx.solve_breadth().expect("search completes") {
            SearchReport::Found(plan) => {
                for (index, step) in plan.steps().iter().enumerate() {
                    for later in &plan.steps()[index + 1..] {
                        assert_ne!(step.result, later.result);
                    }
                    assert_ne!(step.result, plan.problem().init);
                }
            }
            _ => panic!("no plan was found"),
        }
    }
}

mod cancellation {
    use super::*;

    #[test]
    fn step_limits_give_up() {
        let mut config = Config::default();
        config.step_limit.value = 1;

        let mut ctx = PlanContext::new(
            load(
                TRAVEL,
                "(define (problem far) (:domain travel)
                   (:init (at s) (road s m) (road m g) (road g q) (road q z))
                   (:goal (at z)))",
            ),
            config,
        );

        match ctx.solve_breadth().expect("search completes") {
            SearchReport::GaveUp => {}
            _ => panic!("the step limit was ignored"),
        }
    }
}

mod heuristics {
    use super::*;

    #[test]
    fn shuffled_selection_finds_the_same_plan_length() {
        let mut config = Config::default();
        config.selection = Selection::Shuffled;
        config.shuffle_seed.value = 7;

        let mut shuffled = PlanContext::new(
            load(
                TRAVEL,
                "(define (problem walk) (:domain travel)
                   (:init (at s) (road s m) (road m g))
                   (:goal (at g)))",
            ),
            config,
        );

        match shuffled.solve_breadth().expect("search completes") {
            SearchReport::Found(plan) => assert_eq!(plan.len(), 2),
            _ => panic!("no plan was found"),
        }
    }
}

mod round_trips {
    use super::*;

    #[test]
    fn found_plans_verify() {
        let problem = load(
            TRAVEL,
            "(define (problem walk) (:domain travel)
               (:init (at s) (road s m) (road m g))
               (:goal (at g)))",
        );

        let mut ctx = PlanContext::new(problem, Config::default());

        let plan = match ctx.solve_breadth().expect("search completes") {
            SearchReport::Found(plan) => plan,
            _ => panic!("no plan was found"),
        };

        let steps = plan
            .steps()
            .iter()
            .map(|step| (step.operator, step.substitution.clone()))
            .collect::<Vec<_>>();

        let report = ctx.verify_steps(&steps).expect("verification completes");
        assert_eq!(report, heron_plan::reports::VerifyReport::Success);
    }

    #[test]
    fn deepening_plans_verify_too() {
        let problem = load(
            SWITCH,
            "(define (problem dark-room) (:domain switch) (:init) (:goal (lit)))",
        );

        let mut ctx = PlanContext::new(problem, Config::default());

        let plan = match ctx.solve_deepening().expect("search completes") {
            SearchReport::Found(plan) => plan,
            _ => panic!("no plan was found"),
        };

        let steps = plan
            .steps()
            .iter()
            .map(|step| (step.operator, step.substitution.clone()))
            .collect::<Vec<_>>();

        let report = ctx.verify_steps(&steps).expect("verification completes");
        assert_eq!(report, heron_plan::reports::VerifyReport::Success);
    }
}

mod callbacks {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn depths_are_reported_in_order() {
        let depths = Rc::new(RefCell::new(Vec::new()));
        let seen = depths.clone();

        let mut ctx = context(
            TRAVEL,
            "(define (problem walk) (:domain travel)
               (:init (at s) (road s m) (road m g))
               (:goal (at g)))",
        );

        ctx.set_callback_depth(Box::new(move |depth, _| {
            seen.borrow_mut().push(depth);
        }));

        match ctx.solve_deepening().expect("search completes") {
            SearchReport::Found(plan) => assert_eq!(plan.len(), 2),
            _ => panic!("no plan was found"),
        }

        assert_eq!(*depths.borrow(), vec![1]);
    }

    #[test]
    fn expansions_note_loops() {
        let looped = Rc::new(RefCell::new(false));
        let seen = looped.clone();

        let mut ctx = context(
            SWITCH,
            "(define (problem hopeless) (:domain switch) (:init) (:goal (dark)))",
        );

        ctx.set_callback_expansion(Box::new(move |_, extension, repeat| {
            if repeat {
                *seen.borrow_mut() = true;
                assert_eq!(extension.len(), 2);
            }
        }));

        assert!(matches!(
            ctx.solve_breadth().expect("search completes"),
            SearchReport::Exhausted
        ));

        assert!(*looped.borrow());
    }
}
