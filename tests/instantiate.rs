use std::rc::Rc;

use heron_plan::{
    builder,
    state::rank::{ConjunctOrder, MostConstrained, Shuffled},
    structures::{
        formula::Formula, operator::Operator, problem::Problem, substitution::Substitution,
        term::Term,
    },
};

fn load(domain: &str, problem: &str) -> Rc<Problem> {
    let domain = builder::parse_domain(domain).expect("domain should parse");
    Rc::new(builder::parse_problem(problem, Rc::new(domain)).expect("problem should parse"))
}

/// The arguments an instantiation gives to an operator's head, in parameter
/// order.
fn head_args(oper: &Operator, sub: &Substitution) -> Vec<String> {
    oper.parameters
        .iter()
        .map(|parameter| {
            sub.apply_to_term(&Term::Variable(parameter.clone()), 0)
                .expect("head parameters resolve")
                .name()
                .to_lowercase()
        })
        .collect()
}

/// Every instantiation of an operator, as sorted head-argument lists.
fn all_instantiations(
    problem: &Problem,
    oper_index: usize,
    order: &mut dyn ConjunctOrder,
) -> Vec<Vec<String>> {
    let oper = problem.domain.oper(oper_index).expect("operator exists");

    let subs = problem
        .init
        .operator_instantiations(oper, &Substitution::new(), order)
        .expect("instantiation succeeds");

    let mut args = subs
        .iter()
        .map(|sub| head_args(oper, sub))
        .collect::<Vec<_>>();
    args.sort();
    args.dedup();
    args
}

const YARD: &str = "
(define (domain yard)
  (:requirements :strips :typing)
  (:types box spot)
  (:predicates (present ?x - box) (vacant ?s - spot) (stored ?x - box ?s - spot))
  (:action store
    :parameters (?x - box ?s - spot)
    :precondition (and (present ?x) (vacant ?s))
    :effect (and (stored ?x ?s) (not (vacant ?s)) (not (present ?x)))))";

mod soundness_and_completeness {
    use super::*;

    #[test]
    fn every_applicable_instance_and_nothing_else() {
        let problem = load(
            YARD,
            "(define (problem stack-up) (:domain yard)
               (:objects b1 b2 - box s1 s2 - spot)
               (:init (present b1) (present b2) (vacant s1) (vacant s2))
               (:goal (stored b1 s1)))",
        );

        let args = all_instantiations(&problem, 0, &mut MostConstrained);

        let expected: Vec<Vec<String>> = vec![
            vec!["b1".into(), "s1".into()],
            vec!["b1".into(), "s2".into()],
            vec!["b2".into(), "s1".into()],
            vec!["b2".into(), "s2".into()],
        ];
        assert_eq!(args, expected);
    }

    #[test]
    fn returned_substitutions_ground_and_satisfy() {
        let problem = load(
            YARD,
            "(define (problem stack-up) (:domain yard)
               (:objects b1 b2 - box s1 - spot)
               (:init (present b1) (present b2) (vacant s1))
               (:goal (stored b1 s1)))",
        );

        let oper = problem.domain.oper(0).expect("operator exists");
        let subs = problem
            .init
            .operator_instantiations(oper, &Substitution::new(), &mut MostConstrained)
            .expect("instantiation succeeds");

        assert!(!subs.is_empty());

        for sub in &subs {
            let mut literals = Vec::new();
            for literal in &oper.preconditions {
                literals.push(literal.after_substitution(sub, 0).expect("substitution applies"));
            }
            let preconditions = Formula::Conj(literals);

            assert!(preconditions.is_ground());
            assert!(problem.init.is_consistent(&preconditions));

            for parameter in &oper.parameters {
                assert!(sub.binds(parameter));
            }
        }
    }

    #[test]
    fn typing_rejects_ill_typed_bindings() {
        // (present s1) holds of a spot, but ?x of store is a box.
        let problem = load(
            YARD,
            "(define (problem odd-yard) (:domain yard)
               (:objects b1 - box s1 s2 - spot)
               (:init (present b1) (present s1) (vacant s2))
               (:goal (stored b1 s2)))",
        );

        let args = all_instantiations(&problem, 0, &mut MostConstrained);

        assert_eq!(args, vec![vec!["b1".to_owned(), "s2".to_owned()]]);
    }
}

mod heuristic_independence {
    use super::*;

    const FORWARD: &str = "
(define (domain hop)
  (:predicates (at ?x) (road ?x ?y))
  (:action hop
    :parameters (?x ?y)
    :precondition (and (at ?x) (road ?x ?y))
    :effect (and (not (at ?x)) (at ?y))))";

    // The same domain with the preconditions permuted.
    const BACKWARD: &str = "
(define (domain hop)
  (:predicates (at ?x) (road ?x ?y))
  (:action hop
    :parameters (?x ?y)
    :precondition (and (road ?x ?y) (at ?x))
    :effect (and (not (at ?x)) (at ?y))))";

    const CROSSROADS: &str = "(define (problem crossroads) (:domain hop)
       (:init (at a) (at b) (road a b) (road b c) (road a c) (road c a))
       (:goal (at c)))";

    #[test]
    fn conjunct_order_does_not_change_the_set() {
        let forward = all_instantiations(&load(FORWARD, CROSSROADS), 0, &mut MostConstrained);
        let backward = all_instantiations(&load(BACKWARD, CROSSROADS), 0, &mut MostConstrained);

        assert_eq!(forward, backward);
        assert!(!forward.is_empty());
    }

    #[test]
    fn heuristic_choice_does_not_change_the_set() {
        let problem = load(FORWARD, CROSSROADS);

        let constrained = all_instantiations(&problem, 0, &mut MostConstrained);

        for seed in 0..8 {
            let mut shuffled = Shuffled::new(seed);
            assert_eq!(all_instantiations(&problem, 0, &mut shuffled), constrained);
        }
    }
}

mod equalities {
    use super::*;

    #[test]
    fn negated_equality_excludes_the_named_constant() {
        let domain = "
(define (domain walk)
  (:requirements :strips :equality :negative-preconditions)
  (:predicates (at ?x) (seen ?x))
  (:action leave
    :parameters (?x)
    :precondition (and (at ?x) (not (= ?x home)))
    :effect (not (at ?x))))";

        // Constants home, a, b appear in the state; only a satisfies both
        // conjuncts.
        let problem = load(
            domain,
            "(define (problem out) (:domain walk)
               (:init (at home) (at a) (seen b))
               (:goal (seen b)))",
        );

        let args = all_instantiations(&problem, 0, &mut MostConstrained);

        assert_eq!(args, vec![vec!["a".to_owned()]]);
    }

    #[test]
    fn equality_pins_a_variable() {
        let domain = "
(define (domain pick)
  (:requirements :strips :equality)
  (:predicates (at ?x))
  (:action pick
    :parameters (?x)
    :precondition (and (at ?x) (= ?x a))
    :effect (not (at ?x))))";

        let problem = load(
            domain,
            "(define (problem pin) (:domain pick)
               (:init (at a) (at b))
               (:goal (at a)))",
        );

        let args = all_instantiations(&problem, 0, &mut MostConstrained);

        assert_eq!(args, vec![vec!["a".to_owned()]]);
    }

    #[test]
    fn variable_to_variable_equality_rewires() {
        let domain = "
(define (domain pair)
  (:requirements :strips :equality)
  (:predicates (at ?x) (on ?x ?y))
  (:action match
    :parameters (?x ?y)
    :precondition (and (at ?x) (at ?y) (= ?x ?y))
    :effect (on ?x ?y)))";

        let problem = load(
            domain,
            "(define (problem double) (:domain pair)
               (:init (at a) (at b))
               (:goal (at a)))",
        );

        let args = all_instantiations(&problem, 0, &mut MostConstrained);

        let expected: Vec<Vec<String>> = vec![
            vec!["a".into(), "a".into()],
            vec!["b".into(), "b".into()],
        ];
        assert_eq!(args, expected);
    }
}

mod head_grounding {
    use super::*;

    #[test]
    fn parameters_absent_from_preconditions_range_over_constants() {
        let domain = "
(define (domain gift)
  (:predicates (at ?x) (given ?x))
  (:action give
    :parameters (?x)
    :precondition (at home)
    :effect (given ?x)))";

        let problem = load(
            domain,
            "(define (problem any) (:domain gift)
               (:init (at home) (at a))
               (:goal (given a)))",
        );

        let mut args = all_instantiations(&problem, 0, &mut MostConstrained);
        args.sort();

        let expected: Vec<Vec<String>> = vec![vec!["a".into()], vec!["home".into()]];
        assert_eq!(args, expected);
    }
}

mod unsupported {
    use super::*;

    #[test]
    fn non_ground_negated_atoms_are_rejected() {
        let domain = "
(define (domain shade)
  (:requirements :strips :negative-preconditions)
  (:predicates (lit ?x) (dark ?x))
  (:action shade
    :parameters (?x)
    :precondition (not (lit ?x))
    :effect (dark ?x)))";

        let problem = load(
            domain,
            "(define (problem dusk) (:domain shade)
               (:init (lit a))
               (:goal (dark a)))",
        );

        let oper = problem.domain.oper(0).expect("operator exists");
        let result = problem.init.operator_instantiations(
            oper,
            &Substitution::new(),
            &mut MostConstrained,
        );

        match result {
            Err(e) => assert_eq!(e.code(), "not_implemented"),
            Ok(_) => panic!("a non-ground negated atom was instantiated"),
        }
    }
}

mod literal_semantics {
    use super::*;

    #[test]
    fn ground_negated_atoms_in_preconditions() {
        // Ground negations are fine: they are evaluated, not enumerated.
        let domain = "
(define (domain switch)
  (:requirements :strips :negative-preconditions)
  (:predicates (lit))
  (:action flip-on
    :parameters ()
    :precondition (not (lit))
    :effect (lit)))";

        let dark = load(
            domain,
            "(define (problem dark) (:domain switch) (:init) (:goal (lit)))",
        );

        let oper = dark.domain.oper(0).expect("operator exists");
        let subs = dark
            .init
            .operator_instantiations(oper, &Substitution::new(), &mut MostConstrained)
            .expect("instantiation succeeds");
        assert_eq!(subs.len(), 1);

        let lit = load(
            domain,
            "(define (problem lit-up) (:domain switch) (:init (lit)) (:goal (lit)))",
        );

        let oper = lit.domain.oper(0).expect("operator exists");
        let subs = lit
            .init
            .operator_instantiations(oper, &Substitution::new(), &mut MostConstrained)
            .expect("instantiation succeeds");
        assert!(subs.is_empty());
    }

    #[test]
    fn at_least_one_when_no_variables_are_relevant() {
        let problem = load(
            super::YARD,
            "(define (problem stack-up) (:domain yard)
               (:objects b1 b2 - box s1 - spot)
               (:init (present b1) (present b2) (vacant s1))
               (:goal (stored b1 s1)))",
        );

        let oper = problem.domain.oper(0).expect("operator exists");

        let subs = problem
            .init
            .instantiations(
                &oper.preconditions,
                &Substitution::new(),
                &[],
                &mut MostConstrained,
            )
            .expect("instantiation succeeds");

        // An empty relevant list asks for at least one extension, not all.
        assert_eq!(subs.len(), 1);
    }
}
