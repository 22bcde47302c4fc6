//! Property-based tests for dependency states and propagation

use depflow_core::ast::Statement;
use depflow_core::dataflow::{DependSet, Dependencies, FlowGraph};
use proptest::prelude::*;

const VARS: &[&str] = &["a", "b", "c", "d", "e"];

fn var() -> impl Strategy<Value = String> {
    prop::sample::select(VARS).prop_map(str::to_string)
}

fn depend_set() -> impl Strategy<Value = DependSet> {
    prop::collection::btree_set(var(), 0..4).prop_map(|vars| vars.into_iter().collect())
}

fn dependencies() -> impl Strategy<Value = Dependencies> {
    prop::collection::btree_map(var(), depend_set(), 0..5).prop_map(|map| map.into_iter().collect())
}

fn statement() -> impl Strategy<Value = Statement> {
    let leaf = prop_oneof![
        4 => (var(), prop::collection::vec(var(), 0..3)).prop_map(|(x, used)| Statement::assign(x, used)),
        1 => Just(Statement::null()),
        1 => Just(Statement::error()),
    ];
    leaf.prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Statement::compound),
            prop::collection::vec(inner.clone(), 0..3).prop_map(Statement::select),
            inner.prop_map(Statement::repeat),
        ]
    })
}

proptest! {
    #[test]
    fn prop_copy_equals_original(deps in dependencies(), x in var(), extra in var()) {
        let original = deps.clone();
        let mut copy = deps.copy();
        prop_assert!(copy.equals(&deps));

        copy.put(x.as_str(), DependSet::singleton(extra));
        prop_assert_eq!(&deps, &original);
    }

    #[test]
    fn prop_merge_commutative(a in dependencies(), b in dependencies()) {
        prop_assert_eq!(a.merge(&b), b.merge(&a));
    }

    #[test]
    fn prop_merge_idempotent(a in dependencies()) {
        prop_assert!(a.merge(&a).equals(&a));
    }

    #[test]
    fn prop_merge_is_keywise_union(a in dependencies(), b in dependencies()) {
        let merged = a.merge(&b);
        for (key, set) in a.iter().chain(b.iter()) {
            let result = merged.get(key);
            prop_assert!(result.is_some());
            prop_assert!(set.is_subset(result.unwrap()));
        }
        for (key, set) in merged.iter() {
            let expected = a.get_or_empty(key).union(&b.get_or_empty(key));
            prop_assert_eq!(set, &expected);
        }
    }

    #[test]
    fn prop_rendering_deterministic(a in dependencies()) {
        prop_assert_eq!(a.to_string(), a.copy().to_string());
    }

    #[test]
    fn prop_propagation_keeps_entry_keys(program in statement(), entry in dependencies()) {
        let exit = FlowGraph::build(&program).propagate(&entry);
        for (key, _) in entry.iter() {
            prop_assert!(exit.contains_key(key));
        }
    }

    #[test]
    fn prop_propagation_is_fixpoint(program in statement(), entry in dependencies()) {
        let mut graph = FlowGraph::build(&program);
        graph.propagate(&entry);

        // Every edge's transfer is already included in its target's state
        for node in graph.nodes().collect::<Vec<_>>() {
            let Some(state) = graph.snapshot(node) else { continue };
            for (target, stmt) in graph.successors(node) {
                let out = stmt.calculate_dependencies(state);
                let target_state = graph.snapshot(target);
                prop_assert!(target_state.is_some());
                prop_assert!(out.is_subset_of(target_state.unwrap()));
            }
        }
    }

    #[test]
    fn prop_select_order_independent(left in statement(), right in statement(), entry in dependencies()) {
        let forward = FlowGraph::build(&Statement::select(vec![left.clone(), right.clone()])).propagate(&entry);
        let backward = FlowGraph::build(&Statement::select(vec![right, left])).propagate(&entry);
        prop_assert_eq!(forward, backward);
    }
}
