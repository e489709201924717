// tests/proptest_invariants.rs
// ============================================================================
// Module: Property-Based Invariants
// Description: Round-trip and disjoint/non-disjoint relationship properties
//              across generated Principal/Criterion/Rule trees.
// Purpose: Detect panics and invariant violations across wide input ranges.
// ============================================================================

//! Property-based tests for the data model's round-trip contract and the
//! evaluator's disjoint/non-disjoint relationship.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use grant_lang::{satisfies_with_mode, Criterion, DictCodec, Principal, Rule};
use proptest::prelude::*;

// ============================================================================
// SECTION: Strategies
// ============================================================================

fn role_name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{2,8}"
}

fn id_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,8}"
}

fn principal_strategy() -> impl Strategy<Value = Principal> {
    prop_oneof![
        id_strategy().prop_map(|id| Principal::with_id(id).expect("non-empty id")),
        prop::collection::vec(role_name_strategy(), 1 .. 4)
            .prop_map(|roles| Principal::with_roles(roles).expect("non-empty roles")),
        (id_strategy(), prop::collection::vec(role_name_strategy(), 1 .. 4)).prop_map(
            |(id, roles)| Principal::new(Some(id), Some(roles)).expect("non-empty id and roles")
        ),
    ]
}

fn criterion_strategy(max_depth: u32) -> impl Strategy<Value = Criterion> {
    let leaf = prop_oneof![
        id_strategy().prop_map(|id| Criterion::id(id).expect("non-empty id")),
        (role_name_strategy(), 1u32 .. 4)
            .prop_map(|(role, n)| Criterion::role_with_count(role, n).expect("positive n")),
    ];

    leaf.prop_recursive(max_depth, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1 .. 4)
                .prop_map(|children| Criterion::all(children).expect("non-empty children")),
            (prop::collection::vec(inner, 1 .. 4), 1u32 .. 3).prop_map(|(children, n)| {
                let n = n.min(u32::try_from(children.len()).unwrap_or(1));
                Criterion::any_with_count(children, n.max(1)).expect("non-empty children, positive n")
            }),
        ]
    })
}

fn rule_strategy() -> impl Strategy<Value = Rule> {
    (
        prop::collection::vec(role_name_strategy(), 1 .. 4),
        criterion_strategy(3),
    )
        .prop_map(|(grant, when)| Rule::new(grant, when).expect("non-empty grant"))
}

// ============================================================================
// SECTION: Round-trip properties
// ============================================================================

proptest! {
    #[test]
    fn principal_json_round_trips(p in principal_strategy()) {
        let round_tripped = Principal::from_dict(p.to_dict())
            .expect("a canonically-emitted Principal always re-parses");
        prop_assert_eq!(p, round_tripped);
    }

    #[test]
    fn criterion_json_round_trips(c in criterion_strategy(3)) {
        let round_tripped = Criterion::from_dict(c.to_dict())
            .expect("a canonically-emitted Criterion always re-parses");
        prop_assert_eq!(c, round_tripped);
    }

    #[test]
    fn rule_json_round_trips(r in rule_strategy()) {
        let round_tripped = Rule::from_dict(r.to_dict())
            .expect("a canonically-emitted Rule always re-parses");
        prop_assert_eq!(r, round_tripped);
    }

    #[test]
    fn roles_are_always_emitted_sorted_and_deduplicated(p in principal_strategy()) {
        let roles = p.roles().to_vec();
        let mut sorted_unique = roles.clone();
        sorted_unique.sort();
        sorted_unique.dedup();
        prop_assert_eq!(roles, sorted_unique);
    }

    #[test]
    fn grant_is_always_emitted_sorted_and_deduplicated(r in rule_strategy()) {
        let grant = r.grant().to_vec();
        let mut sorted_unique = grant.clone();
        sorted_unique.sort();
        sorted_unique.dedup();
        prop_assert_eq!(grant, sorted_unique);
    }

    // ========================================================================
    // SECTION: Disjoint-implies-non-disjoint relationship
    // ========================================================================

    #[test]
    fn disjoint_satisfaction_implies_non_disjoint_satisfaction(
        group in prop::collection::vec(principal_strategy(), 1 .. 4),
        criterion in criterion_strategy(3),
    ) {
        let disjoint_result = satisfies_with_mode(group.clone(), criterion.clone(), true)
            .expect("non-empty group and valid criterion");
        if disjoint_result {
            let non_disjoint_result = satisfies_with_mode(group, criterion, false)
                .expect("non-empty group and valid criterion");
            prop_assert!(non_disjoint_result);
        }
    }
}
