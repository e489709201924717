// tests/satisfies_disjoint.rs
// ============================================================================
// Module: satisfies() — disjoint-subset evaluation
// Description: The minimal-matching-subset search, its divergence from the
//              non-disjoint evaluator, and the pruning optimizations.
// ============================================================================
//! ## Overview
//! Integration tests for disjoint-mode evaluation of `All` criteria — the
//! hard part of this crate.

mod support;

use grant_lang::{satisfies_with_mode, Criterion, Principal};
use support::ensure;
use support::TestResult;

macro_rules! check {
    ($cond:expr $(,)?) => {{
        ensure($cond, concat!("Assertion failed: ", stringify!($cond)))?;
    }};
}

fn employee_investor_criterion() -> TestResult<Criterion> {
    Ok(Criterion::all([
        Criterion::role("employee")?,
        Criterion::role_with_count("investor", 2)?,
    ])?)
}

// ============================================================================
// SECTION: Non-disjoint vs disjoint divergence
// ============================================================================

#[test]
fn disjoint_mode_rejects_what_non_disjoint_mode_accepts() -> TestResult {
    let p1 = Principal::new(Some("1"), Some(["employee", "investor"]))?;
    let p2 = Principal::new(Some("2"), Some(["investor"]))?;
    let criterion = employee_investor_criterion()?;
    let group = vec![p1, p2];

    check!(satisfies_with_mode(group.clone(), criterion.clone(), false)?);
    check!(!satisfies_with_mode(group, criterion, true)?);
    Ok(())
}

#[test]
fn adding_an_employee_remediates_the_disjoint_failure() -> TestResult {
    let p1 = Principal::new(Some("1"), Some(["employee", "investor"]))?;
    let p2 = Principal::new(Some("2"), Some(["investor"]))?;
    let p3 = Principal::new(Some("3"), Some(["employee"]))?;
    let criterion = employee_investor_criterion()?;
    check!(satisfies_with_mode(vec![p1, p2, p3], criterion, true)?);
    Ok(())
}

#[test]
fn adding_an_investor_remediates_the_disjoint_failure() -> TestResult {
    let p1 = Principal::new(Some("1"), Some(["employee", "investor"]))?;
    let p2 = Principal::new(Some("2"), Some(["investor"]))?;
    let p3 = Principal::new(Some("3"), Some(["investor"]))?;
    let criterion = employee_investor_criterion()?;
    check!(satisfies_with_mode(vec![p1, p2, p3], criterion, true)?);
    Ok(())
}

#[test]
fn adding_a_dual_role_principal_remediates_the_disjoint_failure() -> TestResult {
    let p1 = Principal::new(Some("1"), Some(["employee", "investor"]))?;
    let p2 = Principal::new(Some("2"), Some(["investor"]))?;
    let p3 = Principal::new(Some("3"), Some(["employee", "investor"]))?;
    let criterion = employee_investor_criterion()?;
    check!(satisfies_with_mode(vec![p1, p2, p3], criterion, true)?);
    Ok(())
}

// ============================================================================
// SECTION: Structural cases
// ============================================================================

#[test]
fn singleton_all_delegates_to_its_only_child() -> TestResult {
    let p = Principal::with_id("Bob")?;
    let criterion = Criterion::all([Criterion::id("Bob")?])?;
    check!(satisfies_with_mode(p, criterion, true)?);
    Ok(())
}

#[test]
fn three_way_conjunction_finds_a_disjoint_partition() -> TestResult {
    let bob = Principal::with_id("Bob")?;
    let employee = Principal::new(Some("e"), Some(["employee"]))?;
    let investor = Principal::new(Some("i"), Some(["investor"]))?;
    let criterion = Criterion::all([
        Criterion::id("Bob")?,
        Criterion::role("employee")?,
        Criterion::role("investor")?,
    ])?;
    check!(satisfies_with_mode(vec![bob, employee, investor], criterion, true)?);
    Ok(())
}

#[test]
fn three_way_conjunction_fails_when_one_principal_must_cover_two_conjuncts() -> TestResult {
    let dual = Principal::new(Some("1"), Some(["employee", "investor"]))?;
    let criterion = Criterion::all([
        Criterion::id("Bob")?,
        Criterion::role("employee")?,
        Criterion::role("investor")?,
    ])?;
    check!(!satisfies_with_mode(vec![dual], criterion, true)?);
    Ok(())
}

#[test]
fn nested_any_inside_all_shares_the_group_with_its_sibling() -> TestResult {
    // The Any's alternatives are not required to be disjoint from the
    // sibling conjunct of the enclosing All; only All enforces disjointness,
    // and only among its own direct children.
    let dual = Principal::new(Some("1"), Some(["employee", "investor"]))?;
    let criterion = Criterion::all([
        Criterion::role("employee")?,
        Criterion::any([Criterion::role("investor")?, Criterion::id("nobody")?])?,
    ])?;
    // Disjoint All still needs two distinct principals even though the Any
    // branch itself doesn't enforce disjointness internally: "employee" and
    // "investor" are sibling conjuncts of the outer All.
    check!(!satisfies_with_mode(vec![dual], criterion, true)?);
    Ok(())
}

#[test]
fn unsatisfiable_role_threshold_yields_empty_search() -> TestResult {
    let p = Principal::with_roles(["employee"])?;
    let criterion = Criterion::role_with_count("employee", 5)?;
    check!(!satisfies_with_mode(vec![p], criterion, true)?);
    Ok(())
}
