//! Tests for the operator matcher across dialects.

use std::collections::BTreeSet;

use rxcensus_analysis::engine::OperatorMatcher;
use rxcensus_core::types::Dialect;

fn ops(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// `.mapTo(` is not a use of `map`, `.map(` is.
#[test]
fn test_direct_call_sites() {
    let m = OperatorMatcher::new(Dialect::RxJava, &ops(&["map"])).unwrap();
    assert_eq!(m.count_text("foo.mapTo(x)")["map"], 0);
    assert_eq!(m.count_text("foo.map(x)")["map"], 1);
}

/// Only the first call after each `pipe(` is credited.
#[test]
fn test_pipeline_first_call_only() {
    let m = OperatorMatcher::new(Dialect::RxJs, &ops(&["map", "filter"])).unwrap();
    let counts = m.count_text("a.pipe(map(x), filter(y)).pipe(map(z))");
    assert_eq!(counts["map"], 2);
    assert_eq!(counts["filter"], 0);
}

/// A realistic Kotlin chain.
#[test]
fn test_kotlin_chain() {
    let m = OperatorMatcher::new(Dialect::RxKotlin, &ops(&["subscribeOn", "observeOn", "map"]))
        .unwrap();
    let source = r#"
        api.fetch()
            .subscribeOn(Schedulers.io())
            .map { it.items }
            .observeOn(AndroidSchedulers.mainThread())
            .subscribe(view::render)
    "#;
    let counts = m.count_text(source);
    assert_eq!(counts["subscribeOn"], 1);
    assert_eq!(counts["observeOn"], 1);
    // Trailing-lambda syntax has no parenthesis before `{`, and the pattern
    // stops at `.` so it cannot reach the next call's paren.
    assert_eq!(counts["map"], 0);
}

/// Trailing closures carry no parenthesis and are not counted.
#[test]
fn test_swift_trailing_closure() {
    let m = OperatorMatcher::new(Dialect::RxSwift, &ops(&["filter", "flatMap", "map"])).unwrap();
    let counts = m.count_bytes(b"xs.map { $0 }.filter(isEven).flatMap(f)");
    assert_eq!(counts["filter"], 1);
    assert_eq!(counts["flatMap"], 1);
    assert_eq!(counts["map"], 0);
}
