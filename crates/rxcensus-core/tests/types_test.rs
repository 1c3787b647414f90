//! Tests for the shared domain types.

use proptest::prelude::*;

use rxcensus_core::types::{AllowList, Dialect, OperatorCatalog, RepositoryId, UsageTable};

#[test]
fn test_seeded_table_then_allow_listed_adds() {
    let catalog = OperatorCatalog::from_json_str(
        r#"{"rxjava": {"map": {}, "filter": {}}, "rxswift": {"flatMap": {}}}"#,
        "operands.json",
    )
    .unwrap();
    let allow = AllowList::from_json_str(r#"{"rxjava": ["a_b"]}"#, "allow_list.json").unwrap();

    let mut table = UsageTable::seeded(&catalog);
    let repo = RepositoryId::from_owner_and_name("a", "b");
    if allow.contains(Dialect::RxJava, repo.as_str()) {
        table.add(Dialect::RxJava, "map", &repo, 2);
        table.add(Dialect::RxJava, "filter", &repo, 0);
    }

    assert_eq!(table.get(Dialect::RxJava, "map", "a_b"), Some(2));
    assert_eq!(table.get(Dialect::RxJava, "filter", "a_b"), Some(0));
    assert!(table.counts(Dialect::RxSwift, "flatMap").unwrap().is_empty());
}

fn cell() -> impl Strategy<Value = (usize, usize, usize, u64)> {
    (0usize..5, 0usize..3, 0usize..4, 0u64..20)
}

fn build(cells: &[(usize, usize, usize, u64)]) -> UsageTable {
    const OPS: [&str; 3] = ["map", "filter", "merge"];
    let mut table = UsageTable::new();
    for &(d, o, r, n) in cells {
        let repo = RepositoryId::new(format!("owner_repo{r}"));
        table.add(Dialect::ALL[d], OPS[o], &repo, n);
    }
    table
}

proptest! {
    /// Any split of the same cell writes merges back to the same table.
    #[test]
    fn prop_merge_is_order_independent(
        cells in proptest::collection::vec(cell(), 0..40),
        split in 0usize..40,
    ) {
        let split = split.min(cells.len());
        let whole = build(&cells);
        let (left, right) = cells.split_at(split);
        let lr = build(left).merge(build(right));
        let rl = build(right).merge(build(left));
        prop_assert_eq!(&lr, &whole);
        prop_assert_eq!(&rl, &whole);
    }

    /// Reversing the write order does not change the table.
    #[test]
    fn prop_add_is_commutative(cells in proptest::collection::vec(cell(), 0..40)) {
        let mut reversed = cells.clone();
        reversed.reverse();
        prop_assert_eq!(build(&cells), build(&reversed));
    }
}
