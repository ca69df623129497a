//! Property-based tests for profiling and glossary mapping.
//!
//! These tests use proptest to generate random datasets and column names and
//! verify the invariants that hold for every input:
//!
//! 1. **Totality**: one profile and one match result per column, in order
//! 2. **Count identities**: nulls plus non-nulls equal rows, unique never exceeds non-null
//! 3. **Ranges**: quality scores in [0, 100], confidences in [0, 1]
//! 4. **Determinism**: the same input always produces the same statistics
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p datadoc --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p datadoc --test property_tests
//! ```

use proptest::prelude::*;

use datadoc::glossary::{humanize, MatchType};
use datadoc::{Column, Dataset, GlossaryMapper, GlossaryTerm, Profiler, TermDictionary, Value};

// =============================================================================
// Test Strategies
// =============================================================================

/// A single cell, biased toward values that exercise type inference.
fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(Value::Integer),
        (-1e6f64..1e6).prop_map(Value::Float),
        any::<bool>().prop_map(Value::Boolean),
        "[0-9]{1,4}".prop_map(Value::Text),
        "[a-zA-Z ]{0,12}".prop_map(|s| Value::from_text(&s)),
        "[a-z]{1,6}@[a-z]{1,6}\\.com".prop_map(Value::Text),
        "20[0-9]{2}-0[1-9]-[0-2][1-9]".prop_map(Value::Text),
        prop_oneof![Just("NA"), Just("yes"), Just("no"), Just("1e400")]
            .prop_map(Value::from),
    ]
}

/// A dataset with 1-6 columns of equal length, up to 40 rows.
fn dataset() -> impl Strategy<Value = Dataset> {
    (1usize..=6, 0usize..=40).prop_flat_map(|(cols, rows)| {
        proptest::collection::vec(proptest::collection::vec(cell(), rows), cols).prop_map(
            |columns| {
                let columns = columns
                    .into_iter()
                    .enumerate()
                    .map(|(i, values)| Column::new(format!("col_{}", i), values))
                    .collect();
                Dataset::new("generated", columns).expect("aligned columns")
            },
        )
    })
}

/// Column names in the shapes seen in practice.
fn column_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}(_[a-z]{1,8}){0,3}",
        "[A-Z][a-z]{1,6}([A-Z][a-z]{1,6}){0,2}",
        "[a-zA-Z0-9_\\- ]{0,20}",
    ]
}

fn dictionary() -> TermDictionary {
    TermDictionary::from_terms([
        ("customer_id", GlossaryTerm::new("Customer Identifier")),
        ("customer_name", GlossaryTerm::new("Customer Name").with_pii(true)),
        ("order_date", GlossaryTerm::new("Order Date")),
        ("email", GlossaryTerm::new("Email Address").with_pii(true)),
    ])
}

// =============================================================================
// Profiling Properties
// =============================================================================

proptest! {
    #[test]
    fn profile_has_one_column_per_input_in_order(data in dataset()) {
        let profile = Profiler::new().profile(&data).unwrap();

        prop_assert_eq!(profile.columns.len(), data.column_count());
        for (i, (profile_col, input_col)) in profile.columns.iter().zip(data.columns()).enumerate() {
            prop_assert_eq!(&profile_col.name, &input_col.name);
            prop_assert_eq!(profile_col.position, i);
        }
    }

    #[test]
    fn count_identities_hold(data in dataset()) {
        let profile = Profiler::new().profile(&data).unwrap();

        for column in &profile.columns {
            prop_assert_eq!(column.null_count + column.non_null_count, column.row_count);
            prop_assert!(column.unique_count <= column.non_null_count);
            prop_assert_eq!(
                column.is_unique,
                column.unique_count == column.non_null_count && column.null_count == 0
            );
            prop_assert!((0.0..=1.0).contains(&column.null_rate));
        }
    }

    #[test]
    fn quality_scores_in_range(data in dataset()) {
        let profile = Profiler::new().profile(&data).unwrap();

        for column in &profile.columns {
            prop_assert!((0.0..=100.0).contains(&column.quality_score));
        }
        prop_assert!((0.0..=100.0).contains(&profile.quality_score));
    }

    #[test]
    fn profiling_is_deterministic(data in dataset()) {
        let profiler = Profiler::new();
        let a = profiler.profile(&data).unwrap();
        let b = profiler.profile(&data).unwrap();

        prop_assert_eq!(a.columns, b.columns);
        prop_assert_eq!(a.correlations, b.correlations);
        prop_assert_eq!(a.quality_issues, b.quality_issues);
        prop_assert_eq!(a.quality_score, b.quality_score);
    }

    #[test]
    fn correlations_are_bounded(data in dataset()) {
        let profile = Profiler::new().profile(&data).unwrap();

        if let Some(report) = profile.correlations {
            for pair in &report.pairs {
                if let Some(r) = pair.coefficient {
                    prop_assert!((-1.0..=1.0).contains(&r));
                }
            }
        }
    }
}

// =============================================================================
// Glossary Properties
// =============================================================================

proptest! {
    #[test]
    fn every_column_gets_one_result(names in proptest::collection::vec(column_name(), 0..20)) {
        let results = GlossaryMapper::new().map_columns(&dictionary(), &names);

        prop_assert_eq!(results.len(), names.len());
        for (result, name) in results.iter().zip(&names) {
            prop_assert_eq!(&result.column_name, name);
            prop_assert!((0.0..=1.0).contains(&result.confidence()));
            if result.match_type() == MatchType::Unmatched {
                prop_assert_eq!(result.confidence(), 0.0);
                prop_assert_eq!(result.business_name(), humanize(name));
            }
        }
    }

    #[test]
    fn mapping_is_deterministic(name in column_name()) {
        let mapper = GlossaryMapper::new();
        let dictionary = dictionary();
        prop_assert_eq!(mapper.resolve(&dictionary, &name), mapper.resolve(&dictionary, &name));
    }

    #[test]
    fn dictionary_keys_match_exactly(idx in 0usize..4) {
        let dictionary = dictionary();
        let key = dictionary.iter().nth(idx).map(|(k, _)| k.clone()).unwrap();
        let result = GlossaryMapper::new().resolve(&dictionary, &key);

        prop_assert_eq!(result.match_type(), MatchType::Exact);
        prop_assert_eq!(result.confidence(), 1.0);
    }
}
