//! Integration tests for datadoc profiling.

use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

use datadoc::profile::{DetectedPattern, Distribution, IssueKind, PiiSignal};
use datadoc::{
    Column, Dataset, DatadocConfig, DatasetProfile, InferredType, Profiler, SamplingPolicy, Value,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn customers_csv() -> String {
    let mut content = String::from("order_id,customer_email,amount,order_date,status\n");
    for i in 1..=30 {
        let email = if i % 4 == 0 {
            String::new()
        } else {
            format!("user{}@example.com", i)
        };
        let status = if i % 3 == 0 { "shipped" } else { "pending" };
        content.push_str(&format!(
            "ORD{:03},{},{}.50,2024-01-{:02},{}\n",
            i, email, i * 10, i, status
        ));
    }
    content
}

// =============================================================================
// Basic Functionality Tests
// =============================================================================

#[test]
fn test_profile_csv_file() {
    let file = create_test_file(&customers_csv());
    let profile = Profiler::new().profile_file(file.path()).expect("Profiling failed");

    assert_eq!(profile.row_count, 30);
    assert_eq!(profile.column_count, 5);
    assert_eq!(
        profile.column_names(),
        vec!["order_id", "customer_email", "amount", "order_date", "status"]
    );

    let source = profile.source.as_ref().expect("source metadata");
    assert_eq!(source.format, "csv");
    assert_eq!(source.row_count, 30);
    assert!(source.hash.starts_with("sha256:"));
}

#[test]
fn test_column_types() {
    let file = create_test_file(&customers_csv());
    let profile = Profiler::new().profile_file(file.path()).unwrap();

    let types: Vec<InferredType> = profile.columns.iter().map(|c| c.inferred_type).collect();
    assert_eq!(
        types,
        vec![
            InferredType::String,
            InferredType::String,
            InferredType::Float,
            InferredType::Date,
            InferredType::String,
        ]
    );
}

#[test]
fn test_order_id_column() {
    let file = create_test_file(&customers_csv());
    let profile = Profiler::new().profile_file(file.path()).unwrap();
    let order_id = profile.column("order_id").unwrap();

    assert_eq!(order_id.unique_count, 30);
    assert!(order_id.is_unique);
    assert_eq!(order_id.detected_pattern, Some(DetectedPattern::IdCode));
    assert!(!order_id.pii_flag);
    assert_eq!(order_id.quality_score, 100.0);
}

#[test]
fn test_email_column_nulls_and_pii() {
    let file = create_test_file(&customers_csv());
    let profile = Profiler::new().profile_file(file.path()).unwrap();
    let email = profile.column("customer_email").unwrap();

    assert_eq!(email.null_count, 7);
    assert_eq!(email.null_count + email.non_null_count, email.row_count);
    assert_eq!(email.detected_pattern, Some(DetectedPattern::Email));
    assert!(email.pii_flag);
    assert!(email
        .pii_signals
        .contains(&PiiSignal::NameToken { token: "email".into() }));

    let issue = profile
        .quality_issues
        .iter()
        .find(|i| i.column == "customer_email")
        .expect("null issue");
    assert_eq!(issue.kind, IssueKind::HighNullRate);
}

#[test]
fn test_numeric_and_temporal_distributions() {
    let file = create_test_file(&customers_csv());
    let profile = Profiler::new().profile_file(file.path()).unwrap();

    let amount = profile.column("amount").unwrap();
    let numeric = amount.distribution.as_numeric().unwrap();
    assert_eq!(numeric.min, Some(10.5));
    assert_eq!(numeric.max, Some(300.5));
    assert_eq!(numeric.median, Some(155.5));

    let date = profile.column("order_date").unwrap();
    let temporal = date.distribution.as_temporal().unwrap();
    assert_eq!(temporal.min_date.as_deref(), Some("2024-01-01"));
    assert_eq!(temporal.range_days, Some(29));
}

#[test]
fn test_categorical_distribution() {
    let file = create_test_file(&customers_csv());
    let profile = Profiler::new().profile_file(file.path()).unwrap();

    let status = profile.column("status").unwrap();
    let cat = status.distribution.as_categorical().unwrap();
    assert_eq!(cat.most_common.as_deref(), Some("pending"));
    assert_eq!(cat.top_values[0].count, 20);
    assert_eq!(cat.top_values[1].count, 10);
    assert!(cat.is_categorical);
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn test_email_example_column() {
    let dataset = Dataset::new(
        "contacts",
        vec![Column::new(
            "customer_email",
            [Some("a@b.com"), Some("c@d.com"), None, Some("e@f.com")],
        )],
    )
    .unwrap();

    let profile = Profiler::new().profile(&dataset).unwrap();
    let column = &profile.columns[0];

    assert_eq!(column.null_percentage(), 25.0);
    assert_eq!(column.inferred_type, InferredType::String);
    assert_eq!(column.detected_pattern, Some(DetectedPattern::Email));
    assert!(column.pii_flag);
}

#[test]
fn test_all_null_column() {
    let dataset = Dataset::new("nulls", vec![Column::new("reading", vec![Value::Null; 10])]).unwrap();

    let profile = Profiler::new().profile(&dataset).unwrap();
    let column = &profile.columns[0];

    assert_eq!(column.null_percentage(), 100.0);
    assert_eq!(column.inferred_type, InferredType::Unknown);
    assert_eq!(column.distribution, Distribution::Undefined);
    assert_eq!(column.quality.completeness, 0.0);
    assert_eq!(column.quality_score, 0.0);
}

#[test]
fn test_header_only_file() {
    let file = create_test_file("a,b,c\n");
    let profile = Profiler::new().profile_file(file.path()).unwrap();

    assert_eq!(profile.row_count, 0);
    assert_eq!(profile.column_count, 3);
    assert!(profile.columns.iter().all(|c| c.null_rate == 0.0));
}

#[test]
fn test_duplicate_rows() {
    let file = create_test_file("a,b\n1,x\n1,x\n2,y\n1,x\n");
    let profile = Profiler::new().profile_file(file.path()).unwrap();
    assert_eq!(profile.duplicate_row_count, 2);
}

#[test]
fn test_mixed_column_falls_back_to_string() {
    let file = create_test_file("value\n1\n2.5\nhello\ntrue\n");
    let profile = Profiler::new().profile_file(file.path()).unwrap();
    assert_eq!(profile.columns[0].inferred_type, InferredType::String);
}

// =============================================================================
// Configuration and Sampling
// =============================================================================

#[test]
fn test_profile_with_config_file() {
    let config = DatadocConfig::from_yaml_str(
        "profiling:\n  sample_size: 10\n  sampling: random\n  seed: 3\n  correlation_analysis: false\n",
    )
    .unwrap();
    let profiler = Profiler::with_config(config.profiler_config().unwrap()).unwrap();

    let file = create_test_file(&customers_csv());
    let profile = profiler.profile_file(file.path()).unwrap();

    assert_eq!(profile.row_count, 10);
    assert_eq!(profile.sampled_from, Some(30));
    assert!(profile.correlations.is_none());
}

#[test]
fn test_random_sampling_is_reproducible() {
    let config = datadoc::ProfilerConfig {
        sampling: SamplingPolicy::random(12, 99),
        ..Default::default()
    };
    let profiler = Profiler::with_config(config).unwrap();
    let file = create_test_file(&customers_csv());

    let a = profiler.profile_file(file.path()).unwrap();
    let b = profiler.profile_file(file.path()).unwrap();
    assert_eq!(a.columns, b.columns);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_profile_save_and_load() {
    let file = create_test_file(&customers_csv());
    let profile = Profiler::new().profile_file(file.path()).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("profile.json");
    profile.save(&path).unwrap();

    let loaded = DatasetProfile::load(&path).unwrap();
    assert_eq!(loaded.dataset_name, profile.dataset_name);
    assert_eq!(loaded.column_names(), profile.column_names());
    assert_eq!(loaded.quality_issues, profile.quality_issues);
    assert_eq!(loaded.generated_at, profile.generated_at);
}

#[test]
fn test_profile_json_shape() {
    let dataset = Dataset::new("shape", vec![Column::new("n", [1i64, 2, 3])]).unwrap();
    let profile = Profiler::new().profile(&dataset).unwrap();
    let json = serde_json::to_value(&profile).unwrap();

    assert_eq!(json["dataset_name"], "shape");
    assert_eq!(json["columns"][0]["inferred_type"], "integer");
    assert_eq!(json["columns"][0]["distribution"]["kind"], "numeric");
    assert_eq!(json["columns"][0]["distribution"]["mean"], 2.0);
}

#[test]
fn test_load_missing_file_is_persistence_error() {
    let err = DatasetProfile::load("/nonexistent/profile.json").unwrap_err();
    assert!(matches!(err, datadoc::DatadocError::Persistence(_)));
}

#[test]
fn test_summary_text() {
    let file = create_test_file(&customers_csv());
    let profile = Profiler::new().profile_file(file.path()).unwrap();
    let summary = profile.summary();

    assert!(summary.contains("- Rows: 30"));
    assert!(summary.contains("- Columns: 5"));
    assert!(summary.contains("Quality Issues Found"));
}
