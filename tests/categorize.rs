use std::fs;

use benchcat::report::{self, BenchmarkResult};
use benchcat::{
    extract_fields, extract_leaf_name, get_schema, parallel, register_value, tokenize, Category,
    CategoryRegistry, NameError, ParamValue, ParsedName,
};

const JMH_RESULTS: &str = r#"[
    {"benchmark": "com.heliosapm.benchmarks.json.JSONUnmarshalling.DirectStringRead1Kb",
     "mode": "thrpt", "threads": 3, "forks": 1,
     "primaryMetric": {"score": 50.0, "scoreError": 1.0, "scoreUnit": "ops/ms"}},
    {"benchmark": "com.heliosapm.benchmarks.json.JSONUnmarshalling.DirectBufferRead1Kb",
     "mode": "thrpt", "threads": 3, "forks": 1,
     "primaryMetric": {"score": 70.0, "scoreError": 1.0, "scoreUnit": "ops/ms"}},
    {"benchmark": "com.heliosapm.benchmarks.json.JSONUnmarshalling.HeapStringRead118Kb",
     "mode": "thrpt", "threads": 3, "forks": 1,
     "primaryMetric": {"score": 2.0, "scoreError": 0.1, "scoreUnit": "ops/ms"}},
    {"benchmark": "com.heliosapm.benchmarks.json.JSONUnmarshalling.HeapBufferRead118Kb",
     "mode": "thrpt", "threads": 3, "forks": 1,
     "primaryMetric": {"score": 4.0, "scoreError": 0.1, "scoreUnit": "ops/ms"}}
]"#;

#[test]
fn qualified_name_to_fields() {
    let leaf = extract_leaf_name("suite.module.DirectStringRead118Kb");
    assert_eq!(leaf, "DirectStringRead118Kb");
    assert_eq!(tokenize(leaf).len(), 5);

    let parsed = extract_fields(leaf);
    assert_eq!(parsed.get(Category::Size), Some(ParamValue::Number(118)));
    assert_eq!(parsed.get(Category::SizeUnit), Some(ParamValue::from("Kb")));
    assert!(parsed.is_complete());
}

#[test]
fn lenient_then_strict() {
    let parsed = extract_fields("");
    assert_eq!(parsed, ParsedName::default());
    assert_eq!(parsed.validate(""), Err(NameError::EmptyInput));

    let err = extract_fields("HeapString").validate("HeapString").unwrap_err();
    assert_eq!(
        err,
        NameError::Malformed {
            name: "HeapString".into(),
            missing: vec![Category::Operation, Category::Size, Category::SizeUnit],
        }
    );
}

#[test]
fn registry_accumulates_across_names() {
    let mut registry = CategoryRegistry::from_schema(get_schema());
    let units: Vec<ParamValue> = ["DirectStringRead1Kb", "HeapStringWrite2Mb", "HeapBufferRead1Kb"]
        .iter()
        .filter_map(|n| extract_fields(n).size_unit)
        .map(|u| register_value("SizeUnit", u, &mut registry))
        .collect();
    assert_eq!(units.len(), 3);
    assert_eq!(
        registry.values("SizeUnit").unwrap(),
        &[ParamValue::from("Kb"), ParamValue::from("Mb")]
    );
}

#[test]
fn report_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results-tp.json");
    fs::write(&path, JMH_RESULTS).unwrap();

    let results: Vec<BenchmarkResult> = report::load_report(&path).unwrap();
    let categorized = report::categorize(&results, true).unwrap();
    assert_eq!(categorized, parallel::categorize_parallel(&results, true).unwrap());

    let by_source = categorized.group_by(Category::ParseSource);
    assert_eq!(by_source.len(), 2);
    assert_eq!(by_source[0].value, Some(ParamValue::from("String")));
    assert_eq!(by_source[0].mean, 26.0);
    assert_eq!(by_source[1].value, Some(ParamValue::from("Buffer")));
    assert_eq!(by_source[1].mean, 37.0);

    let by_size = categorized.group_by(Category::Size);
    assert_eq!(
        by_size.iter().map(|g| g.value.clone()).collect::<Vec<_>>(),
        vec![Some(ParamValue::Number(1)), Some(ParamValue::Number(118))]
    );
}

#[test]
fn missing_report_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = report::load_report(dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read report"));
}
