//report/mod.rs
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::parser::{extract_fields, extract_leaf_name};
use crate::registry::CategoryRegistry;
use crate::schema::ParameterSchema;
use crate::{Category, NameError, ParamValue, ParsedName};

/// One entry of a JMH JSON result file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    pub benchmark: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub threads: u32,
    #[serde(default)]
    pub forks: u32,
    pub primary_metric: PrimaryMetric,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryMetric {
    #[serde(deserialize_with = "lenient_f64")]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub score_error: f64,
    #[serde(default)]
    pub score_unit: String,
}

// JMH writes "NaN" as a string when an error bound cannot be computed.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("number out of range")),
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid float: {}", s))),
        Value::Null => Ok(f64::NAN),
        other => Err(serde::de::Error::custom(format!("expected float, got {}", other))),
    }
}

pub fn parse_report(json: &str) -> Result<Vec<BenchmarkResult>> {
    serde_json::from_str(json).context("Failed to parse JMH result JSON")
}

pub fn load_report<P: AsRef<Path>>(path: P) -> Result<Vec<BenchmarkResult>> {
    let text = fs::read_to_string(path.as_ref())
        .context(format!("Failed to read report: {:?}", path.as_ref()))?;
    let results = parse_report(&text)?;
    info!("Loaded {} benchmark result(s) from {:?}", results.len(), path.as_ref());
    Ok(results)
}

/// A benchmark result with its decoded name.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub benchmark: String,
    pub parsed: ParsedName,
    pub score: f64,
    pub score_error: f64,
    pub score_unit: String,
}

/// Decodes one result. In strict mode an incomplete name is an error; in
/// lenient mode it is kept with absent fields.
pub fn categorize_one(result: &BenchmarkResult, strict: bool) -> std::result::Result<Row, NameError> {
    let leaf = extract_leaf_name(&result.benchmark);
    let parsed = extract_fields(leaf);

    let parsed = if strict {
        parsed.validate(leaf)?.into()
    } else {
        if !parsed.is_complete() {
            warn!(
                "{}: missing {}",
                result.benchmark,
                parsed
                    .missing()
                    .iter()
                    .map(|c| c.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        parsed
    };

    Ok(Row {
        benchmark: result.benchmark.clone(),
        parsed,
        score: result.primary_metric.score,
        score_error: result.primary_metric.score_error,
        score_unit: result.primary_metric.score_unit.clone(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedReport {
    pub rows: Vec<Row>,
    pub registry: CategoryRegistry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// `None` collects rows where the category was absent.
    pub value: Option<ParamValue>,
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl CategorizedReport {
    pub fn from_rows(rows: Vec<Row>, schema: &ParameterSchema) -> Self {
        let mut registry = CategoryRegistry::from_schema(schema);
        for row in &rows {
            registry.record(&row.parsed);
        }
        Self { rows, registry }
    }

    /// Groups rows by `category`, in the order values were first seen.
    /// Rows lacking the category form a trailing group.
    pub fn group_by(&self, category: Category) -> Vec<Group> {
        let mut groups: Vec<Group> = self
            .registry
            .values(category.label())
            .unwrap_or(&[])
            .iter()
            .filter_map(|value| {
                let scores: Vec<f64> = self
                    .rows
                    .iter()
                    .filter(|r| r.parsed.get(category).as_ref() == Some(value))
                    .map(|r| r.score)
                    .collect();
                summarize(Some(value.clone()), &scores)
            })
            .collect();

        let absent: Vec<f64> = self
            .rows
            .iter()
            .filter(|r| r.parsed.get(category).is_none())
            .map(|r| r.score)
            .collect();
        groups.extend(summarize(None, &absent));
        groups
    }

    pub fn malformed(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| !r.parsed.is_complete())
    }
}

fn summarize(value: Option<ParamValue>, scores: &[f64]) -> Option<Group> {
    if scores.is_empty() {
        return None;
    }
    let (min, max, sum) = scores.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(min, max, sum), &s| (min.min(s), max.max(s), sum + s),
    );
    Some(Group {
        value,
        count: scores.len(),
        mean: sum / scores.len() as f64,
        min,
        max,
    })
}

pub fn categorize(
    results: &[BenchmarkResult],
    strict: bool,
) -> std::result::Result<CategorizedReport, NameError> {
    let rows = results
        .iter()
        .map(|r| categorize_one(r, strict))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(CategorizedReport::from_rows(
        rows,
        ParameterSchema::for_report(results),
    ))
}
