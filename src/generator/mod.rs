//generator/mod.rs
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::registry::CategoryRegistry;
use crate::report::CategorizedReport;
use crate::schema::ParameterSchema;
use crate::{Category, ABSENT_LABEL};

pub fn generate_schema<W: Write>(schema: &ParameterSchema, out: &mut W) -> Result<()> {
    writeln!(out, "{:<12} {:<8} GROUPABLE", "PARAMETER", "TYPE")?;
    for descriptor in schema.iter() {
        writeln!(
            out,
            "{:<12} {:<8} {}",
            descriptor.label,
            descriptor.value_type.to_string(),
            if descriptor.groupable { "yes" } else { "no" }
        )?;
    }
    Ok(())
}

pub fn generate_categories<W: Write>(registry: &CategoryRegistry, out: &mut W) -> Result<()> {
    for entry in registry.categories() {
        writeln!(out, "{}: {}", entry.name, entry.values.iter().join(", "))?;
    }
    Ok(())
}

/// Per-group score summary for one category.
pub fn generate_table<W: Write>(
    report: &CategorizedReport,
    category: Category,
    out: &mut W,
) -> Result<()> {
    let unit = report
        .rows
        .iter()
        .map(|r| r.score_unit.as_str())
        .find(|u| !u.is_empty())
        .unwrap_or("");

    writeln!(out, "Grouped by {} ({})", category, unit)?;
    writeln!(
        out,
        "{:<14} {:>6} {:>12} {:>12} {:>12}",
        category.label(),
        "COUNT",
        "MEAN",
        "MIN",
        "MAX"
    )?;
    for group in report.group_by(category) {
        let value = group
            .value
            .map(|v| v.to_string())
            .unwrap_or_else(|| ABSENT_LABEL.to_string());
        writeln!(
            out,
            "{:<14} {:>6} {:>12.3} {:>12.3} {:>12.3}",
            value, group.count, group.mean, group.min, group.max
        )?;
    }
    Ok(())
}

fn csv_header() -> Vec<&'static str> {
    let mut header = vec!["Benchmark"];
    header.extend(Category::ALL.iter().map(|c| c.label()));
    header.extend(["Score", "ScoreError", "ScoreUnit"]);
    header
}

fn write_csv_rows<W: Write>(report: &CategorizedReport, wtr: &mut csv::Writer<W>) -> Result<()> {
    wtr.write_record(csv_header())?;
    for row in &report.rows {
        let mut record = vec![row.benchmark.clone()];
        record.extend(
            Category::ALL
                .iter()
                .map(|c| row.parsed.get(*c).map(|v| v.to_string()).unwrap_or_default()),
        );
        record.push(row.score.to_string());
        record.push(row.score_error.to_string());
        record.push(row.score_unit.clone());
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// One CSV record per benchmark: name, the five parameters, then the score.
pub fn generate_csv<W: Write>(report: &CategorizedReport, out: &mut W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    write_csv_rows(report, &mut wtr)
}

pub fn generate_csv_file<P: AsRef<Path>>(report: &CategorizedReport, path: P) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path.as_ref())
        .context(format!("Failed to create CSV file: {:?}", path.as_ref()))?;
    write_csv_rows(report, &mut wtr)
}
