use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use anyhow::Result;
use log::{info, warn};

use benchcat::{extract_leaf_name, generator, get_schema, parallel, parser, report, Category, ABSENT_LABEL};

#[derive(Parser)]
#[command(
    version,
    about,
    long_about = None,
    before_help = "Splits JMH benchmark names like DirectStringRead118Kb into typed parameters."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one or more fully qualified benchmark names
    Parse {
        /// Benchmark names, e.g. suite.Bench.DirectStringRead118Kb
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,

        /// Fail on names that do not decode into all five parameters
        #[arg(long)]
        strict: bool,
    },
    /// Print the parameter schema
    Schema,
    /// Summarize a JMH JSON result file grouped by one parameter
    Report {
        /// Path to the JMH result file (JSON)
        #[arg(value_name = "JSON")]
        report: PathBuf,

        /// Parameter to group by
        #[arg(short, long, value_name = "CATEGORY", default_value = "BufferType")]
        group_by: Category,

        /// Also write one CSV row per benchmark to this file
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Fail on names that do not decode into all five parameters
        #[arg(long)]
        strict: bool,

        /// Decode names in parallel
        #[arg(long)]
        parallel: bool,
    },
    /// List the distinct values seen per parameter in a JMH result file
    Categories {
        /// Path to the JMH result file (JSON)
        #[arg(value_name = "JSON")]
        report: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Parse { names, strict } => {
            for name in &names {
                if strict {
                    let decoded = parser::parse_strict(name)?;
                    writeln!(
                        out,
                        "{}: BufferType={} ParseSource={} Operation={} Size={} SizeUnit={}",
                        extract_leaf_name(name),
                        decoded.buffer_type,
                        decoded.parse_source,
                        decoded.operation,
                        decoded.size,
                        decoded.size_unit
                    )?;
                } else {
                    let parsed = parser::parse_qualified(name);
                    let fields = Category::ALL
                        .iter()
                        .map(|c| {
                            let value = parsed
                                .get(*c)
                                .map(|v| v.to_string())
                                .unwrap_or_else(|| ABSENT_LABEL.to_string());
                            format!("{}={}", c, value)
                        })
                        .collect::<Vec<_>>()
                        .join(" ");
                    writeln!(out, "{}: {}", extract_leaf_name(name), fields)?;
                    if !parsed.is_complete() {
                        warn!("{} did not decode into all five parameters", name);
                    }
                }
            }
        },
        Commands::Schema => {
            generator::generate_schema(get_schema(), &mut out)?;
        },
        Commands::Report { report: path, group_by, csv, strict, parallel: use_parallel } => {
            let results = report::load_report(&path)?;
            let categorized = if use_parallel {
                parallel::categorize_parallel(&results, strict)?
            } else {
                report::categorize(&results, strict)?
            };
            generator::generate_table(&categorized, group_by, &mut out)?;
            if let Some(csv_path) = csv {
                generator::generate_csv_file(&categorized, &csv_path)?;
                info!("CSV written to: {}", csv_path.display());
            }
        },
        Commands::Categories { report: path } => {
            let results = report::load_report(&path)?;
            let categorized = report::categorize(&results, false)?;
            generator::generate_categories(&categorized.registry, &mut out)?;
        },
    }
    Ok(())
}
