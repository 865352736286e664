//schema/mod.rs
use std::sync::OnceLock;

use crate::report::BenchmarkResult;
use crate::{Category, ValueType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub label: &'static str,
    pub value_type: ValueType,
    pub groupable: bool,
}

/// The ordered set of parameters a benchmark name encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSchema {
    entries: Vec<ParameterDescriptor>,
}

impl ParameterSchema {
    fn fixed() -> Self {
        let entries = Category::ALL
            .iter()
            .map(|c| ParameterDescriptor {
                label: c.label(),
                value_type: c.value_type(),
                groupable: true,
            })
            .collect();
        Self { entries }
    }

    /// Schema for a loaded report. The report is not inspected yet; every
    /// report shares the fixed schema.
    pub fn for_report(_results: &[BenchmarkResult]) -> &'static ParameterSchema {
        get_schema()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.entries.iter()
    }

    pub fn get(&self, label: &str) -> Option<&ParameterDescriptor> {
        self.entries.iter().find(|d| d.label == label)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.entries.iter().map(|d| d.label).collect()
    }
}

pub fn get_schema() -> &'static ParameterSchema {
    static SCHEMA: OnceLock<ParameterSchema> = OnceLock::new();
    SCHEMA.get_or_init(ParameterSchema::fixed)
}
