//lib.rs
pub mod collections;
pub mod generator;
pub mod parallel;
pub mod parser;
pub mod registry;
pub mod report;
pub mod schema;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use crate::parser::{extract_fields, extract_leaf_name, parse_strict, tokenize};
pub use crate::registry::{register_value, CategoryRegistry};
pub use crate::schema::{get_schema, ParameterDescriptor, ParameterSchema};

pub const FIELD_COUNT: usize = 5;       // Tokens a well-formed name decomposes into
pub const ABSENT_LABEL: &str = "-";     // Display for a missing field

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    BufferType,
    ParseSource,
    Operation,
    Size,
    SizeUnit,
}

impl Category {
    /// All categories in token order.
    pub const ALL: [Category; FIELD_COUNT] = [
        Category::BufferType,
        Category::ParseSource,
        Category::Operation,
        Category::Size,
        Category::SizeUnit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::BufferType => "BufferType",
            Category::ParseSource => "ParseSource",
            Category::Operation => "Operation",
            Category::Size => "Size",
            Category::SizeUnit => "SizeUnit",
        }
    }

    /// Zero-based index of the token this category is read from.
    pub fn position(self) -> usize {
        self as usize
    }

    pub fn value_type(self) -> ValueType {
        match self {
            Category::Size => ValueType::Number,
            _ => ValueType::String,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "Unit" is the label older report UIs used for the size unit column
        if s.eq_ignore_ascii_case("unit") {
            return Ok(Category::SizeUnit);
        }
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Number,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => f.write_str("string"),
            ValueType::Number => f.write_str("number"),
        }
    }
}

/// A single observed field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamValue {
    Text(String),
    Number(u64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        ParamValue::Number(n)
    }
}

/// Fields decoded from a leaf name. Every position is optional: a name that
/// yields fewer than five tokens leaves the trailing fields empty, and a
/// size token that is not a number leaves `size` empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedName {
    pub buffer_type: Option<String>,
    pub parse_source: Option<String>,
    pub operation: Option<String>,
    pub size: Option<u64>,
    pub size_unit: Option<String>,
}

impl ParsedName {
    pub fn get(&self, category: Category) -> Option<ParamValue> {
        match category {
            Category::BufferType => self.buffer_type.as_deref().map(ParamValue::from),
            Category::ParseSource => self.parse_source.as_deref().map(ParamValue::from),
            Category::Operation => self.operation.as_deref().map(ParamValue::from),
            Category::Size => self.size.map(ParamValue::Number),
            Category::SizeUnit => self.size_unit.as_deref().map(ParamValue::from),
        }
    }

    /// Categories with no value, in token order.
    pub fn missing(&self) -> Vec<Category> {
        Category::ALL
            .iter()
            .copied()
            .filter(|c| self.get(*c).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Promote to a [`BenchmarkName`], reporting which positions were absent.
    /// `source` is the leaf name the fields came from and is only used in the error.
    pub fn validate(self, source: &str) -> Result<BenchmarkName, NameError> {
        if source.is_empty() {
            return Err(NameError::EmptyInput);
        }
        match self {
            ParsedName {
                buffer_type: Some(buffer_type),
                parse_source: Some(parse_source),
                operation: Some(operation),
                size: Some(size),
                size_unit: Some(size_unit),
            } => Ok(BenchmarkName {
                buffer_type,
                parse_source,
                operation,
                size,
                size_unit,
            }),
            partial => Err(NameError::Malformed {
                name: source.to_string(),
                missing: partial.missing(),
            }),
        }
    }
}

/// A benchmark name with every field present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BenchmarkName {
    pub buffer_type: String,
    pub parse_source: String,
    pub operation: String,
    pub size: u64,
    pub size_unit: String,
}

impl From<BenchmarkName> for ParsedName {
    fn from(name: BenchmarkName) -> Self {
        ParsedName {
            buffer_type: Some(name.buffer_type),
            parse_source: Some(name.parse_source),
            operation: Some(name.operation),
            size: Some(name.size),
            size_unit: Some(name.size_unit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("benchmark name is empty")]
    EmptyInput,
    #[error("malformed benchmark name {name:?}: missing {}", format_missing(.missing))]
    Malformed { name: String, missing: Vec<Category> },
}

fn format_missing(missing: &[Category]) -> String {
    missing
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ")
}
