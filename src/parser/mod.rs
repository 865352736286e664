mod parsers;

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::{BenchmarkName, NameError, ParsedName};

pub use self::parsers::*;

// A capitalized word, a lone capital, or a run of digits. Alternation is
// leftmost-first so "Read" wins over "R".
const TOKEN_PATTERN: &str = r"[A-Z]?[a-z]+|[A-Z]|[0-9]+";

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

/// Splits a leaf name into word and digit tokens, left to right. Characters
/// matching neither are skipped. The token count is not checked.
///
/// `"DirectStringRead118Kb"` gives `["Direct", "String", "Read", "118", "Kb"]`.
pub fn tokenize(leaf_name: &str) -> Vec<&str> {
    token_regex()
        .find_iter(leaf_name)
        .map(|m| m.as_str())
        .collect()
}

/// Assigns the first five tokens to the name's fields by position.
///
/// Never fails: missing tokens leave their field `None`, a size token
/// without leading digits leaves `size` `None`, and tokens past the fifth
/// are ignored.
pub fn extract_fields(leaf_name: &str) -> ParsedName {
    let tokens = tokenize(leaf_name);
    let field = |i: usize| tokens.get(i).map(|t| t.to_string());

    let parsed = ParsedName {
        buffer_type: field(0),
        parse_source: field(1),
        operation: field(2),
        size: tokens.get(3).and_then(|t| parse_leading_int(t)),
        size_unit: field(4),
    };

    if tokens.len() > crate::FIELD_COUNT {
        debug!(
            "{}: ignoring {} trailing token(s)",
            leaf_name,
            tokens.len() - crate::FIELD_COUNT
        );
    }
    debug!("{} -> {:?}", leaf_name, parsed);
    parsed
}

/// Leaf extraction plus [`extract_fields`] on a fully qualified name.
pub fn parse_qualified(qualified_name: &str) -> ParsedName {
    extract_fields(extract_leaf_name(qualified_name))
}

/// Strict variant of [`parse_qualified`]: every field must be present.
pub fn parse_strict(qualified_name: &str) -> Result<BenchmarkName, NameError> {
    let leaf = extract_leaf_name(qualified_name);
    extract_fields(leaf).validate(leaf)
}
