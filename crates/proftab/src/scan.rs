//! Numeric token scanning.
//!
//! Profile and series files mix numbers with punctuation and names, so
//! values are pulled out of each line by pattern instead of by position.

use regex::Regex;
use std::sync::OnceLock;

/// Signed decimal with optional fraction and optional exponent.
///
/// An exponent is only taken when digits follow it, so `1e` yields `1`.
/// Digits are ASCII only; every match parses as an `f64`.
const NUMBER_PATTERN: &str = r"[-+]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][-+]?[0-9]+)?";

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NUMBER_PATTERN).expect("numeric token pattern is valid"))
}

/// Iterator over the numeric substrings of a line, left to right.
pub struct NumericTokens<'a> {
    inner: regex::Matches<'static, 'a>,
}

impl<'a> Iterator for NumericTokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(|m| m.as_str())
    }
}

/// Scan `line` for numeric tokens without allocating.
pub fn numeric_tokens(line: &str) -> NumericTokens<'_> {
    NumericTokens {
        inner: number_regex().find_iter(line),
    }
}

/// Collect the numeric tokens of `line` as owned strings.
pub fn scan_numbers(line: &str) -> Vec<String> {
    numeric_tokens(line).map(str::to_string).collect()
}
