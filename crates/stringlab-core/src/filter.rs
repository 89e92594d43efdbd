//! Structured filter engine
//!
//! A [`FilterSet`] is an AND of [`Predicate`]s. An empty set matches every
//! record.

use serde::{ser::SerializeMap, Serialize, Serializer};
use serde_json::Value;

use crate::{analyzer::AnalysisRecord, error::FilterError};

/// A single constraint on an [`AnalysisRecord`]
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    IsPalindrome(bool),
    /// `length >= n`
    MinLength(f64),
    /// `length <= n`
    MaxLength(f64),
    /// `length > n`
    LongerThan(f64),
    /// `length < n`
    ShorterThan(f64),
    /// `word_count == n`
    WordCount(f64),
    Contains { needle: String, case_sensitive: bool },
}

impl Predicate {
    pub fn matches(&self, record: &AnalysisRecord) -> bool {
        let length = record.length as f64;
        match self {
            Predicate::IsPalindrome(expected) => record.is_palindrome == *expected,
            Predicate::MinLength(n) => length >= *n,
            Predicate::MaxLength(n) => length <= *n,
            Predicate::LongerThan(n) => length > *n,
            Predicate::ShorterThan(n) => length < *n,
            Predicate::WordCount(n) => record.word_count as f64 == *n,
            Predicate::Contains {
                needle,
                case_sensitive: true,
            } => record.string.contains(needle.as_str()),
            Predicate::Contains {
                needle,
                case_sensitive: false,
            } => record
                .string
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }

    /// Field name and value used when echoing the predicate back to clients
    pub fn describe(&self) -> (&'static str, Value) {
        match self {
            Predicate::IsPalindrome(b) => ("isPalindrome", Value::Bool(*b)),
            Predicate::MinLength(n) => ("minLength", number(*n)),
            Predicate::MaxLength(n) => ("maxLength", number(*n)),
            Predicate::LongerThan(n) => ("lengthGreaterThan", number(*n)),
            Predicate::ShorterThan(n) => ("lengthLessThan", number(*n)),
            Predicate::WordCount(n) => ("wordCount", number(*n)),
            Predicate::Contains {
                needle,
                case_sensitive: true,
            } => ("contains", Value::String(needle.clone())),
            Predicate::Contains {
                needle,
                case_sensitive: false,
            } => ("containsIgnoreCase", Value::String(needle.clone())),
        }
    }
}

// Integral values echo as JSON integers so `minLength=4` reads back as 4, not 4.0.
fn number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

/// Matched records together with their count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome<T> {
    pub count: usize,
    pub data: Vec<T>,
}

/// Conjunction of predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, record: &AnalysisRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }

    /// Keep the items whose record satisfies every predicate, preserving order
    pub fn apply<T, I>(&self, items: I) -> FilterOutcome<T>
    where
        T: AsRef<AnalysisRecord>,
        I: IntoIterator<Item = T>,
    {
        let data: Vec<T> = items
            .into_iter()
            .filter(|item| self.matches(item.as_ref()))
            .collect();
        FilterOutcome {
            count: data.len(),
            data,
        }
    }
}

impl From<Predicate> for FilterSet {
    fn from(predicate: Predicate) -> Self {
        Self::new().with(predicate)
    }
}

impl Serialize for FilterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.predicates.len()))?;
        for predicate in &self.predicates {
            let (key, value) = predicate.describe();
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

/// Raw, unvalidated filter parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains: Option<String>,
}

impl FilterParams {
    /// Validate every supplied parameter and build the corresponding predicates
    pub fn into_filter_set(self) -> Result<FilterSet, FilterError> {
        let mut filters = FilterSet::new();

        if let Some(raw) = self.is_palindrome {
            filters.push(Predicate::IsPalindrome(parse_bool("isPalindrome", &raw)?));
        }
        if let Some(raw) = self.min_length {
            filters.push(Predicate::MinLength(parse_number("minLength", &raw)?));
        }
        if let Some(raw) = self.max_length {
            filters.push(Predicate::MaxLength(parse_number("maxLength", &raw)?));
        }
        if let Some(raw) = self.word_count {
            filters.push(Predicate::WordCount(parse_number("wordCount", &raw)?));
        }
        if let Some(needle) = self.contains {
            filters.push(Predicate::Contains {
                needle,
                case_sensitive: true,
            });
        }

        Ok(filters)
    }
}

fn parse_bool(field: &'static str, raw: &str) -> Result<bool, FilterError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(FilterError::InvalidValue {
            field,
            value: raw.to_string(),
            expected: "'true' or 'false'",
        }),
    }
}

/// Parse a finite number; NaN, infinities and blanks are rejected.
pub fn parse_number(field: &'static str, raw: &str) -> Result<f64, FilterError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FilterError::InvalidValue {
            field,
            value: raw.to_string(),
            expected: "a number",
        })
}
