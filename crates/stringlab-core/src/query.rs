//! Natural-language query interpretation
//!
//! A query is checked against an ordered list of phrase templates. The first
//! template that matches builds the predicate; templates are never combined.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::{
    error::QueryError,
    filter::{parse_number, FilterSet, Predicate},
};

static LONGER_THAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\blonger\s+than\s+(\d+)").expect("valid regex"));
static SHORTER_THAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bshorter\s+than\s+(\d+)").expect("valid regex"));
static CONTAINS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bcontains\s+"?([\p{L}\p{N} _-]+)"?"#).expect("valid regex"));

enum Matcher {
    /// Any of the phrases occurs in the lowercased query
    AnyOf(&'static [&'static str]),
    /// The pattern matches; its first group is handed to the builder
    Pattern(&'static Lazy<Regex>),
}

impl Matcher {
    /// `None` when the template does not apply, otherwise the captured token (empty for phrases)
    fn test<'q>(&self, query: &'q str, lowered: &str) -> Option<&'q str> {
        match self {
            Matcher::AnyOf(phrases) => phrases
                .iter()
                .any(|phrase| lowered.contains(phrase))
                .then_some(""),
            Matcher::Pattern(regex) => regex
                .captures(query)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str()),
        }
    }
}

struct Template {
    name: &'static str,
    matcher: Matcher,
    build: fn(&str) -> Result<Predicate, QueryError>,
}

/// Result of interpreting one query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    /// The query with surrounding whitespace removed
    pub original: String,
    pub parsed_filters: FilterSet,
}

/// Ordered phrase-template interpreter
pub struct QueryInterpreter {
    templates: Vec<Template>,
}

impl QueryInterpreter {
    pub fn with_defaults() -> Self {
        Self {
            templates: default_templates(),
        }
    }

    /// Interpret a query. Absent or blank input is [`QueryError::Missing`].
    pub fn interpret(&self, query: Option<&str>) -> Result<Interpretation, QueryError> {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or(QueryError::Missing)?;
        let lowered = query.to_lowercase();

        for template in &self.templates {
            if let Some(token) = template.matcher.test(query, &lowered) {
                let predicate = (template.build)(token)?;
                debug!(template = template.name, ?predicate, "interpreted query");
                return Ok(Interpretation {
                    original: query.to_string(),
                    parsed_filters: FilterSet::from(predicate),
                });
            }
        }

        Err(QueryError::Uninterpretable(query.to_string()))
    }
}

impl Default for QueryInterpreter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn length_bound(token: &str) -> Result<f64, QueryError> {
    parse_number("length", token).map_err(|_| QueryError::InvalidNumber(token.to_string()))
}

fn default_templates() -> Vec<Template> {
    vec![
        Template {
            name: "palindrome",
            matcher: Matcher::AnyOf(&["palind"]),
            build: |_| Ok(Predicate::IsPalindrome(true)),
        },
        Template {
            name: "single_word",
            matcher: Matcher::AnyOf(&["single word", "single-word"]),
            build: |_| Ok(Predicate::WordCount(1.0)),
        },
        Template {
            name: "longer_than",
            matcher: Matcher::Pattern(&LONGER_THAN),
            build: |token| length_bound(token).map(Predicate::LongerThan),
        },
        Template {
            name: "shorter_than",
            matcher: Matcher::Pattern(&SHORTER_THAN),
            build: |token| length_bound(token).map(Predicate::ShorterThan),
        },
        Template {
            name: "contains",
            matcher: Matcher::Pattern(&CONTAINS),
            build: |token| {
                let needle = token.trim();
                if needle.is_empty() {
                    return Err(QueryError::Uninterpretable(token.to_string()));
                }
                Ok(Predicate::Contains {
                    needle: needle.to_string(),
                    case_sensitive: false,
                })
            },
        },
    ]
}
