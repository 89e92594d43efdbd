//! API request and response models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stringlab_core::{FilterParams, StoredString};
use utoipa::{IntoParams, ToSchema};

/// String creation request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateStringRequest {
    /// String to analyse and store
    pub value: String,
}

/// Stored string with its analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StringResponse {
    /// The original value
    pub string: String,
    /// Number of Unicode scalar values
    pub length: usize,
    /// Whether the alphanumeric, lowercased projection is a palindrome
    pub is_palindrome: bool,
    /// Whitespace-delimited word count
    pub word_count: usize,
    /// Number of distinct characters
    pub unique_characters: usize,
    /// Occurrences per character
    pub character_frequency: BTreeMap<String, usize>,
    /// Hex SHA-256 of the UTF-8 bytes
    pub sha256: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<&StoredString> for StringResponse {
    fn from(stored: &StoredString) -> Self {
        let analysis = &stored.analysis;
        Self {
            string: analysis.string.clone(),
            length: analysis.length,
            is_palindrome: analysis.is_palindrome,
            word_count: analysis.word_count,
            unique_characters: analysis.unique_characters,
            character_frequency: analysis
                .character_frequency
                .iter()
                .map(|(c, n)| (c.to_string(), *n))
                .collect(),
            sha256: analysis.sha256.clone(),
            created_at: stored.created_at,
        }
    }
}

/// Query parameters for string listing
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListStringsQuery {
    /// `true` or `false`
    #[serde(alias = "is_palindrome")]
    pub is_palindrome: Option<String>,
    /// Minimum length, inclusive
    #[serde(alias = "min_length")]
    pub min_length: Option<String>,
    /// Maximum length, inclusive
    #[serde(alias = "max_length")]
    pub max_length: Option<String>,
    /// Exact word count
    #[serde(alias = "word_count")]
    pub word_count: Option<String>,
    /// Case-sensitive substring
    pub contains: Option<String>,
}

impl From<ListStringsQuery> for FilterParams {
    fn from(query: ListStringsQuery) -> Self {
        Self {
            is_palindrome: query.is_palindrome,
            min_length: query.min_length,
            max_length: query.max_length,
            word_count: query.word_count,
            contains: query.contains,
        }
    }
}

/// Query parameters for natural-language filtering
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NaturalLanguageQuery {
    /// Free-text query, e.g. `strings longer than 5`
    pub q: Option<String>,
}

/// Filtered string list response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StringListResponse {
    /// Number of matching strings
    pub count: usize,
    /// Matching strings
    pub data: Vec<StringResponse>,
    /// Accepted filters
    #[schema(value_type = Object)]
    pub filters_applied: serde_json::Value,
}

/// How a natural-language query was understood
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterpretedQuery {
    /// The query with surrounding whitespace removed
    pub original: String,
    /// Resulting filter
    #[schema(value_type = Object)]
    pub parsed_filters: serde_json::Value,
}

/// Natural-language filter response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NaturalLanguageResponse {
    /// Number of matching strings
    pub count: usize,
    /// Matching strings
    pub data: Vec<StringResponse>,
    /// Interpretation of the query
    pub interpreted_query: InterpretedQuery,
}

/// API health response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Number of stored strings
    pub stored_strings: usize,
}

/// Error payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable kind
    pub kind: String,
}
