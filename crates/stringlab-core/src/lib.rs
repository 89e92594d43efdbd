//! stringlab core
//!
//! Everything the HTTP layer needs that is not HTTP: the string analyzer, the
//! in-memory record store, the structured filter engine, and the
//! natural-language query interpreter that translates free text into a filter
//! predicate.

pub mod analyzer;
pub mod error;
pub mod filter;
pub mod query;
pub mod store;

pub use analyzer::{analyse, AnalysisRecord};
pub use error::{FilterError, QueryError, StoreError};
pub use filter::{FilterOutcome, FilterParams, FilterSet, Predicate};
pub use query::{Interpretation, QueryInterpreter};
pub use store::{InMemoryStringStore, StoredString, StringRepository};
