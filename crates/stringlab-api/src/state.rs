//! Application state for the API server

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use stringlab_core::{InMemoryStringStore, QueryInterpreter, StringRepository};

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Analysed strings keyed by exact value
    pub repository: Arc<dyn StringRepository>,
    /// Natural-language query interpreter
    pub interpreter: Arc<QueryInterpreter>,
    /// Requests slower than this are logged as warnings
    pub slow_request_threshold: Duration,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Create state over the given repository
    pub fn new(repository: Arc<dyn StringRepository>) -> Self {
        Self {
            repository,
            interpreter: Arc::new(QueryInterpreter::with_defaults()),
            slow_request_threshold: Duration::from_millis(100),
            start_time: Instant::now(),
        }
    }

    /// Create state backed by an empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStringStore::new()))
    }

    /// Set the slow-request warning threshold
    pub fn with_slow_request_threshold(mut self, threshold: Duration) -> Self {
        self.slow_request_threshold = threshold;
        self
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
