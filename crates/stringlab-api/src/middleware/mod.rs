//! Request middleware

pub mod logging;

pub use logging::logging_middleware;
