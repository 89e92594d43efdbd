#![warn(missing_docs)]

//! stringlab RESTful API
//!
//! Accepts strings, stores their analysis in memory keyed by the exact value,
//! and serves retrieval, structured filtering, natural-language filtering,
//! and deletion over HTTP.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use server::ApiServer;
pub use state::AppState;
