//! Data models for schemas, results and configuration.

pub mod config;
pub mod result;
pub mod schema;
