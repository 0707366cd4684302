//! Core library for schema-driven document data extraction.
//!
//! This crate provides:
//! - Typed, ordered field schemas and a builder to edit them
//! - An extraction service interface with a deterministic mock backend
//! - A session owning saved schemas, results and the active schema
//! - Result tables, CSV export and dashboard statistics

pub mod error;
pub mod export;
pub mod extraction;
pub mod models;
pub mod schema;
pub mod session;
pub mod stats;

pub use error::{DocexError, ExportError, ExtractionError, Result, ValidationError};
pub use export::{CsvDialect, CsvExport, RecordDetail, ResultTable};
pub use extraction::{
    ExtractionRequest, ExtractionService, ExtractionTask, InputFile, MockExtractionService,
};
pub use models::config::DocexConfig;
pub use models::result::{ExtractionResult, ExtractionStatus, FieldValues};
pub use models::schema::{FieldType, Schema, SchemaField};
pub use schema::{FieldUpdate, SchemaBuilder, SchemaRegistry};
pub use session::Session;
pub use stats::DashboardStats;

/// Re-exported so callers can cancel extraction runs.
pub use tokio_util::sync::CancellationToken;
