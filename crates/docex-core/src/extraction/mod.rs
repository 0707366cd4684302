//! Extraction requests and the service interface that answers them.

mod mock;
mod task;

pub use mock::MockExtractionService;
pub use task::ExtractionTask;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::models::result::ExtractionResult;
use crate::models::schema::Schema;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// A file selected for extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFile {
    /// File name shown in results.
    pub name: String,

    /// Size in bytes.
    pub size_bytes: u64,

    /// Location on disk, when the file came from one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            path: None,
        }
    }

    /// Describe a file on disk.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string();

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            path: Some(path.to_path_buf()),
        })
    }
}

/// A validated request: the files and the schema to extract them against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// Index of the schema in the registry.
    pub schema_index: usize,

    /// Schema snapshot at request time.
    pub schema: Schema,

    /// Files to extract, in selection order.
    pub files: Vec<InputFile>,
}

/// Backend that extracts schema fields from documents.
///
/// Implementations return exactly one result per requested file, in
/// request order. Each result succeeds or fails on its own and only
/// carries keys from the request's schema.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    /// Service name for logs.
    fn name(&self) -> &str;

    /// Extract every file in the request.
    async fn extract(&self, request: &ExtractionRequest) -> Result<Vec<ExtractionResult>>;
}
