//! User selection of schema and files for one extraction.

use tracing::debug;

use crate::error::ValidationError;
use crate::models::config::ExtractionSettings;
use crate::schema::SchemaRegistry;

use super::{ExtractionRequest, InputFile};

/// Schema and file selection waiting to be run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionTask {
    schema_index: Option<usize>,
    files: Vec<InputFile>,
}

impl ExtractionTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_schema(&mut self, index: usize) -> &mut Self {
        self.schema_index = Some(index);
        self
    }

    pub fn clear_schema(&mut self) -> &mut Self {
        self.schema_index = None;
        self
    }

    /// Replace the file selection.
    pub fn select_files(&mut self, files: Vec<InputFile>) -> &mut Self {
        debug!("{} files selected", files.len());
        self.files = files;
        self
    }

    pub fn schema_index(&self) -> Option<usize> {
        self.schema_index
    }

    pub fn files(&self) -> &[InputFile] {
        &self.files
    }

    /// Validate the selection and snapshot it into a request.
    ///
    /// Checks, in order: a schema is selected, it exists, at least one
    /// file is selected, and no file exceeds the size limit.
    pub fn prepare(
        &self,
        registry: &SchemaRegistry,
        settings: &ExtractionSettings,
    ) -> Result<ExtractionRequest, ValidationError> {
        let schema_index = self.schema_index.ok_or(ValidationError::NoSchemaSelected)?;

        let schema = registry
            .get(schema_index)
            .ok_or(ValidationError::SchemaIndexOutOfRange {
                index: schema_index,
                len: registry.len(),
            })?;

        if self.files.is_empty() {
            return Err(ValidationError::NoFilesSelected);
        }

        if let Some(limit_bytes) = settings.max_file_size_bytes() {
            if let Some(file) = self.files.iter().find(|f| f.size_bytes > limit_bytes) {
                return Err(ValidationError::FileTooLarge {
                    name: file.name.clone(),
                    size_bytes: file.size_bytes,
                    limit_bytes,
                });
            }
        }

        Ok(ExtractionRequest {
            schema_index,
            schema: schema.clone(),
            files: self.files.clone(),
        })
    }
}
