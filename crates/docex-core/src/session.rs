//! Top-level state: saved schemas, results and the active schema.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{ExportError, ExtractionError, Result, ValidationError};
use crate::export::{self, CsvExport, RecordDetail, ResultTable};
use crate::extraction::{ExtractionRequest, ExtractionService, ExtractionTask};
use crate::models::config::DocexConfig;
use crate::models::result::{ExtractionResult, FieldValues};
use crate::models::schema::Schema;
use crate::schema::{SchemaBuilder, SchemaRegistry};
use crate::stats::DashboardStats;

/// Owns everything a user works with in one sitting.
///
/// Every operation either completes or leaves the session untouched.
#[derive(Debug, Clone, Default)]
pub struct Session {
    registry: SchemaRegistry,
    results: Vec<ExtractionResult>,
    active_schema: Option<Schema>,
    config: DocexConfig,
}

impl Session {
    pub fn new(config: DocexConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Session preloaded with the demo schemas and three demo results.
    pub fn demo(config: DocexConfig) -> Self {
        let registry = SchemaRegistry::demo();
        let active_schema = registry.get(0).cloned();

        let invoice = |number: &str, date: &str, amount: &str, company: &str| -> FieldValues {
            [
                ("Invoice Number", number),
                ("Date", date),
                ("Amount", amount),
                ("Company Name", company),
            ]
            .into_iter()
            .collect()
        };

        let results = vec![
            ExtractionResult::success(
                "invoice_001.pdf",
                invoice("INV-2024-001", "2024-03-15", "$1,250.00", "Tech Solutions Inc."),
            ),
            ExtractionResult::success(
                "invoice_002.pdf",
                invoice("INV-2024-002", "2024-03-16", "$2,780.50", "Digital Services Ltd."),
            ),
            ExtractionResult::failed("invoice_003.pdf"),
        ];

        Self {
            registry,
            results,
            active_schema,
            config,
        }
    }

    /// Replace the schema registry, e.g. with one loaded from disk.
    pub fn with_registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn results(&self) -> &[ExtractionResult] {
        &self.results
    }

    /// Schema of the most recent extraction.
    pub fn active_schema(&self) -> Option<&Schema> {
        self.active_schema.as_ref()
    }

    pub fn config(&self) -> &DocexConfig {
        &self.config
    }

    /// Validate the builder's fields and register the schema.
    pub fn save_schema(&mut self, builder: &SchemaBuilder) -> std::result::Result<usize, ValidationError> {
        let schema = builder.build()?;
        Ok(self.registry.push(schema))
    }

    /// Run the task's extraction and append its results.
    ///
    /// Stops early with [`ExtractionError::Cancelled`] when `cancel` fires
    /// and with [`ExtractionError::Timeout`] after the configured timeout.
    /// On success the extraction's schema becomes the active schema.
    pub async fn run_extraction(
        &mut self,
        task: &ExtractionTask,
        service: &dyn ExtractionService,
        cancel: &CancellationToken,
    ) -> Result<usize> {
        let request = task.prepare(&self.registry, &self.config.extraction)?;

        info!(
            "Extracting {} files with {} service against {}",
            request.files.len(),
            service.name(),
            request.schema.label(request.schema_index)
        );

        let timeout = self.config.extraction.timeout();
        let timeout_secs = self.config.extraction.timeout_secs;
        let extraction = async {
            match timeout {
                Some(limit) => tokio::time::timeout(limit, service.extract(&request))
                    .await
                    .unwrap_or_else(|_| Err(ExtractionError::Timeout(timeout_secs))),
                None => service.extract(&request).await,
            }
        };

        let results = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ExtractionError::Cancelled),
            outcome = extraction => outcome,
        };

        let results = results.inspect_err(|e| warn!("Extraction aborted: {}", e))?;
        check_results(&request, &results)?;

        for result in &results {
            if result.is_success() {
                debug!("Extracted {} ({} values)", result.file_name, result.data.len());
            } else {
                warn!("Extraction failed for {}", result.file_name);
            }
        }

        let count = results.len();
        self.active_schema = Some(request.schema);
        self.results.extend(results);

        Ok(count)
    }

    /// Table of all results against the active schema.
    pub fn table(&self) -> Option<ResultTable<'_>> {
        self.active_schema
            .as_ref()
            .map(|schema| ResultTable::new(schema, &self.results))
    }

    /// Detail view of one result.
    pub fn detail(&self, index: usize) -> Option<RecordDetail> {
        self.table()?.detail(index)
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_results(&self.results)
    }

    /// All results as CSV, under the configured file name.
    pub fn export_csv(&self) -> Result<CsvExport> {
        let empty = Schema::default();
        let schema = self.active_schema.as_ref().unwrap_or(&empty);
        let content = export::results_to_csv(schema, &self.results, self.config.export.dialect)?;

        Ok(CsvExport {
            file_name: self.config.export.results_file_name.clone(),
            content,
        })
    }

    /// One result as `Field,Value` CSV, named after its file.
    pub fn export_record_csv(&self, index: usize) -> Result<CsvExport> {
        let result = self.results.get(index).ok_or(ExportError::RecordOutOfRange {
            index,
            len: self.results.len(),
        })?;

        let empty = Schema::default();
        let schema = self.active_schema.as_ref().unwrap_or(&empty);
        let content = export::record_to_csv(schema, result, self.config.export.dialect)?;

        Ok(CsvExport {
            file_name: export::record_file_name(&result.file_name),
            content,
        })
    }
}

/// One result per requested file, each keyed only by schema fields.
fn check_results(
    request: &ExtractionRequest,
    results: &[ExtractionResult],
) -> std::result::Result<(), ExtractionError> {
    if results.len() != request.files.len() {
        return Err(ExtractionError::ResultCountMismatch {
            expected: request.files.len(),
            actual: results.len(),
        });
    }

    for result in results {
        if let Some(field) = result.foreign_fields(&request.schema).next() {
            return Err(ExtractionError::ForeignField {
                file: result.file_name.clone(),
                field: field.to_string(),
            });
        }
    }

    Ok(())
}
