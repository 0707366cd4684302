//! Deterministic stand-in for a real extraction backend.

use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::future::join_all;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::result::{ExtractionResult, FieldValues};
use crate::models::schema::{FieldType, Schema};

use super::{ExtractionRequest, ExtractionService, InputFile, Result};

/// Extraction service that fabricates plausible values.
///
/// Every file succeeds unless registered with [`with_failure`]. Text and
/// number values depend only on the file name, field name and type. Date
/// values are today's date unless pinned with [`with_date`].
///
/// [`with_failure`]: MockExtractionService::with_failure
/// [`with_date`]: MockExtractionService::with_date
#[derive(Debug, Clone, Default)]
pub struct MockExtractionService {
    failing: HashSet<String>,
    date: Option<NaiveDate>,
    delay: Option<Duration>,
    service_error: Option<String>,
    requests: Arc<Mutex<Vec<ExtractionRequest>>>,
}

impl MockExtractionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a file name as failing.
    pub fn with_failure(mut self, file_name: impl Into<String>) -> Self {
        self.failing.insert(file_name.into());
        self
    }

    /// Use a fixed date for `date` fields instead of today.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Wait this long per file before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the whole call with a service error.
    pub fn with_service_error(mut self, message: impl Into<String>) -> Self {
        self.service_error = Some(message.into());
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ExtractionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    async fn extract_file(&self, file: &InputFile, schema: &Schema) -> ExtractionResult {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.contains(&file.name) {
            debug!("Mock extraction failed for {}", file.name);
            return ExtractionResult::failed(&file.name);
        }

        let date = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
            .format("%Y-%m-%d")
            .to_string();

        let mut data = FieldValues::with_capacity(schema.len());
        for field in schema {
            let value = match field.field_type {
                FieldType::Number => format!("${}", mock_amount(&file.name, &field.name)),
                FieldType::Date => date.clone(),
                FieldType::Text => format!("Sample {}", field.name),
            };
            data.insert(field.name.clone(), value);
        }

        ExtractionResult::success(&file.name, data)
    }
}

/// Stable amount in `[0.00, 999.99]` for a file/field pair.
fn mock_amount(file_name: &str, field_name: &str) -> Decimal {
    let mut hasher = DefaultHasher::new();
    file_name.hash(&mut hasher);
    field_name.hash(&mut hasher);
    let cents = (hasher.finish() % 100_000) as i64;
    Decimal::new(cents, 2)
}

#[async_trait]
impl ExtractionService for MockExtractionService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn extract(&self, request: &ExtractionRequest) -> Result<Vec<ExtractionResult>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if let Some(message) = &self.service_error {
            return Err(ExtractionError::Service(message.clone()));
        }

        let results = join_all(
            request
                .files
                .iter()
                .map(|file| self.extract_file(file, &request.schema)),
        )
        .await;

        Ok(results)
    }
}
