//! Tabular views and CSV export of extraction results.

mod writer;
mod table;

pub use writer::{record_to_csv, results_to_csv};
pub use table::{RecordDetail, ResultTable, TableRow};

use serde::{Deserialize, Serialize};

/// Shown in tables for a missing or empty value.
pub const PLACEHOLDER: &str = "-";

/// File name for a bulk export.
pub const RESULTS_FILE_NAME: &str = "extraction_results.csv";

/// File name for a single-record export.
pub fn record_file_name(file_name: &str) -> String {
    format!("{}_extraction.csv", file_name)
}

/// A CSV document ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested download file name.
    pub file_name: String,
    /// CSV text.
    pub content: String,
}

/// CSV output flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvDialect {
    /// Cells joined with `,` as-is. Commas, quotes and newlines inside
    /// values are not escaped.
    #[default]
    Plain,
    /// RFC 4180 quoting for cells that need it.
    Quoted,
}
