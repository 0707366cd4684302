//! Result table rendered against a schema.

use std::fmt;

use serde::Serialize;

use crate::models::result::{ExtractionResult, ExtractionStatus};
use crate::models::schema::Schema;

use super::PLACEHOLDER;

/// One table row: file, status and one cell per schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub file_name: String,
    pub status: ExtractionStatus,
    pub cells: Vec<String>,
}

/// Every field/value pair of one selected result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDetail {
    pub file_name: String,
    pub status: ExtractionStatus,
    pub fields: Vec<(String, String)>,
}

impl fmt::Display for RecordDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.file_name)?;
        writeln!(f, "Status: {}", self.status)?;
        for (name, value) in &self.fields {
            writeln!(f, "  {}: {}", name, value)?;
        }
        Ok(())
    }
}

/// Results laid out in schema column order.
#[derive(Debug, Clone, Copy)]
pub struct ResultTable<'a> {
    schema: &'a Schema,
    results: &'a [ExtractionResult],
}

impl<'a> ResultTable<'a> {
    pub fn new(schema: &'a Schema, results: &'a [ExtractionResult]) -> Self {
        Self { schema, results }
    }

    /// `File Name`, `Status`, then the schema's field names.
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["File Name".to_string(), "Status".to_string()];
        headers.extend(self.schema.field_names().map(str::to_string));
        headers
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.results.iter().map(|r| self.row(r)).collect()
    }

    /// Detail view of the result at `index`.
    pub fn detail(&self, index: usize) -> Option<RecordDetail> {
        let result = self.results.get(index)?;
        let fields = self
            .schema
            .field_names()
            .map(|name| (name.to_string(), cell(result, name)))
            .collect();

        Some(RecordDetail {
            file_name: result.file_name.clone(),
            status: result.status,
            fields,
        })
    }

    fn row(&self, result: &ExtractionResult) -> TableRow {
        TableRow {
            file_name: result.file_name.clone(),
            status: result.status,
            cells: self
                .schema
                .field_names()
                .map(|name| cell(result, name))
                .collect(),
        }
    }
}

fn cell(result: &ExtractionResult, name: &str) -> String {
    match result.data.get(name) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

impl fmt::Display for ResultTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = self.headers();
        let lines: Vec<Vec<String>> = self
            .rows()
            .into_iter()
            .map(|row| {
                let mut line = vec![row.file_name, row.status.to_string()];
                line.extend(row.cells);
                line
            })
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for line in &lines {
            for (width, value) in widths.iter_mut().zip(line) {
                *width = (*width).max(value.chars().count());
            }
        }

        write_line(f, &headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        for line in &lines {
            write_line(f, line, &widths)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect();
    writeln!(f, "{}", padded.join(" | ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::result::FieldValues;
    use crate::models::schema::{FieldType, SchemaField};
    use pretty_assertions::assert_eq;

    fn schema() -> Schema {
        Schema::new(vec![
            SchemaField::new("Date", FieldType::Date),
            SchemaField::new("Amount", FieldType::Number),
        ])
    }

    #[test]
    fn test_rows_follow_schema_order_with_placeholder() {
        // values inserted out of schema order
        let data: FieldValues = [("Amount", "$5.00"), ("Date", "")].into_iter().collect();
        let results = vec![
            ExtractionResult::success("a.pdf", data),
            ExtractionResult::failed("b.pdf"),
        ];
        let schema = schema();
        let table = ResultTable::new(&schema, &results);

        assert_eq!(table.headers(), vec!["File Name", "Status", "Date", "Amount"]);

        let rows = table.rows();
        assert_eq!(rows[0].cells, vec!["-", "$5.00"]);
        assert_eq!(rows[1].cells, vec!["-", "-"]);
        assert_eq!(rows[1].status, ExtractionStatus::Failed);
    }

    #[test]
    fn test_detail_view() {
        let data: FieldValues = [("Date", "2024-03-15")].into_iter().collect();
        let results = vec![ExtractionResult::success("a.pdf", data)];
        let schema = schema();
        let table = ResultTable::new(&schema, &results);

        let detail = table.detail(0).unwrap();
        assert_eq!(detail.status, ExtractionStatus::Success);
        assert_eq!(
            detail.fields,
            vec![
                ("Date".to_string(), "2024-03-15".to_string()),
                ("Amount".to_string(), "-".to_string()),
            ]
        );
        assert!(table.detail(1).is_none());
    }

    #[test]
    fn test_display_aligns_columns() {
        let data: FieldValues = [("Date", "2024-03-15"), ("Amount", "$5.00")]
            .into_iter()
            .collect();
        let results = vec![ExtractionResult::success("a.pdf", data)];
        let schema = schema();
        let rendered = ResultTable::new(&schema, &results).to_string();

        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "File Name | Status  | Date       | Amount");
        assert_eq!(lines[2], "a.pdf     | success | 2024-03-15 | $5.00");
    }
}
