//! CSV serialization of result sets and single records.

use tracing::debug;

use crate::error::ExportError;
use crate::models::result::ExtractionResult;
use crate::models::schema::Schema;

use super::CsvDialect;

type Result<T> = std::result::Result<T, ExportError>;

/// Export every result against the schema's field order.
///
/// Header is `File Name,Status,<fields…>`, followed by one row per result
/// in the order given. Missing values become empty cells. Rows are joined
/// with `\n` and there is no trailing newline.
pub fn results_to_csv(
    schema: &Schema,
    results: &[ExtractionResult],
    dialect: CsvDialect,
) -> Result<String> {
    let mut rows = Vec::with_capacity(results.len() + 1);

    let mut header = vec!["File Name".to_string(), "Status".to_string()];
    header.extend(schema.field_names().map(str::to_string));
    rows.push(header);

    for result in results {
        let mut row = Vec::with_capacity(schema.len() + 2);
        row.push(result.file_name.clone());
        row.push(result.status.to_string());
        row.extend(
            schema
                .field_names()
                .map(|name| result.data.get(name).unwrap_or("").to_string()),
        );
        rows.push(row);
    }

    debug!("Exporting {} results as {:?} CSV", results.len(), dialect);
    write_rows(&rows, dialect)
}

/// Export one result as `Field,Value` pairs.
///
/// The first data row carries the status, then one row per schema field.
pub fn record_to_csv(
    schema: &Schema,
    result: &ExtractionResult,
    dialect: CsvDialect,
) -> Result<String> {
    let mut rows = Vec::with_capacity(schema.len() + 2);
    rows.push(vec!["Field".to_string(), "Value".to_string()]);
    rows.push(vec!["Status".to_string(), result.status.to_string()]);

    for name in schema.field_names() {
        rows.push(vec![
            name.to_string(),
            result.data.get(name).unwrap_or("").to_string(),
        ]);
    }

    write_rows(&rows, dialect)
}

fn write_rows(rows: &[Vec<String>], dialect: CsvDialect) -> Result<String> {
    match dialect {
        CsvDialect::Plain => Ok(rows
            .iter()
            .map(|row| row.join(","))
            .collect::<Vec<_>>()
            .join("\n")),
        CsvDialect::Quoted => {
            let mut wtr = csv::WriterBuilder::new()
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(vec![]);

            for row in rows {
                wtr.write_record(row)?;
            }

            let bytes = wtr
                .into_inner()
                .map_err(|e| ExportError::Writer(e.to_string()))?;
            let mut data = String::from_utf8(bytes)?;
            if data.ends_with('\n') {
                data.pop();
            }
            Ok(data)
        }
    }
}
