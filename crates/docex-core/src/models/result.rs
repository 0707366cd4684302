//! Per-file extraction result records.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::schema::Schema;

/// Outcome of extracting a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Success,
    Failed,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::Success => "success",
            ExtractionStatus::Failed => "failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionStatus::Success)
    }
}

impl fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered association of field name to extracted value.
///
/// Entries keep insertion order, which producers build in schema order.
/// Inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    entries: Vec<(String, String)>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = FieldValues::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

impl Serialize for FieldValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldValuesVisitor;

        impl<'de> Visitor<'de> for FieldValuesVisitor {
            type Value = FieldValues;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<FieldValues, A::Error> {
                let mut values = FieldValues::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    values.insert(name, value);
                }
                Ok(values)
            }
        }

        deserializer.deserialize_map(FieldValuesVisitor)
    }
}

/// Extraction outcome for one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Name of the source file.
    pub file_name: String,

    /// Whether extraction succeeded.
    pub status: ExtractionStatus,

    /// Extracted values keyed by schema field name.
    pub data: FieldValues,
}

impl ExtractionResult {
    pub fn new(file_name: impl Into<String>, status: ExtractionStatus, data: FieldValues) -> Self {
        Self {
            file_name: file_name.into(),
            status,
            data,
        }
    }

    pub fn success(file_name: impl Into<String>, data: FieldValues) -> Self {
        Self::new(file_name, ExtractionStatus::Success, data)
    }

    /// A failed result with no values.
    pub fn failed(file_name: impl Into<String>) -> Self {
        Self::new(file_name, ExtractionStatus::Failed, FieldValues::new())
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Keys that are not fields of `schema`.
    pub fn foreign_fields<'a>(&'a self, schema: &'a Schema) -> impl Iterator<Item = &'a str> {
        self.data.keys().filter(move |k| !schema.contains_field(k))
    }

    /// Check the result against a schema and return any issues found.
    pub fn validate(&self, schema: &Schema) -> Vec<String> {
        let mut issues = Vec::new();

        for key in self.foreign_fields(schema) {
            issues.push(format!("{}: unknown field \"{}\"", self.file_name, key));
        }

        for (name, value) in self.data.iter() {
            if let Some(field_type) = schema.field_type(name) {
                if !value.is_empty() && !field_type.accepts(value) {
                    issues.push(format!(
                        "{}: \"{}\" is not a valid {} for \"{}\"",
                        self.file_name, value, field_type, name
                    ));
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schema::{FieldType, SchemaField};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_values_keep_insertion_order() {
        let mut values = FieldValues::new();
        values.insert("Zeta", "1");
        values.insert("Alpha", "2");
        values.insert("Mid", "3");
        values.insert("Zeta", "4");

        let keys: Vec<_> = values.keys().collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(values.get("Zeta"), Some("4"));
        assert_eq!(values.get("missing"), None);
    }

    #[test]
    fn test_result_json_shape() {
        let data: FieldValues = [("Invoice Number", "INV-1"), ("Amount", "$5.00")]
            .into_iter()
            .collect();
        let result = ExtractionResult::success("a.pdf", data);

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"fileName":"a.pdf","status":"success","data":{"Invoice Number":"INV-1","Amount":"$5.00"}}"#
        );

        let back: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.data.keys().collect::<Vec<_>>(), vec!["Invoice Number", "Amount"]);
    }

    #[test]
    fn test_validate_reports_foreign_and_mistyped_values() {
        let schema = Schema::new(vec![
            SchemaField::new("Date", FieldType::Date),
            SchemaField::new("Amount", FieldType::Number),
        ]);
        let data: FieldValues = [("Date", "yesterday"), ("Amount", "$3.00"), ("Extra", "x")]
            .into_iter()
            .collect();
        let result = ExtractionResult::success("r.pdf", data);

        let issues = result.validate(&schema);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("unknown field \"Extra\""));
        assert!(issues[1].contains("not a valid date"));
    }

    #[test]
    fn test_failed_result_has_no_values() {
        let result = ExtractionResult::failed("broken.pdf");
        assert!(!result.is_success());
        assert!(result.data.is_empty());
    }
}
