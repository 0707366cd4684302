//! Schema data models: typed, ordered field definitions.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schema::patterns::{ISO_DATE, NUMBER_VALUE};

/// Type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text.
    Text,
    /// Numeric value, possibly with a currency sign.
    Number,
    /// Calendar date.
    Date,
}

impl Default for FieldType {
    fn default() -> Self {
        Self::Text
    }
}

impl FieldType {
    /// All field types in display order.
    pub const ALL: [FieldType; 3] = [FieldType::Text, FieldType::Number, FieldType::Date];

    /// Lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
        }
    }

    /// Check whether an extracted value looks like this type.
    ///
    /// Numbers accept an optional leading currency sign and thousands
    /// separators (`$1,250.00`). Dates must be ISO `YYYY-MM-DD` and exist
    /// on the calendar.
    pub fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            FieldType::Text => true,
            FieldType::Number => NUMBER_VALUE.is_match(value),
            FieldType::Date => {
                ISO_DATE.is_match(value)
                    && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
            }
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(FieldType::Text),
            "number" => Ok(FieldType::Number),
            "date" => Ok(FieldType::Date),
            other => Err(ValidationError::UnknownFieldType(other.to_string())),
        }
    }
}

/// A single named, typed field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Field name, also the column header and the result key.
    pub name: String,

    /// Expected value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// A field with no name and the `text` type.
    pub fn blank() -> Self {
        Self::default()
    }
}

/// An ordered list of fields. Order decides result and CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<SchemaField>,
}

impl Schema {
    pub fn new(fields: Vec<SchemaField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Type of the first field with this name.
    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.field_type)
    }

    /// Names that appear more than once, in first-seen order.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut dups: Vec<&str> = Vec::new();
        for (i, field) in self.fields.iter().enumerate() {
            let seen_before = self.fields[..i].iter().any(|f| f.name == field.name);
            if seen_before && !dups.contains(&field.name.as_str()) {
                dups.push(&field.name);
            }
        }
        dups
    }

    /// Display label, e.g. `Schema 2 (Order ID)`.
    pub fn label(&self, index: usize) -> String {
        let first = self
            .fields
            .first()
            .map(|f| f.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("Unnamed");
        format!("Schema {} ({})", index + 1, first)
    }
}

impl From<Vec<SchemaField>> for Schema {
    fn from(fields: Vec<SchemaField>) -> Self {
        Self::new(fields)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a SchemaField;
    type IntoIter = std::slice::Iter<'a, SchemaField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_type_parsing() {
        assert_eq!("text".parse::<FieldType>(), Ok(FieldType::Text));
        assert_eq!("Number".parse::<FieldType>(), Ok(FieldType::Number));
        assert_eq!(" date ".parse::<FieldType>(), Ok(FieldType::Date));
        assert_eq!(
            "currency".parse::<FieldType>(),
            Err(ValidationError::UnknownFieldType("currency".to_string()))
        );
    }

    #[test]
    fn test_field_type_accepts() {
        assert!(FieldType::Number.accepts("$1,250.00"));
        assert!(FieldType::Number.accepts("42"));
        assert!(FieldType::Number.accepts("-3.5"));
        assert!(!FieldType::Number.accepts("INV-2024-001"));

        assert!(FieldType::Date.accepts("2024-03-15"));
        assert!(!FieldType::Date.accepts("2024-02-30"));
        assert!(!FieldType::Date.accepts("15.03.2024"));

        assert!(FieldType::Text.accepts("anything, really"));
    }

    #[test]
    fn test_field_serialization_uses_type_key() {
        let field = SchemaField::new("Amount", FieldType::Number);
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, r#"{"name":"Amount","type":"number"}"#);

        let schema: Schema =
            serde_json::from_str(r#"[{"name":"Date","type":"date"}]"#).unwrap();
        assert_eq!(schema.fields()[0], SchemaField::new("Date", FieldType::Date));
    }

    #[test]
    fn test_schema_label() {
        let schema = Schema::new(vec![SchemaField::new("Order ID", FieldType::Text)]);
        assert_eq!(schema.label(1), "Schema 2 (Order ID)");

        let unnamed = Schema::new(vec![SchemaField::blank()]);
        assert_eq!(unnamed.label(0), "Schema 1 (Unnamed)");
    }

    #[test]
    fn test_duplicate_names() {
        let schema = Schema::new(vec![
            SchemaField::new("Date", FieldType::Date),
            SchemaField::new("Total", FieldType::Number),
            SchemaField::new("Date", FieldType::Text),
            SchemaField::new("Date", FieldType::Text),
        ]);
        assert_eq!(schema.duplicate_names(), vec!["Date"]);
        assert_eq!(schema.field_type("Date"), Some(FieldType::Date));
    }
}
