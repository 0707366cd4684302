//! Append-only collection of saved schemas.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::models::schema::{FieldType, Schema, SchemaField};

/// Ordered list of saved schemas, addressed by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaRegistry {
    schemas: Vec<Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the invoice, order and receipt demo schemas.
    pub fn demo() -> Self {
        use FieldType::*;

        let schema = |fields: &[(&str, FieldType)]| {
            Schema::new(
                fields
                    .iter()
                    .map(|(name, ty)| SchemaField::new(*name, *ty))
                    .collect(),
            )
        };

        Self {
            schemas: vec![
                schema(&[
                    ("Invoice Number", Text),
                    ("Date", Date),
                    ("Amount", Number),
                    ("Company Name", Text),
                ]),
                schema(&[
                    ("Order ID", Text),
                    ("Customer Name", Text),
                    ("Order Date", Date),
                    ("Total Items", Number),
                    ("Total Amount", Number),
                ]),
                schema(&[
                    ("Receipt Number", Text),
                    ("Transaction Date", Date),
                    ("Payment Method", Text),
                    ("Amount Paid", Number),
                ]),
            ],
        }
    }

    /// Append a schema and return its index.
    pub fn push(&mut self, schema: Schema) -> usize {
        self.schemas.push(schema);
        let index = self.schemas.len() - 1;
        info!("Saved {}", self.schemas[index].label(index));
        index
    }

    pub fn get(&self, index: usize) -> Option<&Schema> {
        self.schemas.get(index)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.iter()
    }

    /// Display labels for every schema, in index order.
    pub fn labels(&self) -> Vec<String> {
        self.schemas
            .iter()
            .enumerate()
            .map(|(i, s)| s.label(i))
            .collect()
    }

    /// Load a registry from a JSON array of field lists.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the registry as a JSON array of field lists.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
