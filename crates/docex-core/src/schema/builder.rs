//! Editable schema under construction.

use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::models::schema::{FieldType, Schema, SchemaField};

/// Partial change applied to a field by [`SchemaBuilder::update_field`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldUpdate {
    pub name: Option<String>,
    pub field_type: Option<FieldType>,
}

impl FieldUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            field_type: None,
        }
    }

    pub fn field_type(field_type: FieldType) -> Self {
        Self {
            name: None,
            field_type: Some(field_type),
        }
    }

    pub fn with_field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }
}

/// Builds a [`Schema`]. Always holds at least one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaBuilder {
    fields: Vec<SchemaField>,
}

impl SchemaBuilder {
    /// Create a builder holding one blank field.
    pub fn new() -> Self {
        Self {
            fields: vec![SchemaField::blank()],
        }
    }

    /// Start editing from an existing schema.
    pub fn from_schema(schema: &Schema) -> Self {
        if schema.is_empty() {
            return Self::new();
        }
        Self {
            fields: schema.fields().to_vec(),
        }
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

    /// Append a blank field.
    pub fn add_field(&mut self) -> &mut Self {
        self.fields.push(SchemaField::blank());
        self
    }

    /// Remove the field at `index`.
    ///
    /// Refused when it is the last remaining field; the field list is
    /// unchanged on error.
    pub fn remove_field(&mut self, index: usize) -> Result<SchemaField, ValidationError> {
        if index >= self.fields.len() {
            return Err(ValidationError::FieldIndexOutOfRange {
                index,
                len: self.fields.len(),
            });
        }
        if self.fields.len() == 1 {
            return Err(ValidationError::LastField);
        }
        Ok(self.fields.remove(index))
    }

    /// Merge a partial change into the field at `index`.
    pub fn update_field(&mut self, index: usize, update: FieldUpdate) -> Result<(), ValidationError> {
        let len = self.fields.len();
        let field = self
            .fields
            .get_mut(index)
            .ok_or(ValidationError::FieldIndexOutOfRange { index, len })?;

        if let Some(name) = update.name {
            field.name = name;
        }
        if let Some(field_type) = update.field_type {
            field.field_type = field_type;
        }
        Ok(())
    }

    /// Validate and produce the finished schema.
    ///
    /// Every field needs a non-empty name. The builder keeps its fields
    /// either way.
    pub fn build(&self) -> Result<Schema, ValidationError> {
        if let Some(index) = self.fields.iter().position(|f| f.name.is_empty()) {
            debug!("Rejecting schema: field {} has no name", index);
            return Err(ValidationError::EmptyFieldName { index });
        }

        let schema = Schema::new(self.fields.clone());
        let dups = schema.duplicate_names();
        if !dups.is_empty() {
            warn!("Schema has duplicate field names: {}", dups.join(", "));
        }

        Ok(schema)
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
