//! Schema command - build and list extraction schemas.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use docex_core::{FieldType, FieldUpdate, SchemaBuilder, SchemaRegistry};

/// Arguments for the schema command.
#[derive(Args)]
pub struct SchemaArgs {
    #[command(subcommand)]
    command: SchemaCommand,
}

#[derive(Subcommand)]
enum SchemaCommand {
    /// List registered schemas
    List(ListArgs),

    /// Build a new schema from field definitions
    New(NewArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Schema file (JSON); the demo schemas are used when omitted
    #[arg(short, long)]
    schemas: Option<PathBuf>,
}

#[derive(Args)]
struct NewArgs {
    /// Field as "Name:type" (type is text, number or date; default text)
    #[arg(short, long = "field", required = true)]
    fields: Vec<String>,

    /// Append the schema to this schema file instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: SchemaArgs) -> anyhow::Result<()> {
    match args.command {
        SchemaCommand::List(list_args) => list_schemas(list_args),
        SchemaCommand::New(new_args) => new_schema(new_args),
    }
}

/// Registry from a schema file, or the demo registry.
pub fn load_registry(path: Option<&PathBuf>) -> anyhow::Result<SchemaRegistry> {
    match path {
        Some(path) => {
            debug!("Loading schemas from {}", path.display());
            Ok(SchemaRegistry::from_file(path)?)
        }
        None => Ok(SchemaRegistry::demo()),
    }
}

fn list_schemas(args: ListArgs) -> anyhow::Result<()> {
    let registry = load_registry(args.schemas.as_ref())?;

    if registry.is_empty() {
        println!("{} No schemas registered.", style("ℹ").blue());
        return Ok(());
    }

    for (label, schema) in registry.labels().iter().zip(registry.iter()) {
        println!("{}", style(label).bold());
        for field in schema {
            println!("  - {} ({})", field.name, field.field_type);
        }
    }

    Ok(())
}

/// Split `"Name:type"`; a missing type means text.
fn parse_field(spec: &str) -> anyhow::Result<(String, FieldType)> {
    match spec.rsplit_once(':') {
        Some((name, ty)) => Ok((name.to_string(), ty.parse()?)),
        None => Ok((spec.to_string(), FieldType::Text)),
    }
}

fn new_schema(args: NewArgs) -> anyhow::Result<()> {
    let mut builder = SchemaBuilder::new();

    for (i, spec) in args.fields.iter().enumerate() {
        let (name, field_type) = parse_field(spec)?;
        if i > 0 {
            builder.add_field();
        }
        builder.update_field(i, FieldUpdate::name(name).with_field_type(field_type))?;
    }

    let schema = builder.build()?;

    match args.output {
        Some(path) => {
            let mut registry = if path.exists() {
                SchemaRegistry::from_file(&path)?
            } else {
                SchemaRegistry::new()
            };
            let index = registry.push(schema);
            registry.save(&path)?;

            let label = registry
                .get(index)
                .map(|s| s.label(index))
                .unwrap_or_default();
            println!(
                "{} Saved {} to {}",
                style("✓").green(),
                label,
                path.display()
            );
        }
        None => println!("{}", serde_json::to_string_pretty(&schema)?),
    }

    Ok(())
}
