//! Extract command - run an extraction over files and export results.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use docex_core::{
    CancellationToken, CsvDialect, CsvExport, ExtractionTask, InputFile, MockExtractionService,
    Session,
};

use super::load_config;
use super::schema::load_registry;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Schema number as shown by `docex schema list`
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    schema: Option<u32>,

    /// Schema file (JSON); the demo schemas are used when omitted
    #[arg(long)]
    schemas: Option<PathBuf>,

    /// Output format printed to stdout
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Directory to write the results CSV into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also export this file's result as a Field,Value CSV
    #[arg(long)]
    record: Option<String>,

    /// Check extracted values against field types
    #[arg(long)]
    validate: bool,

    /// Quote CSV cells that contain commas, quotes or newlines
    #[arg(long)]
    quoted: bool,

    /// Make the mock backend fail this file name (repeatable)
    #[arg(long = "fail")]
    fail: Vec<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// CSV output
    Csv,
    /// JSON output
    Json,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.quoted {
        config.export.dialect = CsvDialect::Quoted;
    }

    let registry = load_registry(args.schemas.as_ref())?;
    let mut session = Session::new(config).with_registry(registry);

    // Expand glob pattern; an empty selection is reported by the task
    let files: Vec<InputFile> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .map(|p| InputFile::from_path(&p))
        .collect::<Result<_, _>>()?;

    info!("Matched {} files for {}", files.len(), args.input);

    let mut task = ExtractionTask::new();
    if let Some(number) = args.schema {
        task.select_schema(number as usize - 1);
    }
    task.select_files(files);

    let service = args
        .fail
        .iter()
        .fold(MockExtractionService::new(), |service, name| service.with_failure(name.clone()));

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling extraction");
            ctrl_c.cancel();
        }
    });

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Extracting {} files...", task.files().len()));

    let outcome = session.run_extraction(&task, &service, &cancel).await;
    pb.finish_and_clear();
    let added = outcome?;

    // Print results
    match args.format {
        OutputFormat::Table => {
            if let Some(table) = session.table() {
                print!("{}", table);
            }
        }
        OutputFormat::Csv => println!("{}", session.export_csv()?.content),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(session.results())?),
    }

    if args.validate {
        if let Some(schema) = session.active_schema() {
            let issues: Vec<String> = session
                .results()
                .iter()
                .flat_map(|r| r.validate(schema))
                .collect();
            if !issues.is_empty() {
                eprintln!("{}", style("Validation issues:").yellow());
                for issue in &issues {
                    eprintln!("  - {}", issue);
                }
            }
        }
    }

    // Write exports
    if let Some(output_dir) = &args.output_dir {
        fs::create_dir_all(output_dir)?;
        write_export(output_dir, &session.export_csv()?)?;

        if let Some(name) = &args.record {
            let index = session
                .results()
                .iter()
                .position(|r| &r.file_name == name)
                .ok_or_else(|| anyhow::anyhow!("No result for file: {}", name))?;
            write_export(output_dir, &session.export_record_csv(index)?)?;
        }
    } else if args.record.is_some() {
        warn!("--record needs --output-dir, skipping record export");
    }

    // Summary
    let stats = session.stats();
    let failed = session.results().iter().filter(|r| !r.is_success()).count();
    eprintln!();
    eprintln!(
        "{} Extracted {} files in {:?}",
        style("✓").green(),
        added,
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed, success rate {}%",
        style(added - failed).green(),
        style(failed).red(),
        stats.success_rate
    );

    Ok(())
}

fn write_export(output_dir: &PathBuf, export: &CsvExport) -> anyhow::Result<()> {
    let path = output_dir.join(&export.file_name);
    fs::write(&path, &export.content)?;
    debug!("Wrote output to {}", path.display());
    eprintln!("{} Wrote {}", style("✓").green(), path.display());
    Ok(())
}
