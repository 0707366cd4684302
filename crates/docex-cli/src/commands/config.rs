//! Config command - inspect and edit the docex settings file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use docex_core::DocexConfig;

use super::default_config_path;

const MASK: &str = "********";

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective settings (API key masked)
    Show,

    /// Write a settings file with the defaults
    Init(InitArgs),

    /// Print one setting by dotted key
    Get {
        /// Dotted key, e.g. "extraction.timeout_secs"
        key: String,
    },

    /// Change one existing setting by dotted key
    Set {
        /// Dotted key, e.g. "export.dialect"
        key: String,
        /// New value; text settings take it verbatim
        value: String,
    },

    /// Print where the settings file lives
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Where to write the file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace an existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<DocexConfig> {
    if path.exists() {
        Ok(DocexConfig::from_file(path)?)
    } else {
        Ok(DocexConfig::default())
    }
}

fn is_secret(key: &str) -> bool {
    key.ends_with("api_key")
}

/// Settings as a JSON tree with the API key masked.
fn masked(config: &DocexConfig) -> anyhow::Result<Value> {
    let mut json = serde_json::to_value(config)?;
    if let Some(key) = json.pointer_mut("/api/mistral_api_key") {
        if key.is_string() {
            *key = Value::String(MASK.to_string());
        }
    }
    Ok(json)
}

/// Existing setting at a dotted key. Unknown keys are errors, never inserted.
fn setting_mut<'a>(json: &'a mut Value, key: &str) -> anyhow::Result<&'a mut Value> {
    let pointer = format!("/{}", key.replace('.', "/"));
    json.pointer_mut(&pointer)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
}

/// Parse `raw` for a slot currently holding `current`. Text and unset
/// settings keep the raw string; everything else is read as JSON.
fn parse_setting(current: &Value, raw: &str) -> Value {
    match current {
        Value::String(_) | Value::Null => Value::String(raw.to_string()),
        _ => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        println!(
            "{} No config file at {}, showing defaults.",
            style("ℹ").blue(),
            path.display()
        );
    }

    let config = load_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&masked(&config)?)?);
    Ok(())
}

fn init_config(args: InitArgs, default_path: PathBuf) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or(default_path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    DocexConfig::default().save(&output_path)?;

    println!(
        "{} Wrote default settings to {}",
        style("✓").green(),
        output_path.display()
    );
    Ok(())
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let config = load_or_default(path)?;
    let mut json = serde_json::to_value(&config)?;
    let value = setting_mut(&mut json, key)?;

    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn set_config(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let config = load_or_default(path)?;
    let mut json = serde_json::to_value(&config)?;

    let slot = setting_mut(&mut json, key)?;
    let value = parse_setting(slot, raw);
    *slot = value;
    let shown = if is_secret(key) {
        format!("\"{}\"", MASK)
    } else {
        serde_json::to_string(slot)?
    };

    // Typed round-trip rejects values of the wrong shape
    let config: DocexConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!("{} Set {} = {}", style("✓").green(), key, shown);
    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'docex config init' to create it.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_setting_lookup_rejects_unknown_keys() {
        let mut json = serde_json::to_value(DocexConfig::default()).unwrap();
        assert!(setting_mut(&mut json, "extraction.timeout").is_err());
        assert!(setting_mut(&mut json, "api.mistral_api_key").is_ok());
        assert_eq!(*setting_mut(&mut json, "extraction.timeout_secs").unwrap(), json!(30));
    }

    #[test]
    fn test_parse_setting_keeps_text_as_text() {
        assert_eq!(parse_setting(&Value::Null, "12345"), json!("12345"));
        assert_eq!(parse_setting(&json!("English"), "42"), json!("42"));
        assert_eq!(parse_setting(&json!(30), "45"), json!(45));
        assert_eq!(parse_setting(&json!(30), "soon"), json!("soon"));
    }
}
