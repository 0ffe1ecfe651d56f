//! ora-inspect CLI - Oracle type normalization and schema documents.

use clap::{Parser, Subcommand, ValueEnum};
use ora_inspect::{
    format_type, parse_type, ColumnType, Document, InspectConfig, InspectError, TYPE_NAMES,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(name = "ora-inspect")]
#[command(about = "Oracle catalog type normalization and schema documents")]
#[command(version)]
struct Cli {
    /// Output JSON result to stdout
    #[arg(long, global = true)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text", global = true)]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "warn", global = true)]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a native type expression such as "number(10,2)"
    ParseType {
        /// Type expression
        expr: String,
    },

    /// Format a canonical type given as JSON into its native spelling
    FormatType {
        /// Canonical type, e.g. '{"kind":"string","t":"varchar2","size":255}'
        json: String,
    },

    /// List the native type names known to the dialect
    Types,

    /// Validate a schema document and re-emit it in another format
    Convert {
        /// Input document (.yaml, .yml or .json)
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        to: OutputFormat,
    },

    /// Validate an inspection configuration file
    CheckConfig {
        /// Path to YAML configuration file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), InspectError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(InspectError::Config)?;

    match cli.command {
        Commands::ParseType { expr } => {
            let column_type = parse_type(&expr)?;
            let native = format_type(&column_type).ok();
            if cli.output_json {
                let out = json!({ "type": column_type, "native": native });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("type:   {}", column_type);
                println!("native: {}", native.as_deref().unwrap_or("-"));
            }
        }

        Commands::FormatType { json } => {
            let column_type: ColumnType = serde_json::from_str(&json)?;
            let native = format_type(&column_type)?;
            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&json!({ "native": native }))?);
            } else {
                println!("{}", native);
            }
        }

        Commands::Types => {
            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(TYPE_NAMES)?);
            } else {
                for name in TYPE_NAMES {
                    println!("{}", name);
                }
            }
        }

        Commands::Convert { file, to } => {
            let doc = read_document(&file)?;
            let realm = doc.into_realm()?;
            info!(
                "Validated {:?}: {} schemas, {} tables",
                file,
                realm.schemas.len(),
                realm.schemas.iter().map(|s| s.tables.len()).sum::<usize>()
            );
            let doc = Document::from_realm(&realm);
            match to {
                OutputFormat::Yaml => print!("{}", doc.to_yaml()?),
                OutputFormat::Json => println!("{}", doc.to_json()?),
            }
        }

        Commands::CheckConfig { file } => {
            let config = InspectConfig::load(&file)?;
            info!("Loaded configuration from {:?}", file);
            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Configuration is valid.");
                println!("  Schemas: {}", list_or(&config.schemas, "all"));
                println!("  Tables: {}", list_or(&config.tables, "all"));
                println!("  Excluded schemas: {}", list_or(&config.exclude_schemas, "none"));
                match config.query_timeout_secs {
                    Some(secs) => println!("  Query timeout: {}s", secs),
                    None => println!("  Query timeout: none"),
                }
            }
        }
    }

    Ok(())
}

fn read_document(path: &Path) -> Result<Document, InspectError> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    debug!("Reading {} document {:?}", if is_json { "JSON" } else { "YAML" }, path);
    if is_json {
        Document::from_json(&content)
    } else {
        Document::from_yaml(&content)
    }
}

fn list_or(values: &[String], empty: &str) -> String {
    if values.is_empty() {
        empty.to_string()
    } else {
        values.join(", ")
    }
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => return Err(format!("unknown verbosity '{}'", other)),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("unknown log format '{}'", other)),
    }

    Ok(())
}
