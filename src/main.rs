//! Puka - Main entrypoint.
//!
//! This is the main entry point for the `puka` command-line tool.
//! It loads configuration, initializes the logging system, and dispatches
//! to the requested subcommand.

use clap::{Parser, Subcommand, ValueEnum};
use puka_lib::config::{ConfigLoader, LogConfig, PukaConfig, ENV_PREFIX};
use puka_lib::data_structures::PukaCuckooHash;
use puka_lib::error::{ErrorContext, ErrorReporter, PukaError, PukaResult, TracingErrorReporter};
use puka_lib::script::{self, Operation, Outcome};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Keys inserted in the first phase of the demo.
const DEMO_FIRST: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Keys inserted in the second phase of the demo.
const DEMO_SECOND: [&str; 20] = [
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
    "twenty",
    "twenty-one",
    "twenty-two",
    "twenty-three",
    "twenty-four",
    "twenty-five",
    "twenty-six",
    "twenty-seven",
    "twenty-eight",
    "twenty-nine",
];

/// Keys removed in the last phase of the demo; the last five were never inserted.
const DEMO_REMOVALS: [&str; 14] = [
    "twenty-one",
    "twenty-two",
    "twenty-three",
    "twenty-four",
    "twenty-five",
    "twenty-six",
    "twenty-seven",
    "twenty-eight",
    "twenty-nine",
    "aardvark",
    "Bene Gesserit",
    "crane",
    "dog",
    "element",
];

/// Command line arguments for Puka.
#[derive(Parser, Debug)]
#[clap(name = "puka", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Fill a table in three phases and print it after each one
    Demo,

    /// Run an operation script against a fresh table
    Run {
        /// Path to the script file
        #[clap(value_parser)]
        script: PathBuf,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Output formats for script results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// One line per outcome
    Text,
    /// A single JSON document with outcomes and final statistics
    Json,
}

/// JSON report written by `run --format json`.
#[derive(Serialize)]
struct RunReport<'a> {
    outcomes: &'a [Outcome],
    stats: puka_lib::data_structures::puka_cuckoo_hash::TableStats,
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so that command output on stdout stays clean.
fn init_logging(log: &LogConfig) -> PukaResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    let fmt_layer = if log.json {
        fmt::layer()
            .json()
            .with_file(log.source_location)
            .with_line_number(log.source_location)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .pretty()
            .with_file(log.source_location)
            .with_line_number(log.source_location)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| PukaError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Names the subsystem an error came from.
fn component(error: &PukaError) -> &'static str {
    match error {
        PukaError::Config(_) => "config",
        PukaError::Table(_) => "table",
        PukaError::Script(_) => "script",
        PukaError::Io(_) => "io",
        PukaError::Serialization(_) => "serialization",
        PukaError::Custom(_) => "cli",
    }
}

/// Replays the three demo phases, printing the table after each.
fn demo(config: &PukaConfig) -> PukaResult<()> {
    let mut table = PukaCuckooHash::with_config(config.table.clone())?;

    let phases: [Vec<Operation>; 3] = [
        DEMO_FIRST
            .iter()
            .map(|key| Operation::Insert(key.to_string()))
            .collect(),
        DEMO_SECOND
            .iter()
            .map(|key| Operation::Insert(key.to_string()))
            .collect(),
        DEMO_REMOVALS
            .iter()
            .map(|key| Operation::Remove(key.to_string()))
            .collect(),
    ];

    for (phase, operations) in phases.into_iter().enumerate() {
        let outcomes = script::run(&mut table, operations)?;
        for outcome in &outcomes {
            if let Outcome::Remove { key, removed: false } = outcome {
                info!(phase = phase + 1, key = %key, "key was not present");
            }
        }
        println!("{table}\n");
    }

    info!(
        len = table.len(),
        primary = table.primary_capacity(),
        secondary = table.secondary_capacity(),
        "Demo finished"
    );
    Ok(())
}

/// Runs a script file and prints its outcomes.
fn run_script(config: &PukaConfig, path: &Path, format: OutputFormat) -> PukaResult<()> {
    let source = std::fs::read_to_string(path)?;
    let operations = script::parse(&source)?;
    info!(path = ?path, operations = operations.len(), "Running script");

    let mut table = PukaCuckooHash::with_config(config.table.clone())?;
    let outcomes = script::run(&mut table, operations)?;

    match format {
        OutputFormat::Text => {
            for outcome in &outcomes {
                println!("{outcome}");
            }
        }
        OutputFormat::Json => {
            let report = RunReport {
                outcomes: &outcomes,
                stats: table.stats(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

/// Writes the default configuration as TOML.
fn gen_config(output: &Path) -> PukaResult<()> {
    info!("Generating default configuration");
    let default_config = PukaConfig::default();

    // Create parent directories if they don't exist
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&default_config)
        .map_err(|e| PukaError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    info!("Default configuration written to {:?}", output);
    Ok(())
}

fn execute(command: Command, config: PukaConfig) -> PukaResult<()> {
    match command {
        Command::Demo => demo(&config),
        Command::Run { script, format } => run_script(&config, &script, format),
        Command::Validate => {
            PukaCuckooHash::<String>::with_config(config.table)?;
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => gen_config(&output),
    }
}

/// Main entry point for the application.
fn main() {
    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Demo);

    let config_loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);
    let loaded = match command {
        // A broken config file must not stop us from writing a fresh one
        Command::GenConfig { .. } => Ok(PukaConfig::default()),
        _ => config_loader.load(),
    };

    let log = loaded
        .as_ref()
        .map(|config| config.log.clone())
        .unwrap_or_default();
    if let Err(e) = init_logging(&log) {
        eprintln!("{e}");
        process::exit(1);
    }

    info!(version = puka_lib::VERSION, "Starting Puka");

    let invocation = format!("{command:?}");
    let result = loaded
        .map_err(PukaError::from)
        .and_then(|config| execute(command, config));

    if let Err(error) = result {
        let origin = component(&error);
        let context = ErrorContext::new(error, origin)
            .with_details(invocation)
            .with_span_trace();
        TracingErrorReporter.report(context);
        process::exit(1);
    }
}
