//! Data Layer CLI
//!
//! Reads tracking JSON from a file or standard input, builds the data layer
//! (device, privacy and page sections plus aggregated validation errors) and
//! writes the resulting application state as JSON or YAML.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use datalayer_shared::config::default_config_path;
use datalayer_shared::store::render_state;
use datalayer_shared::{
    collect_input_json, init_logging, read_tracking_input, ApplicationState, ConfigError,
    DataLayerBuilder, DataLayerConfig, FileSink, MemorySink, OutputFormat, StateSink,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tracking JSON file (reads standard input when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the state to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Publish an event for every processed section
    #[arg(short, long)]
    notify: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    match value.to_ascii_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "yaml" | "yml" => Ok(OutputFormat::Yaml),
        other => Err(format!("unsupported format '{other}' (expected json or yaml)")),
    }
}

/// Load the configuration file, falling back to defaults
///
/// Returns the load error alongside the defaults so it can be reported once
/// logging is up.
fn load_config(path: Option<&Path>) -> (DataLayerConfig, Option<(PathBuf, ConfigError)>) {
    let Some(path) = path
        .map(Path::to_path_buf)
        .or_else(|| default_config_path().ok())
    else {
        return (DataLayerConfig::default(), None);
    };

    match DataLayerConfig::load(&path) {
        Ok(config) => (config, None),
        Err(e) => (DataLayerConfig::default(), Some((path, e))),
    }
}

fn apply_overrides(config: &mut DataLayerConfig, args: &Args) {
    if args.debug {
        config.logging.level = "debug".to_string();
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(output) = &args.output {
        config.output.path = Some(output.clone());
    }
    if args.notify {
        config.notify_sections = true;
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let source = match path {
        Some(path) => format!("{path:?}"),
        None => "standard input".to_string(),
    };
    read_tracking_input(path)
        .with_context(|| format!("Failed to read tracking data from {source}"))
}

/// Write the final state to `path`
///
/// The store only logs sink failures, so the binary writes its output once
/// more and reports any failure to the caller.
fn write_output(state: &ApplicationState, path: &Path, format: OutputFormat) -> Result<()> {
    FileSink::new(path, format)
        .persist(state)
        .with_context(|| format!("Failed to write state to {path:?}"))
}

/// Build the data layer into `sink` and return the final state
fn run<P: StateSink>(config: &DataLayerConfig, sink: P, input: &Value) -> ApplicationState {
    let builder = DataLayerBuilder::new(config, sink);
    let report = builder.process_application_data(input);
    debug!(
        "data-ready delivered to {} listeners ({} failed)",
        report.invoked,
        report.failures.len()
    );
    builder.into_state()
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (mut config, load_error) = load_config(args.config.as_deref());
    apply_overrides(&mut config, &args);
    config
        .validate()
        .context("Configuration validation failed")?;

    init_logging(&config.logging);
    info!("Starting data layer v{}", datalayer_shared::VERSION);
    if let Some((path, e)) = load_error {
        warn!("Failed to load config from {:?}: {}. Using defaults.", path, e);
    }

    let raw = read_input(args.input.as_deref())?;
    let input = collect_input_json(&raw)
        .context("Tracking data is not valid JSON")?
        .unwrap_or_else(|| Value::Object(Default::default()));

    let format = config.output.format;
    match config.output.path.clone() {
        Some(path) => {
            let state = run(&config, FileSink::new(&path, format), &input);
            write_output(&state, &path, format)?;
            info!("State written to {:?}", path);
        }
        None => {
            let state = run(&config, MemorySink::new(), &input);
            let rendered = render_state(&state, format).context("Failed to render state")?;
            println!("{}", rendered.trim_end());
        }
    }

    Ok(())
}
