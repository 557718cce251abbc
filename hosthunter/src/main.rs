//! HostHunter CLI Application
//!
//! A command-line interface for resolving batches of IPv4 addresses to
//! hostnames via reverse DNS. This CLI application provides a user-friendly
//! interface to the hosthunter-lib library.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use console::Style;
use hosthunter_lib::{
    expand_address_inputs, load_env_config, to_csv, CheckConfig, ConfigManager, HostChecker,
    HostHunterError,
};
use std::process;
use std::time::Instant;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for hosthunter
#[derive(Parser, Debug)]
#[command(name = "hosthunter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve IPv4 addresses to hostnames via reverse DNS")]
#[command(
    long_about = "Resolve batches of IPv4 addresses to hostnames via reverse DNS (PTR) lookups.\n\nAddresses are resolved concurrently; failed lookups are reported per address without aborting the batch. CIDR ranges are not supported."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// IPv4 addresses to resolve (comma-separated or multiple arguments)
    #[arg(value_name = "ADDRESSES", value_delimiter = ',', help_heading = "Address Selection")]
    pub addresses: Vec<String>,

    /// Input file with addresses (one or more per line, comma-separated)
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "Address Selection"
    )]
    pub file: Option<String>,

    /// Write results to a CSV file
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output Format"
    )]
    pub output: Option<String>,

    /// Print results as CSV on stdout
    #[arg(long = "csv", help_heading = "Output Format")]
    pub csv: bool,

    /// Print results as JSON on stdout
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Max concurrent reverse lookups (default: 10, max: 100)
    #[arg(
        short = 'c',
        long = "concurrency",
        default_value = "10",
        help_heading = "Performance"
    )]
    pub concurrency: usize,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Show detailed debug information
    #[arg(short = 'd', long = "debug", help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

/// How results are printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Effective settings after merging CLI args, environment, and config files.
#[derive(Debug, Clone)]
struct Settings {
    check: CheckConfig,
    format: OutputFormat,
    export: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Set up logging if requested
    if args.verbose || args.debug {
        init_tracing(args.debug);
    }

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Run the batch resolution
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Initialize the tracing subscriber for --verbose / --debug runs.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    // Must have addresses from somewhere
    if args.addresses.is_empty() && args.file.is_none() && std::env::var("HH_FILE").is_err() {
        return Err(
            "No IP addresses provided. Use <ADDRESSES> or --file <FILE>.".to_string(),
        );
    }

    // Can't have multiple output formats
    if args.csv && args.json {
        return Err("Cannot specify multiple output formats (--csv, --json)".to_string());
    }

    // Validate concurrency
    if args.concurrency == 0 || args.concurrency > 100 {
        return Err("Concurrency must be between 1 and 100".to_string());
    }

    Ok(())
}

/// Main batch resolution logic
async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let settings = build_settings(&args)?;
    let tokens = get_addresses(&args)?;
    tracing::debug!(tokens = tokens.len(), "input expanded");

    let structured = settings.format != OutputFormat::Table;
    if !structured {
        ui::print_banner();
    }

    // Batch admission happens before the resolver is even constructed:
    // rejected input produces a diagnostic and no report.
    if let Err(e) = hosthunter_lib::validate_batch(&tokens) {
        print_input_error(&e);
        process::exit(1);
    }

    let checker = HostChecker::with_config(settings.check.clone())?;

    // Spinner::start returns None if stderr isn't a TTY.
    let spinner = if !structured {
        ui::Spinner::start(format!(
            "Resolving {} address{}...",
            tokens.len(),
            if tokens.len() == 1 { "" } else { "es" }
        ))
    } else {
        None
    };

    let start_time = Instant::now();
    let result = checker.check_addresses(&tokens).await;
    let duration = start_time.elapsed();

    // Stop spinner before printing anything
    if let Some(s) = spinner {
        s.stop().await;
    }

    let report = match result {
        Ok(report) => report,
        Err(e) if e.is_input_error() => {
            // Already validated above; kept for entry points that skip it.
            print_input_error(&e);
            process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    // Display results based on format
    match settings.format {
        OutputFormat::Table => {
            ui::print_table(report.rows());
            ui::print_summary(report.rows(), duration);
        }
        OutputFormat::Csv => println!("{}", to_csv(report.rows())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report.rows())?),
    }

    // Save to CSV if an export path was given
    if let Some(path) = &settings.export {
        std::fs::write(path, to_csv(report.rows()))
            .map_err(|e| HostHunterError::file_error(path.clone(), e.to_string()))?;
        if structured {
            eprintln!("Results saved to {}", path);
        } else {
            ui::print_saved(path);
        }
    }

    Ok(())
}

/// Print a batch-rejection diagnostic in the original tool's colors:
/// yellow for notation problems, red for malformed input.
fn print_input_error(e: &HostHunterError) {
    let diagnostic = e.to_string();
    if matches!(
        e,
        HostHunterError::MixedNotation | HostHunterError::RangesUnsupported
    ) {
        eprintln!("{}", Style::new().yellow().apply_to(diagnostic));
    } else {
        eprintln!("{}", Style::new().red().apply_to(diagnostic));
    }
}

/// Build effective settings from CLI args with config file integration.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (HH_*)
/// 3. Local config file (./.hosthunter.toml)
/// 4. Global config file (~/.hosthunter.toml)
/// 5. XDG config file (~/.config/hosthunter/config.toml)
/// 6. Built-in defaults
fn build_settings(args: &Args) -> Result<Settings, Box<dyn std::error::Error>> {
    let config_manager = ConfigManager::new(args.verbose);

    let file_config = if let Some(explicit_config_path) = &args.config {
        // CLI --config flag provided
        if args.verbose {
            println!(
                "Using explicit config file (CLI --config): {}",
                explicit_config_path
            );
        }
        config_manager.load_file(explicit_config_path).map_err(|e| {
            format!(
                "Failed to load config file '{}': {}",
                explicit_config_path, e
            )
        })?
    } else if let Ok(env_config_path) = std::env::var("HH_CONFIG") {
        // HH_CONFIG environment variable provided
        if args.verbose {
            println!(
                "Using explicit config file (HH_CONFIG env var): {}",
                env_config_path
            );
        }
        config_manager
            .load_file(&env_config_path)
            .map_err(|e| format!("Failed to load config file '{}': {}", env_config_path, e))?
    } else {
        // No explicit config: automatic discovery, silently falling back to
        // defaults when nothing is found
        config_manager.discover_and_load().unwrap_or_default()
    };

    let env_config = load_env_config(args.verbose);
    let file_defaults = file_config.defaults.unwrap_or_default();

    // Concurrency: CLI > env > config file > default.
    // We can't easily detect if the clap default was used, so we check
    // against the default value (explicit same-as-default still counts
    // as not overriding).
    let mut concurrency = file_defaults.concurrency.unwrap_or(10);
    if let Some(env_concurrency) = env_config.concurrency {
        concurrency = env_concurrency;
    }
    if args.concurrency != 10 {
        concurrency = args.concurrency;
    }

    // Output format: CLI flags > env > config file > table
    let mut format = OutputFormat::Table;
    if let Some(name) = file_defaults.format.as_deref() {
        format = parse_format(name).unwrap_or(format);
    }
    if let Some(name) = env_config.format.as_deref() {
        format = parse_format(name).unwrap_or(format);
    }
    if args.csv {
        format = OutputFormat::Csv;
    } else if args.json {
        format = OutputFormat::Json;
    }

    // CSV export path: CLI > env > config file
    let export = args
        .output
        .clone()
        .or(env_config.output)
        .or(file_defaults.output);

    Ok(Settings {
        check: CheckConfig::default().with_concurrency(concurrency),
        format,
        export,
    })
}

/// Parse an output format name from config or environment.
fn parse_format(name: &str) -> Option<OutputFormat> {
    match name.to_lowercase().as_str() {
        "table" => Some(OutputFormat::Table),
        "csv" => Some(OutputFormat::Csv),
        "json" => Some(OutputFormat::Json),
        _ => None,
    }
}

/// Get the list of address tokens from CLI args, environment, or file
fn get_addresses(args: &Args) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut lines = args.addresses.clone();

    if let Some(cli_file) = &args.file {
        if args.verbose {
            println!("Reading addresses from file (CLI --file): {}", cli_file);
        }
        lines.extend(read_addresses_from_file(cli_file)?);
    } else if let Ok(env_file_path) = std::env::var("HH_FILE") {
        if args.verbose {
            println!(
                "Reading addresses from file (HH_FILE env var): {}",
                env_file_path
            );
        }
        lines.extend(read_addresses_from_file(&env_file_path)?);
    }

    // Split comma-separated entries into individual tokens; validation of
    // the tokens themselves happens at dispatch time.
    Ok(expand_address_inputs(&lines))
}

/// Read address lines from a file
fn read_addresses_from_file(file_path: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    use std::fs::File;
    use std::io::{BufRead, BufReader};
    use std::path::Path;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {}", file_path).into());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        lines.push(trimmed.to_string());
    }

    Ok(lines)
}

// hosthunter/src/main.rs tests module
