//! @ai:module:intent CLI entry point for cubestats
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on export, category, output, config, dates

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cubestats::{dates, export, output, Config, OutputFormat, Statistic};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_CONFIG: &str = "cubestats.toml";

#[derive(Parser)]
#[command(name = "cubestats")]
#[command(author, version, about = "Personal bests and PB progression from timer exports")]
struct Cli {
    /// Path to configuration file (defaults to ./cubestats.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show best single and best averages for every category
    Summary {
        /// Timer export (JSON)
        file: PathBuf,

        /// Only count attempts up to the end of this day (YYYY-MM-DD, local time)
        #[arg(long)]
        until: Option<String>,

        /// Hide a category by label or session key (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Output format
        #[arg(long, short, value_enum)]
        format: Option<Format>,
    },

    /// Show the PB progression of one statistic, most recent first
    History {
        /// Timer export (JSON)
        file: PathBuf,

        /// Category label or session key
        #[arg(long)]
        category: String,

        /// Statistic: single, ao3, ao5, ao12, ao50 or ao100
        #[arg(long, default_value = "single")]
        stat: String,

        /// Only count attempts up to the end of this day (YYYY-MM-DD, local time)
        #[arg(long)]
        until: Option<String>,

        /// Output format
        #[arg(long, short, value_enum)]
        format: Option<Format>,
    },

    /// Write a default configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "cubestats=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_or_default_config(cli.config.as_deref())?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Summary {
            file,
            until,
            exclude,
            format,
        } => summary(&config, &file, until.as_deref(), &exclude, format),
        Commands::History {
            file,
            category,
            stat,
            until,
            format,
        } => history(&config, &file, &category, &stat, until.as_deref(), format),
        Commands::Init { output } => init_config(&output),
    }
}

/// @ai:intent Print the summary table
/// @ai:effects fs:read, io
fn summary(
    config: &Config,
    file: &Path,
    until: Option<&str>,
    exclude: &[String],
    format: Option<Format>,
) -> Result<ExitCode> {
    let cutoff = parse_cutoff(until)?;
    let mut set = export::read_export(file)
        .with_context(|| format!("Failed to load export {}", file.display()))?
        .into_categories(config.stats.windows.clone(), config.stats.ok_code);

    for id in set.exclude(exclude.iter().map(String::as_str)) {
        tracing::warn!("No category matches --exclude {}, ignoring", id);
    }

    if set.is_empty() {
        eprintln!("No valid attempts found in {}", file.display());
        return Ok(ExitCode::from(1));
    }

    let format = format.map(OutputFormat::from).unwrap_or(config.output.format);
    println!(
        "{}",
        output::format_summaries(&set.summaries(cutoff), set.windows(), format)
    );
    Ok(ExitCode::SUCCESS)
}

/// @ai:intent Print the PB progression of one category and statistic
/// @ai:effects fs:read, io
fn history(
    config: &Config,
    file: &Path,
    category: &str,
    kind: &str,
    until: Option<&str>,
    format: Option<Format>,
) -> Result<ExitCode> {
    let cutoff = parse_cutoff(until)?;
    let set = export::read_export(file)
        .with_context(|| format!("Failed to load export {}", file.display()))?
        .into_categories(config.stats.windows.clone(), config.stats.ok_code);

    let category = set.require(category)?;

    let Some(statistic) = Statistic::from_kind(&kind.to_ascii_lowercase()) else {
        tracing::warn!("Unknown statistic '{}', nothing to show", kind);
        return Ok(ExitCode::from(1));
    };
    let milestones = category.history(statistic, cutoff);

    let format = format.map(OutputFormat::from).unwrap_or(config.output.format);
    println!(
        "{}",
        output::format_history(category.label(), statistic, &milestones, format)
    );

    if milestones.is_empty() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// @ai:intent Initialize default configuration
/// @ai:effects fs:write
fn init_config(output: &Path) -> Result<ExitCode> {
    let config = Config::default();
    config.save(output)?;
    println!("Configuration written to {}", output.display());
    Ok(ExitCode::SUCCESS)
}

fn load_or_default_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => Config::load(p).with_context(|| format!("Failed to load config {}", p.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(Path::new(DEFAULT_CONFIG))
            .with_context(|| format!("Failed to load config {}", DEFAULT_CONFIG)),
        None => Ok(Config::default()),
    }
}

fn parse_cutoff(until: Option<&str>) -> Result<Option<i64>> {
    until
        .map(dates::end_of_day)
        .transpose()
        .context("Invalid --until date")
}
