//! # xlsplit-cli
//!
//! Command-line interface for splitting a workbook by group key.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use xlsplit_core::{GenerationReport, SplitConfig, Splitter};
use xlsplit_sheet::{parse_a1, MAX_ROWS};

/// xlsplit - split a workbook into per-destination workbooks by group key
#[derive(Parser)]
#[command(name = "xlsplit")]
#[command(author, version, about = "Split xlsx workbooks by group key", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show the header boundaries detected for each sheet
    Inspect {
        /// Source workbook
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Configuration file (YAML)
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Split the workbook into the configured destinations
    Split {
        /// Source workbook
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Configuration file (YAML)
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,

        /// Sheet to export (repeatable; all sheets when omitted)
        #[arg(short, long = "sheet", value_name = "NAME")]
        sheets: Vec<String>,

        /// Override a sheet's header rows and key cell
        #[arg(long = "header", value_name = "NAME=ROW1:ROW2:CELL")]
        headers: Vec<String>,

        /// Output directory, overriding the configuration
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

/// A `--header` argument.
#[derive(Debug, PartialEq, Eq)]
struct HeaderOverride {
    sheet: String,
    title_row1: u32,
    title_row2: u32,
    key_cell: String,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Inspect { file, config } => inspect(&file, &config),
        Command::Split {
            file,
            config,
            sheets,
            headers,
            output,
        } => split(&file, &config, &sheets, &headers, output),
    }
}

fn load_config(path: &Path) -> Result<SplitConfig> {
    let config = SplitConfig::from_path(path)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn open(file: &Path, config: SplitConfig) -> Result<Splitter> {
    Splitter::open(file, config).with_context(|| format!("Failed to open {}", file.display()))
}

/// Print each sheet's detected header rows and key cell.
fn inspect(file: &Path, config: &Path) -> Result<()> {
    let splitter = open(file, load_config(config)?)?;

    println!("{} {}", "Workbook:".cyan().bold(), file.display());
    for (name, detail) in splitter.details().iter() {
        println!(
            "  {:<24} rows {}-{}  key {}",
            name.bold(),
            detail.title_row1,
            detail.title_row2,
            detail.key_cell.yellow()
        );
    }
    Ok(())
}

fn split(
    file: &Path,
    config: &Path,
    sheets: &[String],
    headers: &[String],
    output: Option<PathBuf>,
) -> Result<()> {
    let overrides = headers
        .iter()
        .map(|arg| parse_header_override(arg))
        .collect::<Result<Vec<_>>>()?;

    let mut config = load_config(config)?;
    if let Some(dir) = output {
        config.output_directory = dir;
    }

    let mut splitter = open(file, config)?;
    let selected: Vec<String> = if sheets.is_empty() {
        splitter.book().sheet_names().into_iter().map(str::to_string).collect()
    } else {
        sheets.to_vec()
    };
    splitter
        .details_mut()
        .select(selected.iter().map(String::as_str))?;

    for header in overrides {
        splitter.details_mut().edit(&header.sheet, |detail| {
            detail.title_row1 = header.title_row1;
            detail.title_row2 = header.title_row2;
            detail.key_cell = header.key_cell.clone();
        })?;
    }

    let report = splitter.generate(|event| eprintln!("{}", event.to_string().dimmed()))?;
    print_report(&report);
    Ok(())
}

/// Parse `NAME=ROW1:ROW2:CELL`; the sheet name may itself contain `=`.
fn parse_header_override(arg: &str) -> Result<HeaderOverride> {
    let Some((sheet, spec)) = arg.rsplit_once('=') else {
        bail!("Invalid header override '{arg}'. Expected NAME=ROW1:ROW2:CELL");
    };
    let parts: Vec<&str> = spec.split(':').collect();
    let [row1, row2, cell] = parts.as_slice() else {
        bail!("Invalid header override '{arg}'. Expected NAME=ROW1:ROW2:CELL");
    };

    let title_row1: u32 = row1
        .trim()
        .parse()
        .with_context(|| format!("Invalid first header row in '{arg}'"))?;
    let title_row2: u32 = row2
        .trim()
        .parse()
        .with_context(|| format!("Invalid last header row in '{arg}'"))?;
    if title_row1 == 0 || title_row1 > title_row2 {
        bail!("Header rows in '{arg}' must satisfy 1 <= ROW1 <= ROW2");
    }
    if title_row2 >= MAX_ROWS {
        bail!("Last header row in '{arg}' leaves no data rows (limit {MAX_ROWS})");
    }
    let key_cell = cell.trim().to_uppercase();
    parse_a1(&key_cell).with_context(|| format!("Invalid key cell in '{arg}'"))?;

    Ok(HeaderOverride {
        sheet: sheet.to_string(),
        title_row1,
        title_row2,
        key_cell,
    })
}

fn print_report(report: &GenerationReport) {
    for path in &report.written {
        println!("{} {}", "Saved".green().bold(), path.display());
    }
    for identifier in &report.skipped {
        println!("{} {} (no rows)", "Skipped".yellow(), identifier);
    }
    if !report.unclassified.is_empty() {
        println!("{}", "Unclassified groups:".yellow().bold());
        for key in &report.unclassified {
            println!("  {key}");
        }
    }
}
