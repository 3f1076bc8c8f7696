use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tcc_report_tools::io::discover;
use tcc_report_tools::model::{MergeConfig, MergeMode, MergeReport};
use tcc_report_tools::{ReportError, Result, merge};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Merge(args) => execute_merge(args),
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ReportError::Logging(error.to_string()))
}

fn execute_merge(args: MergeArgs) -> Result<()> {
    let (coordination, base, recommended) = resolve_inputs(&args)?;
    if let Some(placeholder) = &args.placeholder {
        checked(placeholder)?;
    }

    let output = match &args.output {
        Some(path) => path.clone(),
        None => discover::default_output_path(&coordination),
    };

    let config = MergeConfig {
        coordination,
        base,
        recommended,
        placeholder: args.placeholder.clone(),
        mode: if args.matching {
            MergeMode::LabelMatch
        } else {
            MergeMode::OffsetZip
        },
        output,
        match_all_labels: args.match_all_labels,
    };

    let report = merge::merge(&config)?;
    if let Some(path) = &args.summary {
        write_summary(&report, path)?;
    }
    Ok(())
}

fn resolve_inputs(args: &MergeArgs) -> Result<(PathBuf, PathBuf, Option<PathBuf>)> {
    if let Some(root) = &args.root {
        let inputs = discover::discover(root)?;
        return Ok((inputs.coordination, inputs.base, inputs.recommended));
    }

    // clap enforces presence of --cord and --base when --root is absent.
    let (Some(coordination), Some(base)) = (&args.cord, &args.base) else {
        return Err(ReportError::MissingInput(PathBuf::from("--cord/--base")));
    };
    let coordination = checked(coordination)?;
    let base = checked(base)?;
    let recommended = match &args.rec {
        Some(path) => Some(checked(path)?),
        None => None,
    };
    Ok((coordination, base, recommended))
}

fn checked(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(ReportError::MissingInput(path.to_path_buf()))
    }
}

fn write_summary(report: &MergeReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Interleave coordination, base, and recommended TCC report PDFs."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge the report PDFs into a single interleaved document.
    Merge(MergeArgs),
}

#[derive(clap::Args)]
struct MergeArgs {
    /// Project directory; the three PDFs are resolved by filename pattern.
    #[arg(long, conflicts_with_all = ["cord", "base", "rec"])]
    root: Option<PathBuf>,

    /// Path to the coordination PDF.
    #[arg(long, required_unless_present = "root", requires = "base")]
    cord: Option<PathBuf>,

    /// Path to the base TCC PDF.
    #[arg(long, required_unless_present = "root")]
    base: Option<PathBuf>,

    /// Path to the recommended TCC PDF.
    #[arg(long)]
    rec: Option<PathBuf>,

    /// Align sections by TCC name instead of assuming positional order.
    #[arg(long)]
    matching: bool,

    /// Single-page PDF inserted when an expected recommendation is missing.
    /// Required with --matching when a recommended PDF is in play.
    #[arg(long)]
    placeholder: Option<PathBuf>,

    /// Destination path for the assembled PDF. Defaults to a name derived
    /// from the coordination filename, next to the coordination PDF.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write a JSON summary of the merge to this path.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Keep matching labels on a page after the first matched section.
    #[arg(long)]
    match_all_labels: bool,
}
