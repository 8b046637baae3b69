mod app;
mod data;
mod processing;
mod state;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use processing::statistics::StatKind;

/// Peak analysis for DIC speckle measurement exports: group columns
/// into averaged channels, detect flat (plateau) regions, export one
/// statistic column per channel and statistic.
#[derive(Debug, Parser)]
#[command(name = "specklepeak", version, about, long_about = None)]
struct Cli {
    /// Input table (.csv, .xls or .xlsx)
    input: PathBuf,

    /// Column group to analyze, e.g. "4" or "2,4:6"; append "=NAME" to
    /// name the channel. Repeatable; column indices may not repeat
    /// across groups.
    #[arg(long = "group", value_name = "RANGE[=NAME]")]
    groups: Vec<String>,

    /// Maximum per-step slope still considered flat (default 0.15)
    #[arg(long, value_name = "VALUE")]
    slope_threshold: Option<f64>,

    /// Minimum value eligible for a peak (default 0.5)
    #[arg(long, value_name = "VALUE")]
    zero_threshold: Option<f64>,

    /// Sampling stride for slope evaluation, 1-50 (default 2)
    #[arg(long, value_name = "ROWS")]
    step: Option<usize>,

    /// Statistics to export per peak, comma-separated
    #[arg(long, value_delimiter = ',', value_name = "KIND,...")]
    stats: Vec<StatArg>,

    /// Output CSV path (default: "<input stem>_results.csv" next to the input)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Restore groups, parameters and statistics from a session file
    #[arg(long, value_name = "PATH")]
    session: Option<PathBuf>,

    /// Save the effective session (groups, parameters, statistics) as JSON
    #[arg(long, value_name = "PATH")]
    save_session: Option<PathBuf>,

    /// Also write a per-row dump of channel values and flat/changing states
    #[arg(long, value_name = "PATH")]
    dump_labels: Option<PathBuf>,

    /// Print the table's index/heading key and exit
    #[arg(long)]
    list_columns: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatArg {
    Middle,
    Median,
    Mean,
    Maximum,
}

impl StatArg {
    fn kind(self) -> StatKind {
        match self {
            StatArg::Middle => StatKind::Middle,
            StatArg::Median => StatKind::Median,
            StatArg::Mean => StatKind::Mean,
            StatArg::Maximum => StatKind::Maximum,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    app::run(Cli::parse())
}
