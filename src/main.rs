//! natseq - Natural Numbers Viewer
//!
//! Displays the first N natural numbers as a colored grid, a list, or
//! statistics.
//!
//! ## Usage
//!
//! ```bash
//! natseq                     # interactive, type N and press Enter
//! natseq 42 -m stats         # interactive, starts on the statistics view
//! natseq 20 --print -m list  # print the list to stdout and exit
//! natseq 20 --log /tmp/logs  # log to /tmp/logs/natseq-<hex>.log
//! ```
//!
//! ## Keys
//!
//! - `Enter`: generate
//! - `Tab`: switch view
//! - `Esc` then `?`: help

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use natseq::controller::run_app;
use natseq::generator::{format_list, generate, NaturalNumbers, Statistics};
use natseq::logging;
use natseq::model::{AppState, DisplayMode};
use natseq::ui::glyphs;

/// Numbers per row in printed grids.
const PRINT_GRID_COLUMNS: usize = 10;

/// Runs print mode: validate, generate, and write the chosen view to stdout.
fn run_print_mode(input: &str, mode: DisplayMode, times: &str) -> Result<()> {
    let numbers = generate(input)?;
    tracing::info!(count = numbers.len(), %mode, "printing sequence");

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_view(&mut handle, &numbers, mode, times)?;
    Ok(())
}

/// Writes one view of `numbers` as plain text.
fn write_view<W: Write>(
    out: &mut W,
    numbers: &NaturalNumbers,
    mode: DisplayMode,
    times: &str,
) -> io::Result<()> {
    match mode {
        DisplayMode::Grid => {
            for row in numbers.as_slice().chunks(PRINT_GRID_COLUMNS) {
                let cells: Vec<String> = row.iter().map(|n| format!("{:>4}", n)).collect();
                writeln!(out, "{}", cells.join(" "))?;
            }
        }
        DisplayMode::List => {
            writeln!(out, "{}", format_list(numbers))?;
        }
        DisplayMode::Statistics => {
            if let Some(stats) = Statistics::from_sequence(numbers) {
                writeln!(out, "Count: {}", stats.count)?;
                writeln!(out, "Sum: {}", stats.sum)?;
                writeln!(out, "Average: {}", stats.average_display())?;
                writeln!(out, "Last Number: {}", stats.last)?;
                for line in stats.formula_lines(times) {
                    writeln!(out, "{}", line)?;
                }
            }
        }
    }
    Ok(())
}

/// Display mode specification for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Colored grid of cells
    Grid,
    /// Comma separated list
    List,
    /// Count, sum, average and the sum formula
    Stats,
}

impl From<ModeArg> for DisplayMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Grid => DisplayMode::Grid,
            ModeArg::List => DisplayMode::List,
            ModeArg::Stats => DisplayMode::Statistics,
        }
    }
}

/// natseq - Display the first N natural numbers
///
/// Without --print, opens an interactive viewer (pre-filled with N if given).
/// With --print, writes the selected view to stdout and exits.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Upper bound N (1-1000)
    #[arg(allow_hyphen_values = true)]
    n: Option<String>,

    /// View to show first (or to print)
    #[arg(short = 'm', long = "mode", value_enum, default_value = "grid")]
    mode: ModeArg,

    /// Print the view to stdout instead of opening the viewer
    #[arg(short = 'p', long = "print", requires = "n")]
    print: bool,

    /// Use ASCII symbols only
    #[arg(long = "ascii")]
    ascii: bool,

    /// Write a log file into DIR, or the current directory (filter with RUST_LOG)
    #[arg(
        long = "log",
        value_name = "DIR",
        num_args = 0..=1,
        default_missing_value = "."
    )]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(dir) = &args.log_dir {
        logging::init(dir)?;
    }

    let glyphs = glyphs::select(!args.ascii);
    let mode: DisplayMode = args.mode.into();

    if args.print {
        // `requires = "n"` guarantees the bound is present
        let input = args.n.as_deref().unwrap_or_default();
        run_print_mode(input, mode, glyphs.times)?;
    } else {
        let state = AppState::with_input(args.n.unwrap_or_default(), mode);
        run_app(state, glyphs)?;
    }

    Ok(())
}
