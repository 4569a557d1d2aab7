mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::process;

use commands::mortgage::{CalculateArgs, CheckArgs};

/// Fixed-rate mortgage payment calculator
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Fixed-rate mortgage payment calculator",
    long_about = "Computes the monthly payment, number of payments, total amount paid \
                  and total interest of a fixed-rate loan with decimal precision. \
                  Inputs are validated against fixed ranges before calculating."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate monthly payment and loan totals
    Calculate(CalculateArgs),
    /// Validate inputs field by field without calculating
    Check(CheckArgs),
    /// Show the accepted range for each input
    Rules,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).env().init() {
        eprintln!("{}: logger unavailable: {}", "warning".yellow().bold(), e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::mortgage::run_calculate(args),
        Commands::Check(args) => commands::mortgage::run_check(args),
        Commands::Rules => commands::mortgage::run_rules(),
        Commands::Version => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
