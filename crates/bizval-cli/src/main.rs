mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::valuation::{ScenariosArgs, ValueArgs};

/// Monte Carlo business valuation from free-cash-flow assumptions
#[derive(Parser)]
#[command(
    name = "bizval",
    version,
    about = "Monte Carlo business valuation from free-cash-flow assumptions",
    long_about = "Estimates a business's fair market value by sampling a growth-rate \
                  distribution and valuing each draw through a constant-growth DCF \
                  with a Gordon-growth terminal value. Reports the mean, the P10/P90 \
                  band, and the full valuation distribution."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Monte Carlo DCF valuation
    Value(ValueArgs),
    /// Project conservative/expected/optimistic growth scenarios
    Scenarios(ScenariosArgs),
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

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Value(args) => commands::valuation::run_value(args),
        Commands::Scenarios(args) => commands::valuation::run_scenarios(args),
        Commands::Version => {
            println!("bizval {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
