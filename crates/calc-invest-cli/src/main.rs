mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::simulation::{CompareArgs, RatesArgs, SeriesArgs};
use commands::tax::TaxRateArgs;

/// Which fixed-income investment yields more?
#[derive(Parser)]
#[command(
    name = "calc-invest",
    version,
    about = "Compare Brazilian fixed-income investments after income tax",
    long_about = "Projects an initial investment plus monthly contributions across LCI/LCA, \
                  CDB, Tesouro Selic, Tesouro IPCA+, Fundo DI and Poupança, applies the \
                  regressive income-tax table, and ranks the results. Rates default to \
                  built-in values and can be overridden by flags or a JSON/YAML file."
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
    /// Rank instruments by net value with the full breakdown
    Compare(CompareArgs),
    /// Month-by-month value of every instrument
    Series(SeriesArgs),
    /// Effective annual rate of every instrument from the rate book
    Rates(RatesArgs),
    /// Income-tax rate for a holding term
    TaxRate(TaxRateArgs),
    /// Print the regressive income-tax table
    TaxTable,
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
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compare(args) => commands::simulation::run_compare(args),
        Commands::Series(args) => commands::simulation::run_series(args),
        Commands::Rates(args) => commands::simulation::run_rates(args),
        Commands::TaxRate(args) => commands::tax::run_tax_rate(args),
        Commands::TaxTable => commands::tax::run_tax_table(),
        Commands::Version => {
            println!("calc-invest {}", env!("CARGO_PKG_VERSION"));
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
