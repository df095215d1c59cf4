mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process;

use commands::amortization::{PaymentArgs, ScheduleArgs};
use output::OutputFormat;

/// Fixed-rate mortgage payments and amortization schedules
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Fixed-rate mortgage payments and amortization schedules",
    long_about = "A CLI for computing the level monthly payment of a fixed-rate loan and its \
                  month-by-month amortization schedule with decimal precision and \
                  banker's rounding. Loans are read from flags, a JSON/YAML file, or stdin."
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
    /// Calculate the fixed monthly payment
    Payment(PaymentArgs),
    /// Generate the month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Payment, schedule and loan totals with warnings
    Analyze(ScheduleArgs),
    /// Print version information
    Version,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Analyze(args) => commands::amortization::run_analyze(args),
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
