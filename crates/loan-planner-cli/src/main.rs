mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::bundle::BundleArgs;
use commands::loan::LoanArgs;

/// Loan amortization schedules and the static calculator bundle
#[derive(Parser)]
#[command(
    name = "loan-planner",
    version,
    about = "Loan amortization schedules with extra payments",
    long_about = "Computes level-payment amortization schedules with decimal precision, \
                  compares extra-payment plans against the contracted schedule, and \
                  generates the static offline loan calculator as a zip bundle."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full amortization schedule with savings from extra payments
    Schedule(LoanArgs),
    /// Contracted monthly payment and totals
    Payment(LoanArgs),
    /// Interest and months saved by extra payments
    Savings(LoanArgs),
    /// Principal/interest bar series per period
    Chart(LoanArgs),
    /// Generate the static calculator as a zip archive
    Bundle(BundleArgs),
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

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Savings(args) => commands::loan::run_savings(args),
        Commands::Chart(args) => commands::loan::run_chart(args),
        Commands::Bundle(args) => commands::bundle::run_bundle(args),
        Commands::Version => {
            println!("loan-planner {}", env!("CARGO_PKG_VERSION"));
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
