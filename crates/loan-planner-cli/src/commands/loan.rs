use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_planner_core::amortization::{self, ExtraPayments, LoanRequest};
use loan_planner_core::chart;

use crate::input;

/// Loan terms, from flags, a JSON file, or piped JSON
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 4.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Month of the first payment (YYYY-MM)
    #[arg(long)]
    pub start_month: Option<String>,

    /// Extra payments as period=amount pairs (comma-separated, e.g. "1=5000,12=250")
    #[arg(long, value_delimiter = ',', value_parser = parse_extra)]
    pub extra: Vec<(u32, Decimal)>,
}

fn parse_extra(raw: &str) -> Result<(u32, Decimal), String> {
    let (period, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("'{raw}' is not period=amount"))?;
    let period: u32 = period
        .trim()
        .parse()
        .map_err(|_| format!("'{period}' is not a period number"))?;
    if period == 0 {
        return Err("periods start at 1".into());
    }
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|_| format!("'{amount}' is not an amount"))?;
    Ok((period, amount))
}

/// Resolve the request from `--input`, stdin, or flags, then overlay `--extra`.
fn build_request(args: LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    let mut request: LoanRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let amount = args
            .amount
            .ok_or("--amount is required (or provide --input)")?;
        let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
        let years = args
            .years
            .ok_or("--years is required (or provide --input)")?;

        LoanRequest {
            amount,
            annual_rate_percent: rate,
            years,
            start_month: None,
            extra_payments: ExtraPayments::new(),
        }
    };

    if args.start_month.is_some() {
        request.start_month = args.start_month;
    }
    for (period, amount) in args.extra {
        request.extra_payments.set(period, amount);
    }

    tracing::debug!(
        amount = %request.amount,
        rate = %request.annual_rate_percent,
        years = %request.years,
        extras = request.extra_payments.len(),
        "loan request resolved"
    );
    Ok(request)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = build_request(args)?;
    let result = amortization::analyze_loan(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = build_request(args)?;
    let result = amortization::calculate_payment(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_savings(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = build_request(args)?;
    let result = amortization::compare_savings(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_chart(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = build_request(args)?;
    let result = chart::payment_composition(&request)?;
    Ok(serde_json::to_value(result)?)
}
