//! Interest Theory CLI
//!
//! Command-line interface for time value of money calculations
//!
//! # Usage
//!
//! ```bash
//! # Value of 1000 after 10 years at 5% effective
//! interest-theory value --principal 1000 --time 10 --rate 0.05
//!
//! # Monthly payment on a 200000 loan over 30 years at 6% convertible monthly
//! interest-theory loan-payment --loan 200000 --term 30 --period 0.083333333 \
//!     --rate 0.06 --frequency 12 --cents
//!
//! # Day count between two dates
//! interest-theory days --start 2019-03-15 --end 2019-10-01
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use serde_json::{json, Value};

use interest_theory::annuity::{
    number_of_payments, outstanding_loan_balance_prospective, payment_from_loan_amount,
    savings_payment_from_future_value,
};
use interest_theory::{Amount, Annuity, DayCount, GrowthFunction, LoanPayment, Rate, Timing};

/// Interest Theory - time value of money calculator
#[derive(Parser)]
#[command(name = "interest-theory")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value of a principal invested at a compound rate
    Value(ValueArgs),

    /// Present value of a level annuity
    AnnuityPv(AnnuityArgs),

    /// Accumulated value of a level annuity
    AnnuityFv(AnnuityArgs),

    /// Level payment that repays a loan
    LoanPayment(LoanPaymentArgs),

    /// Level deposit that reaches a savings target
    SavingsPayment(SavingsPaymentArgs),

    /// Number of deposits needed to reach a savings target
    PaymentsNeeded(PaymentsNeededArgs),

    /// Outstanding loan balance, prospective method
    Balance(BalanceArgs),

    /// Days and year fraction between two dates
    Days(DaysArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    /// Key: value lines
    #[default]
    Table,
    /// JSON object
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RateKind {
    Effective,
    Discount,
    Nominal,
    NominalDiscount,
    Force,
    Simple,
    SimpleDiscount,
}

/// Rate quoted in one of the supported conventions
#[derive(Args, Debug)]
struct RateArgs {
    /// Rate as a decimal (0.05 for 5%)
    #[arg(short, long)]
    rate: f64,

    /// Quoting convention of the rate
    #[arg(long, value_enum, default_value = "effective")]
    kind: RateKind,

    /// Conversions per year for nominal rates
    #[arg(long, default_value = "1")]
    frequency: f64,
}

impl RateArgs {
    fn to_rate(&self) -> Rate {
        match self.kind {
            RateKind::Effective => Rate::effective(self.rate),
            RateKind::Discount => Rate::effective_discount(self.rate),
            RateKind::Nominal => Rate::nominal(self.rate, self.frequency),
            RateKind::NominalDiscount => Rate::nominal_discount(self.rate, self.frequency),
            RateKind::Force => Rate::force(self.rate),
            RateKind::Simple => Rate::simple(self.rate),
            RateKind::SimpleDiscount => Rate::simple_discount(self.rate),
        }
    }
}

#[derive(Args, Debug)]
struct ValueArgs {
    /// Principal invested at time 0
    #[arg(short, long)]
    principal: f64,

    /// Time in years
    #[arg(short, long)]
    time: f64,

    #[command(flatten)]
    rate: RateArgs,
}

#[derive(Args, Debug)]
struct AnnuityArgs {
    /// Payment amount
    #[arg(short, long)]
    amount: f64,

    /// Years between payments
    #[arg(long, default_value = "1")]
    period: f64,

    /// Term in years, omit for a perpetuity
    #[arg(long)]
    term: Option<f64>,

    /// Payment timing: immediate or due
    #[arg(long, default_value = "immediate")]
    timing: Timing,

    #[command(flatten)]
    rate: RateArgs,
}

#[derive(Args, Debug)]
struct LoanPaymentArgs {
    /// Amount borrowed
    #[arg(short, long)]
    loan: f64,

    /// Years between payments
    #[arg(long, default_value = "1")]
    period: f64,

    /// Term in years
    #[arg(long)]
    term: f64,

    /// Payment timing: immediate or due
    #[arg(long, default_value = "immediate")]
    timing: Timing,

    /// Reconcile payments to whole cents
    #[arg(long)]
    cents: bool,

    #[command(flatten)]
    rate: RateArgs,
}

#[derive(Args, Debug)]
struct SavingsPaymentArgs {
    /// Savings target
    #[arg(long)]
    target: f64,

    /// Years between deposits
    #[arg(long, default_value = "1")]
    period: f64,

    /// Term in years
    #[arg(long)]
    term: f64,

    /// Reconcile deposits to whole cents
    #[arg(long)]
    cents: bool,

    #[command(flatten)]
    rate: RateArgs,
}

#[derive(Args, Debug)]
struct PaymentsNeededArgs {
    /// Deposit made at the end of every period
    #[arg(short, long)]
    payment: f64,

    /// Savings target
    #[arg(long)]
    target: f64,

    /// Years between deposits
    #[arg(long, default_value = "1")]
    period: f64,

    #[command(flatten)]
    rate: RateArgs,
}

#[derive(Args, Debug)]
struct BalanceArgs {
    /// Regular loan payment
    #[arg(short, long)]
    payment: f64,

    /// Years between payments
    #[arg(long, default_value = "1")]
    period: f64,

    /// Loan term in years
    #[arg(long)]
    term: f64,

    /// Valuation time in years
    #[arg(short, long)]
    time: f64,

    /// Final payment replacing the last regular payment
    #[arg(long)]
    residual: Option<f64>,

    /// Times of payments that were skipped
    #[arg(long, value_delimiter = ',')]
    missed: Vec<f64>,

    #[command(flatten)]
    rate: RateArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Convention {
    /// 30/360
    Thirty360,
    /// Actual/360
    Actual360,
}

impl From<Convention> for DayCount {
    fn from(convention: Convention) -> Self {
        match convention {
            Convention::Thirty360 => DayCount::Thirty360,
            Convention::Actual360 => DayCount::Actual360,
        }
    }
}

#[derive(Args, Debug)]
struct DaysArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    start: String,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    end: String,

    /// Day count convention, both when omitted
    #[arg(long, value_enum)]
    convention: Option<Convention>,
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

fn payment_report(payment: LoanPayment) -> Value {
    match payment {
        LoanPayment::Level(amount) => json!({ "payment": amount }),
        LoanPayment::Balanced(installments) => json!({
            "payment": installments.amount,
            "final_payment": installments.last,
        }),
    }
}

fn value(args: ValueArgs) -> Result<Value> {
    let rate = args.rate.to_rate();
    let amount = Amount::new(rate, args.principal)?;
    Ok(json!({
        "rate": rate.to_string(),
        "value": amount.value_at(args.time)?,
        "interest": amount.interest_earned(0.0, args.time)?,
    }))
}

fn annuity(args: AnnuityArgs, accumulated: bool) -> Result<Value> {
    let term = args.term.unwrap_or(f64::INFINITY);
    let annuity = Annuity::level(args.rate.to_rate(), args.amount, args.period, term, args.timing)?;
    if accumulated {
        Ok(json!({
            "pattern": annuity.pattern(),
            "accumulated_value": annuity.accumulated_value()?,
        }))
    } else {
        Ok(json!({
            "pattern": annuity.pattern(),
            "present_value": annuity.present_value()?,
        }))
    }
}

fn loan_payment(args: LoanPaymentArgs) -> Result<Value> {
    let payment = payment_from_loan_amount(
        args.loan,
        args.period,
        args.term,
        args.rate.to_rate(),
        args.timing,
        args.cents,
    )?;
    Ok(payment_report(payment))
}

fn savings_payment(args: SavingsPaymentArgs) -> Result<Value> {
    let payment = savings_payment_from_future_value(
        args.target,
        args.period,
        args.term,
        args.rate.to_rate(),
        args.cents,
    )?;
    Ok(payment_report(payment))
}

fn payments_needed(args: PaymentsNeededArgs) -> Result<Value> {
    let count = number_of_payments(args.payment, args.target, args.period, &args.rate.to_rate())?;
    Ok(json!({ "payments": count }))
}

fn balance(args: BalanceArgs) -> Result<Value> {
    let balance = outstanding_loan_balance_prospective(
        args.payment,
        args.period,
        args.term,
        args.rate.to_rate(),
        args.time,
        args.residual,
        &args.missed,
    )?;
    Ok(json!({ "balance": balance }))
}

fn days(args: DaysArgs) -> Result<Value> {
    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;
    let conventions = match args.convention {
        Some(convention) => vec![convention],
        None => vec![Convention::Thirty360, Convention::Actual360],
    };

    let mut report = serde_json::Map::new();
    for convention in conventions {
        let day_count = DayCount::from(convention);
        let key = match convention {
            Convention::Thirty360 => "thirty_360",
            Convention::Actual360 => "actual_360",
        };
        report.insert(
            key.to_string(),
            json!({
                "days": day_count.days(start, end),
                "year_fraction": day_count.year_fraction(start, end),
            }),
        );
    }
    Ok(Value::Object(report))
}

fn print_table(report: &Value, indent: usize) {
    if let Value::Object(fields) = report {
        for (key, value) in fields {
            match value {
                Value::Object(_) => {
                    println!("{:indent$}{}:", "", key, indent = indent);
                    print_table(value, indent + 2);
                }
                Value::Number(n) => match n.as_f64() {
                    Some(x) if !n.is_i64() && !n.is_u64() => {
                        println!("{:indent$}{:<20} {:.6}", "", key, x, indent = indent)
                    }
                    _ => println!("{:indent$}{:<20} {}", "", key, n, indent = indent),
                },
                Value::String(s) => println!("{:indent$}{:<20} {}", "", key, s, indent = indent),
                other => println!("{:indent$}{:<20} {}", "", key, other, indent = indent),
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let report = match cli.command {
        Commands::Value(args) => value(args)?,
        Commands::AnnuityPv(args) => annuity(args, false)?,
        Commands::AnnuityFv(args) => annuity(args, true)?,
        Commands::LoanPayment(args) => loan_payment(args)?,
        Commands::SavingsPayment(args) => savings_payment(args)?,
        Commands::PaymentsNeeded(args) => payments_needed(args)?,
        Commands::Balance(args) => balance(args)?,
        Commands::Days(args) => days(args)?,
    };
    info!("computed {} result fields", report.as_object().map_or(0, |r| r.len()));

    match cli.format {
        OutputFormat::Table => print_table(&report, 0),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
