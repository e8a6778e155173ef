//! CLI tool for WWC credential validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate a credential number and expiry date
//! wwccheck validate WWC-1234567-12 --expiry 2026-03-25
//!
//! # Detect the issuing region
//! wwccheck detect 1234567/12
//!
//! # Check an expiry date against a fixed day
//! wwccheck expiry 15/01/2025 --today 2025-01-01
//!
//! # Validate "number,expiry" lines from a file (or stdin)
//! wwccheck batch roster.csv
//!
//! # List supported formats and sample credentials
//! wwccheck formats
//! wwccheck samples --region qld
//! ```

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use wwc_validator::expiry::{local_today, parse_expiry_date};
use wwc_validator::samples::{quick_scenarios, sample_for_region, samples};
use wwc_validator::{
    BatchSummary, BatchValidator, Credential, FormatTable, Region, ValidationResult, Validator,
    ValidatorConfig, EXPIRING_SOON_DAYS,
};

#[derive(Parser)]
#[command(name = "wwccheck")]
#[command(author, version, about = "Working With Children credential checker")]
struct Cli {
    /// JSON file with custom credential formats
    #[arg(long, global = true)]
    formats: Option<PathBuf>,

    /// Days before expiry that count as expiring soon
    #[arg(long, global = true, default_value_t = EXPIRING_SOON_DAYS)]
    expiring_soon_days: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a credential number and expiry date
    Validate {
        /// Credential number
        number: String,

        /// Expiry date (YYYY-MM-DD, DD/MM/YYYY, ...)
        #[arg(short, long)]
        expiry: Option<String>,

        /// Date to validate against instead of today
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Detect the issuing region of a credential number
    Detect {
        /// Credential number
        number: String,
    },

    /// Check an expiry date
    Expiry {
        /// Expiry date
        date: String,

        /// Date to check against instead of today
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },

    /// Validate "number,expiry" lines from a file or stdin
    Batch {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Date to validate against instead of today
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// List supported credential formats
    Formats,

    /// Show sample credentials
    Samples {
        /// Only show the sample for this region (e.g. VIC)
        #[arg(short, long)]
        region: Option<Region>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    parse_expiry_date(s).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let validator = match build_validator(&cli) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Commands::Validate {
            number,
            expiry,
            today,
            output,
        } => cmd_validate(&validator, &number, expiry.as_deref(), today, output),
        Commands::Detect { number } => cmd_detect(&validator, &number),
        Commands::Expiry { date, today } => cmd_expiry(&validator, &date, today),
        Commands::Batch {
            file,
            today,
            output,
        } => cmd_batch(validator, file, today, output),
        Commands::Formats => cmd_formats(&validator),
        Commands::Samples { region } => cmd_samples(region),
    }
}

fn build_validator(cli: &Cli) -> Result<Validator, wwc_validator::FormatTableError> {
    let mut validator = Validator::new().with_config(ValidatorConfig {
        expiring_soon_days: cli.expiring_soon_days,
    });
    if let Some(path) = &cli.formats {
        validator = validator.with_table(FormatTable::from_json_file(path)?);
    }
    Ok(validator)
}

fn exit_for(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_result_text(result: &ValidationResult) {
    println!("Valid: {}", if result.is_valid { "yes" } else { "no" });
    if let Some(number) = &result.normalized_number {
        println!("Number: {}", number);
    }
    match result.region {
        Some(region) => println!("Region: {} ({})", region.name(), region.code()),
        None => println!("Region: Unknown"),
    }
    println!("Status: {}", result.display());
    if let Some(date) = result.expiry_date {
        println!("Expiry: {}", date.format("%Y-%m-%d"));
    }
    for message in result.messages() {
        println!("  - {}", message);
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), ExitCode> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(2)
    })?;
    println!("{}", json);
    Ok(())
}

fn cmd_validate(
    validator: &Validator,
    number: &str,
    expiry: Option<&str>,
    today: Option<NaiveDate>,
    output: OutputFormat,
) -> ExitCode {
    let result = validator.validate_at(number, expiry, today.unwrap_or_else(local_today));

    match output {
        OutputFormat::Text => print_result_text(&result),
        OutputFormat::Json => {
            if let Err(code) = print_json(&result) {
                return code;
            }
        }
    }

    exit_for(result.is_valid)
}

fn cmd_detect(validator: &Validator, number: &str) -> ExitCode {
    let check = validator.validate_number(number);

    match check.region {
        Some(region) => {
            let format = validator.table().get(region).unwrap_or(region.format());
            println!("Region: {} ({})", region.name(), region.code());
            println!("Format: {}", format.description);
            println!("Example: {}", format.example);
        }
        None => {
            for error in &check.errors {
                println!("{}", error);
            }
        }
    }

    exit_for(check.is_valid)
}

fn cmd_expiry(validator: &Validator, date: &str, today: Option<NaiveDate>) -> ExitCode {
    let check = validator.check_expiry(date, today.unwrap_or_else(local_today));

    println!("Valid: {}", if check.is_valid { "yes" } else { "no" });
    println!("Status: {}", check.status);
    if let Some(days) = check.days_until_expiry {
        println!("Days Until Expiry: {}", days);
    }
    for error in &check.errors {
        println!("  - {}", error);
    }

    exit_for(check.is_valid)
}

fn read_credentials(file: Option<PathBuf>) -> io::Result<Vec<Credential>> {
    let reader: Box<dyn BufRead> = match file {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut credentials = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (number, expiry) = line.split_once(',').unwrap_or((line, ""));
        credentials.push(Credential::new(number.trim(), expiry.trim()));
    }
    Ok(credentials)
}

fn cmd_batch(
    validator: Validator,
    file: Option<PathBuf>,
    today: Option<NaiveDate>,
    output: OutputFormat,
) -> ExitCode {
    let credentials = match read_credentials(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let mut batch = BatchValidator::new().with_validator(validator);
    if let Some(today) = today {
        batch = batch.as_of(today);
    }
    let results = batch.validate_all(&credentials);
    let summary = BatchSummary::from_results(&results);

    match output {
        OutputFormat::Text => {
            for (credential, result) in credentials.iter().zip(&results) {
                let messages = result.messages().join("; ");
                println!(
                    "{:<20} {:<4} {:<14} {}",
                    credential.number,
                    result.region.map_or("-", |r| r.code()),
                    result.status.label(),
                    messages
                );
            }
            println!();
            println!(
                "Total: {}  Valid: {}  Invalid: {}  Expiring soon: {}  Expired: {}",
                summary.total, summary.valid, summary.invalid, summary.expiring_soon, summary.expired
            );
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "results": results,
                "summary": summary,
            });
            if let Err(code) = print_json(&report) {
                return code;
            }
        }
    }

    exit_for(summary.invalid == 0)
}

fn cmd_formats(validator: &Validator) -> ExitCode {
    for format in validator.table().formats() {
        println!(
            "{:<4} {:<30} {:<18} {}",
            format.code(),
            format.display_name,
            format.example,
            format.description
        );
    }
    ExitCode::SUCCESS
}

fn cmd_samples(region: Option<Region>) -> ExitCode {
    let selected: Vec<_> = match region {
        Some(region) => sample_for_region(region).into_iter().collect(),
        None => samples().iter().collect(),
    };

    for sample in selected {
        println!(
            "{:<4} {:<18} expires {}  {} ({})",
            sample.region.code(),
            sample.number,
            sample.expiry,
            sample.holder_name,
            sample.source
        );
    }

    if region.is_none() {
        println!();
        println!("Scenarios:");
        for scenario in quick_scenarios() {
            let expiry = if scenario.expiry.is_empty() {
                "(none)"
            } else {
                scenario.expiry
            };
            println!(
                "  {:<16} {:<18} {:<12} {}",
                scenario.name, scenario.number, expiry, scenario.description
            );
        }
    }

    ExitCode::SUCCESS
}
