//! epochtime CLI
//!
//! Command-line front end for the epochtime value engine.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use colored::*;
use epochtime::config::parse_offset;
use epochtime::{EpochValue, Profile, TimeContext, TimeFields, Value};
use serde_json::json;
use tracing::Level;

#[derive(Parser)]
#[command(name = "epochtime")]
#[command(version = "0.1.0")]
#[command(about = "Point-in-time values: construct, project, compare and shift instants", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Platform profile (TOML)
    #[arg(long, global = true, value_name = "FILE", env = "EPOCHTIME_PROFILE")]
    profile: Option<PathBuf>,

    /// Fixed offset standing in for the local zone, e.g. +09:00
    #[arg(long, global = true, value_name = "OFFSET", allow_hyphen_values = true)]
    zone: Option<String>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct Output {
    /// Project into UTC before printing
    #[arg(long)]
    utc: bool,

    /// Print every field as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Current time
    Now {
        #[command(flatten)]
        output: Output,
    },
    /// Time from seconds (and microseconds) since the epoch
    ///
    /// Examples:
    ///   epochtime at 1000000000 --utc
    ///   epochtime at 1.5
    ///   epochtime at 0 250000 --json
    At {
        #[arg(value_name = "SEC", allow_negative_numbers = true)]
        sec: String,
        #[arg(value_name = "USEC", allow_negative_numbers = true)]
        usec: Option<String>,
        #[command(flatten)]
        output: Output,
    },
    /// Time from UTC calendar fields
    Gm {
        /// YEAR [MONTH DAY HOUR MIN SEC USEC]
        #[arg(value_name = "FIELD", required = true, num_args = 1..=7, allow_negative_numbers = true)]
        fields: Vec<i64>,
        #[command(flatten)]
        output: Output,
    },
    /// Time from local calendar fields
    Local {
        /// YEAR [MONTH DAY HOUR MIN SEC USEC]
        #[arg(value_name = "FIELD", required = true, num_args = 1..=7, allow_negative_numbers = true)]
        fields: Vec<i64>,
        #[command(flatten)]
        output: Output,
    },
    /// Add a duration in seconds to an instant
    Add {
        #[arg(value_name = "SEC", allow_negative_numbers = true)]
        sec: String,
        #[arg(value_name = "DURATION", allow_negative_numbers = true)]
        duration: String,
        #[command(flatten)]
        output: Output,
    },
    /// Subtract a duration in seconds from an instant
    Sub {
        #[arg(value_name = "SEC", allow_negative_numbers = true)]
        sec: String,
        #[arg(value_name = "DURATION", allow_negative_numbers = true)]
        duration: String,
        #[command(flatten)]
        output: Output,
    },
    /// Elapsed seconds from B to A
    Diff {
        #[arg(value_name = "SEC_A", allow_negative_numbers = true)]
        a: String,
        #[arg(value_name = "SEC_B", allow_negative_numbers = true)]
        b: String,
    },
    /// Compare two instants: -1, 0 or 1
    Cmp {
        #[arg(value_name = "SEC_A", allow_negative_numbers = true)]
        a: String,
        #[arg(value_name = "SEC_B", allow_negative_numbers = true)]
        b: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = build_context(cli.profile.as_ref(), cli.zone.as_deref())
        .and_then(|ctx| run(&ctx, cli.command));

    if let Err(e) = result {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_context(path: Option<&PathBuf>, zone: Option<&str>) -> anyhow::Result<Arc<TimeContext>> {
    let profile = match path {
        Some(path) => Profile::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Profile::default(),
    };
    // A profile's abbreviation names its own zone, not the override.
    let profile = match zone {
        Some(zone) => profile.with_fixed_zone(parse_offset(zone)?, None),
        None => profile,
    };
    Ok(TimeContext::new(profile)?)
}

fn run(ctx: &Arc<TimeContext>, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Now { output } => show(EpochValue::now(ctx)?, &output),
        Commands::At { sec, usec, output } => {
            let sec = numeral(&sec)?;
            let usec = usec.as_deref().map(numeral).transpose()?;
            show(EpochValue::at(ctx, &sec, usec.as_ref())?, &output)
        }
        Commands::Gm { fields, output } => show(EpochValue::gm(ctx, &time_fields(&fields)?)?, &output),
        Commands::Local { fields, output } => {
            show(EpochValue::local(ctx, &time_fields(&fields)?)?, &output)
        }
        Commands::Add { sec, duration, output } => {
            let t = EpochValue::at(ctx, &numeral(&sec)?, None)?;
            show(t.checked_add(&numeral(&duration)?)?, &output)
        }
        Commands::Sub { sec, duration, output } => {
            let t = EpochValue::at(ctx, &numeral(&sec)?, None)?;
            show(t.checked_sub(&numeral(&duration)?)?, &output)
        }
        Commands::Diff { a, b } => {
            let a = EpochValue::at(ctx, &numeral(&a)?, None)?;
            let b = EpochValue::at(ctx, &numeral(&b)?, None)?;
            println!("{}", a.difference(&b)?);
            Ok(())
        }
        Commands::Cmp { a, b } => {
            let a = EpochValue::at(ctx, &numeral(&a)?, None)?;
            let b = EpochValue::at(ctx, &numeral(&b)?, None)?;
            println!("{}", a.compare(&b));
            Ok(())
        }
    }
}

fn numeral(text: &str) -> anyhow::Result<Value> {
    Value::parse_numeral(text).ok_or_else(|| anyhow!("not a number: {}", text))
}

fn time_fields(parts: &[i64]) -> anyhow::Result<TimeFields> {
    TimeFields::from_slice(parts).ok_or_else(|| anyhow!("expected 1 to 7 calendar fields, got {}", parts.len()))
}

fn show(mut t: EpochValue, output: &Output) -> anyhow::Result<()> {
    if output.utc {
        t.to_utc()?;
    }
    if output.json {
        println!("{}", serde_json::to_string_pretty(&to_json(&t)?)?);
    } else {
        println!("{}", t);
    }
    Ok(())
}

fn to_json(t: &EpochValue) -> anyhow::Result<serde_json::Value> {
    let mut fields = serde_json::to_value(t.calendar())?;
    if let serde_json::Value::Object(map) = &mut fields {
        map.insert("usec".to_string(), json!(t.microseconds()));
        map.insert("zone".to_string(), json!(t.zone_name()));
        map.insert("utc".to_string(), json!(t.is_utc()));
        map.insert("to_i".to_string(), numeric_json(&t.to_i()?));
        // null on hosts without floats
        let to_f = t.to_f().ok().map_or(serde_json::Value::Null, |f| numeric_json(&f));
        map.insert("to_f".to_string(), to_f);
        map.insert("to_s".to_string(), json!(t.to_string()));
        map.insert("asctime".to_string(), json!(t.asctime()));
        map.insert("hash".to_string(), json!(t.hash_code()));
    }
    Ok(fields)
}

/// Big integers go out as strings; JSON numbers cannot carry them.
fn numeric_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Int(i) => json!(i),
        Value::Float(f) => json!(f),
        other => json!(other.to_string()),
    }
}
